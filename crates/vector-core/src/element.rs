//! The vector element tree and its evaluation.
//!
//! Nodes are immutable values. `evaluate` returns a new node of the same kind whose
//! attributes are resolved for one `(progress, duration)` pair and whose property sets are
//! empty; children are carried over unevaluated. `resolve` does the same for the whole subtree.
//!
//! Equality and hashing are structural and order sensitive: two parents holding the same
//! children in a different order are different trees, matching the paint order.

use std::hash::{Hash, Hasher};
use std::time::Duration;
use vector_data::impl_structural;
use vector_data::model::{Color, PathData, StrokeCap, StrokeJoin};
use vector_data::structural::StructuralEq;

use crate::errors::VectorError;
use crate::properties::{
    ClipPathProperties, GroupAttributes, GroupProperties, PathAttributes, PathProperties,
    RootAttributes, RootProperties,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VectorElement {
    Root(RootVectorElement),
    Group(GroupElement),
    Path(PathElement),
    ClipPath(ClipPathElement),
}

impl StructuralEq for VectorElement {
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

impl VectorElement {
    /// Resolves this node's attributes, keeping its children as they are.
    pub fn evaluate(&self, progress: f32, duration: Duration) -> VectorElement {
        match self {
            VectorElement::Root(root) => VectorElement::Root(root.evaluate(progress, duration)),
            VectorElement::Group(group) => {
                VectorElement::Group(group.evaluate(progress, duration))
            }
            VectorElement::Path(path) => VectorElement::Path(path.evaluate(progress, duration)),
            VectorElement::ClipPath(clip) => {
                VectorElement::ClipPath(clip.evaluate(progress, duration))
            }
        }
    }

    /// Resolves this node and every descendant.
    pub fn resolve(&self, progress: f32, duration: Duration) -> VectorElement {
        match self {
            VectorElement::Root(root) => VectorElement::Root(root.resolve(progress, duration)),
            VectorElement::Group(group) => VectorElement::Group(group.resolve(progress, duration)),
            // Leaves have no children, so both evaluations coincide.
            _ => self.evaluate(progress, duration),
        }
    }

    pub fn children(&self) -> &[VectorElement] {
        match self {
            VectorElement::Root(root) => &root.elements,
            VectorElement::Group(group) => &group.elements,
            VectorElement::Path(_) | VectorElement::ClipPath(_) => &[],
        }
    }
}

impl From<RootVectorElement> for VectorElement {
    fn from(v: RootVectorElement) -> Self {
        VectorElement::Root(v)
    }
}

impl From<GroupElement> for VectorElement {
    fn from(v: GroupElement) -> Self {
        VectorElement::Group(v)
    }
}

impl From<PathElement> for VectorElement {
    fn from(v: PathElement) -> Self {
        VectorElement::Path(v)
    }
}

impl From<ClipPathElement> for VectorElement {
    fn from(v: ClipPathElement) -> Self {
        VectorElement::ClipPath(v)
    }
}

fn resolve_all(
    elements: &[VectorElement],
    progress: f32,
    duration: Duration,
) -> Vec<VectorElement> {
    elements
        .iter()
        .map(|e| e.resolve(progress, duration))
        .collect()
}

// ================================================================================================
// Root
// ================================================================================================

#[derive(Debug, Clone, Default)]
pub struct RootVectorElement {
    pub attributes: RootAttributes,
    pub properties: RootProperties,
    pub elements: Vec<VectorElement>,
}

impl_structural!(RootVectorElement {
    attributes,
    properties,
    elements,
});

impl RootVectorElement {
    pub fn new(elements: Vec<VectorElement>) -> Self {
        Self {
            elements,
            ..Default::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.attributes.alpha = alpha;
        self
    }

    pub fn with_properties(mut self, properties: RootProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn evaluate(&self, progress: f32, duration: Duration) -> RootVectorElement {
        self.evaluated_with(self.elements.clone(), progress, duration)
    }

    pub fn resolve(&self, progress: f32, duration: Duration) -> RootVectorElement {
        self.evaluated_with(resolve_all(&self.elements, progress, duration), progress, duration)
    }

    fn evaluated_with(
        &self,
        elements: Vec<VectorElement>,
        progress: f32,
        duration: Duration,
    ) -> RootVectorElement {
        RootVectorElement {
            attributes: self.properties.evaluate(progress, duration, &self.attributes),
            properties: RootProperties::default(),
            elements,
        }
    }
}

// ================================================================================================
// Group
// ================================================================================================

#[derive(Debug, Clone, Default)]
pub struct GroupElement {
    pub attributes: GroupAttributes,
    pub properties: GroupProperties,
    pub elements: Vec<VectorElement>,
}

impl_structural!(GroupElement {
    attributes,
    properties,
    elements,
});

impl GroupElement {
    pub fn new(elements: Vec<VectorElement>) -> Self {
        Self {
            elements,
            ..Default::default()
        }
    }

    pub fn with_attributes(mut self, attributes: GroupAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_properties(mut self, properties: GroupProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn evaluate(&self, progress: f32, duration: Duration) -> GroupElement {
        self.evaluated_with(self.elements.clone(), progress, duration)
    }

    pub fn resolve(&self, progress: f32, duration: Duration) -> GroupElement {
        self.evaluated_with(resolve_all(&self.elements, progress, duration), progress, duration)
    }

    fn evaluated_with(
        &self,
        elements: Vec<VectorElement>,
        progress: f32,
        duration: Duration,
    ) -> GroupElement {
        GroupElement {
            attributes: self.properties.evaluate(progress, duration, &self.attributes),
            properties: GroupProperties::default(),
            elements,
        }
    }
}

// ================================================================================================
// Path
// ================================================================================================

/// A filled and/or stroked path. Built through [`PathElement::builder`], which validates the
/// trim window.
#[derive(Debug, Clone)]
pub struct PathElement {
    attributes: PathAttributes,
    stroke_cap: StrokeCap,
    stroke_join: StrokeJoin,
    stroke_miter_limit: f32,
    properties: PathProperties,
}

impl_structural!(PathElement {
    attributes,
    stroke_cap,
    stroke_join,
    stroke_miter_limit,
    properties,
});

impl PathElement {
    pub fn builder(path_data: PathData) -> PathElementBuilder {
        PathElementBuilder::new(path_data)
    }

    pub fn attributes(&self) -> &PathAttributes {
        &self.attributes
    }

    pub fn properties(&self) -> &PathProperties {
        &self.properties
    }

    pub fn stroke_cap(&self) -> StrokeCap {
        self.stroke_cap
    }

    pub fn stroke_join(&self) -> StrokeJoin {
        self.stroke_join
    }

    pub fn stroke_miter_limit(&self) -> f32 {
        self.stroke_miter_limit
    }

    pub fn evaluate(&self, progress: f32, duration: Duration) -> PathElement {
        PathElement {
            attributes: self.properties.evaluate(progress, duration, &self.attributes),
            stroke_cap: self.stroke_cap,
            stroke_join: self.stroke_join,
            stroke_miter_limit: self.stroke_miter_limit,
            properties: PathProperties::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathElementBuilder {
    attributes: PathAttributes,
    stroke_cap: StrokeCap,
    stroke_join: StrokeJoin,
    stroke_miter_limit: f32,
    properties: PathProperties,
}

impl PathElementBuilder {
    pub fn new(path_data: PathData) -> Self {
        Self {
            attributes: PathAttributes::new(path_data),
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            stroke_miter_limit: 4.0,
            properties: PathProperties::default(),
        }
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.attributes.fill_color = Some(color);
        self
    }

    pub fn fill_alpha(mut self, alpha: f32) -> Self {
        self.attributes.fill_alpha = alpha;
        self
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.attributes.stroke_color = Some(color);
        self
    }

    pub fn stroke_alpha(mut self, alpha: f32) -> Self {
        self.attributes.stroke_alpha = alpha;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.attributes.stroke_width = width;
        self
    }

    pub fn stroke_cap(mut self, cap: StrokeCap) -> Self {
        self.stroke_cap = cap;
        self
    }

    pub fn stroke_join(mut self, join: StrokeJoin) -> Self {
        self.stroke_join = join;
        self
    }

    pub fn stroke_miter_limit(mut self, limit: f32) -> Self {
        self.stroke_miter_limit = limit;
        self
    }

    pub fn trim(mut self, start: f32, end: f32, offset: f32) -> Self {
        self.attributes.trim_start = start;
        self.attributes.trim_end = end;
        self.attributes.trim_offset = offset;
        self
    }

    pub fn properties(mut self, properties: PathProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn build(self) -> Result<PathElement, VectorError> {
        for (name, value) in [
            ("trim_start", self.attributes.trim_start),
            ("trim_end", self.attributes.trim_end),
            ("trim_offset", self.attributes.trim_offset),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(VectorError::TrimOutOfRange { name, value });
            }
        }

        Ok(PathElement {
            attributes: self.attributes,
            stroke_cap: self.stroke_cap,
            stroke_join: self.stroke_join,
            stroke_miter_limit: self.stroke_miter_limit,
            properties: self.properties,
        })
    }
}

// ================================================================================================
// Clip path
// ================================================================================================

#[derive(Debug, Clone, Default)]
pub struct ClipPathElement {
    pub path_data: PathData,
    pub properties: ClipPathProperties,
}

impl_structural!(ClipPathElement {
    path_data,
    properties,
});

impl ClipPathElement {
    pub fn new(path_data: PathData) -> Self {
        Self {
            path_data,
            properties: ClipPathProperties::default(),
        }
    }

    pub fn with_properties(mut self, properties: ClipPathProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn evaluate(&self, progress: f32, duration: Duration) -> ClipPathElement {
        ClipPathElement {
            path_data: self.properties.evaluate(progress, duration, &self.path_data),
            properties: ClipPathProperties::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vector_data::model::Timeline;

    const SECOND: Duration = Duration::from_secs(1);

    fn square() -> PathData {
        PathData::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .close()
    }

    #[test]
    fn test_trim_validation() {
        let err = PathElement::builder(square())
            .trim(0.0, 1.5, 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            VectorError::TrimOutOfRange { name: "trim_end", .. }
        ));
        assert!(PathElement::builder(square()).trim(-0.1, 1.0, 0.0).build().is_err());
        assert!(PathElement::builder(square()).trim(0.0, 1.0, f32::NAN).build().is_err());
        assert!(PathElement::builder(square()).trim(0.0, 1.0, 1.0).build().is_ok());
    }

    #[test]
    fn test_evaluate_keeps_children_unevaluated() {
        let child = GroupElement::default().with_properties(GroupProperties {
            rotation: Some(Timeline::between(0.0, 90.0)),
            ..Default::default()
        });
        let root = RootVectorElement::new(vec![child.clone().into()]).with_properties(
            RootProperties {
                alpha: Some(Timeline::between(0.0, 1.0)),
            },
        );

        let evaluated = root.evaluate(0.5, SECOND);
        assert_eq!(evaluated.attributes.alpha, 0.5);
        assert!(evaluated.properties.alpha.is_none());
        assert_eq!(evaluated.elements, vec![VectorElement::Group(child)]);

        let resolved = root.resolve(0.5, SECOND);
        match &resolved.elements[0] {
            VectorElement::Group(g) => {
                assert_eq!(g.attributes.rotation, 45.0);
                assert!(g.properties.rotation.is_none());
            }
            other => panic!("Expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_path_passes_stroke_style_through() {
        let path = PathElement::builder(square())
            .stroke_cap(StrokeCap::Round)
            .stroke_join(StrokeJoin::Bevel)
            .stroke_miter_limit(2.0)
            .properties(PathProperties {
                stroke_width: Some(Timeline::between(0.0, 8.0)),
                ..Default::default()
            })
            .build()
            .unwrap();
        let evaluated = path.evaluate(0.25, SECOND);
        assert_eq!(evaluated.attributes().stroke_width, 2.0);
        assert_eq!(evaluated.stroke_cap(), StrokeCap::Round);
        assert_eq!(evaluated.stroke_join(), StrokeJoin::Bevel);
        assert_eq!(evaluated.stroke_miter_limit(), 2.0);
    }

    #[test]
    fn test_clip_path_morphs() {
        let to = PathData::new()
            .move_to(0.0, 0.0)
            .line_to(20.0, 0.0)
            .line_to(20.0, 20.0)
            .close();
        let clip = ClipPathElement::new(square()).with_properties(ClipPathProperties {
            path_data: Some(Timeline::between(square(), to.clone())),
        });
        assert_eq!(clip.evaluate(1.0, SECOND).path_data, to);
        assert_eq!(clip.evaluate(0.0, SECOND).path_data, square());
    }

    #[test]
    fn test_children_accessor() {
        let leaf: VectorElement = ClipPathElement::new(square()).into();
        assert!(leaf.children().is_empty());
        let group: VectorElement = GroupElement::new(vec![leaf.clone(), leaf]).into();
        assert_eq!(group.children().len(), 2);
    }
}
