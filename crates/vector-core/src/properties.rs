//! Per-node bundles of attribute timelines.
//!
//! Every animatable attribute of a node kind owns an optional [`Timeline`]. Evaluating a
//! bundle folds over the attributes independently: an attribute without keyframes keeps the
//! caller supplied default, so the returned record is always fully populated.

use std::time::Duration;
use vector_data::impl_structural;
use vector_data::model::{Color, PathData, Timeline};

use crate::animatable::Animator;

fn copy<T: Copy>(v: &T) -> T {
    *v
}

fn unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

// ================================================================================================
// Root
// ================================================================================================

#[derive(Debug, Clone, Copy)]
pub struct RootAttributes {
    pub alpha: f32,
}

impl Default for RootAttributes {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl_structural!(RootAttributes { alpha });

#[derive(Debug, Clone, Default)]
pub struct RootProperties {
    pub alpha: Option<Timeline<f32>>,
}

impl_structural!(RootProperties { alpha });

impl RootProperties {
    pub fn evaluate(
        &self,
        progress: f32,
        duration: Duration,
        defaults: &RootAttributes,
    ) -> RootAttributes {
        RootAttributes {
            alpha: unit(Animator::resolve(
                self.alpha.as_ref(),
                progress,
                duration,
                copy,
                defaults.alpha,
            )),
        }
    }
}

// ================================================================================================
// Group
// ================================================================================================

#[derive(Debug, Clone, Copy)]
pub struct GroupAttributes {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub pivot_x: f32,
    pub pivot_y: f32,
    /// Degrees, clockwise in a y-down space.
    pub rotation: f32,
}

impl Default for GroupAttributes {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
            rotation: 0.0,
        }
    }
}

impl_structural!(GroupAttributes {
    translate_x,
    translate_y,
    scale_x,
    scale_y,
    pivot_x,
    pivot_y,
    rotation,
});

#[derive(Debug, Clone, Default)]
pub struct GroupProperties {
    pub translate_x: Option<Timeline<f32>>,
    pub translate_y: Option<Timeline<f32>>,
    pub scale_x: Option<Timeline<f32>>,
    pub scale_y: Option<Timeline<f32>>,
    pub pivot_x: Option<Timeline<f32>>,
    pub pivot_y: Option<Timeline<f32>>,
    pub rotation: Option<Timeline<f32>>,
}

impl_structural!(GroupProperties {
    translate_x,
    translate_y,
    scale_x,
    scale_y,
    pivot_x,
    pivot_y,
    rotation,
});

impl GroupProperties {
    pub fn evaluate(
        &self,
        progress: f32,
        duration: Duration,
        defaults: &GroupAttributes,
    ) -> GroupAttributes {
        let scalar = |timeline: &Option<Timeline<f32>>, default: f32| {
            Animator::resolve(timeline.as_ref(), progress, duration, copy, default)
        };

        GroupAttributes {
            translate_x: scalar(&self.translate_x, defaults.translate_x),
            translate_y: scalar(&self.translate_y, defaults.translate_y),
            scale_x: scalar(&self.scale_x, defaults.scale_x),
            scale_y: scalar(&self.scale_y, defaults.scale_y),
            pivot_x: scalar(&self.pivot_x, defaults.pivot_x),
            pivot_y: scalar(&self.pivot_y, defaults.pivot_y),
            rotation: scalar(&self.rotation, defaults.rotation),
        }
    }
}

// ================================================================================================
// Path
// ================================================================================================

#[derive(Debug, Clone)]
pub struct PathAttributes {
    pub path_data: PathData,
    pub fill_color: Option<Color>,
    pub fill_alpha: f32,
    pub stroke_color: Option<Color>,
    pub stroke_alpha: f32,
    pub stroke_width: f32,
    pub trim_start: f32,
    pub trim_end: f32,
    pub trim_offset: f32,
}

impl PathAttributes {
    pub fn new(path_data: PathData) -> Self {
        Self {
            path_data,
            fill_color: None,
            fill_alpha: 1.0,
            stroke_color: None,
            stroke_alpha: 1.0,
            stroke_width: 0.0,
            trim_start: 0.0,
            trim_end: 1.0,
            trim_offset: 0.0,
        }
    }
}

impl Default for PathAttributes {
    fn default() -> Self {
        Self::new(PathData::default())
    }
}

impl_structural!(PathAttributes {
    path_data,
    fill_color,
    fill_alpha,
    stroke_color,
    stroke_alpha,
    stroke_width,
    trim_start,
    trim_end,
    trim_offset,
});

#[derive(Debug, Clone, Default)]
pub struct PathProperties {
    pub path_data: Option<Timeline<PathData>>,
    pub fill_color: Option<Timeline<Color>>,
    pub fill_alpha: Option<Timeline<f32>>,
    pub stroke_color: Option<Timeline<Color>>,
    pub stroke_alpha: Option<Timeline<f32>>,
    pub stroke_width: Option<Timeline<f32>>,
    pub trim_start: Option<Timeline<f32>>,
    pub trim_end: Option<Timeline<f32>>,
    pub trim_offset: Option<Timeline<f32>>,
}

impl_structural!(PathProperties {
    path_data,
    fill_color,
    fill_alpha,
    stroke_color,
    stroke_alpha,
    stroke_width,
    trim_start,
    trim_end,
    trim_offset,
});

impl PathProperties {
    /// Alphas and trims come back clamped to `[0, 1]`, the stroke width to `>= 0`.
    pub fn evaluate(
        &self,
        progress: f32,
        duration: Duration,
        defaults: &PathAttributes,
    ) -> PathAttributes {
        let scalar = |timeline: &Option<Timeline<f32>>, default: f32| {
            Animator::resolve(timeline.as_ref(), progress, duration, copy, default)
        };
        let color = |timeline: &Option<Timeline<Color>>, default: Option<Color>| {
            Animator::resolve(timeline.as_ref(), progress, duration, |c| Some(*c), default)
        };

        PathAttributes {
            path_data: Animator::resolve(
                self.path_data.as_ref(),
                progress,
                duration,
                PathData::clone,
                defaults.path_data.clone(),
            ),
            fill_color: color(&self.fill_color, defaults.fill_color),
            fill_alpha: unit(scalar(&self.fill_alpha, defaults.fill_alpha)),
            stroke_color: color(&self.stroke_color, defaults.stroke_color),
            stroke_alpha: unit(scalar(&self.stroke_alpha, defaults.stroke_alpha)),
            stroke_width: scalar(&self.stroke_width, defaults.stroke_width).max(0.0),
            trim_start: unit(scalar(&self.trim_start, defaults.trim_start)),
            trim_end: unit(scalar(&self.trim_end, defaults.trim_end)),
            trim_offset: unit(scalar(&self.trim_offset, defaults.trim_offset)),
        }
    }
}

// ================================================================================================
// Clip path
// ================================================================================================

#[derive(Debug, Clone, Default)]
pub struct ClipPathProperties {
    pub path_data: Option<Timeline<PathData>>,
}

impl_structural!(ClipPathProperties { path_data });

impl ClipPathProperties {
    pub fn evaluate(&self, progress: f32, duration: Duration, default: &PathData) -> PathData {
        Animator::resolve(
            self.path_data.as_ref(),
            progress,
            duration,
            PathData::clone,
            default.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vector_data::model::Keyframe;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_unanimated_attributes_keep_defaults() {
        let defaults = GroupAttributes {
            translate_x: 3.0,
            rotation: 45.0,
            ..Default::default()
        };
        let props = GroupProperties::default();
        for p in [0.0, 0.5, 1.0] {
            assert_eq!(props.evaluate(p, SECOND, &defaults), defaults);
        }
    }

    #[test]
    fn test_attributes_animate_independently() {
        let props = GroupProperties {
            rotation: Some(Timeline::between(0.0, 90.0)),
            scale_x: Some(Timeline::window(
                Duration::from_millis(500),
                Duration::from_millis(500),
                vec![Keyframe::new(0.0, 1.0), Keyframe::new(1.0, 2.0)],
            )),
            ..Default::default()
        };
        let resolved = props.evaluate(0.5, SECOND, &GroupAttributes::default());
        assert_eq!(resolved.rotation, 45.0);
        assert_eq!(resolved.scale_x, 1.0);
        assert_eq!(resolved.scale_y, 1.0);
        assert_eq!(resolved.translate_x, 0.0);
    }

    #[test]
    fn test_path_values_are_clamped() {
        let props = PathProperties {
            fill_alpha: Some(Timeline::between(0.0, 4.0)),
            stroke_width: Some(Timeline::between(-2.0, -2.0)),
            trim_end: Some(Timeline::between(1.0, 3.0)),
            ..Default::default()
        };
        let resolved = props.evaluate(1.0, SECOND, &PathAttributes::default());
        assert_eq!(resolved.fill_alpha, 1.0);
        assert_eq!(resolved.stroke_width, 0.0);
        assert_eq!(resolved.trim_end, 1.0);
    }

    #[test]
    fn test_color_timeline_fills_missing_default() {
        let props = PathProperties {
            fill_color: Some(Timeline::between(Color::BLACK, Color::WHITE)),
            ..Default::default()
        };
        let resolved = props.evaluate(0.0, SECOND, &PathAttributes::default());
        assert_eq!(resolved.fill_color, Some(Color::BLACK));
        assert_eq!(resolved.stroke_color, None);
    }

    #[test]
    fn test_root_alpha_clamped() {
        let props = RootProperties {
            alpha: Some(Timeline::between(-1.0, 0.0)),
        };
        let resolved = props.evaluate(0.0, SECOND, &RootAttributes::default());
        assert_eq!(resolved.alpha, 0.0);
    }
}
