use glam::{Mat3, Vec2};
use kurbo::{Point, Rect, Size};
use std::time::Duration;
use tracing::trace;
use vector_data::model::Color;

use crate::element::{ClipPathElement, GroupElement, PathElement, RootVectorElement, VectorElement};
use crate::geometry::{PathGeometry, TrimWindow};
use crate::properties::{GroupAttributes, PathAttributes};
use crate::surface::{BlendMode, DrawingSurface, LayerPaint, PaintStyle, PathPaint, StrokeStyle};

impl GroupAttributes {
    /// `T(translate + pivot) * R(rotation) * S(scale) * T(-pivot)`.
    pub fn local_matrix(&self) -> Mat3 {
        let pivot = Vec2::new(self.pivot_x, self.pivot_y);
        let translate = Vec2::new(self.translate_x, self.translate_y);

        Mat3::from_translation(translate + pivot)
            * Mat3::from_rotation_z(self.rotation.to_radians())
            * Mat3::from_scale(Vec2::new(self.scale_x, self.scale_y))
            * Mat3::from_translation(-pivot)
    }
}

impl PathAttributes {
    pub fn trim_window(&self) -> TrimWindow {
        TrimWindow::new(self.trim_start, self.trim_end, self.trim_offset)
    }
}

impl VectorElement {
    /// Paints this subtree in tree order. `size` bounds the root layer.
    pub fn paint<S: DrawingSurface>(
        &self,
        surface: &mut S,
        size: Size,
        progress: f32,
        duration: Duration,
    ) -> Result<(), S::Error> {
        match self {
            VectorElement::Root(root) => root.paint(surface, size, progress, duration),
            VectorElement::Group(group) => group.paint(surface, size, progress, duration),
            VectorElement::Path(path) => path.paint(surface, progress, duration),
            VectorElement::ClipPath(clip) => clip.paint(surface, progress, duration),
        }
    }
}

fn paint_children<S: DrawingSurface>(
    children: &[VectorElement],
    surface: &mut S,
    size: Size,
    progress: f32,
    duration: Duration,
) -> Result<(), S::Error> {
    for child in children {
        child.paint(surface, size, progress, duration)?;
    }
    Ok(())
}

impl RootVectorElement {
    /// Children are composited inside one layer modulated by the root alpha, so overlapping
    /// children fade as a whole.
    pub fn paint<S: DrawingSurface>(
        &self,
        surface: &mut S,
        size: Size,
        progress: f32,
        duration: Duration,
    ) -> Result<(), S::Error> {
        let attributes = self.properties.evaluate(progress, duration, &self.attributes);
        let layer = LayerPaint {
            tint: Color::WHITE.multiply_alpha(attributes.alpha),
            blend: BlendMode::Modulate,
        };

        surface.save_layer(Rect::from_origin_size(Point::ORIGIN, size), &layer)?;
        paint_children(&self.elements, surface, size, progress, duration)?;
        surface.restore()
    }
}

impl GroupElement {
    pub fn paint<S: DrawingSurface>(
        &self,
        surface: &mut S,
        size: Size,
        progress: f32,
        duration: Duration,
    ) -> Result<(), S::Error> {
        let attributes = self.properties.evaluate(progress, duration, &self.attributes);

        surface.save()?;
        surface.concat(attributes.local_matrix())?;
        paint_children(&self.elements, surface, size, progress, duration)?;
        surface.restore()
    }
}

impl PathElement {
    /// Fill first over the whole path, then the stroke over the trimmed path.
    pub fn paint<S: DrawingSurface>(
        &self,
        surface: &mut S,
        progress: f32,
        duration: Duration,
    ) -> Result<(), S::Error> {
        let attributes = self.properties().evaluate(progress, duration, self.attributes());

        let fill = PathPaint {
            color: attributes
                .fill_color
                .unwrap_or(Color::TRANSPARENT)
                .multiply_alpha(attributes.fill_alpha),
            style: PaintStyle::Fill,
        };
        surface.draw_path(&attributes.path_data.to_bez_path(), &fill)?;

        let stroke_color = match attributes.stroke_color {
            Some(color) if attributes.stroke_width > 0.0 => color,
            _ => {
                trace!(
                    width = attributes.stroke_width,
                    has_color = attributes.stroke_color.is_some(),
                    "stroke skipped"
                );
                return Ok(());
            }
        };

        let stroke = PathPaint {
            color: stroke_color.multiply_alpha(attributes.stroke_alpha),
            style: PaintStyle::Stroke(StrokeStyle {
                width: attributes.stroke_width,
                cap: self.stroke_cap(),
                join: self.stroke_join(),
                miter_limit: self.stroke_miter_limit(),
            }),
        };
        let geometry = attributes.path_data.trimmed(attributes.trim_window());
        surface.draw_path(&geometry, &stroke)
    }
}

impl ClipPathElement {
    /// Intersects the clip of the enclosing scope; affects later siblings until their parent
    /// restores.
    pub fn paint<S: DrawingSurface>(
        &self,
        surface: &mut S,
        progress: f32,
        duration: Duration,
    ) -> Result<(), S::Error> {
        let path_data = self.properties.evaluate(progress, duration, &self.path_data);
        surface.clip_path(&path_data.to_bez_path())
    }
}
