use glam::Mat3;
use kurbo::{BezPath, Rect};
use vector_data::model::{Color, StrokeCap, StrokeJoin};

/// The drawing target consumed by the paint dispatcher.
///
/// Calls arrive in tree order. `restore` pops the state pushed by the matching `save` or
/// `save_layer`; a popped layer is composited into its parent.
pub trait DrawingSurface {
    type Error;

    fn save(&mut self) -> Result<(), Self::Error>;
    fn restore(&mut self) -> Result<(), Self::Error>;

    /// Pre-concatenates `transform` with the current matrix.
    fn concat(&mut self, transform: Mat3) -> Result<(), Self::Error>;

    /// Pushes an isolated layer covering `bounds`.
    fn save_layer(&mut self, bounds: Rect, paint: &LayerPaint) -> Result<(), Self::Error>;

    /// Intersects the current clip with `path`.
    fn clip_path(&mut self, path: &BezPath) -> Result<(), Self::Error>;

    fn draw_path(&mut self, path: &BezPath, paint: &PathPaint) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    SrcOver,
    /// Multiplies every channel of the source with the tint.
    Modulate,
}

/// How a layer is folded back into its parent: its content is blended with `tint` using
/// `blend`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerPaint {
    pub tint: Color,
    pub blend: BlendMode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: StrokeCap,
    pub join: StrokeJoin,
    pub miter_limit: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintStyle {
    Fill,
    Stroke(StrokeStyle),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPaint {
    /// Final color, intrinsic alpha already multiplied by the element alpha.
    pub color: Color,
    pub style: PaintStyle,
}

impl PathPaint {
    pub fn is_stroke(&self) -> bool {
        matches!(self.style, PaintStyle::Stroke(_))
    }
}
