use glam::Mat3;
use kurbo::{BezPath, PathEl};
use skia_safe::color_filters::Clamp;
use skia_safe::{
    canvas::SaveLayerRec, color_filters, Canvas, ClipOp, Color4f, Matrix, Paint, PaintStyle,
    Path, Rect,
};
use std::convert::Infallible;
use vector_core::{
    AnimatedVectorData, BlendMode as CoreBlendMode, DrawingSurface, LayerPaint,
    PaintStyle as CorePaintStyle, PathPaint,
};
use vector_data::model::{Color, StrokeCap, StrokeJoin};

pub struct SkiaRenderer;

impl SkiaRenderer {
    /// Draws the frame at `progress` onto `canvas`, fitting the viewport into `dest_rect`.
    pub fn draw(canvas: &Canvas, data: &AnimatedVectorData, dest_rect: Rect, progress: f32) {
        canvas.save();

        let scale_x = sanitize(dest_rect.width() / data.viewport_size.width as f32);
        let scale_y = sanitize(dest_rect.height() / data.viewport_size.height as f32);
        let left = sanitize(dest_rect.left);
        let top = sanitize(dest_rect.top);

        let mut global_matrix = Matrix::translate((left, top));
        global_matrix.pre_scale((scale_x, scale_y), None);
        canvas.concat(&global_matrix);

        let mut surface = SkiaSurface::new(canvas);
        if let Err(never) = data.paint(&mut surface, data.viewport_size, progress, data.duration) {
            match never {}
        }

        canvas.restore();
    }
}

/// [`DrawingSurface`] backed by a Skia canvas. Every call maps onto one canvas call.
pub struct SkiaSurface<'a> {
    canvas: &'a Canvas,
}

impl<'a> SkiaSurface<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &Canvas {
        self.canvas
    }
}

impl DrawingSurface for SkiaSurface<'_> {
    type Error = Infallible;

    fn save(&mut self) -> Result<(), Self::Error> {
        self.canvas.save();
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Self::Error> {
        self.canvas.restore();
        Ok(())
    }

    fn concat(&mut self, transform: Mat3) -> Result<(), Self::Error> {
        self.canvas.concat(&glam_to_skia_matrix(transform));
        Ok(())
    }

    fn save_layer(&mut self, bounds: kurbo::Rect, paint: &LayerPaint) -> Result<(), Self::Error> {
        let bounds = Rect::new(
            sanitize(bounds.x0 as f32),
            sanitize(bounds.y0 as f32),
            sanitize(bounds.x1 as f32),
            sanitize(bounds.y1 as f32),
        );
        let layer_paint = layer_paint(paint);
        self.canvas
            .save_layer(&SaveLayerRec::default().bounds(&bounds).paint(&layer_paint));
        Ok(())
    }

    fn clip_path(&mut self, path: &BezPath) -> Result<(), Self::Error> {
        self.canvas
            .clip_path(&kurbo_to_skia_path(path), ClipOp::Intersect, true);
        Ok(())
    }

    fn draw_path(&mut self, path: &BezPath, paint: &PathPaint) -> Result<(), Self::Error> {
        self.canvas
            .draw_path(&kurbo_to_skia_path(path), &path_paint(paint));
        Ok(())
    }
}

fn layer_paint(layer: &LayerPaint) -> Paint {
    let mut paint = Paint::default();
    match layer.blend {
        CoreBlendMode::SrcOver => {
            paint.set_alpha_f(sanitize(layer.tint.a));
        }
        CoreBlendMode::Modulate => {
            let [r, g, b, a] = layer.tint.to_array().map(sanitize);
            #[rustfmt::skip]
            let matrix = [
                r,   0.0, 0.0, 0.0, 0.0,
                0.0, g,   0.0, 0.0, 0.0,
                0.0, 0.0, b,   0.0, 0.0,
                0.0, 0.0, 0.0, a,   0.0,
            ];
            paint.set_color_filter(color_filters::matrix_row_major(&matrix, Clamp::Yes));
        }
    }
    paint
}

fn path_paint(core: &PathPaint) -> Paint {
    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_color4f(to_color4f(core.color), None);

    match core.style {
        CorePaintStyle::Fill => {
            paint.set_style(PaintStyle::Fill);
        }
        CorePaintStyle::Stroke(stroke) => {
            paint.set_style(PaintStyle::Stroke);
            paint.set_stroke_width(sanitize(stroke.width));
            paint.set_stroke_cap(convert_cap(stroke.cap));
            paint.set_stroke_join(convert_join(stroke.join));
            paint.set_stroke_miter(sanitize(stroke.miter_limit));
        }
    }
    paint
}

// ... helpers ...

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn to_color4f(c: Color) -> Color4f {
    Color4f::new(sanitize(c.r), sanitize(c.g), sanitize(c.b), sanitize(c.a))
}

fn glam_to_skia_matrix(m: Mat3) -> Matrix {
    let c0 = m.x_axis;
    let c1 = m.y_axis;
    let c2 = m.z_axis;

    // Matrix::new_all takes row-major arguments
    Matrix::new_all(
        sanitize(c0.x), sanitize(c1.x), sanitize(c2.x),
        sanitize(c0.y), sanitize(c1.y), sanitize(c2.y),
        sanitize(c0.z), sanitize(c1.z), sanitize(c2.z),
    )
}

fn kurbo_to_skia_path(bez_path: &BezPath) -> Path {
    let mut path = Path::new();
    for el in bez_path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                path.move_to((sanitize(p.x as f32), sanitize(p.y as f32)));
            }
            PathEl::LineTo(p) => {
                path.line_to((sanitize(p.x as f32), sanitize(p.y as f32)));
            }
            PathEl::QuadTo(p1, p2) => {
                path.quad_to(
                    (sanitize(p1.x as f32), sanitize(p1.y as f32)),
                    (sanitize(p2.x as f32), sanitize(p2.y as f32)),
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                path.cubic_to(
                    (sanitize(p1.x as f32), sanitize(p1.y as f32)),
                    (sanitize(p2.x as f32), sanitize(p2.y as f32)),
                    (sanitize(p3.x as f32), sanitize(p3.y as f32)),
                );
            }
            PathEl::ClosePath => {
                path.close();
            }
        }
    }
    path
}

fn convert_cap(cap: StrokeCap) -> skia_safe::PaintCap {
    match cap {
        StrokeCap::Butt => skia_safe::PaintCap::Butt,
        StrokeCap::Round => skia_safe::PaintCap::Round,
        StrokeCap::Square => skia_safe::PaintCap::Square,
    }
}

fn convert_join(join: StrokeJoin) -> skia_safe::PaintJoin {
    match join {
        StrokeJoin::Miter => skia_safe::PaintJoin::Miter,
        StrokeJoin::Round => skia_safe::PaintJoin::Round,
        StrokeJoin::Bevel => skia_safe::PaintJoin::Bevel,
    }
}
