use kurbo::Size;
use skia_safe::{surfaces, EncodedImageFormat, Rect, Surface};
use std::time::Duration;
use vector_core::vector_data::model::{Color, PathData, Timeline};
use vector_core::{
    AnimatedVectorData, ClipPathElement, GroupAttributes, GroupElement, PathElement,
    RootProperties, RootVectorElement,
};
use vector_skia::SkiaRenderer;

const SIZE: i32 = 100;

fn square(x: f32, y: f32, side: f32) -> PathData {
    PathData::new()
        .move_to(x, y)
        .line_to(x + side, y)
        .line_to(x + side, y + side)
        .line_to(x, y + side)
        .close()
}

fn render(data: &AnimatedVectorData, progress: f32) -> Surface {
    let mut surface =
        surfaces::raster_n32_premul((SIZE, SIZE)).expect("Failed to create surface");
    let dest_rect = Rect::from_wh(SIZE as f32, SIZE as f32);
    SkiaRenderer::draw(surface.canvas(), data, dest_rect, progress);
    surface
}

fn pixel(surface: &mut Surface, x: i32, y: i32) -> skia_safe::Color {
    surface
        .peek_pixels()
        .expect("Raster surface exposes its pixels")
        .get_color((x, y))
}

#[test]
fn test_root_alpha_halves_coverage() {
    let path = PathElement::builder(square(0.0, 0.0, 100.0))
        .fill_color(Color::rgb(1.0, 0.0, 0.0))
        .build()
        .unwrap();
    let root = RootVectorElement::new(vec![path.into()]).with_properties(RootProperties {
        alpha: Some(Timeline::between(0.0, 1.0)),
    });
    let data = AnimatedVectorData::new(root, Duration::from_secs(1), Size::new(100.0, 100.0));

    let mut surface = render(&data, 0.5);
    let c = pixel(&mut surface, 50, 50);
    assert!((c.a() as i32 - 128).abs() <= 2, "alpha {}", c.a());
    assert!(c.r() > 250);
}

#[test]
fn test_group_transform_and_clip() {
    // A 20x20 square and a 60x60 clip, both moved right by 50.
    let group = GroupElement::new(vec![
        ClipPathElement::new(square(0.0, 0.0, 60.0)).into(),
        PathElement::builder(square(0.0, 0.0, 20.0))
            .fill_color(Color::BLACK)
            .build()
            .unwrap()
            .into(),
    ])
    .with_attributes(GroupAttributes {
        translate_x: 50.0,
        ..Default::default()
    });
    let data = AnimatedVectorData::new(
        RootVectorElement::new(vec![group.into()]),
        Duration::from_secs(1),
        Size::new(100.0, 100.0),
    );

    let mut surface = render(&data, 0.0);
    assert_eq!(pixel(&mut surface, 55, 10).a(), 255);
    // The clip ends at x = 110, so the square stays whole.
    assert_eq!(pixel(&mut surface, 65, 10).a(), 255);
    assert_eq!(pixel(&mut surface, 10, 10).a(), 0);
    assert_eq!(pixel(&mut surface, 75, 10).a(), 0);
}

#[test]
fn test_viewport_scales_into_destination() {
    let path = PathElement::builder(square(0.0, 0.0, 10.0))
        .fill_color(Color::BLACK)
        .build()
        .unwrap();
    let data = AnimatedVectorData::new(
        RootVectorElement::new(vec![path.into()]),
        Duration::from_secs(1),
        Size::new(20.0, 20.0),
    );

    // The 10x10 square covers the top-left quarter of the 100x100 target.
    let mut surface = render(&data, 0.0);
    assert_eq!(pixel(&mut surface, 45, 45).a(), 255);
    assert_eq!(pixel(&mut surface, 55, 55).a(), 0);
}

#[test]
fn test_encode_trimmed_stroke() {
    let path = PathElement::builder(square(10.0, 10.0, 80.0))
        .stroke_color(Color::rgb(0.0, 0.0, 1.0))
        .stroke_width(6.0)
        .trim(0.0, 0.5, 0.0)
        .build()
        .unwrap();
    let data = AnimatedVectorData::new(
        RootVectorElement::new(vec![path.into()]),
        Duration::from_secs(1),
        Size::new(100.0, 100.0),
    );

    let mut surface = render(&data, 0.0);
    // Top and right edges are stroked, bottom and left are not.
    assert_eq!(pixel(&mut surface, 50, 10).a(), 255);
    assert_eq!(pixel(&mut surface, 90, 50).a(), 255);
    assert_eq!(pixel(&mut surface, 50, 90).a(), 0);
    assert_eq!(pixel(&mut surface, 10, 50).a(), 0);

    let image = surface.image_snapshot();
    let png = image
        .encode(None, EncodedImageFormat::PNG, 100)
        .expect("Failed to encode image");
    assert!(!png.as_bytes().is_empty());
}
