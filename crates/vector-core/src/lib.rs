//! Scene graph and temporal evaluation engine for animated vector drawables.
//!
//! A tree of [`VectorElement`]s is resolved against a progress in `[0, 1]` and painted into
//! any [`DrawingSurface`]. Nothing is mutated along the way: trees can be shared across
//! threads and evaluated concurrently.

pub mod animatable;
pub mod element;
pub mod errors;
pub mod geometry;
pub mod paint;
pub mod player;
pub mod properties;
pub mod recording;
pub mod scene;
pub mod surface;

pub use animatable::{Animator, Interpolatable};
pub use element::{
    ClipPathElement, GroupElement, PathElement, PathElementBuilder, RootVectorElement,
    VectorElement,
};
pub use errors::VectorError;
pub use geometry::{PathGeometry, TrimWindow};
pub use player::{PlayerConfig, RepeatMode, VectorPlayer};
pub use properties::{
    ClipPathProperties, GroupAttributes, GroupProperties, PathAttributes, PathProperties,
    RootAttributes, RootProperties,
};
pub use recording::{DrawOp, RecordingSurface};
pub use scene::AnimatedVectorData;
pub use surface::{BlendMode, DrawingSurface, LayerPaint, PaintStyle, PathPaint, StrokeStyle};
pub use vector_data;
