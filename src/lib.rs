//! # Animated Vector
//!
//! `animated-vector` evaluates and paints animated vector drawables.
//!
//! A scene is an immutable tree of groups, paths and clip paths. Every attribute is either
//! static or driven by its own timeline. Painting a frame resolves the tree at a progress
//! in `[0, 1]` and replays it into a [`DrawingSurface`]: the in-memory [`RecordingSurface`],
//! or a Skia canvas with the `skia` feature.

pub use vector_core::*;
pub use vector_data::model;
pub use vector_data::structural;

#[cfg(feature = "skia")]
pub use vector_skia::{SkiaRenderer, SkiaSurface};

#[cfg(feature = "skia")]
pub use skia_safe;
