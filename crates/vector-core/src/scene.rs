use kurbo::Size;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use tracing::{debug, instrument};
use vector_data::structural::StructuralEq;

use crate::element::RootVectorElement;
use crate::surface::DrawingSurface;

/// A complete animated vector: the tree, the timing domain its timelines are expressed in,
/// and the size of its drawing space.
#[derive(Debug, Clone)]
pub struct AnimatedVectorData {
    pub root: RootVectorElement,
    pub duration: Duration,
    pub viewport_size: Size,
}

impl AnimatedVectorData {
    pub fn new(root: RootVectorElement, duration: Duration, viewport_size: Size) -> Self {
        Self {
            root,
            duration,
            viewport_size,
        }
    }

    /// `time / duration`, unclamped. A zero duration always maps to `0`.
    pub fn progress_at(&self, time: Duration) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (time.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }

    /// Paints one frame of the tree into `surface`.
    #[instrument(skip_all, fields(progress = progress))]
    pub fn paint<S: DrawingSurface>(
        &self,
        surface: &mut S,
        size: Size,
        progress: f32,
        duration: Duration,
    ) -> Result<(), S::Error> {
        self.root.paint(surface, size, progress, duration)?;
        debug!("[Frame] render complete");
        Ok(())
    }

    /// Paints the frame at `time` over the viewport, using the scene's own duration.
    pub fn paint_at<S: DrawingSurface>(
        &self,
        surface: &mut S,
        time: Duration,
    ) -> Result<(), S::Error> {
        self.paint(
            surface,
            self.viewport_size,
            self.progress_at(time),
            self.duration,
        )
    }

    /// The whole tree resolved at `progress`. Painting the result at any progress draws the
    /// same frame, so it can be cached and compared.
    pub fn evaluate(&self, progress: f32) -> AnimatedVectorData {
        AnimatedVectorData {
            root: self.root.resolve(progress, self.duration),
            duration: self.duration,
            viewport_size: self.viewport_size,
        }
    }
}

impl PartialEq for AnimatedVectorData {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.duration == other.duration
            && self.viewport_size.width.structural_eq(&other.viewport_size.width)
            && self.viewport_size.height.structural_eq(&other.viewport_size.height)
    }
}

impl Eq for AnimatedVectorData {}

impl Hash for AnimatedVectorData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.duration.hash(state);
        self.viewport_size.width.structural_hash(state);
        self.viewport_size.height.structural_hash(state);
    }
}
