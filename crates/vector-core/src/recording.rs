//! A [`DrawingSurface`] that records every call, for tests and frame diffing.

use glam::Mat3;
use kurbo::{BezPath, Rect};
use std::convert::Infallible;

use crate::surface::{DrawingSurface, LayerPaint, PathPaint};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Concat(Mat3),
    SaveLayer { bounds: Rect, paint: LayerPaint },
    ClipPath(BezPath),
    DrawPath { path: BezPath, paint: PathPaint },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    // Current matrix per open save scope, innermost last.
    matrices: Vec<Mat3>,
    current: Mat3,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// The `DrawPath` calls, in order.
    pub fn draw_calls(&self) -> Vec<(&BezPath, &PathPaint)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::DrawPath { path, paint } => Some((path, paint)),
                _ => None,
            })
            .collect()
    }

    /// Product of every concat still in scope.
    pub fn current_transform(&self) -> Mat3 {
        self.current
    }

    /// Open save or layer scopes.
    pub fn depth(&self) -> usize {
        self.matrices.len()
    }
}

impl DrawingSurface for RecordingSurface {
    type Error = Infallible;

    fn save(&mut self) -> Result<(), Self::Error> {
        self.matrices.push(self.current);
        self.ops.push(DrawOp::Save);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Self::Error> {
        if let Some(m) = self.matrices.pop() {
            self.current = m;
        }
        self.ops.push(DrawOp::Restore);
        Ok(())
    }

    fn concat(&mut self, transform: Mat3) -> Result<(), Self::Error> {
        self.current *= transform;
        self.ops.push(DrawOp::Concat(transform));
        Ok(())
    }

    fn save_layer(&mut self, bounds: Rect, paint: &LayerPaint) -> Result<(), Self::Error> {
        self.matrices.push(self.current);
        self.ops.push(DrawOp::SaveLayer {
            bounds,
            paint: *paint,
        });
        Ok(())
    }

    fn clip_path(&mut self, path: &BezPath) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::ClipPath(path.clone()));
        Ok(())
    }

    fn draw_path(&mut self, path: &BezPath, paint: &PathPaint) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::DrawPath {
            path: path.clone(),
            paint: *paint,
        });
        Ok(())
    }
}
