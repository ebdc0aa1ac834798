#![forbid(unsafe_code)]

//! A [`Canvas`] that records every call and tracks the resulting matrix.
//!
//! The matrix in effect at the innermost `restore` is kept as the content
//! transform, which is what the wrapped list actually drew with.

use serde::Serialize;
use zoomlist_core::geometry::Point;
use zoomlist_widgets::Canvas;

/// One recorded canvas call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasOp {
    Save,
    Translate { dx: f32, dy: f32 },
    Scale { sx: f32, sy: f32 },
    Restore,
}

/// Axis-aligned affine transform: `screen = translate + scale * content`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Map a content-space point to screen space.
    #[must_use]
    pub fn map(&self, p: Point) -> Point {
        Point::new(
            self.translate_x + self.scale_x * p.x,
            self.translate_y + self.scale_y * p.y,
        )
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Vec<CanvasOp>,
    matrix: Matrix,
    stack: Vec<Matrix>,
    content: Option<Matrix>,
    content_depth: usize,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Current matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        self.matrix
    }

    /// Matrix in effect right before the most deeply nested `restore`.
    #[must_use]
    pub fn content_matrix(&self) -> Option<Matrix> {
        self.content
    }

    /// Nesting depth of unmatched `save` calls.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Forget recorded ops, keeping nothing from the previous frame.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.matrix = Matrix::IDENTITY;
        self.stack.clear();
        self.content = None;
        self.content_depth = 0;
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.ops.push(CanvasOp::Save);
        self.stack.push(self.matrix);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(CanvasOp::Translate { dx, dy });
        self.matrix.translate_x += self.matrix.scale_x * dx;
        self.matrix.translate_y += self.matrix.scale_y * dy;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.ops.push(CanvasOp::Scale { sx, sy });
        self.matrix.scale_x *= sx;
        self.matrix.scale_y *= sy;
    }

    fn restore(&mut self) {
        self.ops.push(CanvasOp::Restore);
        let depth = self.stack.len();
        if self.content.is_none() || depth >= self.content_depth {
            self.content = Some(self.matrix);
            self.content_depth = depth;
        }
        self.matrix = self.stack.pop().unwrap_or(Matrix::IDENTITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_then_scale_maps_points() {
        let mut c = RecordingCanvas::new();
        c.save();
        c.translate(-200.0, -300.0);
        c.scale(2.0, 2.0);
        let m = c.matrix();
        assert_eq!(m.map(Point::new(200.0, 300.0)), Point::new(200.0, 300.0));
        assert_eq!(m.map(Point::ZERO), Point::new(-200.0, -300.0));
        c.restore();
        assert_eq!(c.matrix(), Matrix::IDENTITY);
        assert_eq!(c.content_matrix().map(|m| m.scale_x), Some(2.0));
        assert_eq!(c.depth(), 0);
    }

    #[test]
    fn translate_after_scale_is_scaled() {
        let mut c = RecordingCanvas::new();
        c.scale(2.0, 2.0);
        c.translate(10.0, 5.0);
        assert_eq!(c.matrix().translate_x, 20.0);
        assert_eq!(c.matrix().translate_y, 10.0);
    }

    #[test]
    fn content_matrix_is_innermost() {
        let mut c = RecordingCanvas::new();
        c.save();
        c.translate(-100.0, -50.0);
        c.scale(2.0, 2.0);
        c.save();
        c.translate(0.0, -30.0);
        c.restore();
        c.restore();
        let content = c.content_matrix().unwrap();
        assert_eq!(content.translate_y, -110.0);
        assert_eq!(content.scale_y, 2.0);
    }

    #[test]
    fn unbalanced_restore_falls_back_to_identity() {
        let mut c = RecordingCanvas::new();
        c.scale(3.0, 3.0);
        c.restore();
        assert_eq!(c.matrix(), Matrix::IDENTITY);
    }

    #[test]
    fn ops_serialize_with_tag() {
        let json = serde_json::to_string(&CanvasOp::Translate { dx: 1.0, dy: 2.0 }).unwrap();
        assert_eq!(json, r#"{"op":"translate","dx":1.0,"dy":2.0}"#);
    }

    #[test]
    fn clear_resets_everything() {
        let mut c = RecordingCanvas::new();
        c.save();
        c.scale(2.0, 2.0);
        c.clear();
        assert!(c.ops().is_empty());
        assert_eq!(c.depth(), 0);
        assert!(c.content_matrix().is_none());
    }
}
