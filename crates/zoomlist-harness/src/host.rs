#![forbid(unsafe_code)]

//! A fake vertical list standing in for the host scroll view.
//!
//! Fixed-height rows, single-finger vertical scrolling, and a content draw
//! that translates by the scroll offset. Enough to observe how the zoom
//! controller interleaves with default touch handling.

use zoomlist_core::event::{TouchEvent, TouchPhase};
use zoomlist_widgets::{Canvas, ScrollHost};

#[derive(Debug, Clone)]
pub struct ListHost {
    item_count: usize,
    item_height: f32,
    viewport_height: f32,
    scroll_offset: f32,
    drag: Option<(u32, f32)>,
    pub touches: usize,
    pub draws: usize,
    pub invalidations: usize,
}

impl ListHost {
    #[must_use]
    pub fn new(item_count: usize, item_height: f32) -> Self {
        Self {
            item_count,
            item_height,
            viewport_height: 0.0,
            scroll_offset: 0.0,
            drag: None,
            touches: 0,
            draws: 0,
            invalidations: 0,
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.item_count as f32 * self.item_height
    }

    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// Index range of rows intersecting the viewport.
    #[must_use]
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        if self.item_height <= 0.0 || self.item_count == 0 {
            return 0..0;
        }
        let first = (self.scroll_offset / self.item_height).floor() as usize;
        let last = ((self.scroll_offset + self.viewport_height) / self.item_height).ceil() as usize;
        first.min(self.item_count)..last.min(self.item_count)
    }
}

impl ScrollHost for ListHost {
    fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        self.touches += 1;
        match event.phase {
            TouchPhase::Down => {
                self.drag = event.primary().map(|p| (p.id, p.y));
                true
            }
            TouchPhase::Move => {
                let Some((id, last_y)) = self.drag else {
                    return false;
                };
                let Some(p) = event
                    .find_pointer_index(id)
                    .and_then(|index| event.pointer(index))
                else {
                    return false;
                };
                self.scroll_offset = (self.scroll_offset + last_y - p.y).clamp(0.0, self.max_scroll());
                self.drag = Some((id, p.y));
                true
            }
            TouchPhase::PointerDown | TouchPhase::PointerUp => {
                // Multi-finger gestures are not list scrolls.
                self.drag = None;
                false
            }
            TouchPhase::Up | TouchPhase::Cancel => self.drag.take().is_some(),
        }
    }

    fn dispatch_draw(&mut self, canvas: &mut dyn Canvas) {
        self.draws += 1;
        canvas.save();
        canvas.translate(0.0, -self.scroll_offset);
        canvas.restore();
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

#[cfg(test)]
mod tests {
    use zoomlist_core::event::TouchPoint;

    use super::*;
    use crate::canvas::{CanvasOp, RecordingCanvas};

    fn list() -> ListHost {
        let mut host = ListHost::new(100, 50.0);
        host.set_viewport_height(1000.0);
        host
    }

    #[test]
    fn drag_scrolls_and_clamps() {
        let mut host = list();
        host.on_touch_event(&TouchEvent::down(0, 10.0, 500.0));
        host.on_touch_event(&TouchEvent::move_to(0, 10.0, 300.0));
        assert_eq!(host.scroll_offset(), 200.0);
        host.on_touch_event(&TouchEvent::move_to(0, 10.0, 5000.0));
        assert_eq!(host.scroll_offset(), 0.0);
        host.on_touch_event(&TouchEvent::move_to(0, 10.0, -9000.0));
        assert_eq!(host.scroll_offset(), 4000.0);
        assert!(host.on_touch_event(&TouchEvent::up(0, 10.0, -9000.0)));
    }

    #[test]
    fn second_finger_stops_scrolling() {
        let mut host = list();
        host.on_touch_event(&TouchEvent::down(0, 10.0, 500.0));
        let two = TouchEvent::new(
            TouchPhase::PointerDown,
            1,
            vec![TouchPoint::new(0, 10.0, 500.0), TouchPoint::new(1, 90.0, 500.0)],
        );
        assert!(!host.on_touch_event(&two));
        assert!(!host.on_touch_event(&TouchEvent::move_to(0, 10.0, 100.0)));
        assert_eq!(host.scroll_offset(), 0.0);
    }

    #[test]
    fn visible_rows_follow_scroll() {
        let mut host = list();
        assert_eq!(host.visible_rows(), 0..20);
        host.on_touch_event(&TouchEvent::down(0, 0.0, 500.0));
        host.on_touch_event(&TouchEvent::move_to(0, 0.0, 475.0));
        assert_eq!(host.visible_rows(), 0..21);
    }

    #[test]
    fn draw_translates_by_scroll() {
        let mut host = list();
        host.on_touch_event(&TouchEvent::down(0, 0.0, 500.0));
        host.on_touch_event(&TouchEvent::move_to(0, 0.0, 400.0));
        let mut canvas = RecordingCanvas::new();
        host.dispatch_draw(&mut canvas);
        assert_eq!(
            canvas.ops(),
            &[
                CanvasOp::Save,
                CanvasOp::Translate { dx: 0.0, dy: -100.0 },
                CanvasOp::Restore
            ]
        );
        assert_eq!(host.draws, 1);
    }
}
