#![forbid(unsafe_code)]

//! Host boundary: the scroll view being wrapped and its drawing surface.
//!
//! The zoom controller never lays out or recycles items itself. It only needs
//! to pass touches through, ask for a redraw, and wrap the host's content draw
//! in a transform.

use zoomlist_core::event::TouchEvent;

/// Drawing surface handed to [`ScrollHost::dispatch_draw`].
///
/// Only the matrix stack is required. Transforms compose the usual way: the
/// most recent call applies to content first.
pub trait Canvas {
    /// Push the current matrix.
    fn save(&mut self);

    /// Translate by `(dx, dy)` view pixels.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Scale about the current origin.
    fn scale(&mut self, sx: f32, sy: f32);

    /// Pop back to the last saved matrix.
    fn restore(&mut self);
}

/// The scrollable list view the zoom controller wraps.
pub trait ScrollHost {
    /// Default touch handling (scrolling, item clicks).
    ///
    /// Returns `true` if the host consumed the event.
    fn on_touch_event(&mut self, event: &TouchEvent) -> bool;

    /// Draw the list content onto `canvas` with its current matrix.
    fn dispatch_draw(&mut self, canvas: &mut dyn Canvas);

    /// Schedule a redraw.
    fn invalidate(&mut self);
}
