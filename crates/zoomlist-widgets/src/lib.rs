#![forbid(unsafe_code)]

//! Widgets: the zoomable list view and its gesture strategies.
//!
//! # Role in zoomlist
//! `zoomlist-widgets` owns the mutable [`TransformState`] and wires the
//! detectors and animator from `zoomlist-core` to a host scroll view through
//! the [`ScrollHost`] and [`Canvas`] traits.
//!
//! # Example
//!
//! ```
//! use web_time::Instant;
//! use zoomlist_core::{TouchEvent, ZoomConfig};
//! use zoomlist_widgets::{Canvas, ScrollHost, ZoomListView};
//!
//! struct List;
//!
//! impl ScrollHost for List {
//!     fn on_touch_event(&mut self, _event: &TouchEvent) -> bool {
//!         false
//!     }
//!     fn dispatch_draw(&mut self, _canvas: &mut dyn Canvas) {}
//!     fn invalidate(&mut self) {}
//! }
//!
//! let config = ZoomConfig::new().zoom_enabled(true);
//! let mut view = ZoomListView::new(List, config).unwrap();
//! view.on_size_changed(1080.0, 1920.0);
//! view.on_touch_event(&TouchEvent::down(0, 100.0, 100.0), Instant::now());
//! assert_eq!(view.state().active_pointer(), Some(0));
//! ```

pub mod host;
pub mod listeners;
pub mod transform;
pub mod zoom_list;

pub use host::{Canvas, ScrollHost};
pub use listeners::{DoubleTapListener, DoubleTapZoom, PinchZoom, ScaleGestureListener, ZoomContext};
pub use transform::{TransformSnapshot, TransformState};
pub use zoom_list::ZoomListView;
