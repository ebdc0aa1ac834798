#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use web_time::Instant;
use zoomlist_core::{TouchEvent, TouchPhase, TouchPoint, ZoomConfig};
use zoomlist_widgets::{Canvas, ScrollHost, ZoomListView};

#[derive(Debug, Arbitrary)]
enum Step {
    Touch {
        phase: u8,
        action_index: u8,
        pointers: Vec<(u8, i16, i16)>,
        dt_ms: u8,
    },
    Tick {
        dt_ms: u16,
    },
    Resize {
        width: u16,
        height: u16,
    },
    Enable(bool),
    Detach,
}

struct NullHost;

impl ScrollHost for NullHost {
    fn on_touch_event(&mut self, _event: &TouchEvent) -> bool {
        false
    }
    fn dispatch_draw(&mut self, _canvas: &mut dyn Canvas) {}
    fn invalidate(&mut self) {}
}

struct NullCanvas {
    depth: usize,
}

impl Canvas for NullCanvas {
    fn save(&mut self) {
        self.depth += 1;
    }
    fn translate(&mut self, dx: f32, dy: f32) {
        assert!(dx.is_finite() && dy.is_finite(), "non-finite translate");
    }
    fn scale(&mut self, sx: f32, sy: f32) {
        assert!(sx > 0.0 && sy.is_finite(), "bad scale {sx}");
    }
    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

fn phase(byte: u8) -> TouchPhase {
    match byte % 6 {
        0 => TouchPhase::Down,
        1 => TouchPhase::PointerDown,
        2 => TouchPhase::Move,
        3 => TouchPhase::PointerUp,
        4 => TouchPhase::Up,
        _ => TouchPhase::Cancel,
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let config = ZoomConfig::default().zoom_enabled(true);
    let (min, max) = (config.min_scale, config.max_scale);
    let Ok(mut view) = ZoomListView::new(NullHost, config) else {
        return;
    };
    view.on_size_changed(1000.0, 1000.0);

    let mut now = Instant::now();
    for step in steps.into_iter().take(512) {
        match step {
            Step::Touch {
                phase: p,
                action_index,
                pointers,
                dt_ms,
            } => {
                now += Duration::from_millis(u64::from(dt_ms));
                let pointers: Vec<TouchPoint> = pointers
                    .into_iter()
                    .take(5)
                    .map(|(id, x, y)| TouchPoint::new(u32::from(id), f32::from(x), f32::from(y)))
                    .collect();
                let event = TouchEvent::new(phase(p), usize::from(action_index), pointers);
                view.on_touch_event(&event, now);
            }
            Step::Tick { dt_ms } => {
                now += Duration::from_millis(u64::from(dt_ms));
                view.tick(now);
            }
            Step::Resize { width, height } => {
                view.on_size_changed(f32::from(width), f32::from(height));
            }
            Step::Enable(enabled) => view.set_zoom_enabled(enabled, now),
            Step::Detach => view.on_detached(),
        }

        let state = view.state();
        assert!(state.scale().is_finite());
        assert!(state.translate().x.is_finite() && state.translate().y.is_finite());
        if !state.is_animating() {
            assert!(
                (min..=max).contains(&state.scale()),
                "scale {} escaped [{min}, {max}]",
                state.scale()
            );
        }

        let mut canvas = NullCanvas { depth: 0 };
        view.draw(&mut canvas);
        assert_eq!(canvas.depth, 0, "unbalanced save/restore");
    }
});
