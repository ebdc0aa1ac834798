//! Property tests for trace replay against the fake list host.

use proptest::prelude::*;
use zoomlist_core::{TouchEvent, ZoomConfig};
use zoomlist_harness::{ReplayOptions, TraceStep, replay_trace};

const VIEW: f32 = 1000.0;

fn drag_trace(ys: &[f32], enable: bool) -> Vec<TraceStep> {
    let mut steps = vec![TraceStep::Resize {
        width: VIEW,
        height: VIEW,
    }];
    if enable {
        steps.push(TraceStep::Enable {
            at_ms: 0,
            enabled: true,
        });
    }
    let mut at_ms = 0;
    for (i, &y) in ys.iter().enumerate() {
        let event = if i == 0 {
            TouchEvent::down(0, 500.0, y)
        } else {
            TouchEvent::move_to(0, 500.0, y)
        };
        steps.push(TraceStep::Touch { at_ms, event });
        at_ms += 16;
    }
    let last = ys.last().copied().unwrap_or(0.0);
    steps.push(TraceStep::Touch {
        at_ms,
        event: TouchEvent::up(0, 500.0, last),
    });
    steps.push(TraceStep::Tick { at_ms: at_ms + 16 });
    steps
}

proptest! {
    #[test]
    fn disabled_drags_keep_scroll_within_content(
        ys in prop::collection::vec(-500.0f32..2000.0, 1..40),
        item_count in 0usize..300,
    ) {
        let options = ReplayOptions { item_count, item_height: 48.0 };
        let report = replay_trace(&drag_trace(&ys, false), ZoomConfig::default(), &options)
            .expect("replay");
        let max_scroll = (item_count as f32 * 48.0 - VIEW).max(0.0);

        prop_assert_eq!(report.frames.len(), 1);
        let offset = report.frames[0].scroll_offset;
        prop_assert!((0.0..=max_scroll).contains(&offset), "offset {} max {}", offset, max_scroll);
        // Down, every move and the up all belong to the host's drag.
        prop_assert_eq!(report.handled_touches, ys.len() + 1);
        prop_assert_eq!(report.invalidations, 0);
    }

    #[test]
    fn enabled_drags_at_rest_never_transform_content(
        ys in prop::collection::vec(-500.0f32..2000.0, 2..40),
    ) {
        // At unit scale zoom never pans, so the content matrix only carries
        // the host's own scroll.
        let report = replay_trace(&drag_trace(&ys, true), ZoomConfig::default(), &ReplayOptions::default())
            .expect("replay");
        let frame = &report.frames[0];
        prop_assert_eq!(frame.state.scale, 1.0);
        prop_assert_eq!((frame.state.translate_x, frame.state.translate_y), (0.0, 0.0));
        prop_assert_eq!(frame.content.scale_y, 1.0);
        prop_assert_eq!(frame.content.translate_y, -frame.scroll_offset);
    }
}
