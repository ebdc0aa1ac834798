#![no_main]

use libfuzzer_sys::fuzz_target;
use zoomlist_core::{GestureConfig, ScaleDetector, ScaleGesture, TouchEvent, TouchPhase, TouchPoint};

fuzz_target!(|data: &[u8]| {
    let mut detector = ScaleDetector::new(&GestureConfig::default());
    let mut in_progress = false;

    // Five bytes per event: phase, action index, pointer count, x seed, y seed.
    for chunk in data.chunks_exact(5) {
        let phase = match chunk[0] % 6 {
            0 => TouchPhase::Down,
            1 => TouchPhase::PointerDown,
            2 => TouchPhase::Move,
            3 => TouchPhase::PointerUp,
            4 => TouchPhase::Up,
            _ => TouchPhase::Cancel,
        };
        let count = usize::from(chunk[2] % 4);
        let pointers = (0..count)
            .map(|i| {
                let spread = f32::from(chunk[3]) * i as f32;
                TouchPoint::new(i as u32, spread, f32::from(chunk[4]) + spread)
            })
            .collect();
        let event = TouchEvent::new(phase, usize::from(chunk[1] % 4), pointers);

        for gesture in detector.process(&event) {
            match gesture {
                ScaleGesture::Begin { focus, span } => {
                    assert!(!in_progress, "begin while already scaling");
                    assert!(span.is_finite() && focus.x.is_finite());
                    in_progress = true;
                }
                ScaleGesture::Scale { factor, .. } => {
                    assert!(in_progress, "scale outside begin/end");
                    assert!(factor.is_finite() && factor > 0.0, "factor {factor}");
                }
                ScaleGesture::End { .. } => {
                    assert!(in_progress, "end without begin");
                    in_progress = false;
                }
            }
        }
        assert_eq!(detector.is_in_progress(), in_progress);
    }
});
