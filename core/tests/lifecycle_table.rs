//! Checks arbitrary status sequences against the control table, one row at a time.

use armsim_console_core::{Controls, Lifecycle, SessionState, StatusEvent};
use proptest::prelude::*;

/// (load, start, step, reset, stop); `None` leaves the control alone.
fn row(event: StatusEvent) -> [Option<bool>; 5] {
    match event {
        StatusEvent::Ready => [Some(true), None, None, None, None],
        StatusEvent::Loaded => [Some(true), Some(true), Some(true), Some(true), None],
        StatusEvent::Running => [Some(false), Some(false), Some(false), Some(false), Some(true)],
        StatusEvent::Stopped | StatusEvent::Finished => {
            [Some(true), Some(true), Some(true), Some(true), Some(false)]
        }
    }
}

const COLUMNS: [Controls; 5] = [
    Controls::LOAD,
    Controls::START,
    Controls::STEP,
    Controls::RESET,
    Controls::STOP,
];

fn any_event() -> impl Strategy<Value = StatusEvent> {
    prop_oneof![
        Just(StatusEvent::Ready),
        Just(StatusEvent::Loaded),
        Just(StatusEvent::Running),
        Just(StatusEvent::Stopped),
        Just(StatusEvent::Finished),
    ]
}

proptest! {
    #[test]
    fn controls_match_table(events in prop::collection::vec(any_event(), 0..40)) {
        let mut lifecycle = Lifecycle::default();
        let mut expected = [true, false, false, false, false];
        let mut state = SessionState::Ready;

        for event in events {
            lifecycle.apply(event);
            for (slot, change) in expected.iter_mut().zip(row(event)) {
                if let Some(enabled) = change {
                    *slot = enabled;
                }
            }
            state = event.target();

            for (control, enabled) in COLUMNS.iter().zip(expected) {
                prop_assert_eq!(lifecycle.is_enabled(*control), enabled);
            }
            prop_assert_eq!(lifecycle.state(), state);
        }
    }
}
