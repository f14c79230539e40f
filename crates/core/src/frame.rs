//! Frame-loop state machine.
//!
//! The demos run a single-threaded loop: poll at most one input event,
//! render, present. The only state is whether the loop is still running;
//! the escape key is the only transition. [`FrameLoop`] keeps that state
//! (plus a present counter) independent of any windowing library, and
//! [`run_frames`] drives it headlessly for tests and smoke runs. The
//! windowed binary feeds the same state machine from winit callbacks.

/// Whether the frame loop keeps iterating.
///
/// Starts `Running`; moves to `Stopped` exactly when an escape key-press
/// is polled. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// The loop renders and presents every iteration.
    Running,
    /// The loop has ended; no further transitions occur.
    Stopped,
}

/// A key code carried by a key-press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The escape key, the only key the demos react to.
    Escape,
    /// Any other key, carrying the collaborator's raw code.
    Other(u32),
}

/// An input event polled from the window collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyPress(Key),
}

/// The per-window loop state: running flag plus a count of presented frames.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames_presented: u64,
}

impl FrameLoop {
    /// Creates a loop in the `Running` state with zero frames presented.
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            frames_presented: 0,
        }
    }

    /// The current loop state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether the loop should keep iterating.
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Feeds the result of one non-blocking event poll.
    ///
    /// An escape key-press stops the loop. Any other event, or no event at
    /// all, changes nothing; the frame still renders either way.
    pub fn handle_event(&mut self, event: Option<InputEvent>) {
        if let Some(InputEvent::KeyPress(Key::Escape)) = event {
            self.state = LoopState::Stopped;
        }
    }

    /// Records that one frame was presented.
    pub fn frame_presented(&mut self) {
        self.frames_presented += 1;
    }

    /// Total frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives the loop for at most `max_frames` iterations.
///
/// Each iteration polls one event via `poll`, feeds it to the state
/// machine, then renders and presents via `frame`. The iteration that
/// polls the escape key still renders and presents once before the loop
/// ends.
pub fn run_frames<E, F>(frame_loop: &mut FrameLoop, mut poll: E, mut frame: F, max_frames: u64)
where
    E: FnMut() -> Option<InputEvent>,
    F: FnMut(),
{
    for _ in 0..max_frames {
        if !frame_loop.is_running() {
            break;
        }
        frame_loop.handle_event(poll());
        frame();
        frame_loop.frame_presented();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_with_no_frames() {
        let fl = FrameLoop::new();
        assert_eq!(fl.state(), LoopState::Running);
        assert!(fl.is_running());
        assert_eq!(fl.frames_presented(), 0);
    }

    #[test]
    fn escape_press_stops_within_one_event() {
        let mut fl = FrameLoop::new();
        fl.handle_event(Some(InputEvent::KeyPress(Key::Escape)));
        assert_eq!(fl.state(), LoopState::Stopped);
        assert!(!fl.is_running());
    }

    #[test]
    fn other_keys_leave_the_loop_running() {
        let mut fl = FrameLoop::new();
        fl.handle_event(Some(InputEvent::KeyPress(Key::Other(32))));
        fl.handle_event(Some(InputEvent::KeyPress(Key::Other(0))));
        assert!(fl.is_running());
    }

    #[test]
    fn absent_event_leaves_the_loop_running() {
        let mut fl = FrameLoop::new();
        fl.handle_event(None);
        assert!(fl.is_running());
    }

    #[test]
    fn stopped_is_terminal() {
        let mut fl = FrameLoop::new();
        fl.handle_event(Some(InputEvent::KeyPress(Key::Escape)));
        // No event sequence may resurrect the loop.
        fl.handle_event(None);
        fl.handle_event(Some(InputEvent::KeyPress(Key::Other(7))));
        assert_eq!(fl.state(), LoopState::Stopped);
    }

    #[test]
    fn n_quiet_iterations_present_exactly_n_frames() {
        // Smoke test: no input events, N iterations, N presents, no
        // state transition.
        let mut fl = FrameLoop::new();
        let mut rendered = 0u64;
        run_frames(&mut fl, || None, || rendered += 1, 100);
        assert_eq!(rendered, 100);
        assert_eq!(fl.frames_presented(), 100);
        assert_eq!(fl.state(), LoopState::Running);
    }

    #[test]
    fn escape_iteration_still_presents_then_ends_the_loop() {
        // The escape iteration flags the stop but still presents its frame.
        let mut fl = FrameLoop::new();
        let mut polls = 0u32;
        run_frames(
            &mut fl,
            || {
                polls += 1;
                if polls == 3 {
                    Some(InputEvent::KeyPress(Key::Escape))
                } else {
                    None
                }
            },
            || {},
            100,
        );
        assert_eq!(fl.state(), LoopState::Stopped);
        assert_eq!(fl.frames_presented(), 3, "the escape frame presents once");
        assert_eq!(polls, 3, "no polls after the loop stops");
    }

    #[test]
    fn run_frames_on_a_stopped_loop_does_nothing() {
        let mut fl = FrameLoop::new();
        fl.handle_event(Some(InputEvent::KeyPress(Key::Escape)));
        let mut rendered = 0u64;
        run_frames(&mut fl, || None, || rendered += 1, 10);
        assert_eq!(rendered, 0);
        assert_eq!(fl.frames_presented(), 0);
    }

    #[test]
    fn default_matches_new() {
        let fl = FrameLoop::default();
        assert!(fl.is_running());
        assert_eq!(fl.frames_presented(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_event() -> impl Strategy<Value = Option<InputEvent>> {
            prop_oneof![
                Just(None),
                any::<u32>().prop_map(|c| Some(InputEvent::KeyPress(Key::Other(c)))),
                Just(Some(InputEvent::KeyPress(Key::Escape))),
            ]
        }

        proptest! {
            #[test]
            fn state_is_stopped_iff_an_escape_was_seen(events in proptest::collection::vec(arb_event(), 0..64)) {
                let mut fl = FrameLoop::new();
                let mut saw_escape = false;
                for ev in &events {
                    fl.handle_event(*ev);
                    saw_escape |= matches!(ev, Some(InputEvent::KeyPress(Key::Escape)));
                    prop_assert_eq!(
                        fl.is_running(),
                        !saw_escape,
                        "state diverged after event {:?}",
                        ev
                    );
                }
            }

            #[test]
            fn presents_never_exceed_the_iteration_cap(max in 0u64..200) {
                let mut fl = FrameLoop::new();
                run_frames(&mut fl, || None, || {}, max);
                prop_assert_eq!(fl.frames_presented(), max);
            }
        }
    }
}
