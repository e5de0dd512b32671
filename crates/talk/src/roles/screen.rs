use std::io;

use crate::sync::SessionState;

/// Fixed prefix for rendered remote lines.
pub const REMOTE_PREFIX: &str = "Remote: ";

/// Destination for rendered conversation output.
///
/// `show_remote` prints one received line (prefix included, no trailing
/// newline in `text`); `redraw_prompt` restores the input prompt and any
/// characters the user has typed so far, keeping the cursor stable.
pub trait Render {
    fn show_remote(&mut self, text: &str) -> io::Result<()>;

    fn redraw_prompt(&mut self) -> io::Result<()>;
}

/// Screen role: drain the inbound queue to the display.
///
/// Blocks on the inbound condvar until a line is queued or the conversation
/// ends. If the remote side has ended, the popped line is dropped without
/// rendering so the final sentinel is never echoed. A render failure is
/// fatal: the session is aborted and the error propagates.
pub fn run<R: Render>(state: &SessionState, render: &mut R) -> io::Result<()> {
    log::debug!("screen role started");
    while let Some(line) = state.pop_inbound_blocking() {
        if state.remote_done() {
            break;
        }
        let text = line.strip_suffix('\n').unwrap_or(&line);
        if let Err(e) = render
            .show_remote(text)
            .and_then(|()| render.redraw_prompt())
        {
            state.abort();
            return Err(e);
        }
    }
    log::debug!("screen role finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    pub(crate) struct RecordingRender {
        pub(crate) shown: Vec<String>,
        pub(crate) prompt_redraws: usize,
    }

    impl Render for RecordingRender {
        fn show_remote(&mut self, text: &str) -> io::Result<()> {
            self.shown.push(text.to_string());
            Ok(())
        }

        fn redraw_prompt(&mut self) -> io::Result<()> {
            self.prompt_redraws += 1;
            Ok(())
        }
    }

    #[test]
    fn test_renders_in_arrival_order_with_prompt_redraws() {
        let state = Arc::new(SessionState::new());
        let shown = Arc::new(Mutex::new(RecordingRender::default()));

        let worker = {
            let state = Arc::clone(&state);
            let shown = Arc::clone(&shown);
            thread::spawn(move || {
                struct Shared(Arc<Mutex<RecordingRender>>);
                impl Render for Shared {
                    fn show_remote(&mut self, text: &str) -> io::Result<()> {
                        self.0.lock().unwrap().show_remote(text)
                    }
                    fn redraw_prompt(&mut self) -> io::Result<()> {
                        self.0.lock().unwrap().redraw_prompt()
                    }
                }
                let mut render = Shared(shown);
                run(&state, &mut render)
            })
        };

        state.push_inbound("one\n".to_string());
        state.push_inbound("two\n".to_string());
        state.push_inbound("three\n".to_string());

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while shown.lock().unwrap().shown.len() < 3 {
            assert!(std::time::Instant::now() < deadline, "screen stalled");
            thread::sleep(Duration::from_millis(5));
        }
        state.push_inbound("!\n".to_string());
        worker.join().unwrap().unwrap();

        let render = shown.lock().unwrap();
        assert_eq!(render.shown, vec!["one", "two", "three"]);
        assert_eq!(render.prompt_redraws, 3);
    }

    #[test]
    fn test_exits_without_rendering_after_local_done_drains() {
        let state = SessionState::new();
        state.push_outbound("!\n".to_string());

        let mut render = RecordingRender::default();
        run(&state, &mut render).unwrap();

        assert!(render.shown.is_empty());
        assert_eq!(render.prompt_redraws, 0);
    }

    #[test]
    fn test_remote_sentinel_is_not_echoed() {
        let state = SessionState::new();
        state.push_inbound("!\n".to_string());

        let mut render = RecordingRender::default();
        run(&state, &mut render).unwrap();

        assert!(render.shown.is_empty());
    }

    #[test]
    fn test_render_failure_aborts_session() {
        struct BrokenRender;

        impl Render for BrokenRender {
            fn show_remote(&mut self, _text: &str) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty closed"))
            }

            fn redraw_prompt(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let state = SessionState::new();
        state.push_inbound("hello\n".to_string());

        let err = run(&state, &mut BrokenRender).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(state.is_done());
    }
}
