use std::io;
use std::time::Duration;

use crate::sync::SessionState;
use crate::transport::MAX_DATAGRAM_LEN;

/// How long one input poll may block before the flags are re-checked. This
/// bounds how stale the keyboard role's view of termination can get.
pub const KEYBOARD_POLL: Duration = Duration::from_millis(100);

/// Source of complete typed lines, polled with a timeout.
///
/// `Ok(None)` means nothing was ready within the timeout. A returned line
/// always ends with a newline.
pub trait LineInput {
    fn poll_line(&mut self, timeout: Duration) -> io::Result<Option<String>>;
}

/// Accumulates typed characters into one bounded line.
///
/// The cap leaves room for the trailing newline within a single datagram.
/// Characters past the cap are dropped until the line is taken, so an
/// over-long line is consumed whole and never bleeds into the next one.
#[derive(Debug)]
pub struct LineBuffer {
    buf: String,
    cap: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            cap: MAX_DATAGRAM_LEN - 1,
        }
    }

    /// Append one character. Returns false if the line is full and the
    /// character was discarded.
    pub fn push_char(&mut self, ch: char) -> bool {
        if self.buf.len() + ch.len_utf8() > self.cap {
            return false;
        }
        self.buf.push(ch);
        true
    }

    /// Remove the last character. Returns false if there was nothing to
    /// remove.
    pub fn backspace(&mut self) -> bool {
        self.buf.pop().is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish the line: append the newline, clear the buffer, and return
    /// the completed line.
    pub fn take(&mut self) -> String {
        let mut line = std::mem::take(&mut self.buf);
        line.push('\n');
        line
    }
}

/// Keyboard role: poll local input, queue each completed line for the
/// sender.
///
/// Sentinel detection lives in [`SessionState::push_outbound`], so typing a
/// line that starts with `!` raises `local_done` and this loop exits on its
/// next flag check. A poll failure is fatal: the session is aborted so the
/// other roles drain and join.
pub fn run<I: LineInput>(state: &SessionState, input: &mut I) -> io::Result<()> {
    log::debug!("keyboard role started");
    while !state.is_done() {
        match input.poll_line(KEYBOARD_POLL) {
            Ok(Some(line)) => state.push_outbound(line),
            Ok(None) => {}
            Err(e) => {
                state.abort();
                return Err(e);
            }
        }
    }
    log::debug!("keyboard role finished");
    Ok(())
}
