use std::io;
use std::time::Duration;

use crate::sync::SessionState;
use crate::transport::{Transport, MAX_DATAGRAM_LEN};

/// How long one socket poll may block. Long enough to avoid busy-spinning,
/// short enough that local termination is noticed promptly.
pub const RECEIVE_POLL: Duration = Duration::from_secs(1);

/// Receiver role: poll the socket, queue each datagram for display.
///
/// The buffer is cleared before every read so a short datagram never
/// carries stale bytes from the previous one. Sentinel detection lives in
/// [`SessionState::push_inbound`], which raises `remote_done` and wakes the
/// sender as well as the screen. A read failure is fatal: the session is
/// aborted and the error propagates.
pub fn run<T: Transport + ?Sized>(state: &SessionState, transport: &T) -> io::Result<()> {
    log::debug!("receiver role started");
    let mut buf = [0u8; MAX_DATAGRAM_LEN];
    while !state.is_done() {
        buf.fill(0);
        match transport.recv_timeout(&mut buf, RECEIVE_POLL) {
            Ok(Some(len)) => {
                let line = String::from_utf8_lossy(&buf[..len]).into_owned();
                state.push_inbound(line);
            }
            Ok(None) => {}
            Err(e) => {
                state.abort();
                return Err(e);
            }
        }
    }
    log::debug!("receiver role finished");
    Ok(())
}
