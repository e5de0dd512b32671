use crate::sync::SessionState;
use crate::transport::Transport;

/// Sender role: drain the outbound queue onto the wire.
///
/// Blocks on the outbound condvar until a line is queued or the
/// conversation ends. Transmission happens outside the lock. A failed send
/// is tolerated (the datagram is simply lost, as UDP already allows) and
/// only logged. Once `local_done` is observed after a send the role exits;
/// once the remote side has ended, anything still queued is abandoned
/// unsent.
pub fn run<T: Transport + ?Sized>(state: &SessionState, transport: &T) {
    log::debug!("sender role started");
    while let Some(line) = state.pop_outbound_blocking() {
        if let Err(e) = transport.send(line.as_bytes()) {
            log::warn!("send failed, dropping line: {e}");
        }
        if state.local_done() {
            break;
        }
    }
    log::debug!("sender role finished");
}
