use std::sync::{Condvar, Mutex, MutexGuard};

use crate::queue::MessageQueue;

/// First byte of a line that ends the conversation. Only the first byte is
/// inspected; a `!` anywhere later in a line means nothing.
pub const SENTINEL: u8 = b'!';

pub fn is_sentinel(line: &str) -> bool {
    line.as_bytes().first() == Some(&SENTINEL)
}

#[derive(Debug, Default)]
struct Channels {
    outbound: MessageQueue,
    inbound: MessageQueue,
    local_done: bool,
    remote_done: bool,
    aborted: bool,
}

impl Channels {
    fn done(&self) -> bool {
        self.local_done || self.remote_done || self.aborted
    }
}

/// The synchronization hub all four roles consult before touching shared
/// state.
///
/// One mutex guards both queues and all three flags as a single
/// critical-section domain; two condition variables signal "queue became
/// non-empty or a flag changed" for their respective consumers. The flags
/// are monotonic: once set they stay set for the rest of the run. The
/// blocking pops release the lock while waiting and re-check their
/// condition in a loop after every wakeup, so spurious wakeups and missed
/// flag transitions are both harmless.
#[derive(Debug, Default)]
pub struct SessionState {
    channels: Mutex<Channels>,
    outbound_ready: Condvar,
    inbound_ready: Condvar,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Channels> {
        self.channels.lock().unwrap()
    }

    /// Queue a locally typed line for transmission.
    ///
    /// A sentinel line additionally sets `local_done` and wakes the screen
    /// role so it can observe the flag, all in one critical section.
    pub fn push_outbound(&self, line: String) {
        let sentinel = is_sentinel(&line);
        let mut ch = self.lock();
        ch.outbound.push(line);
        self.outbound_ready.notify_all();
        if sentinel {
            ch.local_done = true;
            self.inbound_ready.notify_all();
            log::debug!("local side ended the conversation");
        }
    }

    /// Queue a received datagram for display.
    ///
    /// A sentinel payload additionally sets `remote_done` and wakes the
    /// sender role so it exits instead of waiting forever.
    pub fn push_inbound(&self, line: String) {
        let sentinel = is_sentinel(&line);
        let mut ch = self.lock();
        ch.inbound.push(line);
        self.inbound_ready.notify_all();
        if sentinel {
            ch.remote_done = true;
            self.outbound_ready.notify_all();
            log::debug!("remote side ended the conversation");
        }
    }

    /// Block until there is an outbound line to send or the conversation is
    /// over.
    ///
    /// Returns `None` once the remote side has ended (any still-queued
    /// lines are abandoned unsent) or once the session is aborted, and also
    /// when `local_done` is set with the queue drained.
    pub fn pop_outbound_blocking(&self) -> Option<String> {
        let mut ch = self.lock();
        while ch.outbound.is_empty() && !ch.done() {
            ch = self.outbound_ready.wait(ch).unwrap();
        }
        if ch.remote_done || ch.aborted {
            return None;
        }
        ch.outbound.pop()
    }

    /// Block until there is an inbound line to display or the conversation
    /// is over. Returns `None` once a flag is set and the queue is empty.
    pub fn pop_inbound_blocking(&self) -> Option<String> {
        let mut ch = self.lock();
        while ch.inbound.is_empty() && !ch.done() {
            ch = self.inbound_ready.wait(ch).unwrap();
        }
        ch.inbound.pop()
    }

    pub fn local_done(&self) -> bool {
        self.lock().local_done
    }

    pub fn remote_done(&self) -> bool {
        self.lock().remote_done
    }

    /// True once any flag is set; the keyboard and receiver loops check
    /// this at the top of every poll iteration.
    pub fn is_done(&self) -> bool {
        self.lock().done()
    }

    /// Cancellation path for a fatally failed role: ends the conversation
    /// for every role so the remaining threads drain and join instead of
    /// hanging.
    pub fn abort(&self) {
        let mut ch = self.lock();
        ch.aborted = true;
        self.outbound_ready.notify_all();
        self.inbound_ready.notify_all();
    }

    #[cfg(test)]
    pub(crate) fn queue_lengths(&self) -> (usize, usize) {
        let ch = self.lock();
        (ch.outbound.len(), ch.inbound.len())
    }
}
