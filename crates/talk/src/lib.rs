//! Two-party chat over a raw UDP socket.
//!
//! Four roles (keyboard, sender, receiver, screen) run as independent
//! threads around two shared FIFO queues. One mutex guards both queues and
//! the termination flags; two condition variables wake the queue consumers.
//! A line whose first byte is `!` ends the conversation on both sides.

pub mod error;
pub mod queue;
pub mod roles;
pub mod session;
pub mod sync;
pub mod transport;

pub use error::TalkError;
pub use queue::MessageQueue;
pub use roles::keyboard::{LineBuffer, LineInput, KEYBOARD_POLL};
pub use roles::screen::{Render, REMOTE_PREFIX};
pub use sync::{is_sentinel, SessionState, SENTINEL};
pub use transport::{Transport, UdpTransport, MAX_DATAGRAM_LEN};
