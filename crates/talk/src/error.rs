use std::io;

use thiserror::Error;

/// Fatal conditions surfaced to the user.
///
/// Usage errors never reach this type: the CLI rejects bad arguments before
/// any resource exists. Failed transmits are tolerated (best-effort UDP) and
/// only logged.
#[derive(Debug, Error)]
pub enum TalkError {
    #[error("failed to resolve {host}:{port}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("failed to bind UDP port {port}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("failed to spawn {role} thread")]
    Spawn {
        role: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{role} role failed")]
    Role {
        role: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{role} role panicked")]
    RolePanicked { role: &'static str },
}
