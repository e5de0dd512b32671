use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::TalkError;
use crate::roles::keyboard::{self, LineInput};
use crate::roles::screen::{self, Render};
use crate::roles::{receiver, sender};
use crate::sync::SessionState;
use crate::transport::Transport;

type RoleHandle = (&'static str, JoinHandle<io::Result<()>>);

fn spawn_role<F>(role: &'static str, f: F) -> Result<RoleHandle, TalkError>
where
    F: FnOnce() -> io::Result<()> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name(role.to_string())
        .spawn(f)
        .map_err(|source| TalkError::Spawn { role, source })?;
    Ok((role, handle))
}

/// Run one conversation to completion.
///
/// Spawns the four roles as dedicated threads and blocks until every one of
/// them has exited. All four are always joined, even when one fails; a
/// failing role raises the abort flag first, so its peers drain and exit
/// instead of hanging. The first failure (in join order) is returned.
pub fn run<T, I, R>(
    state: Arc<SessionState>,
    transport: Arc<T>,
    mut input: I,
    mut render: R,
) -> Result<(), TalkError>
where
    T: Transport + 'static,
    I: LineInput + Send + 'static,
    R: Render + Send + 'static,
{
    let handles = [
        spawn_role("sender", {
            let state = Arc::clone(&state);
            let transport = Arc::clone(&transport);
            move || {
                sender::run(&state, &*transport);
                Ok(())
            }
        })?,
        spawn_role("receiver", {
            let state = Arc::clone(&state);
            let transport = Arc::clone(&transport);
            move || receiver::run(&state, &*transport)
        })?,
        spawn_role("keyboard", {
            let state = Arc::clone(&state);
            move || keyboard::run(&state, &mut input)
        })?,
        spawn_role("screen", {
            let state = Arc::clone(&state);
            move || screen::run(&state, &mut render)
        })?,
    ];

    let mut first_error = None;
    for (role, handle) in handles {
        let outcome = match handle.join() {
            Ok(Ok(())) => continue,
            Ok(Err(source)) => TalkError::Role { role, source },
            Err(_) => {
                // A panicked role never raised the abort flag; do it on its
                // behalf so later joins cannot hang.
                state.abort();
                TalkError::RolePanicked { role }
            }
        };
        log::error!("{outcome}");
        first_error.get_or_insert(outcome);
    }

    match first_error {
        None => {
            log::debug!("all four roles joined");
            Ok(())
        }
        Some(err) => Err(err),
    }
}
