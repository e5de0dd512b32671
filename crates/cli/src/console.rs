use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::execute;

use talk::{LineBuffer, LineInput, Render, REMOTE_PREFIX};

pub const PROMPT: &str = "> ";

/// Puts the terminal into raw mode and restores it when dropped, so every
/// exit path (including errors) leaves the terminal usable.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Terminal console backing both the keyboard and the screen role.
///
/// The pending line buffer is shared between the two halves: the keyboard
/// half fills it as the user types, the screen half reprints it after every
/// rendered remote line. This lock is presentation state only and is never
/// held together with the session lock.
#[derive(Default)]
struct ConsoleShared {
    pending: Mutex<LineBuffer>,
}

pub struct Console {
    shared: Arc<ConsoleShared>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(ConsoleShared::default()),
        }
    }

    pub fn split(self) -> (ConsoleInput, ConsoleOutput) {
        let input = ConsoleInput {
            shared: Arc::clone(&self.shared),
        };
        let output = ConsoleOutput {
            shared: self.shared,
        };
        (input, output)
    }
}

pub struct ConsoleInput {
    shared: Arc<ConsoleShared>,
}

impl LineInput for ConsoleInput {
    fn poll_line(&mut self, timeout: Duration) -> io::Result<Option<String>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        let mut out = io::stdout();
        match key.code {
            KeyCode::Enter => {
                let line = self.shared.pending.lock().unwrap().take();
                execute!(out, Print("\r\n"))?;
                Ok(Some(line))
            }
            // Raw mode swallows SIGINT, so the interrupt and EOF chords end
            // the conversation through the normal sentinel protocol.
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.shared.pending.lock().unwrap().take();
                execute!(out, Print("\r\n"))?;
                Ok(Some("!\n".to_string()))
            }
            KeyCode::Char(ch) => {
                let accepted = self.shared.pending.lock().unwrap().push_char(ch);
                if accepted {
                    execute!(out, Print(ch))?;
                }
                Ok(None)
            }
            KeyCode::Backspace => {
                let removed = self.shared.pending.lock().unwrap().backspace();
                if removed {
                    execute!(
                        out,
                        crossterm::cursor::MoveLeft(1),
                        Print(' '),
                        crossterm::cursor::MoveLeft(1)
                    )?;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

pub struct ConsoleOutput {
    shared: Arc<ConsoleShared>,
}

impl ConsoleOutput {
    /// Draw the initial prompt before the roles start.
    pub fn draw_prompt(&mut self) -> io::Result<()> {
        self.redraw_prompt()
    }
}

impl Render for ConsoleOutput {
    fn show_remote(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout();
        execute!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(REMOTE_PREFIX),
            Print(text),
            Print("\r\n"),
        )?;
        out.flush()
    }

    fn redraw_prompt(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        let pending = self.shared.pending.lock().unwrap();
        execute!(out, Print(PROMPT), Print(pending.as_str()))?;
        out.flush()
    }
}
