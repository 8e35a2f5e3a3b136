use std::io;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::input::{Key, KeySample, key_from_event};

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Waits up to `timeout` for the first event, then drains everything queued
/// into one pressed sample. Terminals rarely report releases, so a key
/// counts as held only in the frame its press arrived.
pub fn sample_keys(timeout: Duration) -> io::Result<KeySample> {
    let mut sample = KeySample::default();
    let mut wait = timeout;

    while event::poll(wait)? {
        if let Event::Key(key_event) = event::read()? {
            if let Some(key) = key_from_event(key_event) {
                sample.press(key);
            }
        }
        wait = Duration::ZERO;
    }

    Ok(sample)
}

/// Returns true when the sample asks to leave the game.
#[must_use]
pub fn wants_quit(sample: &KeySample) -> bool {
    sample.is_pressed(Key::Quit)
}

/// Leaves raw mode and the alternate screen, ignoring what cannot be undone.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
