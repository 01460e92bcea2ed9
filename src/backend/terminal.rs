//! Terminal session: raw mode, alternate screen and mouse capture.

use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use tracing::debug;

/// Puts the terminal into the state the toolkit needs and restores it on drop.
pub struct TerminalGuard {
    width: u16,
    height: u16,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen, enable mouse capture and hide
    /// the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        stdout.flush()?;
        debug!(width, height, "terminal session started");

        Ok(Self { width, height })
    }

    /// Terminal size when the session started.
    #[inline]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        debug!("terminal session restored");
    }
}
