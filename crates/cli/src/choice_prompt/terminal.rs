//! Terminal mode control and cursor movement sequences.

use std::io;

use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, Command};
use log::{debug, warn};

/// Terminal collaborator consumed by the choice prompt.
///
/// Mode switching is stateful; the sequence methods only build the control
/// strings, which the caller writes to its output.
pub trait TerminalControl {
    /// Switches to character-at-a-time input without echo.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed.
    fn enter_raw_no_echo(&mut self) -> io::Result<()>;

    /// Restores the mode that was active before [`TerminalControl::enter_raw_no_echo`].
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed.
    fn restore(&mut self) -> io::Result<()>;

    fn cursor_up(&self, lines: usize) -> String {
        ansi(cursor::MoveUp(clamp_lines(lines)))
    }

    fn cursor_down(&self, lines: usize) -> String {
        ansi(cursor::MoveDown(clamp_lines(lines)))
    }

    fn cursor_to_line_start(&self) -> String {
        "\r".to_string()
    }

    /// Clears from the cursor to the end of the line.
    fn clear_line(&self) -> String {
        ansi(Clear(ClearType::UntilNewLine))
    }

    fn cursor_show(&self) -> String {
        ansi(cursor::Show)
    }
}

/// Renders a crossterm command as its ANSI escape sequence.
pub fn ansi(command: impl Command) -> String {
    let mut sequence = String::new();
    match command.write_ansi(&mut sequence) {
        Ok(()) => sequence,
        Err(_) => String::new(),
    }
}

fn clamp_lines(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// The process terminal, switched to raw mode through crossterm.
///
/// Raw mode is also left when the value is dropped, so a panic inside the
/// prompt does not leave the shell without echo.
#[derive(Debug, Default)]
pub struct CrosstermTerminal {
    raw: bool,
}

impl TerminalControl for CrosstermTerminal {
    fn enter_raw_no_echo(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        debug!("Entered raw mode");
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
            debug!("Left raw mode");
        }
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Could not restore terminal mode: {e}");
        }
    }
}
