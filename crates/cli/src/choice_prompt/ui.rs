use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use serde_yaml::Mapping;

use super::input::{read_key, Key};
use super::terminal::TerminalControl;
use rust_choices_core::config::SessionConfig;
use rust_choices_core::error::Result;
use rust_choices_core::render::{Highlight, LineRenderer};
use rust_choices_core::session::{Session, Toggle};

/// Line break in raw mode, where `\n` alone does not return the carriage
const LINE_BREAK: &str = "\r\n";

/// Interactive multi-select prompt over a choice session.
///
/// Draws the whole list once, then redraws single lines as the cursor moves
/// and choices are toggled. Input is read one byte at a time.
pub struct ChoicePrompt<R, W, T> {
    input: R,
    output: W,
    terminal: T,
    session: Session,
    renderer: LineRenderer,
    error_delay: Duration,
}

impl<R: Read, W: Write, T: TerminalControl> ChoicePrompt<R, W, T> {
    /// Builds the prompt from a nested choice definition.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the definition cannot be turned into a
    /// choice list; the terminal is not touched in that case.
    pub fn new(
        definitions: &Mapping,
        settings: SessionConfig,
        input: R,
        output: W,
        terminal: T,
    ) -> Result<Self> {
        let session = Session::from_config(definitions, &settings)?;

        Ok(Self {
            input,
            output,
            terminal,
            session,
            renderer: LineRenderer::new(settings.templates),
            error_delay: settings.error_delay,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consumes the prompt, handing back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the prompt until Enter is pressed or the input closes.
    ///
    /// Returns the selected keys in the order they were selected, or an empty
    /// list if the input closed first. The terminal mode is restored on every
    /// exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed, or reading
    /// input or writing output fails.
    pub fn ask(&mut self) -> Result<Vec<String>> {
        self.terminal.enter_raw_no_echo()?;
        let result = self.run();
        let restored = self.terminal.restore();

        let selected = result?;
        restored?;
        Ok(selected)
    }

    fn run(&mut self) -> Result<Vec<String>> {
        self.render()?;
        let show = self.terminal.cursor_show();
        self.write(&show)?;
        let line_start = self.terminal.cursor_to_line_start();
        self.write(&line_start)?;
        self.output.flush()?;

        loop {
            let Some(key) = read_key(&mut self.input)? else {
                info!("Input closed, nothing selected");
                self.leave_list()?;
                return Ok(Vec::new());
            };

            match key {
                Key::Enter => {
                    self.leave_list()?;
                    return Ok(self.session.selected_keys());
                }
                Key::Interrupt => {
                    info!("Interrupted, nothing selected");
                    self.leave_list()?;
                    return Ok(Vec::new());
                }
                Key::Up => self.move_up()?,
                Key::Down => self.move_down()?,
                Key::Space => self.toggle()?,
                Key::Other(byte) => debug!("Ignoring input byte {byte:#04x}"),
            }

            self.output.flush()?;
        }
    }

    /// Draws every line; the terminal cursor ends on the last one.
    fn render(&mut self) -> Result<()> {
        let lines = self.renderer.all_lines(&self.session)?;
        self.write(&lines.join(LINE_BREAK))
    }

    /// Redraws the line under the cursor.
    fn render_line(&mut self, highlight: Highlight) -> Result<()> {
        let text = self
            .renderer
            .line(&self.session, self.session.cursor(), highlight)?;
        let line_start = self.terminal.cursor_to_line_start();
        let clear = self.terminal.clear_line();

        self.write(&line_start)?;
        self.write(&clear)?;
        self.write(&text)?;
        self.write(&line_start)
    }

    /// Shows `message` in place of the current line for the error delay.
    ///
    /// Input typed while the message is shown is not read.
    fn render_error(&mut self, message: &str) -> Result<()> {
        let text = self.renderer.error(message)?;
        let line_start = self.terminal.cursor_to_line_start();
        let clear = self.terminal.clear_line();

        self.write(&line_start)?;
        self.write(&clear)?;
        self.write(&text)?;
        self.output.flush()?;

        thread::sleep(self.error_delay);

        self.write(&line_start)?;
        self.write(&clear)?;
        self.render_line(Highlight::Cursor)
    }

    fn move_up(&mut self) -> Result<()> {
        if !self.session.can_go_up() {
            return Ok(());
        }

        self.render_line(Highlight::Clear)?;
        self.session.move_up();
        let up = self.terminal.cursor_up(1);
        self.write(&up)?;
        self.render_line(Highlight::Cursor)
    }

    fn move_down(&mut self) -> Result<()> {
        if !self.session.can_go_down() {
            return Ok(());
        }

        self.render_line(Highlight::Clear)?;
        self.session.move_down();
        let down = self.terminal.cursor_down(1);
        self.write(&down)?;
        self.render_line(Highlight::Cursor)
    }

    fn toggle(&mut self) -> Result<()> {
        match self.session.toggle() {
            Toggle::Ignored => Ok(()),
            Toggle::Selected | Toggle::Deselected => self.render_line(Highlight::Cursor),
            Toggle::Rejected(violation) => self.render_error(&violation.to_string()),
        }
    }

    /// Moves below the list and starts a fresh line.
    fn leave_list(&mut self) -> Result<()> {
        let remaining = self.session.last_line() - self.session.cursor();
        // A zero count would still move one line
        if remaining > 0 {
            let down = self.terminal.cursor_down(remaining);
            self.write(&down)?;
        }
        self.write(LINE_BREAK)?;
        self.output.flush()?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}
