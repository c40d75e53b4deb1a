//! Serial debug console.
//!
//! Line-oriented shell on the UART. Each completed line is parsed and run
//! against the command table; the only effect commands have is on the LED
//! strip. The console never touches the state machine.
//!
//! ## Commands
//!
//! - `help`        - list commands
//! - `led <r|g|b>` - set the strip color

pub mod commands;
pub mod error;
pub mod parser;
#[cfg(feature = "embedded")]
pub mod uart;

use core::fmt::Write;

use heapless::Vec;

pub use error::ConsoleError;

use crate::config::CONSOLE_LINE_LEN;
use crate::led::LedOutput;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Assembles input bytes into lines and executes them.
pub struct Console {
    line: Vec<u8, CONSOLE_LINE_LEN>,
    overflowed: bool,
}

impl Console {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one input byte.
    ///
    /// Returns the outcome of the command when the byte ends a non-empty
    /// line (CR or LF), `None` otherwise. An overlong line is discarded as
    /// a whole and reported when it ends.
    pub fn feed(
        &mut self,
        byte: u8,
        out: &mut dyn Write,
        led: &mut dyn LedOutput,
    ) -> Option<Result<(), ConsoleError>> {
        match byte {
            b'\r' | b'\n' => {
                if self.overflowed {
                    self.reset();
                    return Some(Err(ConsoleError::LineTooLong));
                }
                if self.line.is_empty() {
                    return None;
                }
                let result = self.execute_line(out, led);
                self.reset();
                Some(result)
            }
            BACKSPACE | DELETE => {
                self.line.pop();
                None
            }
            _ => {
                if self.line.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    fn execute_line(
        &self,
        out: &mut dyn Write,
        led: &mut dyn LedOutput,
    ) -> Result<(), ConsoleError> {
        let line = core::str::from_utf8(&self.line).map_err(|_| ConsoleError::InvalidValue)?;
        let cmd = parser::parse_line(line);
        debug!("Console command: {}", cmd.command);
        commands::execute(&cmd, out, led)
    }

    fn reset(&mut self) {
        self.line.clear();
        self.overflowed = false;
    }

    /// Bytes of the line typed so far.
    pub fn pending(&self) -> &[u8] {
        &self.line
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
