//! Command handlers

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::ConsoleError;
use crate::led::{LedColor, LedOutput};

pub type Handler =
    fn(&ParsedCommand<'_>, &mut dyn Write, &mut dyn LedOutput) -> Result<(), ConsoleError>;

pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "List commands", handler: cmd_help },
    CommandDescriptor { name: "led", brief: "Set LED color: led <r|g|b>", handler: cmd_led },
];

/// Execute a parsed command
pub fn execute(
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
    led: &mut dyn LedOutput,
) -> Result<(), ConsoleError> {
    if cmd.command.is_empty() {
        return Ok(());
    }

    let descriptor = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (descriptor.handler)(cmd, out, led)
}

// --- Command Implementations ---

fn cmd_help(
    _cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
    _led: &mut dyn LedOutput,
) -> Result<(), ConsoleError> {
    for c in COMMANDS {
        let _ = writeln!(out, "  {:<6} {}", c.name, c.brief);
    }
    Ok(())
}

fn cmd_led(
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
    led: &mut dyn LedOutput,
) -> Result<(), ConsoleError> {
    let color = match cmd.arg(0) {
        Some(color) if cmd.argc == 1 => color,
        _ => {
            let _ = writeln!(out, "Usage: led <r|g|b>");
            return Err(ConsoleError::MissingArg);
        }
    };

    let color = match color {
        "r" => LedColor::Red,
        "g" => LedColor::Green,
        "b" => LedColor::Blue,
        _ => {
            let _ = writeln!(out, "Invalid color (r/g/b)");
            return Err(ConsoleError::InvalidValue);
        }
    };

    led.set_color(color);
    let _ = writeln!(out, "LED -> {}", color.name());
    Ok(())
}
