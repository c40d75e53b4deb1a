//! Command line parser
//!
//! Whitespace split, at most two arguments kept.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// First token
    pub command: &'a str,
    pub args: [Option<&'a str>; 2],
    /// Number of arguments on the line, including any beyond `args`
    pub argc: usize,
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }
}

pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");

    let mut args = [None, None];
    let mut argc = 0;
    for arg in parts {
        if let Some(slot) = args.get_mut(argc) {
            *slot = Some(arg);
        }
        argc += 1;
    }

    ParsedCommand {
        command,
        args,
        argc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_and_args() {
        let cmd = parse_line("  led   g ");
        assert_eq!(cmd.command, "led");
        assert_eq!(cmd.arg(0), Some("g"));
        assert_eq!(cmd.arg(1), None);
        assert_eq!(cmd.argc, 1);
    }

    #[test]
    fn counts_extra_args() {
        let cmd = parse_line("led r g b");
        assert_eq!(cmd.argc, 3);
        assert_eq!(cmd.arg(1), Some("g"));
        assert_eq!(cmd.arg(2), None);
    }

    #[test]
    fn empty_line() {
        let cmd = parse_line("   ");
        assert_eq!(cmd.command, "");
        assert_eq!(cmd.argc, 0);
    }
}
