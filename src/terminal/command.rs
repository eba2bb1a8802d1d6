use thiserror::Error;

use crate::domain::{ModelTarget, UnknownModelTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the analysis input with this text and submit it.
    Analyze(String),
    /// A line with nothing but whitespace; the stored input is kept.
    Blank,
    /// Start collecting a multi-line input.
    Paste,
    /// Submit the current input again.
    Resubmit,
    ShowModel,
    SelectModel(ModelTarget),
    Health,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    UnknownModel(#[from] UnknownModelTarget),
    #[error("unknown command `/{0}`, type /help for the list")]
    Unknown(String),
}

pub const HELP: &str = "\
Paste email content or a URL and press enter to analyze it.
  /model [email|url|umpire]  show or change the detection model
  /paste                     enter multi-line content, end with a lone `.`
  /submit                    analyze the current input again
  /health                    check the detection server
  /reset                     abandon the pending request and clear the result
  /help                      show this help
  /quit                      exit";

pub fn parse(line: &str) -> Result<Command, CommandError> {
    if line.trim().is_empty() {
        return Ok(Command::Blank);
    }
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Ok(Command::Analyze(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let argument = parts.next();

    match (name.as_str(), argument) {
        ("model", None) => Ok(Command::ShowModel),
        ("model", Some(raw)) => Ok(Command::SelectModel(raw.parse()?)),
        ("paste", _) => Ok(Command::Paste),
        ("submit", _) => Ok(Command::Resubmit),
        ("health", _) => Ok(Command::Health),
        ("reset", _) => Ok(Command::Reset),
        ("help" | "?", _) => Ok(Command::Help),
        ("quit" | "exit", _) => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(name)),
    }
}

/// Line that ends a paste.
pub const PASTE_TERMINATOR: &str = ".";

/// Collects pasted lines verbatim, commands included, until a lone `.`.
#[derive(Debug, Default)]
pub struct PasteBuffer {
    lines: Vec<String>,
}

impl PasteBuffer {
    /// Returns the joined text once the terminator arrives.
    pub fn push(&mut self, line: &str) -> Option<String> {
        if line.trim_end() == PASTE_TERMINATOR {
            return Some(self.finish());
        }
        self.lines.push(line.to_string());
        None
    }

    /// Joins whatever was collected; used on end of input.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.lines).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_analyzed_verbatim() {
        assert_eq!(
            parse("  Your account is locked ").unwrap(),
            Command::Analyze("  Your account is locked ".to_string())
        );
        assert_eq!(parse("").unwrap(), Command::Blank);
        assert_eq!(parse("  \t ").unwrap(), Command::Blank);
    }

    #[test]
    fn model_command_accepts_only_known_targets() {
        assert_eq!(parse("/model").unwrap(), Command::ShowModel);
        assert_eq!(
            parse("/model url").unwrap(),
            Command::SelectModel(ModelTarget::Url)
        );
        assert_eq!(
            parse("/MODEL Umpire").unwrap(),
            Command::SelectModel(ModelTarget::Umpire)
        );
        assert_eq!(
            parse("/model sms").unwrap_err(),
            CommandError::UnknownModel(UnknownModelTarget("sms".to_string()))
        );
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(
            parse("/scan").unwrap_err(),
            CommandError::Unknown("scan".to_string())
        );
        assert_eq!(parse("/quit").unwrap(), Command::Quit);
        assert_eq!(parse("/reset").unwrap(), Command::Reset);
    }

    #[test]
    fn paste_keeps_every_line_until_terminator() {
        assert_eq!(parse("/paste").unwrap(), Command::Paste);

        let mut buffer = PasteBuffer::default();
        let email = ["Dear user,", "verify your account at http://x.test", "/login now", ""];
        for line in email {
            assert_eq!(buffer.push(line), None);
        }
        assert_eq!(
            buffer.push(".").unwrap(),
            "Dear user,\nverify your account at http://x.test\n/login now\n"
        );

        // The buffer starts empty again for the next paste.
        assert_eq!(buffer.push(". "), Some(String::new()));
    }

    #[test]
    fn paste_flushes_on_end_of_input() {
        let mut buffer = PasteBuffer::default();
        assert_eq!(buffer.push("first line"), None);
        assert_eq!(buffer.push("second line"), None);
        assert_eq!(buffer.finish(), "first line\nsecond line");
    }
}
