//! Slash commands typed into the input line.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/image <path|data-url>`: attach to the next message.
    Image(String),
    /// `/clear-images`
    ClearImages,
    /// `/export [dir]`: write study notes; current directory by default.
    Export(Option<PathBuf>),
    Help,
    Unknown(String),
}

pub const HELP_TEXT: &str =
    "/image <path>  attach image  ·  /clear-images  ·  /export [dir]  save notes  ·  /help";

impl Command {
    /// `None` when `line` is not a command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let command = match name {
            "image" | "img" if !arg.is_empty() => Command::Image(arg.to_string()),
            "clear-images" => Command::ClearImages,
            "export" => Command::Export((!arg.is_empty()).then(|| PathBuf::from(arg))),
            "help" => Command::Help,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse("What is a ledger?"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn image_with_path() {
        assert_eq!(
            Command::parse("/image  ~/notes/page 1.png "),
            Some(Command::Image("~/notes/page 1.png".to_string()))
        );
    }

    #[test]
    fn image_without_path_is_unknown() {
        assert!(matches!(Command::parse("/image"), Some(Command::Unknown(_))));
    }

    #[test]
    fn export_optional_dir() {
        assert_eq!(Command::parse("/export"), Some(Command::Export(None)));
        assert_eq!(
            Command::parse("/export /tmp/notes"),
            Some(Command::Export(Some(PathBuf::from("/tmp/notes"))))
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(Command::parse("/clear-images"), Some(Command::ClearImages));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(
            Command::parse("/quit now"),
            Some(Command::Unknown("/quit now".to_string()))
        );
    }
}
