//! Terminal gestures standing in for the drop zone, file picker and buttons.

use mailer_core::{Msg, SourceFile};

pub const HELP_TEXT: &str = "\
Commands:
  drag               start dragging files over the drop zone
  leave              drag leaves the drop zone
  drop <file>...     drop files on the drop zone
  pick <file>...     choose files in the file picker
  send               send all collected addresses
  reset              discard collected files
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let mut words = split_words(line).into_iter();
    let Some(verb) = words.next() else {
        return Command::Empty;
    };
    let files = || words.clone().map(SourceFile::from_path).collect::<Vec<_>>();

    match verb.to_ascii_lowercase().as_str() {
        "drag" => Command::Dispatch(Msg::DragEntered),
        "leave" => Command::Dispatch(Msg::DragLeft),
        "drop" => Command::Dispatch(Msg::FilesDropped(files())),
        "pick" => Command::Dispatch(Msg::FilesPicked(files())),
        "send" => Command::Dispatch(Msg::SendClicked),
        "reset" => Command::Dispatch(Msg::ResetClicked),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(verb),
    }
}

/// Whitespace split that keeps double-quoted paths together.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut has_word = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                has_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if has_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drop_and_pick_carry_files_in_order() {
        let expected = vec![
            SourceFile::from_path("b.txt"),
            SourceFile::from_path("a.txt"),
        ];
        assert_eq!(
            parse_command("drop b.txt a.txt"),
            Command::Dispatch(Msg::FilesDropped(expected.clone()))
        );
        assert_eq!(
            parse_command("  PICK b.txt   a.txt "),
            Command::Dispatch(Msg::FilesPicked(expected))
        );
    }

    #[test]
    fn quoted_paths_keep_spaces() {
        assert_eq!(
            parse_command(r#"drop "my lists/first file.txt" other.txt"#),
            Command::Dispatch(Msg::FilesDropped(vec![
                SourceFile::from_path("my lists/first file.txt"),
                SourceFile::from_path("other.txt"),
            ]))
        );
    }

    #[test]
    fn simple_gestures_map_to_messages() {
        assert_eq!(parse_command("drag"), Command::Dispatch(Msg::DragEntered));
        assert_eq!(parse_command("leave"), Command::Dispatch(Msg::DragLeft));
        assert_eq!(parse_command("send"), Command::Dispatch(Msg::SendClicked));
        assert_eq!(parse_command("reset"), Command::Dispatch(Msg::ResetClicked));
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("?"), Command::Help);
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(
            parse_command("launch now"),
            Command::Unknown("launch".to_string())
        );
    }
}
