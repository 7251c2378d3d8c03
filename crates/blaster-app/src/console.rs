//! Line-based input adapter.
//!
//! Turns lines such as `down w`, `up space` or `spawn 0 0.3 -3` into player
//! commands. A line starting with `{` is read as a JSON `PlayerCommand`.

use std::fmt;

use blaster_core::commands::PlayerCommand;
use blaster_core::input::Key;

/// What a console line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Command(PlayerCommand),
    /// Print the latest snapshot summary.
    Status,
    Quit,
}

#[derive(Debug)]
pub enum ConsoleError {
    UnknownCommand(String),
    UnknownKey(String),
    MissingArgument(&'static str),
    BadNumber(String),
    Json(serde_json::Error),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::UnknownCommand(c) => write!(f, "unknown command `{c}`"),
            ConsoleError::UnknownKey(k) => write!(f, "unknown key `{k}`"),
            ConsoleError::MissingArgument(what) => write!(f, "missing {what}"),
            ConsoleError::BadNumber(n) => write!(f, "not a number: `{n}`"),
            ConsoleError::Json(e) => write!(f, "bad command JSON: {e}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConsoleError::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.starts_with('{') {
        let command = serde_json::from_str(line).map_err(ConsoleError::Json)?;
        return Ok(Some(ConsoleInput::Command(command)));
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let input = match verb.as_str() {
        "down" | "press" => ConsoleInput::Command(PlayerCommand::KeyDown {
            key: key_arg(words.next())?,
        }),
        "up" | "release" => ConsoleInput::Command(PlayerCommand::KeyUp {
            key: key_arg(words.next())?,
        }),
        "fire" => ConsoleInput::Command(PlayerCommand::Fire),
        "blur" | "release-all" => ConsoleInput::Command(PlayerCommand::ReleaseAllKeys),
        "restart" => ConsoleInput::Command(PlayerCommand::Restart),
        "spawn" => {
            let x = number_arg(words.next(), "x")?;
            let y = number_arg(words.next(), "y")?;
            let z = number_arg(words.next(), "z")?;
            ConsoleInput::Command(PlayerCommand::SpawnTarget { x, y, z })
        }
        "random" => {
            let raw = words.next().ok_or(ConsoleError::MissingArgument("count"))?;
            let count = raw
                .parse()
                .map_err(|_| ConsoleError::BadNumber(raw.to_string()))?;
            ConsoleInput::Command(PlayerCommand::SpawnRandomTargets { count })
        }
        "status" => ConsoleInput::Status,
        "quit" | "exit" => ConsoleInput::Quit,
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };
    Ok(Some(input))
}

fn key_arg(word: Option<&str>) -> Result<Key, ConsoleError> {
    let word = word.ok_or(ConsoleError::MissingArgument("key"))?;
    Key::from_name(word).ok_or_else(|| ConsoleError::UnknownKey(word.to_string()))
}

fn number_arg(word: Option<&str>, name: &'static str) -> Result<f64, ConsoleError> {
    let word = word.ok_or(ConsoleError::MissingArgument(name))?;
    word.parse()
        .map_err(|_| ConsoleError::BadNumber(word.to_string()))
}
