//! Command script format
//!
//! A script is a JSON array of commands, each carrying the issuing user and
//! a timestamp in seconds:
//!
//! ```json
//! [
//!   {"command": "load", "username": "alice", "timestamp": 0, "type": "playlist", "name": "Mix"},
//!   {"command": "playPause", "username": "alice", "timestamp": 5},
//!   {"command": "status", "username": "alice", "timestamp": 60}
//! ]
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use wave_playback::PlayerStatus;

/// What to load, by catalog name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Song,
    Playlist,
    Album,
    Podcast,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Playlist => "playlist",
            Self::Album => "album",
            Self::Podcast => "podcast",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One command and its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    Load {
        #[serde(rename = "type")]
        kind: EntryType,
        name: String,
    },
    PlayPause,
    Repeat,
    Shuffle {
        seed: i64,
    },
    Forward,
    Backward,
    Next,
    Prev,
    Status,
    Like,
    ShowPreferredSongs,
    SwitchConnectionStatus,
    BuyPremium,
    CancelPremium,
    Wrapped,
    EndProgram,
}

impl Command {
    /// Wire name, echoed in the output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::PlayPause => "playPause",
            Self::Repeat => "repeat",
            Self::Shuffle { .. } => "shuffle",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Status => "status",
            Self::Like => "like",
            Self::ShowPreferredSongs => "showPreferredSongs",
            Self::SwitchConnectionStatus => "switchConnectionStatus",
            Self::BuyPremium => "buyPremium",
            Self::CancelPremium => "cancelPremium",
            Self::Wrapped => "wrapped",
            Self::EndProgram => "endProgram",
        }
    }

    /// Whether the command is issued on behalf of a user
    pub fn needs_user(&self) -> bool {
        !matches!(self, Self::EndProgram)
    }

    /// Whether an offline user is refused this command
    pub fn needs_online(&self) -> bool {
        matches!(
            self,
            Self::Load { .. }
                | Self::PlayPause
                | Self::Repeat
                | Self::Shuffle { .. }
                | Self::Forward
                | Self::Backward
                | Self::Next
                | Self::Prev
                | Self::Like
        )
    }
}

/// Command as read from the script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInput {
    #[serde(flatten)]
    pub command: Command,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Seconds since the start of the run; never decreases
    pub timestamp: u64,
}

impl CommandInput {
    pub fn new(command: Command, username: Option<&str>, timestamp: u64) -> Self {
        Self {
            command,
            username: username.map(str::to_string),
            timestamp,
        }
    }

    /// Read a whole script from a JSON file
    pub fn load_script(path: &Path) -> Result<Vec<Self>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Result of one command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub command: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    pub timestamp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlayerStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl CommandOutput {
    /// Output echoing `input`, with nothing filled in yet
    pub fn for_input(input: &CommandInput) -> Self {
        Self {
            command: input.command.name().to_string(),
            user: input.username.clone(),
            timestamp: input.timestamp,
            message: None,
            stats: None,
            result: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_stats(mut self, stats: PlayerStatus) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        let script: Vec<CommandInput> = serde_json::from_str(
            r#"[
                {"command": "load", "username": "ann", "timestamp": 3, "type": "album", "name": "LP"},
                {"command": "shuffle", "username": "ann", "timestamp": 4, "seed": -12},
                {"command": "endProgram", "timestamp": 9}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            script[0].command,
            Command::Load {
                kind: EntryType::Album,
                name: "LP".to_string()
            }
        );
        assert_eq!(script[1].command, Command::Shuffle { seed: -12 });
        assert_eq!(script[2].username, None);
        assert!(!script[2].command.needs_user());
    }

    #[test]
    fn parses_account_commands() {
        let script: Vec<CommandInput> = serde_json::from_str(
            r#"[
                {"command": "switchConnectionStatus", "username": "ann", "timestamp": 1},
                {"command": "like", "username": "ann", "timestamp": 2},
                {"command": "showPreferredSongs", "username": "ann", "timestamp": 3}
            ]"#,
        )
        .unwrap();

        assert_eq!(script[0].command, Command::SwitchConnectionStatus);
        assert_eq!(script[0].command.name(), "switchConnectionStatus");
        assert!(!script[0].command.needs_online());
        assert!(script[1].command.needs_online());
        assert!(!script[2].command.needs_online());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let parsed: std::result::Result<CommandInput, _> =
            serde_json::from_str(r#"{"command": "teleport", "timestamp": 1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_omits_empty_fields() {
        let input = CommandInput::new(Command::Repeat, Some("ann"), 7);
        let output = CommandOutput::for_input(&input).with_message("Repeat mode changed to repeat all.");

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["command"], "repeat");
        assert_eq!(json["user"], "ann");
        assert_eq!(json["timestamp"], 7);
        assert!(json.get("stats").is_none());
        assert!(json.get("result").is_none());
    }
}
