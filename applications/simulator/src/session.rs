//! Simulation session
//!
//! Owns the catalog, one [`Player`] per listener and the revenue ledger, and
//! executes script commands in timestamp order. Every command first moves
//! all players forward to its timestamp.

use crate::command::{Command, CommandInput, CommandOutput, EntryType};
use crate::config::AnalyticsSettings;
use crate::error::{Result, SimulatorError};
use crate::library::Library;
use std::collections::BTreeSet;
use std::time::Duration;
use wave_analytics::{RevenueLedger, Wrapped};
use wave_core::{Catalog, CatalogLookup, CollectionKind, CreatorRole, ItemId};
use wave_playback::{LibraryEntry, Player, PlayerError, SourceKind};

/// A listener and their player
#[derive(Debug, Clone)]
pub struct UserSession {
    pub name: String,
    pub player: Player,

    /// Offline players keep their state but do not advance
    pub online: bool,

    /// Liked songs, listed in catalog order
    pub liked: BTreeSet<ItemId>,
}

impl UserSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player: Player::new(),
            online: true,
            liked: BTreeSet::new(),
        }
    }
}

/// Simulation state for one script run
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    users: Vec<UserSession>,
    revenue: RevenueLedger,
    settings: AnalyticsSettings,

    /// Timestamp of the last executed command
    timestamp: u64,
}

impl Session {
    pub fn new(library: Library, settings: AnalyticsSettings) -> Self {
        let users = library
            .users
            .into_iter()
            .map(UserSession::new)
            .collect();

        Self {
            catalog: library.catalog,
            users,
            revenue: RevenueLedger::new(),
            settings,
            timestamp: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn users(&self) -> &[UserSession] {
        &self.users
    }

    pub fn user(&self, username: &str) -> Option<&UserSession> {
        self.users.iter().find(|user| user.name == username)
    }

    pub fn player(&self, username: &str) -> Option<&Player> {
        self.user(username).map(|user| &user.player)
    }

    pub fn revenue(&self) -> &RevenueLedger {
        &self.revenue
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Execute a whole script
    pub fn run(&mut self, script: &[CommandInput]) -> Result<Vec<CommandOutput>> {
        tracing::info!(commands = script.len(), users = self.users.len(), "Starting run");

        let outputs = script
            .iter()
            .map(|input| self.execute(input))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(timestamp = self.timestamp, "Run finished");
        Ok(outputs)
    }

    /// Execute one command
    pub fn execute(&mut self, input: &CommandInput) -> Result<CommandOutput> {
        self.advance_to(input.timestamp)?;
        tracing::debug!(
            command = input.command.name(),
            user = input.username.as_deref().unwrap_or_default(),
            timestamp = input.timestamp,
            "Executing command"
        );

        let output = CommandOutput::for_input(input);
        let username = input.username.as_deref().unwrap_or_default();

        let output = match &input.command {
            Command::EndProgram => self.end_program(output)?,
            Command::Wrapped => self.wrapped(username, output)?,
            command => match self.user_index(username) {
                Ok(index) if command.needs_online() && !self.users[index].online => {
                    output.with_message(format!("{username} is offline."))
                }
                Ok(index) => self.user_command(index, command, output)?,
                Err(message) => output.with_message(message),
            },
        };

        self.log_events();
        Ok(output)
    }

    /// Move every online player forward to `timestamp`
    fn advance_to(&mut self, timestamp: u64) -> Result<()> {
        if timestamp < self.timestamp {
            return Err(SimulatorError::InvalidTimestamp {
                previous: self.timestamp,
                current: timestamp,
            });
        }

        let delta = Duration::from_secs(timestamp - self.timestamp);
        self.timestamp = timestamp;
        if delta.is_zero() {
            return Ok(());
        }

        for user in &mut self.users {
            if user.online && user.player.source().is_some() {
                user.player.advance_time(delta)?;
            }
        }
        Ok(())
    }

    /// Index of a listener, or the message explaining why there is none
    fn user_index(&self, username: &str) -> std::result::Result<usize, String> {
        if let Some(index) = self.users.iter().position(|user| user.name == username) {
            return Ok(index);
        }
        match self.catalog.find_creator(username) {
            Some(_) => Err(format!("{username} is not a normal user.")),
            None => Err(format!("The user {username} does not exist.")),
        }
    }

    // ===== Player Commands =====

    fn user_command(
        &mut self,
        index: usize,
        command: &Command,
        output: CommandOutput,
    ) -> Result<CommandOutput> {
        let Self {
            catalog,
            users,
            revenue,
            settings,
            ..
        } = self;
        let catalog = &*catalog;
        let UserSession {
            name,
            player,
            online,
            liked,
        } = &mut users[index];
        let name = name.as_str();

        let message = match command {
            Command::Load { kind, name: entry } => {
                let Some(target) = resolve_entry(catalog, *kind, entry) else {
                    return Ok(output.with_message(format!("The {kind} {entry} does not exist.")));
                };
                player.load(catalog, target).map(|()| {
                    if let LibraryEntry::Song(song) = target {
                        if let Some(item) = catalog.resolve_item(song) {
                            revenue.touch(item.owner);
                        }
                    }
                    "Playback loaded successfully.".to_string()
                })
            }
            Command::PlayPause => player.play_pause().map(|paused| {
                if paused {
                    "Playback paused successfully.".to_string()
                } else {
                    "Playback resumed successfully.".to_string()
                }
            }),
            Command::Repeat => player
                .repeat_cycle()
                .map(|mode| format!("Repeat mode changed to {mode}.")),
            Command::Shuffle { seed } => player.shuffle_toggle(*seed).map(|enabled| {
                if enabled {
                    "Shuffle function activated successfully.".to_string()
                } else {
                    "Shuffle function deactivated successfully.".to_string()
                }
            }),
            Command::Forward => player
                .skip_next()
                .map(|_| "Skipped forward successfully.".to_string()),
            Command::Backward => player
                .skip_prev()
                .map(|_| "Rewound successfully.".to_string()),
            Command::Next => player.next().map(|()| {
                format!(
                    "Skipped to next track successfully. The current track is {}.",
                    current_name(player, catalog)
                )
            }),
            Command::Prev => player.prev().map(|()| {
                format!(
                    "Returned to previous track successfully. The current track is {}.",
                    current_name(player, catalog)
                )
            }),
            Command::Status => return Ok(output.with_stats(player.status(catalog))),
            Command::Like => Ok(toggle_like(liked, player, catalog)),
            Command::ShowPreferredSongs => {
                let songs: Vec<&str> = liked
                    .iter()
                    .filter_map(|&song| catalog.resolve_item(song))
                    .map(|song| song.name.as_str())
                    .collect();
                return Ok(output.with_result(serde_json::to_value(songs)?));
            }
            Command::SwitchConnectionStatus => {
                *online = !*online;
                tracing::debug!(user = name, online = *online, "Connection status changed");
                Ok(format!("{name} has changed status successfully."))
            }
            Command::BuyPremium => Ok(if player.begin_premium_segment() {
                format!("{name} bought the subscription successfully.")
            } else {
                format!("{name} is already a premium user.")
            }),
            Command::CancelPremium => match player.end_premium_segment() {
                Some(window) => {
                    let credited = revenue.distribute_premium(
                        catalog,
                        player.history().window(window),
                        settings.premium_credit,
                    )?;
                    tracing::info!(user = name, songs = credited, "Premium cancelled");
                    Ok(format!("{name} cancelled the subscription successfully."))
                }
                None => Ok(format!("{name} is not a premium user.")),
            },
            // Dispatched before user lookup
            Command::Wrapped | Command::EndProgram => return Ok(output),
        };

        let message = message.unwrap_or_else(|err| describe_error(command, &err));
        Ok(output.with_message(message))
    }

    // ===== Analytics Commands =====

    fn wrapped(&self, username: &str, output: CommandOutput) -> Result<CommandOutput> {
        let Some(creator) = self.catalog.find_creator(username) else {
            return Ok(output.with_message(format!("The user {username} does not exist.")));
        };
        let wrapped = Wrapped::new(&self.catalog, self.settings.top_limit);
        let histories = || {
            self.users
                .iter()
                .map(|user| (user.name.as_str(), user.player.history().entries()))
        };

        let (result, role) = match creator.role {
            CreatorRole::Listener => {
                let history = self
                    .player(username)
                    .map(|player| player.history().entries())
                    .unwrap_or_default();
                (
                    wrapped.user(history)?.map(serde_json::to_value).transpose()?,
                    "user",
                )
            }
            CreatorRole::Artist => (
                wrapped
                    .artist(creator.id, histories())?
                    .map(serde_json::to_value)
                    .transpose()?,
                "artist",
            ),
            CreatorRole::Host => (
                wrapped
                    .host(creator.id, histories())?
                    .map(serde_json::to_value)
                    .transpose()?,
                "host",
            ),
        };

        Ok(match result {
            Some(value) => output.with_result(value),
            None => output.with_message(format!("No data to show for {role} {username}.")),
        })
    }

    fn end_program(&mut self, output: CommandOutput) -> Result<CommandOutput> {
        for user in &mut self.users {
            if let Some(window) = user.player.end_premium_segment() {
                let credited = self.revenue.distribute_premium(
                    &self.catalog,
                    user.player.history().window(window),
                    self.settings.premium_credit,
                )?;
                tracing::debug!(user = %user.name, songs = credited, "Closed premium window");
            }
        }

        let ranking = self.revenue.ranking(&self.catalog)?;
        tracing::info!(artists = ranking.rows().len(), "Program ended");
        Ok(output.with_result(serde_json::to_value(&ranking)?))
    }

    fn log_events(&mut self) {
        for user in &mut self.users {
            for event in user.player.drain_events() {
                tracing::trace!(user = %user.name, event = event.name(), ?event, "Playback event");
            }
        }
    }
}

/// Look up a catalog entry by type and name
fn resolve_entry(catalog: &Catalog, kind: EntryType, name: &str) -> Option<LibraryEntry> {
    let collection = |kind| catalog.find_collection(kind, name).map(|c| c.id);
    match kind {
        EntryType::Song => catalog.find_song(name).map(|song| LibraryEntry::Song(song.id)),
        EntryType::Playlist => collection(CollectionKind::Playlist).map(LibraryEntry::Playlist),
        EntryType::Album => collection(CollectionKind::Album).map(LibraryEntry::Album),
        EntryType::Podcast => collection(CollectionKind::Podcast).map(LibraryEntry::Podcast),
    }
}

/// Like the playing song, or unlike it if already liked
fn toggle_like(liked: &mut BTreeSet<ItemId>, player: &Player, catalog: &Catalog) -> String {
    let Some(kind) = player.source_kind() else {
        return "Please load a source before liking or unliking.".to_string();
    };
    let song = player
        .current_item(catalog)
        .filter(|item| kind != SourceKind::Podcast && item.is_song());
    let Some(song) = song else {
        return "Loaded source is not a song.".to_string();
    };

    if liked.remove(&song.id) {
        "Unlike registered successfully.".to_string()
    } else {
        liked.insert(song.id);
        "Like registered successfully.".to_string()
    }
}

fn current_name(player: &Player, catalog: &Catalog) -> String {
    player
        .current_item(catalog)
        .map(|item| item.name.clone())
        .unwrap_or_default()
}

/// User-facing text for a rejected player operation
fn describe_error(command: &Command, err: &PlayerError) -> String {
    match err {
        PlayerError::NoActiveSource => {
            let action = match command {
                Command::PlayPause => "attempting to pause or resume playback",
                Command::Repeat => "setting the repeat status",
                Command::Shuffle { .. } => "using the shuffle function",
                Command::Forward => "attempting to forward",
                Command::Backward => "rewinding",
                Command::Next => "skipping to the next track",
                Command::Prev => "returning to the previous track",
                _ => "using this command",
            };
            format!("Please load a source before {action}.")
        }
        PlayerError::EmptyCollection => "You can't load an empty audio collection!".to_string(),
        PlayerError::InvalidSourceKind { .. } => match command {
            Command::Shuffle { .. } => "The loaded source is not a playlist or an album.".to_string(),
            Command::Forward | Command::Backward => "The loaded source is not a podcast.".to_string(),
            _ => err.to_string(),
        },
        PlayerError::IndexOutOfRange { .. } => err.to_string(),
    }
}
