//! Wave Simulator Library
//!
//! Replays a JSON command script against a library fixture and produces one
//! JSON output record per command.
//!
//! This library exposes the core components for testing purposes.

pub mod command;
pub mod config;
pub mod error;
pub mod library;
pub mod session;

// Re-export commonly used types for convenience
pub use command::{Command, CommandInput, CommandOutput, EntryType};
pub use config::{AnalyticsSettings, SimulatorConfig};
pub use error::{Result, SimulatorError};
pub use library::{Library, LibraryInput};
pub use session::{Session, UserSession};
