//! Error types for the engine façade and the command-line front end.
//!
//! All errors use thiserror; only the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;
use wadvis_formats::WadError;

use crate::session::SessionState;

/// Failures reported by a visibility engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input archive has no level markers to process
    #[error("No levels found in input archive")]
    NoLevels,

    /// A GL level has no matching map level in the source archive
    #[error("Level {0} has GL nodes but no map data in the source archive")]
    MissingLevel(String),

    /// Level geometry cannot be processed
    #[error("Bad geometry in level {level}: {reason}")]
    Geometry {
        /// Level marker name
        level: String,
        /// What the engine rejected
        reason: String,
    },

    /// Reading input lumps or writing output lumps failed
    #[error("Archive error: {0}")]
    Wad(#[from] WadError),
}

/// Session-level errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input archive could not be parsed
    #[error("Invalid input archive: {0}")]
    Input(#[source] WadError),

    /// Output archive could not be created or finalized
    #[error("Output archive error: {0}")]
    Output(#[source] WadError),

    /// Engine run failed
    #[error("Engine failed: {0}")]
    Engine(#[from] EngineError),

    /// Output requested before a successful run
    #[error("No output available: session is {state}")]
    NotCompleted {
        /// State the session was in
        state: SessionState,
    },
}

impl SessionError {
    /// Check if the input archive was rejected
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Check if the engine itself reported the failure
    pub fn is_engine_error(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration value
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Option value is out of range
    #[error("Invalid value for {option}: {reason}")]
    InvalidValue {
        /// Option name
        option: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}
