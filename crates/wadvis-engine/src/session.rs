//! Engine session: one engine, one output archive.
//!
//! A session is created once, run against an input archive, and then
//! queried for the output archive the engine produced. The output is only
//! visible after a run completes.
//!
//! ```text
//! Created ──run──> Running ──ok──> Completed ──run──> Running ...
//!                     │
//!                     └──err──> Failed ──run──> Running ...
//! ```

use std::fmt;

use tracing::{debug, info, warn};
use wadvis_formats::wad::constants::DEFAULT_MAX_LUMPS;
use wadvis_formats::wad::{HeapAllocator, WriterOptions};
use wadvis_formats::{WadError, WadKind, WadReader, WadWriter};

use crate::engine::{EngineInput, VisEngine};
use crate::error::SessionError;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Constructed, never run
    Created,
    /// Engine is running
    Running,
    /// Last run finished and the output archive is final
    Completed,
    /// Last run failed; see [`Session::last_error`]
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Directory capacity of the output archive
    pub max_output_lumps: usize,
    /// Kind of the output archive; `None` keeps the input's kind
    pub output_kind: Option<WadKind>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_output_lumps: DEFAULT_MAX_LUMPS,
            output_kind: None,
        }
    }
}

/// Owns a visibility engine and the archive it writes.
#[derive(Debug)]
pub struct Session<E: VisEngine> {
    engine: E,
    config: SessionConfig,
    state: SessionState,
    output: Option<WadWriter>,
    last_error: Option<String>,
}

impl<E: VisEngine> Session<E> {
    /// Create a session around `engine`
    pub fn new(engine: E, config: SessionConfig) -> Self {
        debug!(
            "Created session for engine '{}' (capacity {} lumps)",
            engine.name(),
            config.max_output_lumps
        );
        Self {
            engine,
            config,
            state: SessionState::Created,
            output: None,
            last_error: None,
        }
    }

    /// Create a session with the default configuration
    pub fn with_engine(engine: E) -> Self {
        Self::new(engine, SessionConfig::default())
    }

    /// Run the engine on a GL-node archive
    ///
    /// Engine failures are caught here: the session moves to
    /// [`SessionState::Failed`] and the error is returned, but nothing is
    /// propagated past the caller.
    pub fn run(&mut self, nodes: &[u8]) -> Result<()> {
        self.execute(None, nodes)
    }

    /// Run the engine on a GL-node archive with its level archive as source
    pub fn run_with_source(&mut self, source: &[u8], nodes: &[u8]) -> Result<()> {
        self.execute(Some(source), nodes)
    }

    fn execute(&mut self, source: Option<&[u8]>, nodes: &[u8]) -> Result<()> {
        self.output = None;
        self.last_error = None;
        self.transition(SessionState::Running);

        match self.build(source, nodes) {
            Ok(output) => {
                info!(
                    "Engine '{}' wrote {} lumps ({} bytes)",
                    self.engine.name(),
                    output.lump_count(),
                    output.size()
                );
                self.output = Some(output);
                self.transition(SessionState::Completed);
                Ok(())
            }
            Err(err) => {
                warn!("Engine '{}' failed: {}", self.engine.name(), err);
                self.last_error = Some(err.to_string());
                self.transition(SessionState::Failed);
                Err(err)
            }
        }
    }

    fn build(&mut self, source: Option<&[u8]>, nodes: &[u8]) -> Result<WadWriter> {
        let mut input = EngineInput::new(WadReader::open(nodes).map_err(SessionError::Input)?);
        if let Some(source) = source {
            input = input.with_source(WadReader::open(source).map_err(SessionError::Input)?);
        }

        let kind = self.config.output_kind.unwrap_or_else(|| input.nodes.kind());
        let options = WriterOptions::default().with_max_lumps(self.config.max_output_lumps);
        let mut output =
            WadWriter::open_with(kind, options, HeapAllocator).map_err(SessionError::Output)?;

        self.engine.build(&input, &mut output)?;
        output.close().map_err(SessionError::Output)?;
        Ok(output)
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session state {} -> {}", self.state, next);
        self.state = next;
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session settings
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The wrapped engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Message of the error that failed the last run
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Size of the finished output archive in bytes
    pub fn output_size(&self) -> Result<u32> {
        let bytes = self.output_bytes()?;
        u32::try_from(bytes.len()).map_err(|_| {
            SessionError::Output(WadError::ArchiveTooLarge {
                size: bytes.len() as u64,
            })
        })
    }

    /// Read-only view of the finished output archive
    pub fn output_bytes(&self) -> Result<&[u8]> {
        match (&self.output, self.state) {
            (Some(output), SessionState::Completed) => Ok(output.as_bytes()),
            (_, state) => Err(SessionError::NotCompleted { state }),
        }
    }

    /// Release the engine and all buffers
    pub fn destroy(self) {
        debug!(
            "Destroying session for engine '{}' in state {}",
            self.engine.name(),
            self.state
        );
    }
}
