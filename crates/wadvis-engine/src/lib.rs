//! Session façade and command-line front end for WAD visibility builders.
//!
//! A visibility engine reads the GL-node archive (`.gwa`) produced by a
//! node builder and appends potentially-visible-set data to a new archive.
//! The algorithm itself lives behind the [`VisEngine`] trait; this crate
//! owns everything around it:
//! - `engine`: the engine boundary and [`PlaceholderVisEngine`]
//! - `session`: lifetime and state of one engine and its output archive
//! - `config`: CLI configuration and validation
//! - `error`: error types
//!
//! # Example
//!
//! ```
//! use wadvis_engine::{PlaceholderVisEngine, Session, SessionState};
//! use wadvis_formats::{WadKind, WadReader, WadWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut nodes = WadWriter::open(WadKind::Patch)?;
//! nodes.add_lump("GL_MAP01", &[])?;
//! nodes.add_lump("GL_VERT", &[0; 8])?;
//! nodes.close()?;
//!
//! let mut session = Session::with_engine(PlaceholderVisEngine::new());
//! session.run(nodes.as_bytes())?;
//! assert_eq!(session.state(), SessionState::Completed);
//!
//! let output = WadReader::open(session.output_bytes()?)?;
//! assert!(output.contains("GL_PVS"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use config::{CliConfig, Command, ExtractArgs, ListArgs, VisArgs};
pub use engine::{EngineInput, PlaceholderVisEngine, VisEngine};
pub use error::{ConfigError, EngineError, SessionError};
pub use session::{Session, SessionConfig, SessionState};
