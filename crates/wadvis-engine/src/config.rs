//! Command-line configuration.
//!
//! Every option can also be set through a `WADVIS_*` environment variable.
//! [`CliConfig::validate`] checks that input files exist and that option
//! values are usable before any archive is read.
//!
//! # Example
//!
//! ```no_run
//! use wadvis_engine::CliConfig;
//!
//! let config = CliConfig::from_args();
//! config.validate().expect("Invalid configuration");
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use wadvis_formats::WadKind;
use wadvis_formats::wad::constants::DEFAULT_MAX_LUMPS;

use crate::error::ConfigError;
use crate::session::SessionConfig;

/// Extension of GL-node archives written next to the level archive
pub const GWA_EXTENSION: &str = "gwa";

/// Command-line configuration for the `wadvis` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wadvis",
    about = "Build visibility data for GL-node WAD archives",
    version
)]
pub struct CliConfig {
    /// Log filter (trace, debug, info, warn, error, or a tracing directive)
    #[arg(long, global = true, env = "WADVIS_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the visibility engine on a GL-node archive
    Vis(VisArgs),
    /// Print the directory of an archive
    List(ListArgs),
    /// Write one lump of an archive to a file
    Extract(ExtractArgs),
}

/// Options for `wadvis vis`
#[derive(Debug, Clone, Args)]
pub struct VisArgs {
    /// Level archive (IWAD or PWAD) the GL nodes were built from
    #[arg(long, env = "WADVIS_WAD")]
    pub wad: Option<PathBuf>,

    /// GL-node archive; defaults to the level archive with a .gwa extension
    #[arg(long, env = "WADVIS_GWA")]
    pub gwa: Option<PathBuf>,

    /// Output file; defaults to overwriting the GL-node archive
    #[arg(short, long, env = "WADVIS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output archive kind (IWAD or PWAD); defaults to the input's kind
    #[arg(long, env = "WADVIS_KIND", value_parser = parse_kind)]
    pub kind: Option<WadKind>,

    /// Directory capacity of the output archive
    #[arg(long, env = "WADVIS_MAX_LUMPS", default_value_t = DEFAULT_MAX_LUMPS)]
    pub max_lumps: usize,
}

/// Options for `wadvis list`
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Archive to list
    pub file: PathBuf,
}

/// Options for `wadvis extract`
#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Archive to read
    pub file: PathBuf,

    /// Lump name; the last lump with this name is extracted
    pub lump: String,

    /// Patch archive loaded on top of the first one; repeat to layer more
    #[arg(long = "patch")]
    pub patches: Vec<PathBuf>,

    /// File to write the lump data to
    #[arg(short, long)]
    pub output: PathBuf,
}

fn parse_kind(value: &str) -> Result<WadKind, String> {
    value
        .to_ascii_uppercase()
        .parse::<WadKind>()
        .map_err(|e| e.to_string())
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - neither `--wad` nor `--gwa` is given to `vis`
    /// - an input file doesn't exist
    /// - `--max-lumps` is zero
    /// - the extracted lump name is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.command {
            Command::Vis(args) => args.validate(),
            Command::List(args) => require_file(&args.file),
            Command::Extract(args) => {
                require_file(&args.file)?;
                for patch in &args.patches {
                    require_file(patch)?;
                }
                if args.lump.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        option: "lump",
                        reason: "lump name is empty".to_string(),
                    });
                }
                Ok(())
            }
        }
    }
}

impl VisArgs {
    /// GL-node archive to read
    ///
    /// `--gwa` if given, otherwise the level archive path with its
    /// extension replaced by `.gwa`.
    pub fn gwa_path(&self) -> Option<PathBuf> {
        self.gwa
            .clone()
            .or_else(|| self.wad.as_ref().map(|wad| wad.with_extension(GWA_EXTENSION)))
    }

    /// File the result is written to
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.clone().or_else(|| self.gwa_path())
    }

    /// Session settings derived from these options
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_output_lumps: self.max_lumps,
            output_kind: self.kind,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let gwa = self.gwa_path().ok_or_else(|| {
            ConfigError::MissingRequired("--wad or --gwa must be given".to_string())
        })?;
        require_file(&gwa)?;
        if let Some(wad) = &self.wad {
            require_file(wad)?;
        }

        if self.max_lumps == 0 {
            return Err(ConfigError::InvalidValue {
                option: "max-lumps",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn require_file(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::FileNotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vis(args: &[&str]) -> VisArgs {
        let config =
            CliConfig::try_parse_from(["wadvis", "vis"].iter().chain(args)).expect("valid args");
        match config.command {
            Command::Vis(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_gwa_defaults_from_wad() {
        let args = vis(&["--wad", "levels/doom2.wad"]);
        assert_eq!(args.gwa_path(), Some(PathBuf::from("levels/doom2.gwa")));
        assert_eq!(args.output_path(), Some(PathBuf::from("levels/doom2.gwa")));
    }

    #[test]
    fn test_explicit_paths_win() {
        let args = vis(&[
            "--wad",
            "doom2.wad",
            "--gwa",
            "nodes.gwa",
            "--output",
            "out.gwa",
        ]);
        assert_eq!(args.gwa_path(), Some(PathBuf::from("nodes.gwa")));
        assert_eq!(args.output_path(), Some(PathBuf::from("out.gwa")));
    }

    #[test]
    fn test_session_config() {
        let args = vis(&["--gwa", "a.gwa", "--kind", "iwad", "--max-lumps", "16"]);
        let config = args.session_config();
        assert_eq!(config.output_kind, Some(WadKind::Internal));
        assert_eq!(config.max_output_lumps, 16);

        let args = vis(&["--gwa", "a.gwa"]);
        assert_eq!(args.session_config(), SessionConfig::default());
    }

    #[test]
    fn test_bad_kind_rejected() {
        let result = CliConfig::try_parse_from(["wadvis", "vis", "--gwa", "a.gwa", "--kind", "ZWAD"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_vis() {
        let dir = tempfile::tempdir().unwrap();
        let wad = dir.path().join("map.wad");
        std::fs::write(&wad, b"").unwrap();

        let config = CliConfig {
            log_level: "info".to_string(),
            command: Command::Vis(vis(&["--wad", wad.to_str().unwrap()])),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FileNotFound(p)) if p == dir.path().join("map.gwa")
        ));

        std::fs::write(dir.path().join("map.gwa"), b"").unwrap();
        config.validate().unwrap();

        let config = CliConfig {
            log_level: "info".to_string(),
            command: Command::Vis(vis(&[])),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validate_max_lumps() {
        let dir = tempfile::tempdir().unwrap();
        let gwa = dir.path().join("map.gwa");
        std::fs::write(&gwa, b"").unwrap();

        let config = CliConfig {
            log_level: "info".to_string(),
            command: Command::Vis(vis(&["--gwa", gwa.to_str().unwrap(), "--max-lumps", "0"])),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { option: "max-lumps", .. })
        ));
    }

    #[test]
    fn test_validate_extract_patches() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("doom2.wad");
        std::fs::write(&base, b"").unwrap();
        let missing = dir.path().join("missing.wad");

        let config = CliConfig::try_parse_from([
            "wadvis",
            "extract",
            base.to_str().unwrap(),
            "FLOOR",
            "--patch",
            missing.to_str().unwrap(),
            "-o",
            "floor.lmp",
        ])
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FileNotFound(p)) if p == missing
        ));

        std::fs::write(&missing, b"").unwrap();
        config.validate().unwrap();
    }
}
