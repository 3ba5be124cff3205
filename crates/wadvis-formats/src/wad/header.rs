//! WAD header parsing and building
//!
//! ```text
//! offset 0   magic[4]          "IWAD" or "PWAD"
//! offset 4   lump_count        u32 LE
//! offset 8   directory_offset  u32 LE
//! ```

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use binrw::{BinRead, BinWrite};

use crate::wad::constants::{HEADER_SIZE, IWAD_MAGIC, PWAD_MAGIC};
use crate::wad::error::{Result, WadError};

/// Archive kind, identified by the header magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WadKind {
    /// "IWAD": a complete game data archive
    Internal,
    /// "PWAD": an add-on or patch archive
    #[default]
    Patch,
}

impl WadKind {
    /// Resolve a kind from magic bytes
    ///
    /// Only the first 4 bytes are considered. Anything that is not exactly
    /// "IWAD" or "PWAD" is rejected.
    pub fn from_magic(magic: &[u8]) -> Result<Self> {
        match magic.get(..4) {
            Some(m) if m == IWAD_MAGIC => Ok(Self::Internal),
            Some(m) if m == PWAD_MAGIC => Ok(Self::Patch),
            _ => Err(WadError::InvalidMagic(
                magic.iter().take(4).copied().collect(),
            )),
        }
    }

    /// Get the 4 magic bytes for this kind
    pub fn magic(self) -> [u8; 4] {
        match self {
            Self::Internal => *IWAD_MAGIC,
            Self::Patch => *PWAD_MAGIC,
        }
    }

    /// Get the magic as text
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "IWAD",
            Self::Patch => "PWAD",
        }
    }
}

impl FromStr for WadKind {
    type Err = WadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_magic(s.as_bytes())
    }
}

impl fmt::Display for WadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed 12-byte archive header
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct WadHeader {
    /// Magic signature, "IWAD" or "PWAD"
    pub magic: [u8; 4],

    /// Number of directory entries
    pub lump_count: u32,

    /// Byte offset of the directory from the start of the archive
    pub directory_offset: u32,
}

impl WadHeader {
    /// Create a header for the given kind
    pub fn new(kind: WadKind, lump_count: u32, directory_offset: u32) -> Self {
        Self {
            magic: kind.magic(),
            lump_count,
            directory_offset,
        }
    }

    /// Parse and validate a header from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(WadError::TruncatedHeader {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let header = Self::read(&mut Cursor::new(&data[..HEADER_SIZE]))?;
        header.validate()?;
        Ok(header)
    }

    /// Serialize the header to its 12-byte form
    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE]> {
        let mut out = [0u8; HEADER_SIZE];
        self.write(&mut Cursor::new(&mut out[..]))?;
        Ok(out)
    }

    /// Get the archive kind
    pub fn kind(&self) -> Result<WadKind> {
        WadKind::from_magic(&self.magic)
    }

    /// Validate the header fields
    pub fn validate(&self) -> Result<()> {
        self.kind().map(|_| ())
    }

    /// End of the directory, computed without overflow
    pub fn directory_end(&self) -> u64 {
        u64::from(self.directory_offset)
            + u64::from(self.lump_count) * crate::wad::constants::DIRECTORY_ENTRY_SIZE as u64
    }
}
