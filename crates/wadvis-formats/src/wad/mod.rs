//! Lump-indexed WAD archives (`IWAD` / `PWAD`)
//!
//! A WAD is a flat set of named, variable-length binary records ("lumps")
//! packed into one buffer, followed by a directory describing them.
//!
//! # Binary Format
//!
//! All integers are little-endian.
//!
//! ```text
//! Header (12 bytes):
//!   offset 0   magic[4]            "IWAD" or "PWAD"
//!   offset 4   lump_count          u32
//!   offset 8   directory_offset    u32
//!
//! Lump data: arbitrary bytes, no alignment or padding
//!
//! Directory (16 bytes per entry, lump_count entries at directory_offset):
//!   offset 0   file_position       u32
//!   offset 4   size                u32
//!   offset 8   name[8]             upper-case ASCII, NUL-padded
//! ```
//!
//! # Name Lookup
//!
//! Names are canonicalized with [`LumpName::normalize`] on both sides, so
//! lookups are case-insensitive and ignore anything past the 8th character.
//! Names need not be unique: [`WadReader::find_lump_by_name`] scans from the
//! end of the directory, so the most recently added lump of a name wins.
//!
//! # Usage
//!
//! ```rust
//! use wadvis_formats::wad::{WadKind, WadReader, WadWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = WadWriter::open(WadKind::Patch)?;
//! writer.add_lump("FLOOR", &[0x01, 0x02, 0x03])?;
//! writer.add_lump("FLOOR", &[0xAA])?;
//! writer.close()?;
//!
//! let reader = WadReader::open(writer.as_bytes())?;
//! assert_eq!(reader.lump_count(), 2);
//! assert_eq!(reader.get_lump_by_name("floor")?, vec![0xAA]);
//! # Ok(())
//! # }
//! ```

mod alloc;
mod directory;
mod error;
mod header;
pub mod level;
mod name;
mod reader;
mod stack;
mod writer;

pub use alloc::{AllocError, BufferAllocator, CappedAllocator, HeapAllocator};
pub use directory::{DirectoryEntry, LumpRecord};
pub use error::{Result, WadError};
pub use header::{WadHeader, WadKind};
pub use level::{LevelMarker, MarkerKind, find_levels};
pub use name::LumpName;
pub use reader::WadReader;
pub use stack::{LumpLocation, WadStack};
pub use writer::{WadWriter, WriterOptions};

/// WAD format constants
pub mod constants {
    /// Size of the archive header in bytes
    pub const HEADER_SIZE: usize = 12;

    /// Size of one on-disk directory entry in bytes
    pub const DIRECTORY_ENTRY_SIZE: usize = 16;

    /// Size of the in-memory canonical name
    pub const NAME_BYTES: usize = 12;

    /// Number of significant (persisted) name bytes
    pub const NAME_SIGNIFICANT: usize = 8;

    /// Default writer directory capacity
    pub const DEFAULT_MAX_LUMPS: usize = 8 * 1024;

    /// Magic of a complete game archive
    pub const IWAD_MAGIC: &[u8; 4] = b"IWAD";

    /// Magic of an add-on archive
    pub const PWAD_MAGIC: &[u8; 4] = b"PWAD";
}
