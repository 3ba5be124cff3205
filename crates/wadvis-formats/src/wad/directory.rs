//! Directory records
//!
//! [`LumpRecord`] is the in-memory shape shared by reader and writer.
//! [`DirectoryEntry`] is the 16-byte on-disk form:
//!
//! ```text
//! offset 0   file_position  u32 LE
//! offset 4   size           u32 LE
//! offset 8   name[8]        ASCII, upper-cased, NUL-padded
//! ```
//!
//! This is the `filelump_t` order every WAD consumer reads. The record keeps
//! the name first; only the on-disk entry puts it last.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};

use crate::wad::constants::DIRECTORY_ENTRY_SIZE;
use crate::wad::error::Result;
use crate::wad::name::LumpName;

/// One directory entry as held in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LumpRecord {
    /// Canonical lump name
    pub name: LumpName,
    /// Byte offset of the lump data from the start of the archive
    pub offset: u32,
    /// Byte length of the lump data
    pub size: u32,
}

impl LumpRecord {
    /// Create a record, canonicalizing the name
    pub fn new(name: impl AsRef<[u8]>, offset: u32, size: u32) -> Self {
        Self {
            name: LumpName::normalize(name),
            offset,
            size,
        }
    }

    /// End of the lump data, computed without overflow
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }

    /// Check if the lump data lies entirely inside a buffer of `len` bytes
    pub fn fits_in(&self, len: usize) -> bool {
        self.end() <= len as u64
    }
}

impl From<&DirectoryEntry> for LumpRecord {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            name: LumpName::normalize(entry.name),
            offset: entry.file_position,
            size: entry.size,
        }
    }
}

/// One directory entry as stored in the archive
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct DirectoryEntry {
    /// Byte offset of the lump data
    pub file_position: u32,
    /// Byte length of the lump data
    pub size: u32,
    /// First 8 bytes of the canonical name
    pub name: [u8; 8],
}

impl DirectoryEntry {
    /// Decode one entry from exactly 16 bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(Self::read(&mut Cursor::new(data))?)
    }

    /// Encode the entry to its 16-byte form
    pub fn to_bytes(&self) -> Result<[u8; DIRECTORY_ENTRY_SIZE]> {
        let mut out = [0u8; DIRECTORY_ENTRY_SIZE];
        self.write(&mut Cursor::new(&mut out[..]))?;
        Ok(out)
    }
}

impl From<&LumpRecord> for DirectoryEntry {
    fn from(record: &LumpRecord) -> Self {
        Self {
            file_position: record.offset,
            size: record.size,
            name: record.name.to_disk(),
        }
    }
}
