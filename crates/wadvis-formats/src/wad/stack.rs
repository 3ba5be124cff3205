//! Layered archives
//!
//! A game loads its IWAD first and any PWADs on top. Name lookup walks the
//! archives from the last one loaded to the first, and within each archive
//! from the last entry to the first, so a patch overrides the base game and
//! a later patch overrides an earlier one.

use tracing::debug;

use crate::wad::error::{Result, WadError};
use crate::wad::reader::WadReader;

/// Position of a lump inside a [`WadStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LumpLocation {
    /// Index of the archive in load order
    pub archive: usize,
    /// Directory index inside that archive
    pub index: usize,
}

/// Ordered set of archives searched as one
#[derive(Debug, Clone, Default)]
pub struct WadStack<'a> {
    archives: Vec<WadReader<'a>>,
}

impl<'a> WadStack<'a> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an already opened archive on top
    pub fn push(&mut self, reader: WadReader<'a>) {
        debug!(
            "Layer {}: {} with {} lumps",
            self.archives.len(),
            reader.kind(),
            reader.lump_count()
        );
        self.archives.push(reader);
    }

    /// Open `data` and put it on top
    pub fn load(&mut self, data: &'a [u8]) -> Result<()> {
        self.push(WadReader::open(data)?);
        Ok(())
    }

    /// Archives in load order
    pub fn archives(&self) -> &[WadReader<'a>] {
        &self.archives
    }

    /// Number of archives
    pub fn len(&self) -> usize {
        self.archives.len()
    }

    /// Check if no archive is loaded
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Total number of directory entries across all archives
    pub fn lump_count(&self) -> usize {
        self.archives.iter().map(WadReader::lump_count).sum()
    }

    /// Find the lump that wins for `name`
    pub fn find_lump_by_name(&self, name: &str) -> Result<LumpLocation> {
        self.archives
            .iter()
            .enumerate()
            .rev()
            .find_map(|(archive, reader)| {
                reader
                    .find_lump_by_name(name)
                    .ok()
                    .map(|index| LumpLocation { archive, index })
            })
            .ok_or_else(|| WadError::LumpNotFound(name.to_string()))
    }

    /// Borrow the data of a lump
    pub fn lump_data(&self, location: LumpLocation) -> Result<&'a [u8]> {
        self.archives
            .get(location.archive)
            .ok_or(WadError::IndexOutOfRange {
                index: location.archive,
                count: self.archives.len(),
            })?
            .lump_data(location.index)
    }

    /// Copy the data of the lump that wins for `name`
    pub fn get_lump_by_name(&self, name: &str) -> Result<Vec<u8>> {
        self.lump_data(self.find_lump_by_name(name)?)
            .map(<[u8]>::to_vec)
    }
}
