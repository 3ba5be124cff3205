//! Random-access WAD reader
//!
//! The reader borrows the archive bytes and parses the directory once at
//! [`WadReader::open`]. Lump data is only copied on [`WadReader::get_lump`];
//! [`WadReader::lump_data`] hands out borrowed slices instead.
//!
//! Directory offsets are not trusted: every lump access checks
//! `offset + size` against the buffer, since a buffer can arrive already
//! corrupted.

use tracing::{debug, trace};

use crate::wad::constants::DIRECTORY_ENTRY_SIZE;
use crate::wad::directory::{DirectoryEntry, LumpRecord};
use crate::wad::error::{Result, WadError};
use crate::wad::header::{WadHeader, WadKind};
use crate::wad::name::LumpName;

/// Read-only view over an existing archive
#[derive(Debug, Clone)]
pub struct WadReader<'a> {
    data: &'a [u8],
    kind: WadKind,
    directory: Vec<LumpRecord>,
}

impl<'a> WadReader<'a> {
    /// Parse the header and directory of `data`
    ///
    /// Fails with a format error if the magic is not "IWAD"/"PWAD" or the
    /// directory does not fit inside the buffer. Directory order is kept as
    /// stored.
    pub fn open(data: &'a [u8]) -> Result<Self> {
        let header = WadHeader::parse(data)?;
        let kind = header.kind()?;

        if header.directory_end() > data.len() as u64 {
            return Err(WadError::DirectoryOutOfBounds {
                lump_count: header.lump_count,
                directory_offset: header.directory_offset,
                buffer_len: data.len(),
            });
        }

        let start = header.directory_offset as usize;
        let count = header.lump_count as usize;
        let table = &data[start..start + count * DIRECTORY_ENTRY_SIZE];

        let mut directory = Vec::with_capacity(count);
        for raw in table.chunks_exact(DIRECTORY_ENTRY_SIZE) {
            let record = LumpRecord::from(&DirectoryEntry::parse(raw)?);
            trace!(
                "lump {} '{}' at {} ({} bytes)",
                directory.len(),
                record.name,
                record.offset,
                record.size
            );
            directory.push(record);
        }

        debug!(
            "Opened {} with {} lumps, directory at {}",
            kind, count, header.directory_offset
        );

        Ok(Self {
            data,
            kind,
            directory,
        })
    }

    /// Get the archive kind
    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// Get the underlying archive bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of directory entries
    pub fn lump_count(&self) -> usize {
        self.directory.len()
    }

    /// Check if the archive has no lumps
    pub fn is_empty(&self) -> bool {
        self.directory.is_empty()
    }

    /// Get the directory in file order
    pub fn records(&self) -> &[LumpRecord] {
        &self.directory
    }

    /// Iterate over the directory in file order
    pub fn iter(&self) -> std::slice::Iter<'_, LumpRecord> {
        self.directory.iter()
    }

    /// Get a directory record, or `None` past the end
    pub fn record(&self, index: usize) -> Option<&LumpRecord> {
        self.directory.get(index)
    }

    /// Get the name of a lump
    ///
    /// An out-of-range index yields the empty name instead of an error.
    pub fn lump_name(&self, index: usize) -> LumpName {
        self.record(index).map_or(LumpName::EMPTY, |r| r.name)
    }

    /// Get the byte length of a lump
    ///
    /// An out-of-range index yields 0 instead of an error.
    pub fn lump_size(&self, index: usize) -> u32 {
        self.record(index).map_or(0, |r| r.size)
    }

    /// Find the most recently added lump with the given name
    ///
    /// The directory is scanned from the last entry toward the first, so a
    /// later lump shadows any earlier lump of the same name.
    pub fn find_lump_by_name(&self, name: &str) -> Result<usize> {
        let wanted = LumpName::normalize(name);
        self.directory
            .iter()
            .rposition(|r| r.name == wanted)
            .ok_or_else(|| WadError::LumpNotFound(name.to_string()))
    }

    /// Check if any lump has the given name
    pub fn contains(&self, name: &str) -> bool {
        self.find_lump_by_name(name).is_ok()
    }

    /// Borrow the data of a lump
    pub fn lump_data(&self, index: usize) -> Result<&'a [u8]> {
        let record = self.directory.get(index).ok_or(WadError::IndexOutOfRange {
            index,
            count: self.directory.len(),
        })?;

        if !record.fits_in(self.data.len()) {
            return Err(WadError::LumpOutOfBounds {
                index,
                offset: record.offset,
                length: record.size,
                buffer_len: self.data.len(),
            });
        }

        let start = record.offset as usize;
        Ok(&self.data[start..start + record.size as usize])
    }

    /// Copy the data of a lump into a new buffer owned by the caller
    pub fn get_lump(&self, index: usize) -> Result<Vec<u8>> {
        self.lump_data(index).map(<[u8]>::to_vec)
    }

    /// Copy the data of the most recently added lump with the given name
    pub fn get_lump_by_name(&self, name: &str) -> Result<Vec<u8>> {
        self.get_lump(self.find_lump_by_name(name)?)
    }

    /// Release the directory
    ///
    /// The archive bytes are only borrowed and stay with the caller.
    pub fn close(self) {
        debug!("Closed {} with {} lumps", self.kind, self.directory.len());
    }
}

impl<'r, 'a> IntoIterator for &'r WadReader<'a> {
    type Item = &'r LumpRecord;
    type IntoIter = std::slice::Iter<'r, LumpRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
