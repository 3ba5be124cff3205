//! Incremental WAD writer
//!
//! The writer owns a growable buffer that starts as a zero-filled header.
//! Each [`WadWriter::add_lump`] appends the lump data and records one
//! directory entry. [`WadWriter::close`] appends the directory in append
//! order and then rewrites the header:
//!
//! ```text
//! [header (12)][lump 0][lump 1]...[lump n-1][entry 0 (16)]...[entry n-1 (16)]
//!                                           ^ directory_offset
//! ```
//!
//! All growth goes through the writer's [`BufferAllocator`] and is an exact
//! fit for the bytes being added.

use tracing::{debug, trace};

use crate::wad::alloc::{BufferAllocator, HeapAllocator};
use crate::wad::constants::{DEFAULT_MAX_LUMPS, DIRECTORY_ENTRY_SIZE, HEADER_SIZE};
use crate::wad::directory::{DirectoryEntry, LumpRecord};
use crate::wad::error::{Result, WadError};
use crate::wad::header::{WadHeader, WadKind};

/// Writer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Maximum number of lumps the directory accepts
    pub max_lumps: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            max_lumps: DEFAULT_MAX_LUMPS,
        }
    }
}

impl WriterOptions {
    /// Set the maximum number of lumps
    pub fn with_max_lumps(mut self, max_lumps: usize) -> Self {
        self.max_lumps = max_lumps;
        self
    }
}

/// Builder for a new archive held in memory
#[derive(Debug)]
pub struct WadWriter<A: BufferAllocator = HeapAllocator> {
    buffer: Vec<u8>,
    kind: WadKind,
    directory: Vec<LumpRecord>,
    max_lumps: usize,
    allocator: A,
    closed: bool,
}

impl WadWriter<HeapAllocator> {
    /// Start a new archive of the given kind with default options
    pub fn open(kind: WadKind) -> Result<Self> {
        Self::open_with(kind, WriterOptions::default(), HeapAllocator)
    }

    /// Start a new archive from magic bytes
    ///
    /// Only the first 4 bytes are used; they must be "IWAD" or "PWAD".
    pub fn open_magic(magic: impl AsRef<[u8]>) -> Result<Self> {
        Self::open(WadKind::from_magic(magic.as_ref())?)
    }
}

impl<A: BufferAllocator> WadWriter<A> {
    /// Start a new archive with explicit options and allocator
    pub fn open_with(kind: WadKind, options: WriterOptions, allocator: A) -> Result<Self> {
        let buffer = allocator.allocate(HEADER_SIZE)?;
        debug!(
            "Opened {} writer, capacity {} lumps",
            kind, options.max_lumps
        );
        Ok(Self {
            buffer,
            kind,
            directory: Vec::with_capacity(options.max_lumps.min(DEFAULT_MAX_LUMPS)),
            max_lumps: options.max_lumps,
            allocator,
            closed: false,
        })
    }

    /// Append one lump
    ///
    /// Every call records exactly one directory entry, even for duplicate
    /// names or empty data. Empty lumps do not grow the buffer. The name is
    /// taken as raw bytes, so a [`LumpName`](crate::wad::LumpName) read from
    /// another archive is copied unchanged.
    pub fn add_lump(&mut self, name: impl AsRef<[u8]>, data: &[u8]) -> Result<()> {
        if self.closed {
            return Err(WadError::Finalized);
        }
        if self.directory.len() >= self.max_lumps {
            return Err(WadError::CapacityExceeded {
                capacity: self.max_lumps,
            });
        }

        let offset = self.checked_offset(0)?;
        // offset + size fits in u32, so size does too
        let size = self.checked_offset(data.len())? - offset;

        if !data.is_empty() {
            self.allocator.grow(&mut self.buffer, data.len())?;
            self.buffer[offset as usize..].copy_from_slice(data);
        }

        let record = LumpRecord::new(name, offset, size);
        trace!(
            "lump {} '{}' at {} ({} bytes)",
            self.directory.len(),
            record.name,
            offset,
            size
        );
        self.directory.push(record);
        Ok(())
    }

    /// Write the directory and the final header
    ///
    /// The directory goes at the current end of the buffer, entries in the
    /// order they were added. After this the buffer is a complete archive
    /// and the writer accepts no more lumps.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(WadError::Finalized);
        }

        let directory_offset = self.checked_offset(0)?;
        self.checked_offset(self.directory.len() * DIRECTORY_ENTRY_SIZE)?;
        let lump_count = u32::try_from(self.directory.len()).map_err(|_| {
            WadError::CapacityExceeded {
                capacity: u32::MAX as usize,
            }
        })?;

        if let Err(e) = self.append_directory() {
            self.buffer.truncate(directory_offset as usize);
            return Err(e);
        }

        let header = WadHeader::new(self.kind, lump_count, directory_offset).to_bytes()?;
        self.buffer[..HEADER_SIZE].copy_from_slice(&header);
        self.closed = true;

        debug!(
            "Closed {} writer: {} lumps, directory at {}, {} bytes",
            self.kind,
            lump_count,
            directory_offset,
            self.buffer.len()
        );
        Ok(())
    }

    /// Get the archive kind being written
    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// Current buffer size in bytes
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Number of lumps added so far
    pub fn lump_count(&self) -> usize {
        self.directory.len()
    }

    /// Maximum number of lumps this writer accepts
    pub fn capacity(&self) -> usize {
        self.max_lumps
    }

    /// Get the records added so far, in append order
    pub fn records(&self) -> &[LumpRecord] {
        &self.directory
    }

    /// Check if [`close`](Self::close) has run
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read-only view of the buffer
    ///
    /// Before [`close`](Self::close) the header is still zero and the
    /// directory is missing.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Take ownership of the finished archive
    ///
    /// Fails with [`WadError::NotFinalized`] until [`close`](Self::close)
    /// has run.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        if !self.closed {
            return Err(WadError::NotFinalized);
        }
        Ok(self.buffer)
    }

    fn append_directory(&mut self) -> Result<()> {
        for record in &self.directory {
            let entry = DirectoryEntry::from(record).to_bytes()?;
            let at = self.buffer.len();
            self.allocator.grow(&mut self.buffer, DIRECTORY_ENTRY_SIZE)?;
            self.buffer[at..].copy_from_slice(&entry);
        }
        Ok(())
    }

    /// Offset the buffer would have after growing by `additional` bytes,
    /// rejected if it leaves the 32-bit range
    fn checked_offset(&self, additional: usize) -> Result<u32> {
        let size = self.buffer.len() as u64 + additional as u64;
        u32::try_from(size).map_err(|_| WadError::ArchiveTooLarge { size })
    }
}
