//! Error types for WAD archive operations

use thiserror::Error;

use crate::wad::alloc::AllocError;

/// Result type alias for WAD archive operations
pub type Result<T> = std::result::Result<T, WadError>;

/// Errors that can occur when reading or writing WAD archives
#[derive(Debug, Error)]
pub enum WadError {
    /// Magic bytes are neither "IWAD" nor "PWAD"
    #[error("Invalid WAD magic: expected 'IWAD' or 'PWAD', got {0:?}")]
    InvalidMagic(Vec<u8>),

    /// Buffer is too short to hold the 12-byte header
    #[error("Truncated header: expected {expected} bytes, got {actual} bytes")]
    TruncatedHeader {
        /// Header size
        expected: usize,
        /// Actual buffer size
        actual: usize,
    },

    /// Directory described by the header does not fit in the buffer
    #[error(
        "Directory out of bounds: {lump_count} entries at offset {directory_offset} exceed buffer of {buffer_len} bytes"
    )]
    DirectoryOutOfBounds {
        /// Lump count from the header
        lump_count: u32,
        /// Directory offset from the header
        directory_offset: u32,
        /// Actual buffer size
        buffer_len: usize,
    },

    /// No directory entry matches the requested name
    #[error("Lump not found: {0}")]
    LumpNotFound(String),

    /// Lump index is past the end of the directory
    #[error("Lump index {index} out of range: archive has {count} lumps")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of directory entries
        count: usize,
    },

    /// Lump data region extends past the end of the buffer
    #[error(
        "Lump {index} out of bounds: {length} bytes at offset {offset} exceed buffer of {buffer_len} bytes"
    )]
    LumpOutOfBounds {
        /// Directory index of the lump
        index: usize,
        /// Offset recorded in the directory
        offset: u32,
        /// Length recorded in the directory
        length: u32,
        /// Actual buffer size
        buffer_len: usize,
    },

    /// Writer directory is full
    #[error("Lump capacity exceeded: writer holds at most {capacity} lumps")]
    CapacityExceeded {
        /// Maximum number of lumps the writer accepts
        capacity: usize,
    },

    /// Archive would grow past the 32-bit offsets the format can address
    #[error("Archive too large: {size} bytes exceed the 32-bit offset range")]
    ArchiveTooLarge {
        /// Size the archive would have reached
        size: u64,
    },

    /// Allocator refused to provide the requested buffer space
    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocError),

    /// Writer was already closed
    #[error("Archive already finalized")]
    Finalized,

    /// Writer has not been closed yet
    #[error("Archive not finalized: directory and header are not written yet")]
    NotFinalized,

    /// Binary read/write error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),
}

impl WadError {
    /// Check if this error means the archive is malformed
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic(_)
                | Self::TruncatedHeader { .. }
                | Self::DirectoryOutOfBounds { .. }
                | Self::BinRead(_)
        )
    }

    /// Check if this is a name lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LumpNotFound(_))
    }

    /// Check if this error is an index or offset past the buffer bounds
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::LumpOutOfBounds { .. }
        )
    }

    /// Check if this error is a writer capacity limit
    pub fn is_capacity_error(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. } | Self::ArchiveTooLarge { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WadError::InvalidMagic(b"ZWAD".to_vec());
        assert!(err.to_string().contains("'IWAD' or 'PWAD'"));

        let err = WadError::LumpNotFound("GL_PVS".to_string());
        assert_eq!(err.to_string(), "Lump not found: GL_PVS");

        let err = WadError::LumpOutOfBounds {
            index: 3,
            offset: 100,
            length: 50,
            buffer_len: 120,
        };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("120"));

        let err = WadError::CapacityExceeded { capacity: 8192 };
        assert!(err.to_string().contains("8192"));
    }

    #[test]
    fn test_error_classification() {
        assert!(WadError::InvalidMagic(Vec::new()).is_format_error());
        assert!(
            WadError::DirectoryOutOfBounds {
                lump_count: 1,
                directory_offset: 12,
                buffer_len: 12,
            }
            .is_format_error()
        );
        assert!(WadError::LumpNotFound("X".into()).is_not_found());
        assert!(WadError::IndexOutOfRange { index: 1, count: 1 }.is_range_error());
        assert!(WadError::CapacityExceeded { capacity: 1 }.is_capacity_error());
        assert!(WadError::ArchiveTooLarge { size: 1 << 32 }.is_capacity_error());

        assert!(!WadError::Finalized.is_format_error());
        assert!(!WadError::Finalized.is_range_error());
    }
}
