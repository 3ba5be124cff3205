//! Buffer allocation for archive writers
//!
//! The writer never grows its backing buffer directly. Every allocation goes
//! through a [`BufferAllocator`] passed at construction, so hosts can put a
//! budget on archive memory or route allocation failures into their own error
//! handling. Both operations zero-fill the bytes they add.

use thiserror::Error;

/// Allocation failure reported by a [`BufferAllocator`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The system allocator could not provide the memory
    #[error("out of memory while reserving {requested} bytes")]
    OutOfMemory {
        /// Bytes that were requested
        requested: usize,
    },

    /// The allocation would exceed the allocator's configured budget
    #[error("allocation of {requested} bytes exceeds budget of {limit} bytes ({in_use} in use)")]
    BudgetExceeded {
        /// Bytes that were requested
        requested: usize,
        /// Bytes already held in the buffer
        in_use: usize,
        /// Configured budget
        limit: usize,
    },
}

/// Source of zero-filled archive buffers
pub trait BufferAllocator {
    /// Allocate a zero-filled buffer of exactly `len` bytes
    fn allocate(&self, len: usize) -> Result<Vec<u8>, AllocError>;

    /// Grow `buf` by exactly `additional` zero-filled bytes
    fn grow(&self, buf: &mut Vec<u8>, additional: usize) -> Result<(), AllocError>;
}

/// Default allocator backed by the global heap
///
/// Reservations are exact-fit: the buffer grows by the requested amount and
/// no more.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn allocate(&self, len: usize) -> Result<Vec<u8>, AllocError> {
        let mut buf = Vec::new();
        self.grow(&mut buf, len)?;
        Ok(buf)
    }

    fn grow(&self, buf: &mut Vec<u8>, additional: usize) -> Result<(), AllocError> {
        buf.try_reserve_exact(additional)
            .map_err(|_| AllocError::OutOfMemory {
                requested: additional,
            })?;
        buf.resize(buf.len() + additional, 0);
        Ok(())
    }
}

/// Heap allocator that refuses to grow a buffer past a fixed size
#[derive(Debug, Clone, Copy)]
pub struct CappedAllocator {
    limit: usize,
}

impl CappedAllocator {
    /// Create an allocator that keeps every buffer at or below `limit` bytes
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Get the configured budget in bytes
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn check(&self, in_use: usize, requested: usize) -> Result<(), AllocError> {
        match in_use.checked_add(requested) {
            Some(total) if total <= self.limit => Ok(()),
            _ => Err(AllocError::BudgetExceeded {
                requested,
                in_use,
                limit: self.limit,
            }),
        }
    }
}

impl BufferAllocator for CappedAllocator {
    fn allocate(&self, len: usize) -> Result<Vec<u8>, AllocError> {
        self.check(0, len)?;
        HeapAllocator.allocate(len)
    }

    fn grow(&self, buf: &mut Vec<u8>, additional: usize) -> Result<(), AllocError> {
        self.check(buf.len(), additional)?;
        HeapAllocator.grow(buf, additional)
    }
}

impl<A: BufferAllocator + ?Sized> BufferAllocator for &A {
    fn allocate(&self, len: usize) -> Result<Vec<u8>, AllocError> {
        (**self).allocate(len)
    }

    fn grow(&self, buf: &mut Vec<u8>, additional: usize) -> Result<(), AllocError> {
        (**self).grow(buf, additional)
    }
}
