//! Reader and writer for lump-indexed WAD archives
//!
#![allow(clippy::cast_possible_truncation)] // Offsets are range-checked before narrowing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Consistent log formatting
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
//! This crate implements the container used to exchange level geometry with
//! a visibility builder: a 12-byte header, raw lump data, and a directory of
//! 16-byte entries. Both directions are supported:
//!
//! - [`wad::WadReader`] parses an existing buffer without copying it and
//!   serves lumps by index or by name.
//! - [`wad::WadWriter`] builds a new archive in memory, lump by lump, and
//!   finalizes the header and directory on close.
//!
//! # Design Principles
//!
//! - **Symmetric Naming**: reader and writer share one name canonicalization
//! - **Bounds Checked**: every offset read from a buffer is checked before use
//! - **Typed Errors**: malformed input is reported, never a process exit
//! - **Round-Trip Guarantee**: read(write(lumps)) == lumps

#![warn(missing_docs)]

pub mod wad;

pub use wad::{LumpName, LumpRecord, WadError, WadKind, WadReader, WadStack, WadWriter};
