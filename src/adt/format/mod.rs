//! File format parsing layer for ADT table files.
//!
//! This module provides the mid-level parsing layer that bridges between
//! raw file I/O and the high-level [`Table`](crate::adt::Table).
//!
//! # Module Organization
//!
//! - [`header`]: Parses the fixed 400-byte header
//! - [`columns`]: Parses the 200-byte column descriptor slots
//! - [`record`]: Decodes one fixed-length row into a record
//!
//! The byte offsets each stage uses come from [`Layout`](crate::adt::layout::Layout).

pub mod columns;
pub mod header;
pub mod record;
