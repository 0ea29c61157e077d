//! Generic utility primitives with zero domain knowledge.
//!
//! - `collections` - Order-preserving grouping, partitioning and counting
//! - `io` - File I/O with consistent error handling
//! - `validation` - Input validation helpers

pub mod collections;
pub mod io;
pub mod validation;
