//! File I/O for pattern lists.
//!
//! This module loads pattern files (one JSONPath per line, optionally
//! gzipped) from disk or stdin and turns them into matching sets.

pub mod loader;
