//! PathQuill - JSONPath pattern containment matching.
//!
//! [`path`] models JSONPath expressions as validated element sequences and
//! decides whether one expression's locations contain another's.
//! [`matching`] indexes many patterns for fast lookup.

pub mod config;
pub mod file;
pub mod matching;
pub mod path;
