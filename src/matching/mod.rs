//! Matching many patterns at once.
//!
//! [`MatchingSet`] stores patterns in a discrimination tree so that a path
//! is compared only against patterns whose elements can contain it, level
//! by level, instead of against every stored pattern.

pub mod node;
pub mod set;

pub use node::{candidate_classes, edge_class, EdgeClass};
pub use set::MatchingSet;
