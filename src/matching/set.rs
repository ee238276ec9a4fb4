//! A set of patterns indexed for "which patterns contain this path".

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexSet;

use super::node::Node;
use crate::path::{JsonPath, Tribool};

/// Set of patterns backed by a discrimination tree.
///
/// `P` is any value that carries a path, typically [`JsonPath`] itself or
/// one of its absolute/relative newtypes. Patterns are deduplicated by
/// equality of `P`.
///
/// Queries take `&self` and may run concurrently; inserts and removals
/// need exclusive access.
///
/// # Examples
///
/// ```
/// use pathquill::matching::MatchingSet;
/// use pathquill::path::{JsonPath, Tribool};
///
/// let mut set = MatchingSet::new();
/// set.insert("$.a.*.c[*]".parse::<JsonPath>().unwrap());
/// set.insert("$.*.b.c[7]".parse::<JsonPath>().unwrap());
///
/// let path: JsonPath = "$.a.b.c[42]".parse().unwrap();
/// assert_eq!(set.matches(&path), Tribool::True);
/// assert_eq!(set.matched_by(&path).len(), 1);
/// ```
pub struct MatchingSet<P> {
    patterns: IndexSet<Arc<P>>,
    root: Node<P>,
}

impl<P> Default for MatchingSet<P> {
    fn default() -> Self {
        Self {
            patterns: IndexSet::new(),
            root: Node::default(),
        }
    }
}

impl<P> MatchingSet<P>
where
    P: AsRef<JsonPath> + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, pattern: &P) -> bool {
        self.patterns.contains(pattern)
    }

    /// Patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.patterns.iter().map(|pattern| &**pattern)
    }

    /// Adds `pattern`.
    ///
    /// Returns `false` if an equal pattern is already present, or if a
    /// different pattern with the same elements is.
    pub fn insert(&mut self, pattern: P) -> bool {
        if self.patterns.contains(&pattern) {
            return false;
        }
        let pattern = Arc::new(pattern);
        if !self.root.insert(Arc::clone(&pattern), 0) {
            return false;
        }
        self.patterns.insert(pattern)
    }

    /// Removes `pattern`; returns `false` if it was not present.
    pub fn remove(&mut self, pattern: &P) -> bool {
        if !self.patterns.shift_remove(pattern) {
            return false;
        }
        let removed = self.root.remove(pattern, 0);
        debug_assert!(removed, "pattern was in the set but not in the tree");
        true
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
        self.root.clear();
    }

    /// Whether some pattern contains `path`.
    ///
    /// `Unknown` when no pattern is known to contain it but at least one
    /// might.
    pub fn matches(&self, path: &JsonPath) -> Tribool {
        self.root.matches(path, 0)
    }

    /// Every pattern known to contain `path`, each listed once.
    pub fn matched_by(&self, path: &JsonPath) -> Vec<&P> {
        let mut matched = Vec::new();
        self.root.collect(path, 0, &mut matched);
        matched
    }

    /// Appends the patterns known to contain `path` to `matched`; returns
    /// `true` if there was at least one.
    pub fn matches_with(&self, path: &JsonPath, matched: &mut Vec<P>) -> bool
    where
        P: Clone,
    {
        let found = self.matched_by(path);
        let any = !found.is_empty();
        matched.extend(found.into_iter().cloned());
        any
    }
}

impl<P> Extend<P> for MatchingSet<P>
where
    P: AsRef<JsonPath> + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = P>>(&mut self, patterns: I) {
        for pattern in patterns {
            self.insert(pattern);
        }
    }
}

impl<P> FromIterator<P> for MatchingSet<P>
where
    P: AsRef<JsonPath> + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = P>>(patterns: I) -> Self {
        let mut set = Self::new();
        set.extend(patterns);
        set
    }
}

impl<P: fmt::Debug> fmt::Debug for MatchingSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.patterns.iter().map(|pattern| &**pattern))
            .finish()
    }
}
