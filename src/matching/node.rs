//! Discrimination tree nodes.
//!
//! Each node sits one element deep into the stored patterns. Outgoing edges
//! are keyed by the pattern element and grouped by [`EdgeClass`]; patterns
//! whose element at this depth is a recursive descent live in a side set
//! and are matched against the whole candidate path.

use std::hash::Hash;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::path::{ArraySlice, JsonPath, PathElement, Tribool};

/// Edge bucket of a non-recursive-descent pattern element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// Root, property or array index: found by direct lookup.
    Exact,
    /// Any property or property list.
    Property,
    /// Any index, index list, slice, expression or filter.
    Index,
}

impl EdgeClass {
    const COUNT: usize = 3;

    fn slot(self) -> usize {
        match self {
            EdgeClass::Exact => 0,
            EdgeClass::Property => 1,
            EdgeClass::Index => 2,
        }
    }
}

/// Bucket a pattern element is stored under; `None` for recursive descent.
pub fn edge_class(element: &PathElement) -> Option<EdgeClass> {
    match element {
        PathElement::Root | PathElement::Property(_) | PathElement::ArrayIndex(_) => {
            Some(EdgeClass::Exact)
        }
        PathElement::AnyProperty | PathElement::PropertyList(_) => Some(EdgeClass::Property),
        PathElement::AnyArrayIndex
        | PathElement::ArrayIndexList(_)
        | PathElement::ArraySlice(_)
        | PathElement::Expression(_)
        | PathElement::FilterExpression(_) => Some(EdgeClass::Index),
        PathElement::RecursiveDescent(_) => None,
    }
}

/// Buckets that must be scanned with element matching for a (normalized)
/// candidate element. Exact entries equal to the candidate are found by
/// lookup and are not part of this list.
pub fn candidate_classes(element: &PathElement) -> &'static [EdgeClass] {
    match element {
        PathElement::Root | PathElement::RecursiveDescent(_) => &[],
        PathElement::Property(_) | PathElement::AnyProperty | PathElement::PropertyList(_) => {
            &[EdgeClass::Property]
        }
        PathElement::ArrayIndex(_)
        | PathElement::AnyArrayIndex
        | PathElement::ArrayIndexList(_) => &[EdgeClass::Index],
        // an empty slice is inside every single index
        PathElement::ArraySlice(slice) if is_empty(slice) => {
            &[EdgeClass::Exact, EdgeClass::Index]
        }
        PathElement::ArraySlice(slice) if has_range(slice) => &[EdgeClass::Index],
        // a single index pattern is Unknown against these
        PathElement::ArraySlice(_) | PathElement::Expression(_) => {
            &[EdgeClass::Exact, EdgeClass::Index]
        }
        PathElement::FilterExpression(_) => &[EdgeClass::Property, EdgeClass::Index],
    }
}

fn has_range(slice: &ArraySlice) -> bool {
    slice.range().is_some()
}

fn is_empty(slice: &ArraySlice) -> bool {
    slice.index_count() == Some(0)
}

fn path_of<P: AsRef<JsonPath>>(pattern: &P) -> &JsonPath {
    AsRef::<JsonPath>::as_ref(pattern)
}

/// One level of the discrimination tree.
#[derive(Debug)]
pub struct Node<P> {
    edges: [IndexMap<PathElement, Node<P>>; EdgeClass::COUNT],
    descents: IndexSet<Arc<P>>,
    terminal: Option<Arc<P>>,
}

impl<P> Default for Node<P> {
    fn default() -> Self {
        Self {
            edges: Default::default(),
            descents: IndexSet::new(),
            terminal: None,
        }
    }
}

impl<P> Node<P>
where
    P: AsRef<JsonPath> + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn edges(&self, class: EdgeClass) -> &IndexMap<PathElement, Node<P>> {
        &self.edges[class.slot()]
    }

    /// True if no pattern passes through this node.
    pub fn is_empty(&self) -> bool {
        self.terminal.is_none()
            && self.descents.is_empty()
            && self.edges.iter().all(IndexMap::is_empty)
    }

    /// Stores `pattern` below this node, which sits `depth` elements deep.
    ///
    /// Returns `false` when a pattern ending at the same node is already
    /// stored.
    pub fn insert(&mut self, pattern: Arc<P>, depth: usize) -> bool {
        let path = path_of(&*pattern);
        if depth == path.len() {
            if self.terminal.is_some() {
                return false;
            }
            self.terminal = Some(pattern);
            return true;
        }

        let element = &path.elements()[depth];
        match edge_class(element) {
            None => self.descents.insert(pattern),
            Some(class) => {
                let element = element.clone();
                self.edges[class.slot()]
                    .entry(element)
                    .or_default()
                    .insert(pattern, depth + 1)
            }
        }
    }

    /// Removes `pattern`, pruning nodes left empty.
    pub fn remove(&mut self, pattern: &P, depth: usize) -> bool {
        let path = path_of(pattern);
        if depth == path.len() {
            if self.terminal.as_deref() != Some(pattern) {
                return false;
            }
            self.terminal = None;
            return true;
        }

        let element = &path.elements()[depth];
        let Some(class) = edge_class(element) else {
            return self.descents.shift_remove(pattern);
        };
        let edges = &mut self.edges[class.slot()];
        let Some(child) = edges.get_mut(element) else {
            return false;
        };
        if !child.remove(pattern, depth + 1) {
            return false;
        }
        if child.is_empty() {
            edges.shift_remove(element);
        }
        true
    }

    pub fn clear(&mut self) {
        self.edges.iter_mut().for_each(IndexMap::clear);
        self.descents.clear();
        self.terminal = None;
    }

    /// Three-valued query: does any pattern below this node contain `path`,
    /// whose first `depth` elements were consumed on the way down.
    pub fn matches(&self, path: &JsonPath, depth: usize) -> Tribool {
        let Some(element) = path.elements().get(depth) else {
            return Tribool::from(self.terminal.is_some());
        };

        let mut result = Tribool::False;
        if !matches!(element, PathElement::RecursiveDescent(_)) {
            let normalized = element.normalized();
            if edge_class(&normalized) == Some(EdgeClass::Exact) {
                if let Some(child) = self.edges(EdgeClass::Exact).get(&normalized) {
                    match child.matches(path, depth + 1) {
                        Tribool::True => return Tribool::True,
                        Tribool::Unknown => result = Tribool::Unknown,
                        Tribool::False => {}
                    }
                }
            }

            for &class in candidate_classes(&normalized) {
                for (pattern_element, child) in self.edges(class) {
                    let element_match = pattern_element.matches(element);
                    if element_match.is_false() {
                        continue;
                    }
                    match element_match.and_then(|| child.matches(path, depth + 1)) {
                        Tribool::True => return Tribool::True,
                        Tribool::Unknown => result = Tribool::Unknown,
                        Tribool::False => {}
                    }
                }
            }
        }

        for pattern in &self.descents {
            match path_of(&**pattern).matches(path) {
                Tribool::True => return Tribool::True,
                Tribool::Unknown => result = Tribool::Unknown,
                Tribool::False => {}
            }
        }

        result
    }

    /// Collects every stored pattern that definitely contains `path`.
    pub fn collect<'a>(&'a self, path: &JsonPath, depth: usize, matched: &mut Vec<&'a P>) {
        let Some(element) = path.elements().get(depth) else {
            if let Some(terminal) = &self.terminal {
                matched.push(terminal);
            }
            return;
        };

        if !matches!(element, PathElement::RecursiveDescent(_)) {
            let normalized = element.normalized();
            if edge_class(&normalized) == Some(EdgeClass::Exact) {
                if let Some(child) = self.edges(EdgeClass::Exact).get(&normalized) {
                    child.collect(path, depth + 1, matched);
                }
            }

            for &class in candidate_classes(&normalized) {
                for (pattern_element, child) in self.edges(class) {
                    if pattern_element.matches(element).is_true() {
                        child.collect(path, depth + 1, matched);
                    }
                }
            }
        }

        for pattern in &self.descents {
            if path_of(&**pattern).matches(path).is_true() {
                matched.push(pattern);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(text: &str) -> JsonPath {
        text.parse().unwrap()
    }

    fn node_with(patterns: &[&str]) -> Node<JsonPath> {
        let mut node = Node::new();
        for pattern in patterns {
            assert!(node.insert(Arc::new(path(pattern)), 0));
        }
        node
    }

    #[test]
    fn test_edge_class() {
        assert_eq!(edge_class(&PathElement::Root), Some(EdgeClass::Exact));
        assert_eq!(
            edge_class(&PathElement::AnyProperty),
            Some(EdgeClass::Property)
        );
        assert_eq!(
            edge_class(&PathElement::FilterExpression("@.a".into())),
            Some(EdgeClass::Index)
        );
        assert_eq!(
            edge_class(&PathElement::recursive_descent(PathElement::AnyProperty).unwrap()),
            None
        );
    }

    #[test]
    fn test_candidate_classes_cover_unknown_pairs() {
        assert_eq!(
            candidate_classes(&PathElement::Expression("@.length-1".into())),
            &[EdgeClass::Exact, EdgeClass::Index]
        );
        assert_eq!(
            candidate_classes(&PathElement::array_slice(Some(-1), None, 1).unwrap()),
            &[EdgeClass::Exact, EdgeClass::Index]
        );
        assert_eq!(
            candidate_classes(&PathElement::array_slice(Some(1), Some(5), 1).unwrap()),
            &[EdgeClass::Index]
        );
        assert_eq!(
            candidate_classes(&PathElement::array_slice(Some(5), Some(5), 1).unwrap()),
            &[EdgeClass::Exact, EdgeClass::Index]
        );
    }

    #[test]
    fn test_empty_slice_is_inside_single_index() {
        let node = node_with(&["$[3]", "$.a[7]"]);
        assert_eq!(node.matches(&path("$[5:5]"), 0), Tribool::True);
        assert_eq!(node.matches(&path("$.a[5:5]"), 0), Tribool::True);
        assert_eq!(node.matches(&path("$.b[5:5]"), 0), Tribool::False);
    }

    #[test]
    fn test_insert_rejects_second_terminal() {
        let mut node = node_with(&["$.a"]);
        assert!(!node.insert(Arc::new(path("$.a")), 0));
    }

    #[test]
    fn test_remove_prunes_empty_branches() {
        let mut node = node_with(&["$.a.b", "$.a..c"]);
        assert!(node.remove(&path("$.a.b"), 0));
        assert!(!node.is_empty());
        assert!(node.remove(&path("$.a..c"), 0));
        assert!(node.is_empty());
        assert!(!node.remove(&path("$.a..c"), 0));
    }

    #[test]
    fn test_exact_lookup_uses_normalized_candidate() {
        let node = node_with(&["$.a[1]"]);
        assert_eq!(node.matches(&path("$['a'][1:2]"), 0), Tribool::True);
    }

    #[test]
    fn test_single_index_against_expression_is_unknown() {
        let node = node_with(&["$.a[1]"]);
        assert_eq!(node.matches(&path("$.a[(@.length-1)]"), 0), Tribool::Unknown);
    }

    #[test]
    fn test_collect_visits_every_branch() {
        let node = node_with(&["$.a[*]", "$.*[1]", "$.a[1]", "$..[1]", "$.b[1]"]);
        let mut matched = Vec::new();
        node.collect(&path("$.a[1]"), 0, &mut matched);
        let mut texts: Vec<String> = matched.iter().map(|p| p.to_string()).collect();
        texts.sort();
        assert_eq!(texts, vec!["$.*[1]", "$..[1]", "$.a[*]", "$.a[1]"]);
    }
}
