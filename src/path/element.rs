//! Path elements and their pairwise containment rules.
//!
//! Every element denotes a set of JSON tree locations one level below its
//! parent. [`PathElement::matches`] answers whether the set denoted by
//! `self` contains the set denoted by another element.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::error::PathError;
use super::range::{IndexRange, Indexes};
use super::tribool::Tribool;
use super::writer;

/// Discriminant of a [`PathElement`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Root,
    RecursiveDescent,
    Property,
    AnyProperty,
    PropertyList,
    ArrayIndex,
    AnyArrayIndex,
    ArrayIndexList,
    ArraySlice,
    Expression,
    FilterExpression,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Root => "root",
            ElementKind::RecursiveDescent => "recursive descent",
            ElementKind::Property => "property",
            ElementKind::AnyProperty => "any property",
            ElementKind::PropertyList => "property list",
            ElementKind::ArrayIndex => "array index",
            ElementKind::AnyArrayIndex => "any array index",
            ElementKind::ArrayIndexList => "array index list",
            ElementKind::ArraySlice => "array slice",
            ElementKind::Expression => "expression",
            ElementKind::FilterExpression => "filter expression",
        };
        f.write_str(name)
    }
}

/// A segment in a JSONPath expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Root node (`$`)
    Root,
    /// Named child (`.name` or `['name']`)
    Property(String),
    /// Any named child (`.*`)
    AnyProperty,
    /// Several named children (`['a','b']`)
    PropertyList(BTreeSet<String>),
    /// Array item (`[7]`)
    ArrayIndex(usize),
    /// Any array item (`[*]`)
    AnyArrayIndex,
    /// Several array items (`[1,7]`)
    ArrayIndexList(BTreeSet<usize>),
    /// Array slice (`[start:end:step]`)
    ArraySlice(ArraySlice),
    /// Opaque index expression (`[(@.length-1)]`)
    Expression(String),
    /// Opaque filter (`[?(@.price < 10)]`)
    FilterExpression(String),
    /// Zero or more levels, then the wrapped element (`..name`)
    RecursiveDescent(Box<PathElement>),
}

impl PathElement {
    pub fn property(name: impl Into<String>) -> Result<Self, PathError> {
        let name = name.into();
        check_property_name(&name)?;
        Ok(PathElement::Property(name))
    }

    /// Builds a property list. Duplicate names collapse.
    pub fn property_list<I, S>(names: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(PathError::EmptyPropertyList);
        }
        for name in &names {
            check_property_name(name)?;
        }
        Ok(PathElement::PropertyList(names))
    }

    pub fn array_index(index: isize) -> Result<Self, PathError> {
        usize::try_from(index)
            .map(PathElement::ArrayIndex)
            .map_err(|_| PathError::NegativeIndex(index))
    }

    /// Builds an index list. Duplicate indexes collapse.
    pub fn array_index_list<I>(indexes: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = isize>,
    {
        let indexes = indexes
            .into_iter()
            .map(|index| usize::try_from(index).map_err(|_| PathError::NegativeIndex(index)))
            .collect::<Result<BTreeSet<usize>, _>>()?;
        if indexes.is_empty() {
            return Err(PathError::EmptyIndexList);
        }
        Ok(PathElement::ArrayIndexList(indexes))
    }

    pub fn array_slice(start: Option<isize>, end: Option<isize>, step: isize) -> Result<Self, PathError> {
        ArraySlice::new(start, end, step).map(PathElement::ArraySlice)
    }

    pub fn expression(expression: impl Into<String>) -> Result<Self, PathError> {
        let expression = expression.into();
        if expression.is_empty() {
            return Err(PathError::EmptyExpression);
        }
        Ok(PathElement::Expression(expression))
    }

    pub fn filter_expression(expression: impl Into<String>) -> Result<Self, PathError> {
        let expression = expression.into();
        if expression.is_empty() {
            return Err(PathError::EmptyExpression);
        }
        Ok(PathElement::FilterExpression(expression))
    }

    /// Wraps `inner` in recursive descent. Root and recursive descent
    /// cannot be wrapped.
    pub fn recursive_descent(inner: PathElement) -> Result<Self, PathError> {
        match inner.kind() {
            kind @ (ElementKind::Root | ElementKind::RecursiveDescent) => {
                Err(PathError::InvalidRecursiveDescent { kind })
            }
            _ => Ok(PathElement::RecursiveDescent(Box::new(inner))),
        }
    }

    /// Checks the invariants the checked constructors enforce, for elements
    /// that were built directly from variants.
    pub fn validate(&self) -> Result<(), PathError> {
        match self {
            PathElement::Property(name) => check_property_name(name),
            PathElement::PropertyList(names) => {
                if names.is_empty() {
                    return Err(PathError::EmptyPropertyList);
                }
                names.iter().try_for_each(|name| check_property_name(name))
            }
            PathElement::ArrayIndexList(indexes) if indexes.is_empty() => {
                Err(PathError::EmptyIndexList)
            }
            PathElement::Expression(text) | PathElement::FilterExpression(text)
                if text.is_empty() =>
            {
                Err(PathError::EmptyExpression)
            }
            PathElement::RecursiveDescent(inner) => match inner.kind() {
                kind @ (ElementKind::Root | ElementKind::RecursiveDescent) => {
                    Err(PathError::InvalidRecursiveDescent { kind })
                }
                _ => inner.validate(),
            },
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            PathElement::Root => ElementKind::Root,
            PathElement::Property(_) => ElementKind::Property,
            PathElement::AnyProperty => ElementKind::AnyProperty,
            PathElement::PropertyList(_) => ElementKind::PropertyList,
            PathElement::ArrayIndex(_) => ElementKind::ArrayIndex,
            PathElement::AnyArrayIndex => ElementKind::AnyArrayIndex,
            PathElement::ArrayIndexList(_) => ElementKind::ArrayIndexList,
            PathElement::ArraySlice(_) => ElementKind::ArraySlice,
            PathElement::Expression(_) => ElementKind::Expression,
            PathElement::FilterExpression(_) => ElementKind::FilterExpression,
            PathElement::RecursiveDescent(_) => ElementKind::RecursiveDescent,
        }
    }

    /// Element with recursive descent peeled off.
    pub fn underlying(&self) -> &PathElement {
        match self {
            PathElement::RecursiveDescent(inner) => inner,
            other => other,
        }
    }

    /// True if the element (or, under recursive descent, its wrapped
    /// element) is of `kind`.
    pub fn is_of_kind(&self, kind: ElementKind) -> bool {
        self.kind() == kind || self.underlying().kind() == kind
    }

    /// Whether the element denotes exactly one JSON tree location.
    pub fn is_strict(&self) -> bool {
        match self {
            PathElement::Root | PathElement::Property(_) | PathElement::ArrayIndex(_) => true,
            PathElement::PropertyList(names) => names.len() == 1,
            PathElement::ArrayIndexList(indexes) => indexes.len() == 1,
            PathElement::ArraySlice(slice) => {
                slice.range().and_then(|range| range.index_count()) == Some(1)
            }
            PathElement::AnyProperty
            | PathElement::AnyArrayIndex
            | PathElement::Expression(_)
            | PathElement::FilterExpression(_)
            | PathElement::RecursiveDescent(_) => false,
        }
    }

    pub fn is_normalized(&self) -> bool {
        match self {
            PathElement::PropertyList(names) => names.len() != 1,
            PathElement::ArrayIndexList(indexes) => {
                indexes.len() > 1 && as_evenly_spaced(indexes).is_none()
            }
            PathElement::ArraySlice(slice) => slice.normalized().is_none(),
            PathElement::RecursiveDescent(inner) => inner.is_normalized(),
            _ => true,
        }
    }

    /// Canonical representative among equivalent encodings.
    ///
    /// Single-name lists become properties, single-index lists and
    /// single-index slices become indexes, evenly spaced index lists become
    /// slices, and the full slice becomes `[*]`.
    pub fn normalized(&self) -> PathElement {
        match self {
            PathElement::PropertyList(names) if names.len() == 1 => {
                let name = names.iter().next().cloned().unwrap_or_default();
                PathElement::Property(name)
            }
            PathElement::ArrayIndexList(indexes) => {
                if indexes.len() == 1 {
                    if let Some(&index) = indexes.iter().next() {
                        return PathElement::ArrayIndex(index);
                    }
                }
                match as_evenly_spaced(indexes) {
                    Some(slice) => PathElement::ArraySlice(slice),
                    None => self.clone(),
                }
            }
            PathElement::ArraySlice(slice) => slice.normalized().unwrap_or_else(|| self.clone()),
            PathElement::RecursiveDescent(inner) => {
                PathElement::RecursiveDescent(Box::new(inner.normalized()))
            }
            _ => self.clone(),
        }
    }

    /// Whether every location `other` could denote is also denoted by `self`.
    ///
    /// Recursive descent against anything but another recursive descent is
    /// `Unknown` here; sequence matching resolves it with context.
    pub fn matches(&self, other: &PathElement) -> Tribool {
        use PathElement as E;

        match self {
            E::Root => Tribool::from(matches!(other, E::Root)),
            E::Property(name) => match other {
                E::Property(other_name) => Tribool::from(name == other_name),
                E::PropertyList(names) => {
                    Tribool::from(names.len() == 1 && names.contains(name))
                }
                _ => Tribool::False,
            },
            E::AnyProperty => Tribool::from(matches!(
                other,
                E::Property(_) | E::AnyProperty | E::PropertyList(_) | E::FilterExpression(_)
            )),
            E::PropertyList(names) => match other {
                E::Property(name) => Tribool::from(names.contains(name)),
                E::PropertyList(other_names) => Tribool::from(other_names.is_subset(names)),
                _ => Tribool::False,
            },
            E::ArrayIndex(index) => match other {
                E::ArrayIndex(other_index) => Tribool::from(index == other_index),
                E::ArrayIndexList(indexes) => {
                    Tribool::from(indexes.len() == 1 && indexes.contains(index))
                }
                E::ArraySlice(slice) => slice.all_indexes(|candidate| candidate == *index),
                E::Expression(_) => Tribool::Unknown,
                _ => Tribool::False,
            },
            E::AnyArrayIndex => Tribool::from(matches!(
                other,
                E::ArrayIndex(_)
                    | E::AnyArrayIndex
                    | E::ArrayIndexList(_)
                    | E::ArraySlice(_)
                    | E::Expression(_)
            )),
            E::ArrayIndexList(indexes) => match other {
                E::ArrayIndex(index) => Tribool::from(indexes.contains(index)),
                E::ArrayIndexList(other_indexes) => Tribool::from(other_indexes.is_subset(indexes)),
                E::ArraySlice(slice) => slice.all_indexes(|candidate| indexes.contains(&candidate)),
                E::Expression(_) => Tribool::Unknown,
                _ => Tribool::False,
            },
            E::ArraySlice(slice) => slice.matches(other),
            E::Expression(expression) => match other {
                E::ArrayIndex(_) => Tribool::Unknown,
                E::ArrayIndexList(indexes) if indexes.len() == 1 => Tribool::Unknown,
                E::ArraySlice(slice) => match slice.range() {
                    None => Tribool::Unknown,
                    Some(range) if range.index_count() == Some(1) => Tribool::Unknown,
                    Some(_) => Tribool::False,
                },
                E::Expression(other_expression) => Tribool::from(expression == other_expression),
                _ => Tribool::False,
            },
            E::FilterExpression(expression) => match other {
                E::FilterExpression(other_expression) if expression == other_expression => {
                    Tribool::True
                }
                E::FilterExpression(_)
                | E::ArrayIndex(_)
                | E::AnyArrayIndex
                | E::ArrayIndexList(_)
                | E::ArraySlice(_)
                | E::Expression(_) => Tribool::Unknown,
                _ => Tribool::False,
            },
            E::RecursiveDescent(inner) => match other {
                E::RecursiveDescent(other_inner) => inner.matches(other_inner),
                _ => Tribool::Unknown,
            },
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&writer::write_element(self))
    }
}

fn check_property_name(name: &str) -> Result<(), PathError> {
    if name.contains('\'') {
        return Err(PathError::QuoteInPropertyName(name.to_string()));
    }
    Ok(())
}

/// Slice equivalent to an evenly spaced list of at least three indexes.
fn as_evenly_spaced(indexes: &BTreeSet<usize>) -> Option<ArraySlice> {
    if indexes.len() < 3 {
        return None;
    }
    let mut iter = indexes.iter().map(|&index| isize::try_from(index).ok());
    let first = iter.next()??;
    let second = iter.next()??;
    let step = second - first;
    let mut last = second;
    for index in iter {
        let index = index?;
        if index - last != step {
            return None;
        }
        last = index;
    }
    Some(ArraySlice {
        start: (first != 0).then_some(first),
        end: last.checked_add(1),
        step,
    })
}

/// `[start:end:step]` with `end` exclusive.
///
/// An omitted start means 0 for ascending slices, so `[:5]` equals `[0:5]`.
#[derive(Debug, Clone, Copy)]
pub struct ArraySlice {
    start: Option<isize>,
    end: Option<isize>,
    step: isize,
}

impl ArraySlice {
    pub fn new(start: Option<isize>, end: Option<isize>, step: isize) -> Result<Self, PathError> {
        if step == 0 {
            return Err(PathError::ZeroStep);
        }
        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> Option<isize> {
        self.start
    }

    pub fn end(&self) -> Option<isize> {
        self.end
    }

    pub fn step(&self) -> isize {
        self.step
    }

    /// Index range of the slice; `None` when bounds are relative to the
    /// array end and the covered indexes cannot be known statically.
    pub fn range(&self) -> Option<IndexRange> {
        IndexRange::new(self.start, self.end, self.step).ok()
    }

    /// Number of covered indexes; `None` when unbounded or unknowable.
    pub fn index_count(&self) -> Option<usize> {
        if self.is_last_element() {
            return Some(1);
        }
        self.range()?.index_count()
    }

    pub fn contains_all_indexes(&self) -> bool {
        self.range().is_some_and(|range| range.contains_all_indexes())
    }

    pub fn contains_index(&self, index: usize) -> Option<bool> {
        self.range().map(|range| range.contains(index))
    }

    /// Lazily enumerates covered indexes; see [`IndexRange::indexes`].
    pub fn indexes(&self) -> Option<Indexes> {
        self.range().map(|range| range.indexes())
    }

    /// `[-1:]`, the last array item.
    fn is_last_element(&self) -> bool {
        self.start == Some(-1) && self.end.is_none() && self.step == 1
    }

    fn effective_start(&self) -> Option<isize> {
        if self.step > 0 {
            Some(self.start.unwrap_or(0))
        } else {
            self.start
        }
    }

    /// Normalized replacement, or `None` when already normalized.
    fn normalized(&self) -> Option<PathElement> {
        if let Some(range) = self.range() {
            match range.index_count() {
                Some(0) if !self.is_canonical_empty() => {
                    return Some(PathElement::ArraySlice(ArraySlice {
                        start: None,
                        end: Some(0),
                        step: 1,
                    }));
                }
                Some(1) => {
                    if let Some(index) = range.indexes().next() {
                        return Some(PathElement::ArrayIndex(index));
                    }
                }
                _ => {}
            }
            if range.contains_all_indexes() {
                return Some(PathElement::AnyArrayIndex);
            }
        }
        if self.start == Some(0) && self.step > 0 {
            return Some(PathElement::ArraySlice(ArraySlice {
                start: None,
                ..*self
            }));
        }
        None
    }

    fn is_canonical_empty(&self) -> bool {
        self.start.is_none() && self.end == Some(0) && self.step == 1
    }

    /// True if `predicate` holds for every covered index. Unbounded slices
    /// never satisfy it; slices without a range give `Unknown`.
    fn all_indexes(&self, predicate: impl FnMut(usize) -> bool) -> Tribool {
        match self.range() {
            None => Tribool::Unknown,
            Some(range) if range.index_count().is_none() => Tribool::False,
            Some(range) => Tribool::from(range.indexes().all(predicate)),
        }
    }

    fn matches(&self, other: &PathElement) -> Tribool {
        match other {
            PathElement::ArrayIndex(index) => Tribool::from(self.contains_index(*index)),
            PathElement::AnyArrayIndex => Tribool::from(self.contains_all_indexes()),
            PathElement::ArrayIndexList(indexes) => match self.range() {
                Some(range) if range.contains_all_indexes() => Tribool::True,
                Some(range) => Tribool::from(indexes.iter().all(|&index| range.contains(index))),
                None => Tribool::Unknown,
            },
            PathElement::ArraySlice(other_slice) => {
                if self == other_slice {
                    return Tribool::True;
                }
                match (self.range(), other_slice.range()) {
                    (Some(range), Some(other_range)) => {
                        Tribool::from(range.contains_range(&other_range))
                    }
                    _ => Tribool::Unknown,
                }
            }
            PathElement::Expression(_) => Tribool::Unknown,
            _ => Tribool::False,
        }
    }
}

impl PartialEq for ArraySlice {
    fn eq(&self, other: &Self) -> bool {
        self.effective_start() == other.effective_start()
            && self.end == other.end
            && self.step == other.step
    }
}

impl Eq for ArraySlice {}

impl Hash for ArraySlice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.effective_start().hash(state);
        self.end.hash(state);
        self.step.hash(state);
    }
}
