//! Path sequences: validated, immutable lists of path elements.
//!
//! [`JsonPath`] accepts both absolute (`$...`) and relative paths.
//! [`AbsolutePath`] and [`RelativePath`] pin the root invariant down at
//! construction and otherwise behave like the path they wrap.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;

use once_cell::race::{OnceBool, OnceBox};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::element::PathElement;
use super::error::{ParseError, PathError};
use super::matcher;
use super::parser::Parser;
use super::tribool::Tribool;
use super::writer;

/// An ordered, non-empty sequence of path elements.
///
/// Equality and hashing are structural over the elements. Canonical text,
/// strictness and normalization status are computed on first access and
/// cached without locking, so a shared `&JsonPath` can be read from many
/// threads.
pub struct JsonPath {
    elements: Vec<PathElement>,
    text: OnceBox<String>,
    strict: OnceBool,
    normalized: OnceBool,
}

impl JsonPath {
    /// Creates a path from its elements.
    ///
    /// # Errors
    ///
    /// Fails when `elements` is empty, when `Root` appears anywhere but the
    /// first position, or when an element breaks its own invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathquill::path::{JsonPath, PathElement};
    ///
    /// let path = JsonPath::new([PathElement::Root, PathElement::property("a").unwrap()]).unwrap();
    /// assert_eq!(path.to_string(), "$.a");
    /// ```
    pub fn new(elements: impl IntoIterator<Item = PathElement>) -> Result<Self, PathError> {
        let elements: Vec<PathElement> = elements.into_iter().collect();
        validate(&elements)?;
        Ok(Self::from_valid(elements))
    }

    /// Parses `text` into a path; the same as `text.parse()`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        text.parse()
    }

    fn from_valid(elements: Vec<PathElement>) -> Self {
        debug_assert!(validate(&elements).is_ok());
        Self {
            elements,
            text: OnceBox::new(),
            strict: OnceBool::new(),
            normalized: OnceBool::new(),
        }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Number of elements; never zero.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn first(&self) -> &PathElement {
        &self.elements[0]
    }

    pub fn last(&self) -> &PathElement {
        &self.elements[self.elements.len() - 1]
    }

    /// True if the path starts with `$`.
    pub fn is_absolute(&self) -> bool {
        self.elements[0] == PathElement::Root
    }

    /// True if every element denotes exactly one location.
    pub fn is_strict(&self) -> bool {
        self.strict
            .get_or_init(|| self.elements.iter().all(PathElement::is_strict))
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
            .get_or_init(|| self.elements.iter().all(PathElement::is_normalized))
    }

    /// Path with every element replaced by its normalized form.
    pub fn normalized(&self) -> JsonPath {
        if self.is_normalized() {
            return self.clone();
        }
        let path = Self::from_valid(self.elements.iter().map(PathElement::normalized).collect());
        let _ = path.normalized.set(true);
        path
    }

    /// Whether every location `other` denotes is also denoted by `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathquill::path::{JsonPath, Tribool};
    ///
    /// let pattern: JsonPath = "$.a..[42]".parse().unwrap();
    /// let path: JsonPath = "$.a.b.c[42]".parse().unwrap();
    /// assert_eq!(pattern.matches(&path), Tribool::True);
    /// ```
    pub fn matches(&self, other: &JsonPath) -> Tribool {
        matcher::matches(&self.elements, &other.elements)
    }

    /// True if `prefix` is strictly shorter than `self` and equal to its
    /// leading elements.
    pub fn starts_with(&self, prefix: &JsonPath) -> bool {
        prefix.len() < self.len() && self.elements.starts_with(&prefix.elements)
    }

    /// Longest common leading part of `self` and `other`.
    ///
    /// Returns `None` when the first elements differ already.
    pub fn parent_with(&self, other: &JsonPath) -> Option<JsonPath> {
        let common = self
            .elements
            .iter()
            .zip(&other.elements)
            .take_while(|(left, right)| left == right)
            .count();
        match common {
            0 => None,
            n if n == self.len() => Some(self.clone()),
            n if n == other.len() => Some(other.clone()),
            n => Some(Self::from_valid(self.elements[..n].to_vec())),
        }
    }

    /// The elements `child` adds on top of `self`, when `child` strictly
    /// extends this path.
    pub fn relative_path_to(&self, child: &JsonPath) -> Option<RelativePath> {
        if !child.starts_with(self) {
            return None;
        }
        Some(RelativePath(Self::from_valid(
            child.elements[self.len()..].to_vec(),
        )))
    }

    /// New path with `elements` appended.
    pub fn append(
        &self,
        elements: impl IntoIterator<Item = PathElement>,
    ) -> Result<JsonPath, PathError> {
        let mut combined = self.elements.clone();
        combined.extend(elements);
        if combined.len() == self.len() {
            return Ok(self.clone());
        }
        Self::new(combined)
    }

    /// New path with the elements of `relative` appended.
    pub fn append_path(&self, relative: &RelativePath) -> JsonPath {
        let mut combined = self.elements.clone();
        combined.extend(relative.elements().iter().cloned());
        Self::from_valid(combined)
    }

    /// New path with the last element replaced by `element`.
    pub fn replace_last(&self, element: PathElement) -> Result<JsonPath, PathError> {
        let mut elements = self.elements.clone();
        let last = elements.len() - 1;
        elements[last] = element;
        Self::new(elements)
    }

    /// New path without the last `count` elements.
    ///
    /// Returns `None` when nothing would be left.
    pub fn remove_last(&self, count: usize) -> Option<JsonPath> {
        if count == 0 {
            return Some(self.clone());
        }
        if count >= self.len() {
            return None;
        }
        Some(Self::from_valid(
            self.elements[..self.len() - count].to_vec(),
        ))
    }

    /// This path anchored at `$`.
    pub fn to_absolute(&self) -> AbsolutePath {
        if self.is_absolute() {
            return AbsolutePath(self.clone());
        }
        let mut elements = Vec::with_capacity(self.len() + 1);
        elements.push(PathElement::Root);
        elements.extend(self.elements.iter().cloned());
        AbsolutePath(Self::from_valid(elements))
    }

    pub fn into_elements(self) -> Vec<PathElement> {
        self.elements
    }
}

fn validate(elements: &[PathElement]) -> Result<(), PathError> {
    if elements.is_empty() {
        return Err(PathError::Empty);
    }
    for (position, element) in elements.iter().enumerate() {
        if position > 0 && *element == PathElement::Root {
            return Err(PathError::MisplacedRoot { position });
        }
        element.validate()?;
    }
    Ok(())
}

impl Clone for JsonPath {
    fn clone(&self) -> Self {
        Self::from_valid(self.elements.clone())
    }
}

impl PartialEq for JsonPath {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for JsonPath {}

impl Hash for JsonPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .text
            .get_or_init(|| Box::new(writer::write_path(&self.elements)));
        f.write_str(text)
    }
}

impl fmt::Debug for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonPath").field(&self.to_string()).finish()
    }
}

impl FromStr for JsonPath {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let elements = Parser::parse(text)?;
        Ok(Self::new(elements)?)
    }
}

impl TryFrom<Vec<PathElement>> for JsonPath {
    type Error = PathError;

    fn try_from(elements: Vec<PathElement>) -> Result<Self, Self::Error> {
        Self::new(elements)
    }
}

impl AsRef<JsonPath> for JsonPath {
    fn as_ref(&self) -> &JsonPath {
        self
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// A path that starts with `$`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AbsolutePath(JsonPath);

/// A path that does not start with `$`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(JsonPath);

impl AbsolutePath {
    fn check(path: JsonPath) -> Result<Self, PathError> {
        if !path.is_absolute() {
            return Err(PathError::NotAbsolute);
        }
        Ok(Self(path))
    }

    /// Returns the path unchanged, already absolute.
    pub fn to_absolute(&self) -> AbsolutePath {
        self.clone()
    }
}

impl RelativePath {
    fn check(path: JsonPath) -> Result<Self, PathError> {
        if path.is_absolute() {
            return Err(PathError::NotRelative);
        }
        Ok(Self(path))
    }
}

macro_rules! path_newtype {
    ($name:ident) => {
        impl $name {
            pub fn new(
                elements: impl IntoIterator<Item = PathElement>,
            ) -> Result<Self, PathError> {
                Self::check(JsonPath::new(elements)?)
            }

            pub fn parse(text: &str) -> Result<Self, ParseError> {
                text.parse()
            }

            pub fn as_path(&self) -> &JsonPath {
                &self.0
            }

            pub fn into_inner(self) -> JsonPath {
                self.0
            }

            pub fn normalized(&self) -> $name {
                $name(self.0.normalized())
            }

            pub fn parent_with(&self, other: &$name) -> Option<$name> {
                self.0.parent_with(&other.0).map($name)
            }

            pub fn append(
                &self,
                elements: impl IntoIterator<Item = PathElement>,
            ) -> Result<$name, PathError> {
                self.0.append(elements).and_then(Self::check)
            }

            pub fn append_path(&self, relative: &RelativePath) -> $name {
                $name(self.0.append_path(relative))
            }

            pub fn replace_last(&self, element: PathElement) -> Result<$name, PathError> {
                self.0.replace_last(element).and_then(Self::check)
            }

            pub fn remove_last(&self, count: usize) -> Option<$name> {
                self.0.remove_last(count).map($name)
            }
        }

        impl Deref for $name {
            type Target = JsonPath;

            fn deref(&self) -> &JsonPath {
                &self.0
            }
        }

        impl AsRef<JsonPath> for $name {
            fn as_ref(&self) -> &JsonPath {
                &self.0
            }
        }

        impl From<$name> for JsonPath {
            fn from(path: $name) -> JsonPath {
                path.0
            }
        }

        impl TryFrom<JsonPath> for $name {
            type Error = PathError;

            fn try_from(path: JsonPath) -> Result<Self, Self::Error> {
                Self::check(path)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                Ok(Self::check(text.parse()?)?)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.0.to_string())
                    .finish()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let path = JsonPath::deserialize(deserializer)?;
                Self::check(path).map_err(de::Error::custom)
            }
        }
    };
}

path_newtype!(AbsolutePath);
path_newtype!(RelativePath);
