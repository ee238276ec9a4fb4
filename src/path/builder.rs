//! Fluent construction of paths.
//!
//! ```
//! use pathquill::path::PathBuilder;
//!
//! let path = PathBuilder::absolute()
//!     .property("store")
//!     .recursive_descent()
//!     .property("price")
//!     .build()
//!     .unwrap();
//! assert_eq!(path.to_string(), "$.store..price");
//! ```

use super::element::{ElementKind, PathElement};
use super::error::PathError;
use super::sequence::{AbsolutePath, JsonPath, RelativePath};

/// Chained path builder. Errors are held until [`PathBuilder::build`];
/// the first one wins and later calls are ignored.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    elements: Vec<PathElement>,
    descent: bool,
    error: Option<PathError>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that already holds `$`.
    pub fn absolute() -> Self {
        Self::new().root()
    }

    pub fn relative() -> Self {
        Self::new()
    }

    pub fn root(mut self) -> Self {
        if self.error.is_none() && (self.descent || !self.elements.is_empty()) {
            self.error = Some(PathError::RootNotFirst);
        }
        self.push(Ok(PathElement::Root))
    }

    /// Applies recursive descent to the next element.
    pub fn recursive_descent(mut self) -> Self {
        if self.error.is_none() {
            if self.descent {
                self.error = Some(PathError::InvalidRecursiveDescent {
                    kind: ElementKind::RecursiveDescent,
                });
            }
            self.descent = true;
        }
        self
    }

    pub fn property(self, name: impl Into<String>) -> Self {
        self.push(PathElement::property(name))
    }

    pub fn any_property(self) -> Self {
        self.push(Ok(PathElement::AnyProperty))
    }

    /// Property list; a single name becomes a plain property.
    pub fn properties<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        let element = if names.len() == 1 {
            PathElement::property(names.remove(0))
        } else {
            PathElement::property_list(names)
        };
        self.push(element)
    }

    pub fn index(self, index: isize) -> Self {
        self.push(PathElement::array_index(index))
    }

    pub fn any_index(self) -> Self {
        self.push(Ok(PathElement::AnyArrayIndex))
    }

    /// Index list; a single index becomes a plain index.
    pub fn indexes(self, indexes: impl IntoIterator<Item = isize>) -> Self {
        let indexes: Vec<isize> = indexes.into_iter().collect();
        let element = match indexes.as_slice() {
            [index] => PathElement::array_index(*index),
            _ => PathElement::array_index_list(indexes),
        };
        self.push(element)
    }

    pub fn slice(self, start: Option<isize>, end: Option<isize>, step: isize) -> Self {
        self.push(PathElement::array_slice(start, end, step))
    }

    pub fn expression(self, expression: impl Into<String>) -> Self {
        self.push(PathElement::expression(expression))
    }

    pub fn filter(self, expression: impl Into<String>) -> Self {
        self.push(PathElement::filter_expression(expression))
    }

    fn push(mut self, element: Result<PathElement, PathError>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let element = if self.descent {
            self.descent = false;
            element.and_then(PathElement::recursive_descent)
        } else {
            element
        };
        match element {
            Ok(element) => self.elements.push(element),
            Err(error) => self.error = Some(error),
        }
        self
    }

    /// Finishes the path.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while chaining, or
    /// [`PathError::DanglingRecursiveDescent`] when the last call was
    /// [`PathBuilder::recursive_descent`].
    pub fn build(self) -> Result<JsonPath, PathError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.descent {
            return Err(PathError::DanglingRecursiveDescent);
        }
        JsonPath::new(self.elements)
    }

    pub fn build_absolute(self) -> Result<AbsolutePath, PathError> {
        AbsolutePath::try_from(self.build()?)
    }

    pub fn build_relative(self) -> Result<RelativePath, PathError> {
        RelativePath::try_from(self.build()?)
    }
}
