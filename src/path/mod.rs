//! JSONPath patterns and containment matching.
//!
//! A path is a validated sequence of [`PathElement`]s. Matching asks whether
//! every JSON location one path can denote is also denoted by another, and
//! answers with a three-valued [`Tribool`] since opaque expressions and
//! filters cannot always be decided from structure alone.
//!
//! # Supported Syntax
//!
//! - `$` - Root node
//! - `.property` - Named property
//! - `['property']` - Bracket notation
//! - `['prop1','prop2']` - Several properties
//! - `.*` - Any property
//! - `[index]` - Array index
//! - `[1,3]` - Several array indexes
//! - `[start:end:step]` - Array slice
//! - `[*]` - Any array index
//! - `[(expr)]` - Index expression (opaque)
//! - `[?(expr)]` - Filter expression (opaque)
//! - `..element` - Recursive descent
//!
//! # Examples
//!
//! ```
//! use pathquill::path::{JsonPath, Tribool};
//!
//! let path: JsonPath = "$.a.b.c[42]".parse().unwrap();
//! let contains = |pattern: &str| pattern.parse::<JsonPath>().unwrap().matches(&path);
//!
//! assert_eq!(contains("$.a.*.c[*]"), Tribool::True);
//! assert_eq!(contains("$.a..[42]"), Tribool::True);
//! assert_eq!(contains("$.a.*.c[:42]"), Tribool::False);
//! assert_eq!(contains("$.a..[(@.length-1)]"), Tribool::Unknown);
//! ```

pub mod builder;
pub mod element;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod range;
pub mod sequence;
pub mod tribool;
pub mod writer;

pub use builder::PathBuilder;
pub use element::{ArraySlice, ElementKind, PathElement};
pub use error::{ParseError, PathError};
pub use parser::Parser;
pub use range::{IndexRange, Indexes, RangeError};
pub use sequence::{AbsolutePath, JsonPath, RelativePath};
pub use tribool::Tribool;
