//! Three-valued logic for containment answers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Answer to "does A contain B": proven, disproven, or undecidable from
/// structure alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tribool {
    True,
    False,
    Unknown,
}

impl Tribool {
    pub fn is_true(self) -> bool {
        self == Tribool::True
    }

    pub fn is_false(self) -> bool {
        self == Tribool::False
    }

    pub fn is_unknown(self) -> bool {
        self == Tribool::Unknown
    }

    /// Conjunction where `False` short-circuits: `rest` is only evaluated
    /// when `self` is not `False`.
    ///
    /// | self    | rest    | result  |
    /// |---------|---------|---------|
    /// | False   | -       | False   |
    /// | *       | False   | False   |
    /// | True    | True    | True    |
    /// | otherwise         || Unknown |
    pub fn and_then(self, rest: impl FnOnce() -> Tribool) -> Tribool {
        if self == Tribool::False {
            return Tribool::False;
        }
        match (self, rest()) {
            (_, Tribool::False) => Tribool::False,
            (Tribool::True, Tribool::True) => Tribool::True,
            _ => Tribool::Unknown,
        }
    }

    /// Disjunction where `True` short-circuits: `rest` is only evaluated
    /// when `self` is not `True`. `Unknown` wins over `False`.
    pub fn or_else(self, rest: impl FnOnce() -> Tribool) -> Tribool {
        if self == Tribool::True {
            return Tribool::True;
        }
        match (self, rest()) {
            (_, Tribool::True) => Tribool::True,
            (Tribool::False, Tribool::False) => Tribool::False,
            _ => Tribool::Unknown,
        }
    }

    /// Folds alternatives: the first `True` wins, otherwise `Unknown` if any
    /// alternative was `Unknown`, otherwise `False`.
    pub fn any<I>(alternatives: I) -> Tribool
    where
        I: IntoIterator<Item = Tribool>,
    {
        let mut result = Tribool::False;
        for alternative in alternatives {
            match alternative {
                Tribool::True => return Tribool::True,
                Tribool::Unknown => result = Tribool::Unknown,
                Tribool::False => {}
            }
        }
        result
    }

    /// Converts to the nullable-boolean view: `None` for `Unknown`.
    pub fn to_option(self) -> Option<bool> {
        match self {
            Tribool::True => Some(true),
            Tribool::False => Some(false),
            Tribool::Unknown => None,
        }
    }
}

impl From<bool> for Tribool {
    fn from(value: bool) -> Self {
        if value {
            Tribool::True
        } else {
            Tribool::False
        }
    }
}

impl From<Option<bool>> for Tribool {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Tribool::Unknown, Tribool::from)
    }
}

impl fmt::Display for Tribool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Tribool::True => "true",
            Tribool::False => "false",
            Tribool::Unknown => "unknown",
        };
        f.write_str(text)
    }
}
