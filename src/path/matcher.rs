//! Sequence-level matching.
//!
//! Element matching alone cannot decide recursive descent, since `..x`
//! covers any number of intermediate levels. The matcher resolves it by
//! trying every split point of the candidate and backtracking.

use super::element::PathElement;
use super::tribool::Tribool;

/// Whether the locations denoted by `pattern` contain those denoted by
/// `candidate`.
pub fn matches(pattern: &[PathElement], candidate: &[PathElement]) -> Tribool {
    let Some((first, rest)) = pattern.split_first() else {
        return Tribool::from(candidate.is_empty());
    };

    match first {
        PathElement::RecursiveDescent(inner) => {
            Tribool::any((0..=candidate.len()).map(|skipped| {
                let remaining = &candidate[skipped..];
                match remaining.split_first() {
                    // Descent against descent compares the wrapped elements
                    Some((head @ PathElement::RecursiveDescent(_), tail)) => {
                        first.matches(head).and_then(|| matches(rest, tail))
                    }
                    _ => matches_element(inner, rest, remaining),
                }
            }))
        }
        _ => matches_element(first, rest, candidate),
    }
}

/// Matches `element` against the head of `candidate`, then `rest` against
/// its tail.
fn matches_element(
    element: &PathElement,
    rest: &[PathElement],
    candidate: &[PathElement],
) -> Tribool {
    let Some((head, tail)) = candidate.split_first() else {
        return Tribool::False;
    };

    let head_match = element.matches(head);
    if head_match.is_false() {
        return Tribool::False;
    }
    if rest.is_empty() {
        return if tail.is_empty() {
            head_match
        } else {
            Tribool::False
        };
    }
    head_match.and_then(|| matches(rest, tail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parser::Parser;

    fn check(pattern: &str, candidate: &str) -> Tribool {
        let pattern = Parser::parse(pattern).unwrap();
        let candidate = Parser::parse(candidate).unwrap();
        matches(&pattern, &candidate)
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(check("$.a.b", "$.a.b"), Tribool::True);
        assert_eq!(check("$.a.b", "$.a.c"), Tribool::False);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(check("$.a", "$.a.b"), Tribool::False);
        assert_eq!(check("$.a.b", "$.a"), Tribool::False);
        assert_eq!(check("a", "$.a"), Tribool::False);
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(check("$.a.*.c[*]", "$.a.b.c[42]"), Tribool::True);
        assert_eq!(check("$.*", "$[0]"), Tribool::False);
    }

    #[test]
    fn test_recursive_descent_spans_levels() {
        assert_eq!(check("$.a..[42]", "$.a.b.c[42]"), Tribool::True);
        assert_eq!(check("$.a..[42]", "$.a[42]"), Tribool::True);
        assert_eq!(check("$..c", "$.a.b.c"), Tribool::True);
        assert_eq!(check("$..c", "$.a.b.c.d"), Tribool::False);
        assert_eq!(check("$..c.d", "$.c.x.c.d"), Tribool::True);
    }

    #[test]
    fn test_recursive_descent_needs_an_element() {
        assert_eq!(check("$.a..b", "$.a"), Tribool::False);
    }

    #[test]
    fn test_recursive_descent_against_recursive_descent() {
        assert_eq!(check("$..a", "$..a"), Tribool::True);
        assert_eq!(check("$..*", "$..a"), Tribool::True);
        assert_eq!(check("$..a", "$.x..a"), Tribool::True);
        assert_eq!(check("$..a", "$..*"), Tribool::False);
        assert_eq!(check("$.a", "$..a"), Tribool::False);
    }

    #[test]
    fn test_unknown_propagates() {
        assert_eq!(
            check("$.a.*.c[(@.length-1)]", "$.a.b.c[42]"),
            Tribool::Unknown
        );
        assert_eq!(check("$..[(@.length-1)]", "$.a[3]"), Tribool::Unknown);
        assert_eq!(check("$.a[(@.length-1)].b", "$.a[3].c"), Tribool::False);
    }

    #[test]
    fn test_true_wins_over_unknown_across_splits() {
        // first split leaves [1] over; the second one is exact
        assert_eq!(check("$..[1]", "$[1][1]"), Tribool::True);
        assert_eq!(check("$..[?(@.a)]", "$.x[1]"), Tribool::Unknown);
    }
}
