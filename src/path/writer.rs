//! Canonical text form of elements and paths.

use std::fmt::Write;

use super::element::{ArraySlice, PathElement};

/// Characters that force the bracketed `['name']` form.
const RESERVED_NAME_CHARS: [char; 4] = ['[', ']', '.', '*'];

/// Writes a whole path. Only elements after the first get a leading dot.
pub fn write_path(elements: &[PathElement]) -> String {
    let mut out = String::with_capacity(elements.len() * 5);
    for (position, element) in elements.iter().enumerate() {
        append_element(&mut out, element, position != 0);
    }
    out
}

/// Writes a single element as if it started a relative path.
pub fn write_element(element: &PathElement) -> String {
    let mut out = String::new();
    append_element(&mut out, element, false);
    out
}

/// Whether `name` can be written without brackets.
pub fn is_simple_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(RESERVED_NAME_CHARS)
}

fn append_element(out: &mut String, element: &PathElement, use_dot: bool) {
    match element {
        PathElement::Root => out.push('$'),
        PathElement::RecursiveDescent(inner) => {
            out.push_str("..");
            append_element(out, inner, false);
        }
        PathElement::Property(name) => {
            // a leading bare `$` would read back as root
            if is_simple_name(name) && (use_dot || name != "$") {
                if use_dot {
                    out.push('.');
                }
                out.push_str(name);
            } else {
                let _ = write!(out, "['{}']", name);
            }
        }
        PathElement::AnyProperty => out.push_str(if use_dot { ".*" } else { "*" }),
        PathElement::PropertyList(names) => {
            let quoted: Vec<String> = names.iter().map(|name| format!("'{}'", name)).collect();
            let _ = write!(out, "[{}]", quoted.join(","));
        }
        PathElement::ArrayIndex(index) => {
            let _ = write!(out, "[{}]", index);
        }
        PathElement::AnyArrayIndex => out.push_str("[*]"),
        PathElement::ArrayIndexList(indexes) => {
            let joined: Vec<String> = indexes.iter().map(ToString::to_string).collect();
            let _ = write!(out, "[{}]", joined.join(","));
        }
        PathElement::ArraySlice(slice) => append_slice(out, slice),
        PathElement::Expression(expression) => {
            let _ = write!(out, "[({})]", expression);
        }
        PathElement::FilterExpression(expression) => {
            let _ = write!(out, "[?({})]", expression);
        }
    }
}

fn append_slice(out: &mut String, slice: &ArraySlice) {
    out.push('[');
    if let Some(start) = slice.start() {
        let _ = write!(out, "{}", start);
    }
    out.push(':');
    if let Some(end) = slice.end() {
        let _ = write!(out, "{}", end);
    }
    if slice.step() != 1 {
        let _ = write!(out, ":{}", slice.step());
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str) -> PathElement {
        PathElement::Property(name.to_string())
    }

    #[test]
    fn test_write_absolute_path() {
        let elements = vec![
            PathElement::Root,
            property("a"),
            PathElement::AnyProperty,
            PathElement::property_list(["c", "b"]).unwrap(),
            PathElement::ArrayIndex(42),
            PathElement::AnyArrayIndex,
            PathElement::array_index_list([42, 7]).unwrap(),
            PathElement::array_slice(Some(0), Some(10), 1).unwrap(),
            PathElement::recursive_descent(PathElement::Expression("@.length-1".into())).unwrap(),
            PathElement::FilterExpression("@.name = 'a'".into()),
        ];
        assert_eq!(
            write_path(&elements),
            "$.a.*['b','c'][42][*][7,42][0:10]..[(@.length-1)][?(@.name = 'a')]"
        );
    }

    #[test]
    fn test_write_relative_path_has_no_leading_dot() {
        assert_eq!(write_path(&[property("a"), property("b")]), "a.b");
        assert_eq!(write_path(&[PathElement::AnyProperty]), "*");
    }

    #[test]
    fn test_write_non_simple_property_names() {
        assert_eq!(write_path(&[PathElement::Root, property("a.b")]), "$['a.b']");
        assert_eq!(write_path(&[PathElement::Root, property("")]), "$['']");
        assert_eq!(write_path(&[PathElement::Root, property("x*")]), "$['x*']");
        assert_eq!(write_path(&[PathElement::Root, property("sp ace")]), "$.sp ace");
        assert_eq!(write_path(&[property("$"), property("$")]), "['$'].$");
    }

    #[test]
    fn test_write_recursive_descent() {
        let descent = |element| PathElement::recursive_descent(element).unwrap();
        assert_eq!(
            write_path(&[PathElement::Root, descent(property("a"))]),
            "$..a"
        );
        assert_eq!(
            write_path(&[PathElement::Root, descent(PathElement::AnyProperty)]),
            "$..*"
        );
        assert_eq!(
            write_path(&[PathElement::Root, descent(PathElement::ArrayIndex(3))]),
            "$..[3]"
        );
    }

    #[test]
    fn test_write_slices() {
        let slice = |start, end, step| write_element(&PathElement::array_slice(start, end, step).unwrap());
        assert_eq!(slice(None, None, 1), "[:]");
        assert_eq!(slice(Some(1), None, 1), "[1:]");
        assert_eq!(slice(None, Some(5), 2), "[:5:2]");
        assert_eq!(slice(Some(-1), None, 1), "[-1:]");
        assert_eq!(slice(Some(9), Some(0), -3), "[9:0:-3]");
    }
}
