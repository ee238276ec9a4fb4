use pathquill::path::{AbsolutePath, JsonPath, PathElement, PathError, RelativePath, Tribool};

fn path(text: &str) -> JsonPath {
    text.parse().unwrap()
}

#[test]
fn test_matches_scenarios() {
    assert_eq!(path("$.a.*.c[*]").matches(&path("$.a.b.c[42]")), Tribool::True);
    assert_eq!(path("$.a.*.c[:42]").matches(&path("$.a.b.c[42]")), Tribool::False);
    assert_eq!(path("$.a..[42]").matches(&path("$.a.b.c[42]")), Tribool::True);
    assert_eq!(path("$.a..[:42]").matches(&path("$.a.b.c[42]")), Tribool::False);
    assert_eq!(
        path("$.a.*.c[(@.length-1)]").matches(&path("$.a.b.c[42]")),
        Tribool::Unknown
    );
    assert_eq!(
        path("$.a..[(@.length-1)]").matches(&path("$.a.b.c[42]")),
        Tribool::Unknown
    );
}

#[test]
fn test_matches_is_reflexive() {
    for text in [
        "$",
        "$.a",
        "$.a.*['b','c'][42][*][7,42][0:10]",
        "$..a[1:10:3]",
        "a..b[*]",
        "$[?(@.name)]",
        "$[(@.length-1)]",
    ] {
        let p = path(text);
        assert_eq!(p.matches(&p), Tribool::True, "{}", text);
    }
}

#[test]
fn test_matches_sequence_boundaries() {
    // pattern longer than candidate and the other way round
    assert_eq!(path("$.a.b").matches(&path("$.a")), Tribool::False);
    assert_eq!(path("$.a").matches(&path("$.a.b")), Tribool::False);
    // descent at the very end must still consume an element
    assert_eq!(path("$.a..*").matches(&path("$.a")), Tribool::False);
    assert_eq!(path("$.a..*").matches(&path("$.a.b.c")), Tribool::True);
    // descent at the very start of a relative path
    assert_eq!(path("..b").matches(&path("a.b")), Tribool::True);
    assert_eq!(path("..b").matches(&path("b")), Tribool::True);
}

#[test]
fn test_normalized() {
    let cases = [
        ("$..a[7,7]", "$..a[7]"),
        ("$..a[7:8]", "$..a[7]"),
        ("$..a[:]", "$..a[*]"),
        ("$.a[0:42]", "$.a[:42]"),
        ("$.a[42:42]", "$.a[:0]"),
        ("..a['b','b']", "..a.b"),
        ("$.a[1,4,7]", "$.a[1:8:3]"),
    ];
    for (text, expected) in cases {
        let normalized = path(text).normalized();
        assert_eq!(normalized.to_string(), expected, "{}", text);
        assert_eq!(normalized.normalized(), normalized);
    }
}

#[test]
fn test_normalized_keeps_negative_slices() {
    let p = path("$.a[-1:]");
    assert!(p.is_normalized());
    assert_eq!(p.normalized(), p);
    assert!(!p.is_strict());
}

#[test]
fn test_extreme_slice_bounds_give_unknown() {
    for text in ["$[5:9223372036854775807:-1]", "$[5::-9223372036854775808]"] {
        let p = path(text);
        assert!(!p.is_strict(), "{}", text);
        assert!(p.is_normalized(), "{}", text);
        assert_eq!(p.normalized(), p);
        assert_eq!(p.matches(&path("$[5]")), Tribool::Unknown, "{}", text);
        assert_eq!(p.matches(&p), Tribool::True, "{}", text);
    }
}

#[test]
fn test_reversed_slices() {
    assert_eq!(path("$[::-1]").matches(&path("$[3]")), Tribool::True);
    assert_eq!(path("$[::-1]").matches(&path("$[3,9]")), Tribool::True);
    assert_eq!(path("$[::-1]").matches(&path("$[*]")), Tribool::True);
    assert_eq!(path("$[*]").matches(&path("$[::-1]")), Tribool::True);
    assert_eq!(path("$[::-1]").normalized().to_string(), "$[*]");
    assert_eq!(path("$[::-2]").matches(&path("$[3]")), Tribool::Unknown);
}

#[test]
fn test_starts_with() {
    let p = path("$.a.b.c");
    assert!(p.starts_with(&path("$")));
    assert!(p.starts_with(&path("$.a.b")));
    assert!(!p.starts_with(&path("$.a.b.c")));
    assert!(!p.starts_with(&path("$.a.c")));
    assert!(!p.starts_with(&path("a")));
}

#[test]
fn test_parent_with() {
    let p = path("$.a.b.c");
    assert_eq!(p.parent_with(&path("$.a.x")), Some(path("$.a")));
    assert_eq!(p.parent_with(&path("$.a.b")), Some(path("$.a.b")));
    assert_eq!(path("$.a").parent_with(&p), Some(path("$.a")));
    assert_eq!(p.parent_with(&p), Some(p.clone()));
    assert_eq!(p.parent_with(&path("a.b")), None);
}

#[test]
fn test_relative_path_to() {
    let parent = path("$.a");
    let relative = parent.relative_path_to(&path("$.a.b[1]")).unwrap();
    assert_eq!(relative.to_string(), "b[1]");
    assert_eq!(parent.relative_path_to(&parent), None);
    assert_eq!(parent.relative_path_to(&path("$.b.c")), None);
    assert_eq!(parent.append_path(&relative), path("$.a.b[1]"));
}

#[test]
fn test_append_and_replace_last() {
    let p = path("$.a");
    let appended = p
        .append([PathElement::AnyArrayIndex, PathElement::property("b").unwrap()])
        .unwrap();
    assert_eq!(appended.to_string(), "$.a[*].b");
    assert_eq!(p.append(Vec::new()).unwrap(), p);
    assert_eq!(
        p.append([PathElement::Root]),
        Err(PathError::MisplacedRoot { position: 2 })
    );

    let replaced = appended.replace_last(PathElement::ArrayIndex(3)).unwrap();
    assert_eq!(replaced.to_string(), "$.a[*][3]");
}

#[test]
fn test_remove_last() {
    let p = path("$.a.b.c");
    assert_eq!(p.remove_last(0), Some(p.clone()));
    assert_eq!(p.remove_last(2), Some(path("$.a")));
    assert_eq!(p.remove_last(3), Some(path("$")));
    assert_eq!(p.remove_last(4), None);
    assert_eq!(p.remove_last(5), None);
}

#[test]
fn test_to_absolute() {
    assert_eq!(path("a.b").to_absolute().to_string(), "$.a.b");
    assert_eq!(path("$.a").to_absolute().to_string(), "$.a");
    assert_eq!(path("..a").to_absolute().to_string(), "$..a");
}

#[test]
fn test_typed_paths() {
    let absolute = AbsolutePath::parse("$.a.b").unwrap();
    assert_eq!(absolute.len(), 3);
    let parent: AbsolutePath = absolute.remove_last(1).unwrap();
    assert_eq!(parent.to_string(), "$.a");

    let relative = RelativePath::parse("b.c").unwrap();
    let combined = absolute.append_path(&relative);
    assert_eq!(combined.to_string(), "$.a.b.b.c");

    assert_eq!(
        RelativePath::try_from(path("$.a")),
        Err(PathError::NotRelative)
    );
    assert_eq!(AbsolutePath::new(Vec::new()), Err(PathError::Empty));

    let json: JsonPath = absolute.clone().into();
    assert!(json.is_absolute());
}

#[test]
fn test_paths_are_shareable_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let p = Arc::new(path("$['a'].b[0:3]"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = Arc::clone(&p);
            thread::spawn(move || (p.to_string(), p.is_strict(), p.is_normalized()))
        })
        .collect();
    for handle in handles {
        let (text, strict, normalized) = handle.join().unwrap();
        assert_eq!(text, "$.a.b[0:3]");
        assert!(!strict);
        assert!(!normalized);
    }
}
