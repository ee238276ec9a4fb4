use pathquill::path::{JsonPath, ParseError, PathElement, PathError, Parser};

fn path(text: &str) -> JsonPath {
    text.parse().unwrap()
}

#[test]
fn test_canonical_text_reads_back_unchanged() {
    for text in [
        "$",
        "$.a.b.c",
        "$.a.*.c[*]",
        "$['c','d'].b.c[*]",
        "$.store.book[42]",
        "$.a[7,42]",
        "$.a[1:3]",
        "$.a[::2]",
        "$.a[-1:]",
        "$.a[9:0:-3]",
        "$.a[:]",
        "$..a",
        "$..*",
        "$..[42]",
        "$.a..['b','c']",
        "$.a[(@.length-1)]",
        "$.a[?(@.price < 10)]",
        "a.b",
        "*.b",
        "[3].a",
        "$['a.b']",
        "$['']",
        "$['x*'].y",
    ] {
        assert_eq!(path(text).to_string(), text);
    }
}

#[test]
fn test_non_canonical_text_is_rewritten() {
    let cases = [
        ("$['a']", "$.a"),
        ("$['a'].b", "$.a.b"),
        ("$[ 7 ]", "$[7]"),
        ("$[42, 7]", "$[7,42]"),
        ("$['d', 'c']", "$['c','d']"),
        ("$[1:3:1]", "$[1:3]"),
        ("$[?( @.a )]", "$[?( @.a )]"),
    ];
    for (text, canonical) in cases {
        assert_eq!(path(text).to_string(), canonical, "{}", text);
    }
}

#[test]
fn test_property_names_with_punctuation() {
    assert_eq!(
        path("$['first name']").elements()[1],
        PathElement::Property("first name".to_string())
    );
    assert_eq!(
        path("$.first name").elements()[1],
        PathElement::Property("first name".to_string())
    );
    assert_eq!(
        path("$['a.b']").elements()[1],
        PathElement::Property("a.b".to_string())
    );
    assert_eq!(
        path("$['a,b']").elements()[1],
        PathElement::Property("a,b".to_string())
    );
    assert_eq!(
        path("$['', 'name']").elements()[1],
        PathElement::property_list(["", "name"]).unwrap()
    );
}

#[test]
fn test_dollar_names() {
    assert_eq!(path("$a").elements(), &[PathElement::Property("$a".to_string())]);
    assert_eq!(path("$.$").elements()[1], PathElement::Property("$".to_string()));

    let relative = JsonPath::new([
        PathElement::Property("$".to_string()),
        PathElement::Property("b".to_string()),
    ])
    .unwrap();
    assert_eq!(relative.to_string(), "['$'].b");
    assert_eq!(path(&relative.to_string()), relative);
}

#[test]
fn test_root_must_come_first() {
    assert!(matches!(
        "$.a[0]$".parse::<JsonPath>(),
        Err(ParseError::UnexpectedToken { .. })
    ));
    assert_eq!(
        JsonPath::new([PathElement::AnyProperty, PathElement::Root]),
        Err(PathError::MisplacedRoot { position: 1 })
    );
}

#[test]
fn test_grammar_errors() {
    assert!(matches!(Parser::parse(""), Err(ParseError::UnexpectedEnd { .. })));
    assert!(matches!(Parser::parse("$.a."), Err(ParseError::InvalidSyntax { .. })));
    assert!(matches!(Parser::parse("$.a.."), Err(ParseError::UnexpectedEnd { .. })));
    assert!(matches!(Parser::parse("$[]"), Err(ParseError::InvalidSyntax { .. })));
    assert!(matches!(Parser::parse("$['a'"), Err(ParseError::UnexpectedEnd { .. })));
    assert!(matches!(
        Parser::parse("$[1 2]"),
        Err(ParseError::InvalidSyntax { .. })
    ));
}

#[test]
fn test_validation_errors() {
    assert_eq!(
        "$['it''s']".parse::<JsonPath>().err(),
        Some(ParseError::UnexpectedToken {
            position: 6,
            found: "'".to_string(),
            expected: "']'".to_string(),
        })
    );
    assert_eq!(
        "$[1,-2]".parse::<JsonPath>().err(),
        Some(ParseError::Invalid(PathError::NegativeIndex(-2)))
    );
    assert_eq!(
        "$[?()]".parse::<JsonPath>().err(),
        Some(ParseError::Invalid(PathError::EmptyExpression))
    );
}

#[test]
fn test_error_messages() {
    let err = "$.a]".parse::<JsonPath>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected token ']' at position 3, expected property name"
    );
    let err = "$[-1]".parse::<JsonPath>().unwrap_err();
    assert_eq!(err.to_string(), "array index must not be negative: -1");
}
