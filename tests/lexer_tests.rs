use opal::scanner;
use opal::scanner::token::{Literal, TokenKind};
use rstest::rstest;

#[test]
fn fixture_pipeline_tokens() {
    let source = include_str!("../fixtures/pipeline.opal");
    let expected = include_str!("../fixtures/pipeline.tokens");
    let tokens = scanner::scan(source).expect("scan should succeed");
    let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(rendered, expected_lines);
}

#[test]
fn fixture_rescans_identically() {
    let source = include_str!("../fixtures/pipeline.opal");
    let first = scanner::scan(source).expect("scan should succeed");
    let second = scanner::scan(source).expect("scan should succeed");
    assert_eq!(first, second);
}

#[test]
fn error_display_contract() {
    let err = scanner::scan("x = 1_;").unwrap_err();
    assert_eq!(
        err.to_string(),
        "error on line 1, col 5: number literals cannot end with underscores"
    );
}

#[test]
fn unterminated_string_names_the_opening_quote() {
    let err = scanner::scan("greet = \"hello").unwrap_err();
    assert_eq!(
        err.to_string(),
        "error on line 1, col 9: unterminated string literal"
    );
}

#[test]
fn errors_yield_no_tokens() {
    // The scan either succeeds completely or returns the error alone.
    assert!(scanner::scan("a b c ?").is_err());
}

#[test]
fn tokens_serialize_to_json() {
    let tokens = scanner::scan("42").expect("scan should succeed");
    let json = serde_json::to_value(&tokens).expect("serialize tokens");
    assert_eq!(json[0]["kind"], "Number");
    assert_eq!(json[0]["literal"], "42");
    assert_eq!(json[0]["line"], 1);
    assert_eq!(json[0]["column"], 1);
}

#[rstest]
#[case("1_000", Literal::Number(1000.0))]
#[case("-2.5", Literal::Number(-2.5))]
#[case("True", Literal::Bool(true))]
#[case("False", Literal::Bool(false))]
#[case("\"hi\"", Literal::Str("hi".to_string()))]
fn scanned_literals_convert(#[case] source: &str, #[case] expected: Literal) {
    let tokens = scanner::scan(source).expect("scan should succeed");
    assert_eq!(tokens[0].convert().unwrap(), expected);
}

#[rstest]
#[case("standalone comment", "// nothing here", &[])]
#[case("number after comment", "// comment\n42", &[TokenKind::Number])]
#[case(
    "funcall chain",
    "@first(x) $ @second",
    &[
        TokenKind::Funcall, TokenKind::OpenBracket, TokenKind::Ident,
        TokenKind::CloseBracket, TokenKind::Pipe, TokenKind::Funcall,
    ]
)]
fn token_kind_streams(#[case] _label: &str, #[case] source: &str, #[case] expected: &[TokenKind]) {
    let tokens = scanner::scan(source).expect("scan should succeed");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, expected);
}
