use super::lexer::{TokenKind, lex, name_value, token_text, tokenize};
use crate::diagnostics::DiagnosticKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|t| t.kind).collect()
}

fn first_error(source: &str) -> DiagnosticKind {
    let err = tokenize(source).unwrap_err();
    err.diagnostics().first().unwrap().kind()
}

#[test]
fn punctuation_and_names() {
    use TokenKind::*;

    assert_eq!(
        kinds("a?.b[1:-2]@!name(x, \"y\")"),
        [
            Name, QuestionMark, Period, Name, BracketOpen, Number, Colon, Number, BracketClose, At,
            Not, Name, ParenOpen, Name, Comma, QuotedName, ParenClose,
        ]
    );
    assert_eq!(kinds("(a|b).*"), [ParenOpen, Name, Pipe, Name, ParenClose, Period, Asterisk]);
}

#[test]
fn whitespace_is_skipped() {
    let source = " a \t.\n b ";
    let tokens = lex(source);

    let texts: Vec<&str> = tokens.iter().map(|t| token_text(source, t)).collect();

    assert_eq!(texts, ["a", ".", "b"]);
    assert_eq!(tokens[2].span.start, 7);
}

#[test]
fn garbage_runs_coalesce() {
    let source = "a$%b";
    let tokens = lex(source);

    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [TokenKind::Name, TokenKind::Garbage, TokenKind::Name]
    );
    assert_eq!(token_text(source, &tokens[1]), "$%");
}

#[test]
fn quoted_names_unescape() {
    let source = r#""a\"b\\c\n""#;
    let tokens = lex(source);

    assert_eq!(tokens.len(), 1);
    assert_eq!(name_value(source, &tokens[0]), "a\"b\\c\n");
}

#[test]
fn plain_quoted_name_borrows() {
    let source = r#""if""#;
    let tokens = lex(source);

    assert_eq!(name_value(source, &tokens[0]), "if");
    assert!(matches!(
        name_value(source, &tokens[0]),
        std::borrow::Cow::Borrowed(_)
    ));
}

#[test]
fn strict_tokenize_reports_bad_input() {
    assert_eq!(first_error("a$"), DiagnosticKind::UnrecognizedCharacter);
    assert_eq!(first_error("a[-]"), DiagnosticKind::InvalidNumber);
    assert_eq!(first_error("\"abc"), DiagnosticKind::UnterminatedString);
    assert_eq!(first_error("\"\""), DiagnosticKind::EmptyString);
}

#[test]
fn unrecognized_character_names_the_text() {
    let err = tokenize("a # b").unwrap_err();

    insta::assert_snapshot!(err.diagnostics(), @"error at 2..3: unrecognized character: `#`");
}

#[test]
fn negative_numbers_are_one_token() {
    let source = "[-12]";
    let tokens = lex(source);

    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(token_text(source, &tokens[1]), "-12");
}
