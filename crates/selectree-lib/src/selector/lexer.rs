//! Lexer for the selector language.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! [`lex`] never fails: consecutive unrecognized characters coalesce into one `Garbage` token.
//! [`tokenize`] is the strict entry point and turns the first bad token into a diagnostic.

use std::borrow::Cow;

use logos::Logos;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Error, Result, Span};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    /// Quoted name, `"..."` with backslash escapes. Text includes the quotes.
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    QuotedName,

    #[regex(r"-?[0-9]+")]
    Number,

    #[token(".")]
    Period,

    #[token("*")]
    Asterisk,

    #[token("?")]
    QuestionMark,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token("|")]
    Pipe,

    #[token("@")]
    At,

    #[token(",")]
    Comma,

    #[token("!")]
    Not,

    /// Consecutive unrecognized characters coalesced into one token
    Garbage,
}

impl TokenKind {
    /// How the token reads in a diagnostic.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Name | TokenKind::QuotedName => "name",
            TokenKind::Number => "number",
            TokenKind::Period => "`.`",
            TokenKind::Asterisk => "`*`",
            TokenKind::QuestionMark => "`?`",
            TokenKind::BracketOpen => "`[`",
            TokenKind::BracketClose => "`]`",
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Pipe => "`|`",
            TokenKind::At => "`@`",
            TokenKind::Comma => "`,`",
            TokenKind::Not => "`!`",
            TokenKind::Garbage => "unrecognized input",
        }
    }

    pub fn is_name(self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::QuotedName)
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Post-processes the Logos output to coalesce consecutive lexer errors into single `Garbage` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(TokenKind::Garbage, (start..end).into()));
                }
                tokens.push(Token::new(kind, lexer.span().into()));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, (start..source.len()).into()));
                }
                break;
            }
        }
    }

    tokens
}

/// Strict tokenization: any garbage or empty quoted name fails the whole selector.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let tokens = lex(source);
    let mut diagnostics = Diagnostics::new();

    for token in &tokens {
        match token.kind {
            TokenKind::Garbage => {
                let text = token_text(source, token);
                let kind = if text.starts_with('"') {
                    DiagnosticKind::UnterminatedString
                } else if text.starts_with('-') {
                    DiagnosticKind::InvalidNumber
                } else {
                    DiagnosticKind::UnrecognizedCharacter
                };
                let mut builder = diagnostics.report(kind, token.span);
                if kind == DiagnosticKind::UnrecognizedCharacter {
                    builder = builder.message(format!("`{text}`"));
                }
                builder.emit();
                break;
            }
            TokenKind::QuotedName if token.span.len() == 2 => {
                diagnostics
                    .report(DiagnosticKind::EmptyString, token.span)
                    .emit();
                break;
            }
            _ => {}
        }
    }

    if diagnostics.is_empty() {
        Ok(tokens)
    } else {
        Err(Error::InvalidSelector(diagnostics))
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// The name a `Name` or `QuotedName` token stands for, with quotes and escapes removed.
pub fn name_value<'src>(source: &'src str, token: &Token) -> Cow<'src, str> {
    let text = token_text(source, token);
    if token.kind != TokenKind::QuotedName {
        return Cow::Borrowed(text);
    }

    let inner = &text[1..text.len() - 1];
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Cow::Owned(out)
}
