//! Recursive-descent parser from tokens to a [`SelectorChain`].
//!
//! The parser stops at the first error; a chain is only ever returned whole.

use std::mem;

use super::chain::{DirectiveGroup, NodeTest, SelectorChain, Stage};
use super::directive::Directive;
use super::lexer::{Token, TokenKind, name_value, token_text, tokenize};
use super::slice::Slice;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Error, Result, Span};

/// Parse selector text into a chain.
pub fn parse(source: &str) -> Result<SelectorChain> {
    let tokens = tokenize(source)?;
    Parser::new(source, &tokens)
        .parse_chain()
        .map_err(Error::InvalidSelector)
}

type ParseResult<T> = std::result::Result<T, Diagnostics>;

struct Parser<'s> {
    source: &'s str,
    tokens: &'s [Token],
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str, tokens: &'s [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    fn eof_span(&self) -> Span {
        Span::at(self.source.len() as u32)
    }

    fn last_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .map(|i| self.tokens[i].span)
            .unwrap_or_default()
    }

    fn fail<T>(&self, kind: DiagnosticKind, span: Span, detail: Option<String>) -> ParseResult<T> {
        let mut diagnostics = Diagnostics::new();
        let mut builder = diagnostics.report(kind, span);
        if let Some(detail) = detail {
            builder = builder.message(detail);
        }
        builder.emit();
        Err(diagnostics)
    }

    fn unexpected<T>(&self, token: Token) -> ParseResult<T> {
        self.fail(
            DiagnosticKind::UnexpectedToken,
            token.span,
            Some(token.kind.describe().to_string()),
        )
    }

    fn unclosed<T>(&self, kind: DiagnosticKind, opened: Span) -> ParseResult<T> {
        let mut diagnostics = Diagnostics::new();
        diagnostics
            .report(kind, self.eof_span())
            .related_to("opened here", opened)
            .emit();
        Err(diagnostics)
    }

    fn parse_chain(&mut self) -> ParseResult<SelectorChain> {
        if self.tokens.is_empty() {
            return self.fail(
                DiagnosticKind::EmptySelector,
                Span::new(0, self.source.len() as u32),
                None,
            );
        }

        let mut stages = Vec::new();
        let mut spans = Vec::new();
        loop {
            let start = self.peek().map_or(self.eof_span(), |t| t.span);
            let stage = self.parse_stage()?;
            stages.push(stage);
            spans.push(start.cover(self.last_span()));

            match self.peek() {
                None => break,
                Some(token) if token.kind == TokenKind::Period => {
                    self.bump();
                    if self.peek().is_none() {
                        return self.fail(
                            DiagnosticKind::ExpectedStage,
                            self.eof_span(),
                            Some("selector ends with `.`".to_string()),
                        );
                    }
                }
                Some(token) => return self.unexpected(token),
            }
        }

        Ok(SelectorChain::new(stages, spans))
    }

    fn parse_stage(&mut self) -> ParseResult<Stage> {
        let Some(first) = self.peek() else {
            return self.fail(DiagnosticKind::ExpectedStage, self.eof_span(), None);
        };

        let test = match first.kind {
            TokenKind::Name | TokenKind::QuotedName => {
                self.bump();
                NodeTest::Name(name_value(self.source, &first).into_owned())
            }
            TokenKind::Asterisk => {
                self.bump();
                NodeTest::Wildcard
            }
            TokenKind::ParenOpen => self.parse_choice()?,
            other => {
                return self.fail(
                    DiagnosticKind::ExpectedStage,
                    first.span,
                    Some(format!("found {}", other.describe())),
                );
            }
        };

        let mut optional = false;
        if self.peek_kind() == Some(TokenKind::QuestionMark) {
            let marker = self.bump();
            optional = true;
            if let Some(next) = self.peek()
                && !matches!(
                    next.kind,
                    TokenKind::Period
                        | TokenKind::BracketOpen
                        | TokenKind::At
                        | TokenKind::QuestionMark
                )
            {
                return self.fail(DiagnosticKind::MisplacedOptional, marker.span, None);
            }
        }

        let mut groups = Vec::new();
        let mut pending = Vec::new();
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::BracketOpen => {
                    let slice = self.parse_bracket()?;
                    groups.push(DirectiveGroup::explicit(mem::take(&mut pending), slice));
                }
                TokenKind::At => pending.push(self.parse_directive()?),
                TokenKind::QuestionMark => {
                    if optional {
                        return self.fail(DiagnosticKind::DuplicateOptional, token.span, None);
                    }
                    self.bump();
                    optional = true;
                    if let Some(next) = self.peek()
                        && next.kind != TokenKind::Period
                    {
                        return self.fail(DiagnosticKind::MisplacedOptional, token.span, None);
                    }
                }
                _ => break,
            }
        }

        if !pending.is_empty() || groups.is_empty() {
            groups.push(DirectiveGroup::implicit(pending));
        }

        Ok(Stage {
            test,
            optional,
            groups,
        })
    }

    /// `(a|b|c)`
    fn parse_choice(&mut self) -> ParseResult<NodeTest> {
        let open = self.bump();
        let mut names = Vec::new();

        loop {
            let Some(token) = self.peek() else {
                return self.unclosed(DiagnosticKind::UnclosedParen, open.span);
            };
            match token.kind {
                TokenKind::Name | TokenKind::QuotedName => {
                    self.bump();
                    names.push(name_value(self.source, &token).into_owned());
                }
                TokenKind::ParenClose if names.is_empty() => {
                    return self.fail(
                        DiagnosticKind::EmptyChoice,
                        open.span.cover(token.span),
                        None,
                    );
                }
                _ => {
                    return self.fail(
                        DiagnosticKind::ExpectedName,
                        token.span,
                        Some(format!("found {}", token.kind.describe())),
                    );
                }
            }

            let Some(token) = self.peek() else {
                return self.unclosed(DiagnosticKind::UnclosedParen, open.span);
            };
            match token.kind {
                TokenKind::Pipe => {
                    self.bump();
                }
                TokenKind::ParenClose => {
                    self.bump();
                    return Ok(NodeTest::Choice(names));
                }
                _ => return self.unexpected(token),
            }
        }
    }

    /// `[]`, `[n]` or `[start:stop:step]` with every part optional.
    fn parse_bracket(&mut self) -> ParseResult<Slice> {
        let open = self.bump();

        if self.peek_kind() == Some(TokenKind::BracketClose) {
            self.bump();
            return Ok(Slice::FULL);
        }

        let start = self.parse_optional_number()?;
        if let Some((index, _)) = start
            && self.peek_kind() == Some(TokenKind::BracketClose)
        {
            self.bump();
            return Ok(Slice::index(index));
        }

        self.expect_slice_colon(open.span)?;
        let stop = self.parse_optional_number()?;

        let mut step = None;
        if self.peek_kind() == Some(TokenKind::Colon) {
            self.bump();
            step = self.parse_optional_number()?;
        }

        match self.peek() {
            None => return self.unclosed(DiagnosticKind::UnclosedBracket, open.span),
            Some(token) if token.kind == TokenKind::BracketClose => {
                self.bump();
            }
            Some(token) => return self.unexpected(token),
        }

        let step = match step {
            Some((0, span)) => return self.fail(DiagnosticKind::ZeroStep, span, None),
            Some((step, _)) => step,
            None => 1,
        };
        let start = match start {
            Some((start, _)) => start,
            None if step < 0 => -1,
            None => 0,
        };
        Ok(Slice::new(start, stop.map(|(stop, _)| stop), step))
    }

    fn expect_slice_colon(&mut self, open: Span) -> ParseResult<()> {
        match self.peek() {
            None => self.unclosed(DiagnosticKind::UnclosedBracket, open),
            Some(token) if token.kind == TokenKind::Colon => {
                self.bump();
                Ok(())
            }
            Some(token) => self.unexpected(token),
        }
    }

    fn parse_optional_number(&mut self) -> ParseResult<Option<(i64, Span)>> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Number => {
                self.bump();
                Ok(Some((self.number_value(token)?, token.span)))
            }
            _ => Ok(None),
        }
    }

    fn number_value(&self, token: Token) -> ParseResult<i64> {
        let text = token_text(self.source, &token);
        text.parse::<i64>().or_else(|_| {
            self.fail(
                DiagnosticKind::NumberOutOfRange,
                token.span,
                Some(format!("`{text}`")),
            )
        })
    }

    /// `@name`, `@name(arg, ...)` or `@!name(...)`.
    fn parse_directive(&mut self) -> ParseResult<Directive> {
        let at = self.bump();

        let mut negated = false;
        if self.peek_kind() == Some(TokenKind::Not) {
            self.bump();
            negated = true;
        }

        let name_token = match self.peek() {
            Some(token) if token.kind == TokenKind::Name => self.bump(),
            Some(token) => {
                return self.fail(DiagnosticKind::ExpectedDirectiveName, token.span, None);
            }
            None => {
                return self.fail(DiagnosticKind::ExpectedDirectiveName, self.eof_span(), None);
            }
        };
        let name = token_text(self.source, &name_token);

        let mut args = Vec::new();
        if self.peek_kind() == Some(TokenKind::ParenOpen) {
            args = self.parse_directive_args()?;
        }
        let span = at.span.cover(self.last_span());

        let (directive, arity) = match name {
            "isNamed" => (Directive::IsNamed, 0),
            "mark" => (Directive::Mark, 0),
            "optional" => (Directive::IsOptionalMarker, 0),
            "name" => match args.first() {
                Some(text) => (Directive::NameEquals(text.clone()), 1),
                None => (Directive::NameEquals(String::new()), 1),
            },
            _ => {
                return self.fail(
                    DiagnosticKind::UnknownDirective,
                    name_token.span,
                    Some(name.to_string()),
                );
            }
        };

        if args.len() != arity {
            let expected = match arity {
                0 => "no arguments".to_string(),
                1 => "1 argument".to_string(),
                n => format!("{n} arguments"),
            };
            return self.fail(
                DiagnosticKind::DirectiveArity,
                span,
                Some(format!("`@{name}` takes {expected}, got {}", args.len())),
            );
        }

        if !negated {
            return Ok(directive);
        }
        if !directive.can_negate() {
            return self.fail(
                DiagnosticKind::InvalidNegation,
                span,
                Some(name.to_string()),
            );
        }
        Ok(Directive::Not(Box::new(directive)))
    }

    fn parse_directive_args(&mut self) -> ParseResult<Vec<String>> {
        let open = self.bump();
        let mut args = Vec::new();

        if self.peek_kind() == Some(TokenKind::ParenClose) {
            self.bump();
            return Ok(args);
        }

        loop {
            match self.peek() {
                None => return self.unclosed(DiagnosticKind::UnclosedParen, open.span),
                Some(token) if token.kind.is_name() => {
                    self.bump();
                    args.push(name_value(self.source, &token).into_owned());
                }
                Some(token) if token.kind == TokenKind::Number => {
                    self.bump();
                    args.push(token_text(self.source, &token).to_string());
                }
                Some(token) => {
                    return self.fail(
                        DiagnosticKind::ExpectedArgument,
                        token.span,
                        Some(format!("found {}", token.kind.describe())),
                    );
                }
            }

            match self.peek() {
                None => return self.unclosed(DiagnosticKind::UnclosedParen, open.span),
                Some(token) if token.kind == TokenKind::Comma => {
                    self.bump();
                }
                Some(token) if token.kind == TokenKind::ParenClose => {
                    self.bump();
                    return Ok(args);
                }
                Some(token) => return self.unexpected(token),
            }
        }
    }
}
