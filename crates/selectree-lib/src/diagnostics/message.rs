use crate::Span;

/// Diagnostic kinds, grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexer
    UnrecognizedCharacter,
    UnterminatedString,
    EmptyString,
    InvalidNumber,

    // Unclosed delimiters
    UnclosedBracket,
    UnclosedParen,

    // User omitted something required
    EmptySelector,
    ExpectedStage,
    ExpectedName,
    ExpectedDirectiveName,
    ExpectedArgument,

    // User wrote something that doesn't belong
    UnexpectedToken,
    EmptyChoice,
    MisplacedOptional,
    DuplicateOptional,
    ZeroStep,
    NumberOutOfRange,
    UnknownDirective,
    DirectiveArity,
    InvalidNegation,

    // Grammar checks
    UnknownNodeKind,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnknownNodeKind => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::MisplacedOptional => Some("`?` goes right after the node test or before `.`"),
            Self::ZeroStep => Some("use a positive step, or a negative one to walk backwards"),
            Self::EmptyChoice => Some("use `*` to match any node"),
            Self::UnknownDirective => Some("known directives: @isNamed, @name(text), @mark, @optional"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnrecognizedCharacter => "unrecognized character",
            Self::UnterminatedString => "unterminated string",
            Self::EmptyString => "empty string is not a valid name",
            Self::InvalidNumber => "expected digits after `-`",

            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedParen => "missing closing `)`",

            Self::EmptySelector => "selector is empty",
            Self::ExpectedStage => "expected a node test",
            Self::ExpectedName => "expected a node name",
            Self::ExpectedDirectiveName => "expected directive name after `@`",
            Self::ExpectedArgument => "expected a name or number",

            Self::UnexpectedToken => "unexpected token",
            Self::EmptyChoice => "empty `()` is not allowed",
            Self::MisplacedOptional => "misplaced optional marker",
            Self::DuplicateOptional => "duplicate optional marker",
            Self::ZeroStep => "slice step cannot be zero",
            Self::NumberOutOfRange => "number out of range",
            Self::UnknownDirective => "unknown directive",
            Self::DirectiveArity => "wrong number of directive arguments",
            Self::InvalidNegation => "directive cannot be negated",

            Self::UnknownNodeKind => "unknown node kind",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownDirective => "unknown directive `@{}`".to_string(),
            Self::InvalidNegation => "`@{}` cannot be negated".to_string(),
            Self::UnknownNodeKind => "`{}` is not a node kind of this language".to_string(),
            Self::UnclosedBracket | Self::UnclosedParen => {
                format!("{}; {{}}", self.fallback_message())
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.span.start,
            self.span.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        Ok(())
    }
}
