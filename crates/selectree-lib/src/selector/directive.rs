use std::fmt;

use crate::tree::TreeNode;

/// Per-stage filter, applied after the node test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `@name(text)`: node text equals `text`.
    NameEquals(String),
    /// `@isNamed`: syntactic node, not punctuation.
    IsNamed,
    /// `@mark`: report the nodes surviving at this point instead of the leaf matches.
    Mark,
    /// `@optional`: always passes.
    IsOptionalMarker,
    /// `@!...`: negation of a per-node directive.
    Not(Box<Directive>),
}

impl Directive {
    /// Directive name as written after `@`.
    pub fn name(&self) -> &'static str {
        match self {
            Directive::NameEquals(_) => "name",
            Directive::IsNamed => "isNamed",
            Directive::Mark => "mark",
            Directive::IsOptionalMarker => "optional",
            Directive::Not(inner) => inner.name(),
        }
    }

    /// Whether this directive only inspects one node at a time.
    pub fn is_per_node(&self) -> bool {
        !matches!(self, Directive::Mark)
    }

    pub fn can_negate(&self) -> bool {
        matches!(self, Directive::NameEquals(_) | Directive::IsNamed)
    }

    pub fn accepts<N: TreeNode>(&self, node: &N) -> bool {
        match self {
            Directive::NameEquals(text) => node.text() == text.as_str(),
            Directive::IsNamed => node.is_named(),
            Directive::Mark | Directive::IsOptionalMarker => true,
            Directive::Not(inner) => !inner.accepts(node),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::NameEquals(text) => {
                f.write_str("@name(")?;
                write_name(f, text)?;
                f.write_str(")")
            }
            Directive::Not(inner) => {
                let rendered = inner.to_string();
                write!(f, "@!{}", rendered.trim_start_matches('@'))
            }
            other => write!(f, "@{}", other.name()),
        }
    }
}

/// A bare identifier prints as is, anything else gets quoted and escaped.
pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let bare = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        return f.write_str(name);
    }

    f.write_str("\"")?;
    for c in name.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
