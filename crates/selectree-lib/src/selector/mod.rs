//! The selector language.
//!
//! ```text
//! chain     := stage ('.' stage)*
//! stage     := test '?'? (bracket | directive)* '?'?
//! test      := NAME | '*' | '(' NAME ('|' NAME)* ')'
//! bracket   := '[' ']' | '[' NUMBER ']' | '[' NUMBER? ':' NUMBER? (':' NUMBER?)? ']'
//! directive := '@' '!'? NAME ('(' arg (',' arg)* ')')?
//! ```

mod chain;
mod directive;
mod lexer;
mod parser;
mod slice;

#[cfg(test)]
mod lexer_tests;

pub use chain::{DirectiveGroup, NodeTest, SelectorChain, Stage, StageId};
pub use directive::Directive;
pub use lexer::{Token, TokenKind, lex, name_value, token_text, tokenize};
pub use parser::parse;
pub use slice::{Slice, SliceIndices};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Warn about node names the target grammar does not know.
///
/// `is_known` answers for concrete kinds and supertypes alike.
pub fn check_kinds(chain: &SelectorChain, is_known: impl Fn(&str) -> bool) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for id in chain.ids() {
        for name in chain.stage(id).test.names() {
            if !is_known(name) {
                diagnostics
                    .report(DiagnosticKind::UnknownNodeKind, chain.span(id))
                    .message(name.as_str())
                    .emit();
            }
        }
    }
    diagnostics
}
