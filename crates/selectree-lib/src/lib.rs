//! Selectree: a selector language over tree-sitter CSTs, and the positional engine that
//! turns a cursor into the nodes a selector names.
//!
//! # Example
//!
//! ```
//! use selectree_lib::parse;
//!
//! let chain = parse("class_definition.block.function_definition[-1]").unwrap();
//! assert_eq!(chain.len(), 3);
//! assert_eq!(chain.to_string(), "class_definition.block.function_definition[-1]");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod matcher;
pub mod path;
pub mod search;
pub mod selector;
pub mod tree;

mod span;

#[cfg(test)]
pub(crate) mod test_utils;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use matcher::{FinalSlice, MatchContext, Matcher};
pub use search::{NodeSearch, SearchDirection, SearchOptions, SearchOutput, Selection};
pub use selector::{SelectorChain, parse};
pub use span::Span;
pub use tree::{Point, SourceNode, TextRange, TreeNode};

/// Errors from turning selector text into a chain.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("invalid selector: {} errors", .0.error_count())]
    InvalidSelector(Diagnostics),
}

impl Error {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Error::InvalidSelector(diagnostics) => diagnostics,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
