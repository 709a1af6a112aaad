use std::sync::{Arc, OnceLock};

use arborium_tree_sitter as tree_sitter;
use selectree_core::SubtypeMap;
use tree_sitter::Language;

pub mod builtin;

#[cfg(test)]
mod lib_tests;

pub use builtin::*;

/// User-facing language type.
pub type Lang = Arc<dyn LangImpl>;

#[derive(Debug, thiserror::Error)]
pub enum LangError {
    #[error("tree-sitter rejected the `{name}` grammar: {message}")]
    Incompatible { name: String, message: String },

    #[error("tree-sitter returned no tree for `{name}` source")]
    NoTree { name: String },
}

/// A tree-sitter grammar plus what selectors need to know about its node kinds.
pub trait LangImpl: Send + Sync {
    fn name(&self) -> &str;

    fn language(&self) -> &Language;

    /// Parse source code into a tree-sitter tree.
    fn parse(&self, source: &str) -> Result<tree_sitter::Tree, LangError>;

    /// Supertype hierarchy read from the grammar itself.
    fn subtypes(&self) -> &SubtypeMap;

    /// Named or anonymous node kind, or supertype, known to the grammar.
    fn has_node_kind(&self, kind: &str) -> bool;
}

#[derive(Debug)]
pub struct LangInner {
    name: String,
    ts_lang: Language,
    subtypes: OnceLock<SubtypeMap>,
}

impl LangInner {
    pub fn new(name: &str, ts_lang: Language) -> Self {
        Self {
            name: name.to_owned(),
            ts_lang,
            subtypes: OnceLock::new(),
        }
    }
}

/// Direct named subtypes of every supertype in `language`.
pub fn subtype_map(language: &Language) -> SubtypeMap {
    let mut map = SubtypeMap::new();
    let count = language.node_kind_count();
    for id in 0..count as u16 {
        if !language.node_kind_is_supertype(id) {
            continue;
        }
        let Some(supertype) = language.node_kind_for_id(id) else {
            continue;
        };
        let subtypes = language
            .subtypes_for_supertype(id)
            .iter()
            .filter(|&&sub| language.node_kind_is_named(sub))
            .filter_map(|&sub| language.node_kind_for_id(sub));
        map.extend(supertype, subtypes);
    }
    map
}

impl LangImpl for LangInner {
    fn name(&self) -> &str {
        &self.name
    }

    fn language(&self) -> &Language {
        &self.ts_lang
    }

    fn parse(&self, source: &str) -> Result<tree_sitter::Tree, LangError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.ts_lang)
            .map_err(|err| LangError::Incompatible {
                name: self.name.clone(),
                message: err.to_string(),
            })?;
        parser.parse(source, None).ok_or_else(|| LangError::NoTree {
            name: self.name.clone(),
        })
    }

    fn subtypes(&self) -> &SubtypeMap {
        self.subtypes.get_or_init(|| subtype_map(&self.ts_lang))
    }

    fn has_node_kind(&self, kind: &str) -> bool {
        self.ts_lang.id_for_node_kind(kind, true) != 0
            || self.ts_lang.id_for_node_kind(kind, false) != 0
    }
}
