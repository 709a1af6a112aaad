#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammar metadata for selectree.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the parts of `node-types.json` we read
//! - **Lookup layer**: [`SubtypeMap`] per language, collected in a [`GrammarRegistry`]

mod registry;
mod subtypes;

#[cfg(test)]
mod registry_tests;

pub use registry::{GrammarError, GrammarRegistry, NODE_TYPES_FILE};
pub use subtypes::{SubtypeMap, Subtypes};

/// Raw node definition from `node-types.json`.
///
/// Only the supertype-relevant keys are mapped; `fields` and `children` are ignored.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
    pub subtypes: Option<Vec<RawTypeRef>>,
}

/// Reference to a node type.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawTypeRef {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
}

/// Parse `node-types.json` content into raw nodes.
pub fn parse_node_types(json: &str) -> Result<Vec<RawNode>, serde_json::Error> {
    serde_json::from_str(json)
}
