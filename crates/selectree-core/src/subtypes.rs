use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{RawNode, parse_node_types};

/// Supertype → direct named subtypes, for one language.
///
/// Tree-sitter supertypes (`expression`, `statement`, ...) never appear as node kinds
/// in a parsed tree, so a selector naming one must match any of its concrete subtypes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtypeMap {
    direct: IndexMap<String, Vec<String>>,
}

impl SubtypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw_nodes(nodes: &[RawNode]) -> Self {
        let mut map = Self::new();
        for node in nodes {
            let Some(subtypes) = &node.subtypes else {
                continue;
            };
            let named = subtypes
                .iter()
                .filter(|s| s.named)
                .map(|s| s.type_name.clone());
            map.extend(&node.type_name, named);
        }
        map
    }

    pub fn from_node_types_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_raw_nodes(&parse_node_types(json)?))
    }

    /// Record `subtypes` as direct subtypes of `supertype`, skipping duplicates.
    pub fn extend<I, S>(&mut self, supertype: &str, subtypes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.direct.entry(supertype.to_owned()).or_default();
        for subtype in subtypes {
            let subtype = subtype.into();
            if !entry.contains(&subtype) {
                entry.push(subtype);
            }
        }
    }

    /// Merge another map into this one. Entries from `other` are appended.
    pub fn merge(&mut self, other: &SubtypeMap) {
        for (supertype, subtypes) in &other.direct {
            self.extend(supertype, subtypes.iter().cloned());
        }
    }

    pub fn direct_subtypes(&self, supertype: &str) -> &[String] {
        self.direct.get(supertype).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_supertype(&self, name: &str) -> bool {
        self.direct.contains_key(name)
    }

    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.direct.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty()
    }

    /// `name` itself, then every transitive subtype in depth-first order, each once.
    pub fn subtypes<'m>(&'m self, name: &'m str) -> Subtypes<'m> {
        Subtypes {
            map: self,
            stack: vec![name],
            seen: HashSet::new(),
        }
    }

    /// Whether `kind` is `supertype` or one of its transitive subtypes.
    pub fn is_subtype(&self, supertype: &str, kind: &str) -> bool {
        if supertype == kind {
            return true;
        }
        if !self.is_supertype(supertype) {
            return false;
        }
        self.subtypes(supertype).any(|s| s == kind)
    }
}

/// Depth-first walk over a supertype hierarchy. See [`SubtypeMap::subtypes`].
pub struct Subtypes<'m> {
    map: &'m SubtypeMap,
    stack: Vec<&'m str>,
    seen: HashSet<&'m str>,
}

impl<'m> Iterator for Subtypes<'m> {
    type Item = &'m str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(name) = self.stack.pop() {
            if !self.seen.insert(name) {
                continue;
            }
            // Reversed so the first declared subtype is visited first.
            for subtype in self.map.direct_subtypes(name).iter().rev() {
                if !self.seen.contains(subtype.as_str()) {
                    self.stack.push(subtype);
                }
            }
            return Some(name);
        }
        None
    }
}
