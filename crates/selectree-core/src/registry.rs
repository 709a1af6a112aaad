use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::SubtypeMap;

/// File name looked up under each language directory by [`GrammarRegistry::load_dir`].
pub const NODE_TYPES_FILE: &str = "node-types.json";

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid node types in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Subtype hierarchies for every loaded language.
///
/// Loaded once per language, read-only afterwards. Passed explicitly to the matcher.
#[derive(Debug, Clone, Default)]
pub struct GrammarRegistry {
    languages: IndexMap<String, SubtypeMap>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `map` for `lang`. An already registered language gets the entries merged in.
    pub fn insert(&mut self, lang: impl Into<String>, map: SubtypeMap) {
        let lang = lang.into();
        match self.languages.get_mut(&lang) {
            Some(existing) => existing.merge(&map),
            None => {
                self.languages.insert(lang, map);
            }
        }
    }

    pub fn get(&self, lang: &str) -> Option<&SubtypeMap> {
        self.languages.get(lang)
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn load_file(&mut self, lang: &str, path: &Path) -> Result<(), GrammarError> {
        let json = fs::read_to_string(path).map_err(|source| GrammarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = SubtypeMap::from_node_types_json(&json).map_err(|source| GrammarError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        self.insert(lang, map);
        Ok(())
    }

    /// Loads `<root>/<lang>/node-types.json` for every subdirectory of `root` that has one.
    ///
    /// Returns the languages loaded, in directory-name order.
    pub fn load_dir(&mut self, root: &Path) -> Result<Vec<String>, GrammarError> {
        let io_err = |source| GrammarError::Io {
            path: root.to_path_buf(),
            source,
        };

        let mut dirs = Vec::new();
        for entry in fs::read_dir(root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            if !path.join(NODE_TYPES_FILE).is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                dirs.push((name.to_owned(), path));
            }
        }
        dirs.sort();

        let mut loaded = Vec::with_capacity(dirs.len());
        for (lang, dir) in dirs {
            self.load_file(&lang, &dir.join(NODE_TYPES_FILE))?;
            loaded.push(lang);
        }
        Ok(loaded)
    }
}
