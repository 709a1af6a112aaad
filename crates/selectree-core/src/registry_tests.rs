use std::fs;

use crate::{GrammarError, GrammarRegistry, NODE_TYPES_FILE, SubtypeMap};

const EXPR_JSON: &str =
    r#"[{"type": "expression", "named": true, "subtypes": [{"type": "call", "named": true}]}]"#;

#[test]
fn insert_and_get() {
    let mut registry = GrammarRegistry::new();
    assert!(registry.is_empty());

    registry.insert("python", SubtypeMap::from_node_types_json(EXPR_JSON).unwrap());
    assert!(registry.contains("python"));
    assert!(registry.get("python").unwrap().is_subtype("expression", "call"));
    assert!(registry.get("rust").is_none());
}

#[test]
fn insert_merges_existing_language() {
    let mut registry = GrammarRegistry::new();
    let mut first = SubtypeMap::new();
    first.extend("expression", ["call"]);
    let mut second = SubtypeMap::new();
    second.extend("expression", ["attribute"]);

    registry.insert("python", first);
    registry.insert("python", second);

    let map = registry.get("python").unwrap();
    assert_eq!(map.direct_subtypes("expression"), ["call", "attribute"]);
}

#[test]
fn load_dir_reads_each_language_directory() {
    let root = tempfile::tempdir().unwrap();
    for lang in ["python", "go"] {
        let dir = root.path().join(lang);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(NODE_TYPES_FILE), EXPR_JSON).unwrap();
    }
    fs::create_dir(root.path().join("empty")).unwrap();
    fs::write(root.path().join("stray.txt"), "").unwrap();

    let mut registry = GrammarRegistry::new();
    let loaded = registry.load_dir(root.path()).unwrap();

    assert_eq!(loaded, ["go", "python"]);
    assert_eq!(registry.languages().collect::<Vec<_>>(), ["go", "python"]);
}

#[test]
fn load_dir_reports_bad_json_with_path() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("broken");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join(NODE_TYPES_FILE), "{").unwrap();

    let err = GrammarRegistry::new().load_dir(root.path()).unwrap_err();
    assert!(matches!(err, GrammarError::Json { .. }));
    assert!(err.to_string().contains("broken"));
}

#[test]
fn load_dir_missing_root_is_io_error() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("nope");
    let err = GrammarRegistry::new().load_dir(&missing).unwrap_err();
    assert!(matches!(err, GrammarError::Io { .. }));
}
