use super::*;

#[test]
#[cfg(feature = "lang-python")]
fn lang_from_name() {
    assert_eq!(from_name("py").unwrap().name(), "python");
    assert_eq!(from_name("Python").unwrap().name(), "python");
    assert!(from_name("unknown").is_none());
}

#[test]
#[cfg(feature = "lang-python")]
fn lang_from_extension() {
    assert_eq!(from_ext("py").unwrap().name(), "python");
    assert_eq!(from_ext("PYI").unwrap().name(), "python");
    assert!(from_ext("nope").is_none());
}

#[test]
#[cfg(all(feature = "lang-typescript", feature = "lang-tsx"))]
fn typescript_and_tsx() {
    assert_eq!(typescript().name(), "typescript");
    assert_eq!(tsx().name(), "tsx");
    assert_eq!(from_ext("ts").unwrap().name(), "typescript");
    assert_eq!(from_ext("tsx").unwrap().name(), "tsx");
}

#[test]
#[cfg(all(feature = "lang-cpp", feature = "lang-bash"))]
fn aliases_resolve_to_the_canonical_name() {
    assert_eq!(from_name("C++").unwrap().name(), "cpp");
    assert_eq!(from_name("SH").unwrap().name(), "bash");
    assert_eq!(from_ext("hh").unwrap().name(), "cpp");
    assert!(from_name("cc").is_some_and(|l| Arc::ptr_eq(&l, &cpp())));
}

#[test]
fn all_returns_enabled_langs() {
    let langs = all();
    for lang in &langs {
        assert!(!lang.name().is_empty());
        assert!(from_name(lang.name()).is_some(), "{}", lang.name());
    }
    let mut names: Vec<&str> = langs.iter().map(|l| l.name()).collect();
    names.dedup();
    assert_eq!(names.len(), langs.len());
}

#[test]
#[cfg(feature = "lang-python")]
fn parses_source() {
    let tree = python().parse("def f():\n    pass\n").unwrap();
    let root = tree.root_node();

    assert_eq!(root.kind(), "module");
    assert!(!root.has_error());
    assert_eq!(root.child(0).unwrap().kind(), "function_definition");
}

#[test]
#[cfg(feature = "lang-python")]
fn knows_node_kinds() {
    let lang = python();

    assert!(lang.has_node_kind("function_definition"));
    assert!(lang.has_node_kind("def"));
    assert!(!lang.has_node_kind("function_item"));
}

#[test]
#[cfg(feature = "lang-python")]
fn subtypes_come_from_the_grammar() {
    let lang = python();
    let subtypes = lang.subtypes();

    assert!(subtypes.is_supertype("_compound_statement"));
    assert!(subtypes.is_subtype("_compound_statement", "for_statement"));
    assert!(subtypes.is_subtype("expression", "identifier"));
    assert!(!subtypes.is_subtype("_compound_statement", "identifier"));
}

#[test]
#[cfg(feature = "lang-rust")]
fn rust_lang_works() {
    let lang = rust();
    assert!(lang.has_node_kind("function_item"));
}
