//! Grammars compiled in, one `lang-*` feature each.

use std::sync::{Arc, LazyLock};

use crate::{Lang, LangInner};

/// How a compiled-in grammar is spelled on the command line and which files it claims.
struct Grammar {
    name: &'static str,
    aliases: &'static [&'static str],
    extensions: &'static [&'static str],
    load: fn() -> Lang,
}

macro_rules! grammars {
    ($(
        #[cfg(feature = $feature:literal)]
        $name:ident($language:expr) aka [$($alias:literal),*] for [$($ext:literal),*];
    )*) => {
        $(
            #[cfg(feature = $feature)]
            pub fn $name() -> Lang {
                static LANG: LazyLock<Lang> = LazyLock::new(|| {
                    Arc::new(LangInner::new(stringify!($name), $language.into()))
                });
                Arc::clone(&LANG)
            }
        )*

        static GRAMMARS: &[Grammar] = &[
            $(
                #[cfg(feature = $feature)]
                Grammar {
                    name: stringify!($name),
                    aliases: &[$($alias),*],
                    extensions: &[$($ext),*],
                    load: $name,
                },
            )*
        ];
    };
}

grammars! {
    #[cfg(feature = "lang-bash")]
    bash(arborium_bash::language()) aka ["sh", "shell"] for ["sh", "bash", "zsh"];
    #[cfg(feature = "lang-c")]
    c(arborium_c::language()) aka [] for ["c", "h"];
    #[cfg(feature = "lang-cpp")]
    cpp(arborium_cpp::language()) aka ["c++", "cxx", "cc"] for ["cpp", "cc", "cxx", "hpp", "hh", "hxx"];
    #[cfg(feature = "lang-go")]
    go(arborium_go::language()) aka ["golang"] for ["go"];
    #[cfg(feature = "lang-java")]
    java(arborium_java::language()) aka [] for ["java"];
    #[cfg(feature = "lang-javascript")]
    javascript(arborium_javascript::language()) aka ["js", "jsx"] for ["js", "mjs", "cjs", "jsx"];
    #[cfg(feature = "lang-json")]
    json(arborium_json::language()) aka [] for ["json"];
    #[cfg(feature = "lang-python")]
    python(arborium_python::language()) aka ["py"] for ["py", "pyi", "pyw"];
    #[cfg(feature = "lang-rust")]
    rust(arborium_rust::language()) aka ["rs"] for ["rs"];
    #[cfg(feature = "lang-typescript")]
    typescript(arborium_typescript::language()) aka ["ts"] for ["ts", "mts", "cts"];
    #[cfg(feature = "lang-tsx")]
    tsx(arborium_tsx::language()) aka [] for ["tsx"];
}

/// Grammar by name or alias, ignoring case.
pub fn from_name(name: &str) -> Option<Lang> {
    GRAMMARS
        .iter()
        .find(|g| {
            g.name.eq_ignore_ascii_case(name)
                || g.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
        .map(|g| (g.load)())
}

/// Grammar claiming files with extension `ext` (without the dot), ignoring case.
pub fn from_ext(ext: &str) -> Option<Lang> {
    GRAMMARS
        .iter()
        .find(|g| g.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .map(|g| (g.load)())
}

/// Every compiled-in grammar, in table order.
pub fn all() -> Vec<Lang> {
    GRAMMARS.iter().map(|g| (g.load)()).collect()
}
