use std::path::Path;

use selectree_core::{GrammarRegistry, SubtypeMap};
use selectree_langs::Lang;
use tracing::debug;

use super::CliError;

/// Language from the explicit flag, or inferred from the source file extension.
pub fn resolve_lang(
    explicit: Option<&str>,
    source_path: Option<&Path>,
    is_inline: bool,
) -> Result<Lang, CliError> {
    if let Some(name) = explicit {
        return resolve_lang_required(name);
    }

    if let Some(path) = source_path
        && path.as_os_str() != "-"
        && let Some(ext) = path.extension().and_then(|e| e.to_str())
    {
        return selectree_langs::from_ext(ext)
            .ok_or_else(|| CliError::UnknownExtension(ext.to_owned()));
    }

    Err(CliError::LangRequired(if is_inline {
        "when using inline source"
    } else {
        "(cannot infer from stdin)"
    }))
}

/// Language by name or alias, with a suggestion for near misses.
pub fn resolve_lang_required(name: &str) -> Result<Lang, CliError> {
    selectree_langs::from_name(name).ok_or_else(|| CliError::UnknownLang {
        name: name.to_owned(),
        suggestion: suggest_language(name),
    })
}

/// Supertypes of `lang`, extended by `<grammars>/<lang>/node-types.json` when present.
pub fn subtypes_for(lang: &Lang, grammars: Option<&Path>) -> Result<SubtypeMap, CliError> {
    let mut subtypes = lang.subtypes().clone();
    let Some(dir) = grammars else {
        return Ok(subtypes);
    };

    let mut registry = GrammarRegistry::new();
    let loaded = registry.load_dir(dir)?;
    debug!(dir = %dir.display(), ?loaded, "loaded grammar metadata");
    if let Some(extra) = registry.get(lang.name()) {
        subtypes.merge(extra);
    }
    Ok(subtypes)
}

/// Suggest similar language names for typos.
pub fn suggest_language(input: &str) -> Option<String> {
    let input = input.to_lowercase();
    selectree_langs::all()
        .into_iter()
        .map(|lang| (edit_distance(lang.name(), &input), lang))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, lang)| lang.name().to_owned())
}

/// Levenshtein distance over chars, two rows at a time.
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }
    row[b.len()]
}
