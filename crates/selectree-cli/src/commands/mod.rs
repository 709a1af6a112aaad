pub mod check;
pub mod lang_resolver;
pub mod langs;
pub mod select;
pub mod source;
pub mod tree;


use std::io;
use std::path::PathBuf;

use selectree_core::GrammarError;
use selectree_langs::LangError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("source required (positional or --source)")]
    MissingSource,

    #[error("unknown language: '{name}'")]
    UnknownLang {
        name: String,
        suggestion: Option<String>,
    },

    #[error("cannot infer language from extension '.{0}', use -l/--lang")]
    UnknownExtension(String),

    #[error("-l/--lang is required {0}")]
    LangRequired(&'static str),

    #[error("invalid selector `{selector}`")]
    Selector {
        selector: String,
        rendered: String,
    },

    #[error(transparent)]
    Lang(#[from] LangError),

    #[error("{0}")]
    Grammar(#[from] GrammarError),
}

/// Print `err` the way every command reports failures, then exit with status 1.
pub fn fail(err: CliError) -> ! {
    eprintln!("error: {err}");
    if let CliError::Grammar(grammar) = &err
        && let Some(cause) = std::error::Error::source(grammar)
    {
        eprintln!("  caused by: {cause}");
    }
    match &err {
        CliError::UnknownLang { suggestion, .. } => {
            if let Some(suggestion) = suggestion {
                eprintln!();
                eprintln!("Did you mean '{suggestion}'?");
            }
            eprintln!();
            eprintln!("Run 'selectree langs' for the full list.");
        }
        CliError::Selector { rendered, .. } => eprint!("{rendered}"),
        _ => {}
    }
    std::process::exit(1);
}
