use std::path::PathBuf;

use selectree_lib::selector::check_kinds;
use selectree_lib::{Diagnostics, parse};

use super::CliError;
use super::lang_resolver::{resolve_lang_required, subtypes_for};

pub struct CheckArgs {
    pub selectors: Vec<String>,
    pub lang: Option<String>,
    pub grammars: Option<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

/// Outcome of checking every selector.
pub struct CheckReport {
    /// Canonical text of each selector that parsed, in input order.
    pub canonical: Vec<String>,
    /// Rendered diagnostics of all selectors, errors and warnings alike.
    pub rendered: String,
    pub errors: usize,
    pub warnings: usize,
}

impl CheckReport {
    pub fn is_valid(&self, strict: bool) -> bool {
        self.errors == 0 && !(strict && self.warnings > 0)
    }
}

pub fn run(args: CheckArgs) {
    let report = check(&args).unwrap_or_else(|err| super::fail(err));

    for canonical in &report.canonical {
        println!("{canonical}");
    }
    eprint!("{}", report.rendered);

    if !report.is_valid(args.strict) {
        std::process::exit(1);
    }
}

pub fn check(args: &CheckArgs) -> Result<CheckReport, CliError> {
    let lang = args
        .lang
        .as_deref()
        .map(resolve_lang_required)
        .transpose()?;
    let subtypes = match &lang {
        Some(lang) => Some(subtypes_for(lang, args.grammars.as_deref())?),
        None => None,
    };

    let mut report = CheckReport {
        canonical: Vec::new(),
        rendered: String::new(),
        errors: 0,
        warnings: 0,
    };

    for selector in &args.selectors {
        let diagnostics = match parse(selector) {
            Ok(chain) => {
                report.canonical.push(chain.to_string());
                match (&lang, &subtypes) {
                    (Some(lang), Some(subtypes)) => check_kinds(&chain, |name| {
                        lang.has_node_kind(name) || subtypes.is_supertype(name)
                    }),
                    _ => Diagnostics::new(),
                }
            }
            Err(err) => err.diagnostics().clone(),
        };

        report.errors += diagnostics.error_count();
        report.warnings += diagnostics.warning_count();
        if !diagnostics.is_empty() {
            report
                .rendered
                .push_str(&diagnostics.printer(selector).colored(args.color).render());
        }
    }

    Ok(report)
}
