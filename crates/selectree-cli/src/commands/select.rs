use std::path::PathBuf;

use serde::Serialize;
use selectree_lib::search::{Action, SearchReport, Side, apply_action};
use selectree_lib::{
    Matcher, NodeSearch, Point, SearchOptions, Selection, SelectorChain, SourceNode, parse,
};
use tracing::{debug, warn};

use super::CliError;
use super::lang_resolver::{resolve_lang, subtypes_for};
use super::source::load_source;

pub struct SelectArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub grammars: Option<PathBuf>,
    pub selectors: Vec<String>,
    pub at: Point,
    pub anchor: Option<Point>,
    pub options: SearchOptions,
    pub action: Action,
    pub side: Option<Side>,
    pub compact: bool,
}

/// What `select` prints: the matched nodes, their ranges and the resulting selections.
#[derive(Debug, Serialize)]
pub struct SelectOutput {
    #[serde(flatten)]
    pub report: SearchReport,
    pub selections: Vec<Selection>,
}

impl SelectOutput {
    pub fn is_empty(&self) -> bool {
        self.report.matches.is_empty()
    }
}

pub fn run(args: SelectArgs) {
    let output = select(&args).unwrap_or_else(|err| super::fail(err));

    let json = if args.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("error: failed to serialize output: {err}");
            std::process::exit(1);
        }
    }

    if output.is_empty() {
        std::process::exit(1);
    }
}

pub fn select(args: &SelectArgs) -> Result<SelectOutput, CliError> {
    let source = load_source(args.source_path.as_deref(), args.source_text.as_deref())?;
    let lang = resolve_lang(
        args.lang.as_deref(),
        args.source_path.as_deref(),
        args.source_text.is_some(),
    )?;
    let subtypes = subtypes_for(&lang, args.grammars.as_deref())?;
    let chains = parse_selectors(&args.selectors)?;

    let tree = lang.parse(&source)?;
    let root = SourceNode::root(&tree, &source);
    if root.has_error() {
        warn!(lang = lang.name(), "source has syntax errors; matching the recovered tree");
    }

    let selection = Selection::new(args.anchor.unwrap_or(args.at), args.at);
    let output = NodeSearch::new(Matcher::with_subtypes(&subtypes), &chains)
        .options(args.options)
        .find(root, selection);
    debug!(matches = output.matches.len(), "search finished");

    let selections = apply_action(args.action, args.side, selection, &output.ranges);
    Ok(SelectOutput {
        report: output.report(),
        selections,
    })
}

fn parse_selectors(selectors: &[String]) -> Result<Vec<SelectorChain>, CliError> {
    selectors
        .iter()
        .map(|selector| {
            parse(selector).map_err(|err| CliError::Selector {
                selector: selector.clone(),
                rendered: err.diagnostics().render(selector),
            })
        })
        .collect()
}
