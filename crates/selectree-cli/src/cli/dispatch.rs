//! Dispatch logic: extract params from `ArgMatches` and convert to command args.
//!
//! `*Params` mirror the command `*Args` but keep clap-level types (`ColorChoice`, raw
//! strings for enumerations); the `From` impls resolve them.

use std::path::PathBuf;

use clap::ArgMatches;
use selectree_lib::search::{Action, Side};
use selectree_lib::{Point, SearchDirection, SearchOptions};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::select::SelectArgs;
use crate::commands::tree::TreeArgs;

pub struct SelectParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub grammars: Option<PathBuf>,
    pub selectors: Vec<String>,
    pub at: Point,
    pub anchor: Option<Point>,
    pub direction: SearchDirection,
    pub count: usize,
    pub greedy: bool,
    pub every: bool,
    pub inside: bool,
    pub action: Action,
    pub side: Option<Side>,
    pub compact: bool,
}

impl SelectParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            grammars: m.get_one::<PathBuf>("grammars").cloned(),
            selectors: strings(m, "selectors"),
            at: m.get_one::<Point>("at").copied().unwrap_or_default(),
            anchor: m.get_one::<Point>("anchor").copied(),
            direction: parse_direction(m),
            count: m.get_one::<usize>("count").copied().unwrap_or(1),
            greedy: m.get_flag("greedy"),
            every: m.get_flag("every"),
            inside: m.get_flag("inside"),
            action: parse_action(m),
            side: parse_side(m),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<SelectParams> for SelectArgs {
    fn from(p: SelectParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            grammars: p.grammars,
            selectors: p.selectors,
            at: p.at,
            anchor: p.anchor,
            options: SearchOptions::default()
                .direction(p.direction)
                .count(p.count)
                .greedy(p.greedy)
                .every(p.every)
                .inside(p.inside),
            action: p.action,
            side: p.side,
            compact: p.compact,
        }
    }
}

pub struct CheckParams {
    pub selectors: Vec<String>,
    pub lang: Option<String>,
    pub grammars: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selectors: strings(m, "selectors"),
            lang: m.get_one::<String>("lang").cloned(),
            grammars: m.get_one::<PathBuf>("grammars").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            selectors: p.selectors,
            lang: p.lang,
            grammars: p.grammars,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TreeParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub raw: bool,
    pub spans: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            raw: p.raw,
            spans: p.spans,
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

fn strings(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_direction(m: &ArgMatches) -> SearchDirection {
    m.get_one::<String>("direction")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn parse_action(m: &ArgMatches) -> Action {
    match m.get_one::<String>("action").map(|s| s.as_str()) {
        Some("move") => Action::Move,
        Some("extend") => Action::Extend,
        _ => Action::Select,
    }
}

fn parse_side(m: &ArgMatches) -> Option<Side> {
    match m.get_one::<String>("side").map(|s| s.as_str()) {
        Some("start") => Some(Side::Start),
        Some("end") => Some(Side::End),
        _ => None,
    }
}
