//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose as they need.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use selectree_lib::Point;

/// Source file to parse (positional, `-` for stdin).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Source file to parse (use \"-\" for stdin)")
}

/// Inline source text (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .conflicts_with("source_path")
        .help("Inline source text")
}

/// Language flag (-l/--lang).
pub fn lang_arg() -> Arg {
    Arg::new("lang")
        .short('l')
        .long("lang")
        .value_name("LANG")
        .help("Language (inferred from extension if not specified)")
}

/// External grammar metadata (--grammars).
pub fn grammars_arg() -> Arg {
    Arg::new("grammars")
        .long("grammars")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory of <lang>/node-types.json files extending the built-in supertypes")
}

/// Selectors (-e/--selector), repeatable.
pub fn selector_arg() -> Arg {
    Arg::new("selectors")
        .short('e')
        .long("selector")
        .value_name("SELECTOR")
        .action(ArgAction::Append)
        .required(true)
        .help("Selector to match; repeat to try several in order")
}

/// Cursor position (--at).
pub fn at_arg() -> Arg {
    Arg::new("at")
        .long("at")
        .value_name("ROW:COL")
        .value_parser(parse_point)
        .required(true)
        .help("Cursor position, zero-based")
}

/// Selection anchor (--anchor).
pub fn anchor_arg() -> Arg {
    Arg::new("anchor")
        .long("anchor")
        .value_name("ROW:COL")
        .value_parser(parse_point)
        .help("Other end of the current selection (defaults to the cursor)")
}

/// Search direction (-d/--direction).
pub fn direction_arg() -> Arg {
    Arg::new("direction")
        .short('d')
        .long("direction")
        .value_name("DIR")
        .default_value("smart")
        .value_parser(["smart", "backwards", "forwards"])
        .help("Where to look: enclosing then closest, or strictly one way")
}

/// Which match to report (-n/--count).
pub fn count_arg() -> Arg {
    Arg::new("count")
        .short('n')
        .long("count")
        .value_name("N")
        .default_value("1")
        .value_parser(value_parser!(usize))
        .help("Report the N-th match")
}

/// Report the outermost enclosing match (--greedy).
pub fn greedy_arg() -> Arg {
    Arg::new("greedy")
        .long("greedy")
        .action(ArgAction::SetTrue)
        .help("Report the outermost enclosing match")
}

/// One range per node (--every).
pub fn every_arg() -> Arg {
    Arg::new("every")
        .long("every")
        .action(ArgAction::SetTrue)
        .help("One range per matched node instead of one over all")
}

/// Shrink to the inside of delimiters (--inside).
pub fn inside_arg() -> Arg {
    Arg::new("inside")
        .long("inside")
        .action(ArgAction::SetTrue)
        .help("Shrink ranges to the inside of the first and last child")
}

/// Selection action (--action).
pub fn action_arg() -> Arg {
    Arg::new("action")
        .long("action")
        .value_name("ACTION")
        .default_value("select")
        .value_parser(["select", "move", "extend"])
        .help("How the new selections relate to the current one")
}

/// Side of the target (--side).
pub fn side_arg() -> Arg {
    Arg::new("side")
        .long("side")
        .value_name("SIDE")
        .value_parser(["start", "end"])
        .help("Collapse onto this side of each target")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Include anonymous nodes (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include anonymous nodes (literals, punctuation)")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log search decisions to stderr (-v debug, -vv trace)")
}

/// `ROW:COL`, both zero-based.
pub fn parse_point(text: &str) -> Result<Point, String> {
    let (row, column) = text
        .split_once(':')
        .ok_or_else(|| format!("expected ROW:COL, got `{text}`"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row `{row}`"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|_| format!("invalid column `{column}`"))?;
    Ok(Point::new(row, column))
}
