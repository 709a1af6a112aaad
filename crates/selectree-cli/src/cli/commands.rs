//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("selectree")
        .about("Select tree-sitter nodes around a cursor")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(select_command())
        .subcommand(check_command())
        .subcommand(tree_command())
        .subcommand(langs_command())
}

/// Run selectors against a source file from a cursor position.
pub fn select_command() -> Command {
    Command::new("select")
        .about("Find the nodes a selector names around a cursor")
        .override_usage(
            "\
  selectree select <SOURCE> -e <SELECTOR> --at <ROW:COL>
  selectree select -s <TEXT> -l <LANG> -e <SELECTOR> --at <ROW:COL>",
        )
        .after_help(
            r#"EXAMPLES:
  selectree select app.py -e function_definition --at 4:8
  selectree select app.py -e 'class_definition.block.function_definition' --at 4:8 -d forwards
  selectree select app.py -e '(for_statement|while_statement)' --at 9:12 --greedy
  selectree select app.py -e 'call.argument_list.*@isNamed[]' --at 2:10 --every
  selectree select - -l py -e block --at 3:0 --inside --action extend"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(grammars_arg())
        .arg(selector_arg())
        .arg(at_arg())
        .arg(anchor_arg())
        .arg(direction_arg())
        .arg(count_arg())
        .arg(greedy_arg())
        .arg(every_arg())
        .arg(inside_arg())
        .arg(action_arg())
        .arg(side_arg())
        .arg(compact_arg())
}

/// Validate selectors, optionally against a grammar.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate selectors")
        .override_usage(
            "\
  selectree check -e <SELECTOR>...
  selectree check -e <SELECTOR>... -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  selectree check -e 'function_definition[0]'     # syntax only
  selectree check -e 'funktion' -l python         # also check node kinds
  selectree check -e 'a.' -e 'b[::0]'             # several at once"#,
        )
        .arg(selector_arg())
        .arg(lang_arg())
        .arg(grammars_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Dump the parsed tree of a source file.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the syntax tree of a source file")
        .override_usage(
            "\
  selectree tree <SOURCE>
  selectree tree -s <TEXT> -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  selectree tree app.py                 # named nodes
  selectree tree app.py --raw --spans   # every node with positions
  selectree tree -s 'x = 1' -l py       # inline source"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(raw_arg())
        .arg(spans_arg())
}

/// List supported languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List supported languages")
}
