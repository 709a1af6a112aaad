use std::fmt::Write;
use std::path::PathBuf;

use selectree_lib::{SourceNode, TreeNode};

use super::CliError;
use super::lang_resolver::resolve_lang;
use super::source::load_source;

pub struct TreeArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: TreeArgs) {
    let dump = tree(&args).unwrap_or_else(|err| super::fail(err));
    print!("{dump}");
}

pub fn tree(args: &TreeArgs) -> Result<String, CliError> {
    let source = load_source(args.source_path.as_deref(), args.source_text.as_deref())?;
    let lang = resolve_lang(
        args.lang.as_deref(),
        args.source_path.as_deref(),
        args.source_text.is_some(),
    )?;
    let tree = lang.parse(&source)?;

    let mut out = String::new();
    TreeDump {
        raw: args.raw,
        spans: args.spans,
    }
    .node(&mut out, SourceNode::root(&tree, &source), None, 0);
    out.push('\n');
    Ok(out)
}

/// S-expression dump: `(kind children...)`, leaves with their text, fields as `name: `.
struct TreeDump {
    raw: bool,
    spans: bool,
}

impl TreeDump {
    fn visible(&self, node: &SourceNode<'_>) -> bool {
        self.raw || node.is_named()
    }

    fn node(&self, out: &mut String, node: SourceNode<'_>, field: Option<&str>, depth: usize) {
        let indent = "  ".repeat(depth);
        let field = field.map(|f| format!("{f}: ")).unwrap_or_default();
        let spans = if self.spans {
            format!(" [{}]", node.range())
        } else {
            String::new()
        };

        let children: Vec<(SourceNode<'_>, Option<&'static str>)> = (0..node.child_count())
            .filter_map(|i| {
                let child = node.child(i)?;
                let name = node.inner().field_name_for_child(i as u32);
                Some((child, name))
            })
            .filter(|(child, _)| self.visible(child))
            .collect();

        if children.is_empty() {
            let text = escape(node.text());
            let _ = if text == node.kind() {
                write!(out, "{indent}{field}(\"{text}\"){spans}")
            } else {
                write!(out, "{indent}{field}({} \"{text}\"){spans}", node.kind())
            };
            return;
        }

        let _ = write!(out, "{indent}{field}({}{spans}", node.kind());
        for (child, name) in children {
            out.push('\n');
            self.node(out, child, name, depth + 1);
        }
        out.push(')');
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
