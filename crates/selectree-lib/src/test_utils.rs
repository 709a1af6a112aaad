//! In-memory trees for engine tests.
//!
//! ```ignore
//! let tree = TestTree::build("def f(): pass", |b| {
//!     b.node("function_definition", |b| {
//!         b.token("def");
//!         b.leaf("identifier", "f");
//!     });
//! });
//! ```
//!
//! Leaves locate their text left to right in the source; interior nodes span their children.
//! The root spans the whole source.

use std::ops::Range;
use std::rc::Rc;

use crate::tree::{Point, TreeNode, walk};

#[derive(Debug)]
struct NodeData {
    kind: String,
    named: bool,
    bytes: Range<usize>,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct TreeData {
    source: String,
    nodes: Vec<NodeData>,
    root: usize,
}

impl TreeData {
    fn point(&self, offset: usize) -> Point {
        let before = &self.source[..offset];
        let row = before.matches('\n').count();
        let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1);
        Point::new(row, column)
    }
}

#[derive(Debug, Clone)]
pub struct TestTree {
    data: Rc<TreeData>,
}

impl TestTree {
    pub fn build(source: &str, build: impl FnOnce(&mut TreeBuilder<'_>)) -> Self {
        let mut builder = TreeBuilder {
            source,
            cursor: 0,
            nodes: Vec::new(),
            open: Vec::new(),
            roots: Vec::new(),
        };
        build(&mut builder);
        assert_eq!(builder.roots.len(), 1, "a test tree needs exactly one root");
        let root = builder.roots[0];
        builder.nodes[root].bytes = 0..source.len();

        Self {
            data: Rc::new(TreeData {
                source: source.to_owned(),
                nodes: builder.nodes,
                root,
            }),
        }
    }

    pub fn root(&self) -> TestNode {
        self.node(self.data.root)
    }

    fn node(&self, index: usize) -> TestNode {
        TestNode {
            tree: Rc::clone(&self.data),
            index,
        }
    }

    /// The `nth` node of `kind` in preorder.
    pub fn find(&self, kind: &str, nth: usize) -> TestNode {
        walk(self.root())
            .filter(|n| n.kind() == kind)
            .nth(nth)
            .unwrap_or_else(|| panic!("no {kind} #{nth} in test tree"))
    }

    /// The first node of `kind` whose text is `text`.
    pub fn find_text(&self, kind: &str, text: &str) -> TestNode {
        walk(self.root())
            .find(|n| n.kind() == kind && n.text() == text)
            .unwrap_or_else(|| panic!("no {kind} {text:?} in test tree"))
    }

    /// Point `offset` bytes into the first occurrence of `needle`.
    pub fn point_in(&self, needle: &str, offset: usize) -> Point {
        let at = self
            .data
            .source
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not in source"));
        self.data.point(at + offset)
    }
}

pub struct TreeBuilder<'s> {
    source: &'s str,
    cursor: usize,
    nodes: Vec<NodeData>,
    open: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl TreeBuilder<'_> {
    /// Named interior node.
    pub fn node(&mut self, kind: &str, build: impl FnOnce(&mut Self)) -> &mut Self {
        let index = self.push(kind, true, 0..0);
        self.open.push(Vec::new());
        build(self);
        let children = self.open.pop().expect("builder stack underflow");
        assert!(!children.is_empty(), "interior node `{kind}` needs children");

        let start = self.nodes[children[0]].bytes.start;
        let end = self.nodes[children[children.len() - 1]].bytes.end;
        for &child in &children {
            self.nodes[child].parent = Some(index);
        }
        self.nodes[index].bytes = start..end;
        self.nodes[index].children = children;
        self.attach(index);
        self
    }

    /// Named leaf covering the next occurrence of `text`.
    pub fn leaf(&mut self, kind: &str, text: &str) -> &mut Self {
        let bytes = self.claim(text);
        let index = self.push(kind, true, bytes);
        self.attach(index);
        self
    }

    /// Anonymous leaf whose kind is its own text, like punctuation and keywords.
    pub fn token(&mut self, text: &str) -> &mut Self {
        let bytes = self.claim(text);
        let index = self.push(text, false, bytes);
        self.attach(index);
        self
    }

    fn claim(&mut self, text: &str) -> Range<usize> {
        let offset = self.source[self.cursor..]
            .find(text)
            .unwrap_or_else(|| panic!("{text:?} not found after byte {}", self.cursor));
        let start = self.cursor + offset;
        self.cursor = start + text.len();
        start..self.cursor
    }

    fn push(&mut self, kind: &str, named: bool, bytes: Range<usize>) -> usize {
        self.nodes.push(NodeData {
            kind: kind.to_owned(),
            named,
            bytes,
            parent: None,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn attach(&mut self, index: usize) {
        match self.open.last_mut() {
            Some(siblings) => siblings.push(index),
            None => self.roots.push(index),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestNode {
    tree: Rc<TreeData>,
    index: usize,
}

impl TestNode {
    fn data(&self) -> &NodeData {
        &self.tree.nodes[self.index]
    }

    fn at(&self, index: usize) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            index,
        }
    }

    /// `kind "text"` for assertions.
    pub fn label(&self) -> String {
        format!("{} {:?}", self.kind(), self.text())
    }
}

impl PartialEq for TestNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}

impl TreeNode for TestNode {
    type Id = usize;

    fn id(&self) -> usize {
        self.index
    }

    fn kind(&self) -> &str {
        &self.data().kind
    }

    fn text(&self) -> &str {
        &self.tree.source[self.data().bytes.clone()]
    }

    fn is_named(&self) -> bool {
        self.data().named
    }

    fn start_point(&self) -> Point {
        self.tree.point(self.data().bytes.start)
    }

    fn end_point(&self) -> Point {
        self.tree.point(self.data().bytes.end)
    }

    fn byte_range(&self) -> Range<usize> {
        self.data().bytes.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|p| self.at(p))
    }

    fn child_count(&self) -> usize {
        self.data().children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.data().children.get(index).map(|&c| self.at(c))
    }
}

/// Labels of a node list, for compact assertions.
pub fn labels<N: TreeNode>(nodes: &[N]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| format!("{} {:?}", n.kind(), n.text()))
        .collect()
}

/// `def <name>(): pass`
pub fn method(b: &mut TreeBuilder<'_>, name: &str) {
    b.node("function_definition", |b| {
        b.token("def");
        b.leaf("identifier", name);
        b.node("parameters", |b| {
            b.token("(");
            b.token(")");
        });
        b.token(":");
        b.node("block", |b| {
            b.node("pass_statement", |b| {
                b.token("pass");
            });
        });
    });
}

/// A class with methods `f`, `g` and `h` directly under the class node.
pub fn class_with_methods() -> TestTree {
    let source = indoc::indoc! {"
        class A:
            def f(): pass
            def g(): pass
            def h(): pass
    "};
    TestTree::build(source, |b| {
        b.node("module", |b| {
            b.node("class_definition", |b| {
                b.token("class");
                b.leaf("identifier", "A");
                b.token(":");
                for name in ["f", "g", "h"] {
                    method(b, name);
                }
            });
        });
    })
}

/// A decorated `f` followed by a bare `g`.
pub fn decorated() -> TestTree {
    let source = indoc::indoc! {"
        @cache
        def f(): pass

        def g(): pass
    "};
    TestTree::build(source, |b| {
        b.node("module", |b| {
            b.node("decorated_definition", |b| {
                b.node("decorator", |b| {
                    b.token("@");
                    b.leaf("identifier", "cache");
                });
                method(b, "f");
            });
            method(b, "g");
        });
    })
}

/// `break` inside a `while` inside a `for`.
pub fn nested_loops() -> TestTree {
    let source = indoc::indoc! {"
        for a in b:
            while c:
                break
    "};
    TestTree::build(source, |b| {
        b.node("module", |b| {
            b.node("for_statement", |b| {
                b.token("for");
                b.leaf("identifier", "a");
                b.token("in");
                b.leaf("identifier", "b");
                b.token(":");
                b.node("block", |b| {
                    b.node("while_statement", |b| {
                        b.token("while");
                        b.leaf("identifier", "c");
                        b.token(":");
                        b.node("block", |b| {
                            b.node("break_statement", |b| {
                                b.token("break");
                            });
                        });
                    });
                });
            });
        });
    })
}
