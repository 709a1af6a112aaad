use std::ops::Range;

use arborium_tree_sitter as tree_sitter;

use super::{Point, TreeNode};

/// A tree-sitter node paired with the source it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct SourceNode<'t> {
    node: tree_sitter::Node<'t>,
    source: &'t str,
}

impl<'t> SourceNode<'t> {
    pub fn new(node: tree_sitter::Node<'t>, source: &'t str) -> Self {
        Self { node, source }
    }

    pub fn root(tree: &'t tree_sitter::Tree, source: &'t str) -> Self {
        Self::new(tree.root_node(), source)
    }

    pub fn inner(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    pub fn has_error(&self) -> bool {
        self.node.has_error()
    }
}

fn point(p: tree_sitter::Point) -> Point {
    Point::new(p.row, p.column)
}

impl<'t> TreeNode for SourceNode<'t> {
    type Id = usize;

    fn id(&self) -> usize {
        self.node.id()
    }

    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn text(&self) -> &str {
        self.source.get(self.node.byte_range()).unwrap_or("")
    }

    fn is_named(&self) -> bool {
        self.node.is_named()
    }

    fn start_point(&self) -> Point {
        point(self.node.start_position())
    }

    fn end_point(&self) -> Point {
        point(self.node.end_position())
    }

    fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    fn parent(&self) -> Option<Self> {
        self.node.parent().map(|n| Self::new(n, self.source))
    }

    fn child_count(&self) -> usize {
        self.node.child_count()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.node.child(index as _).map(|n| Self::new(n, self.source))
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|n| Self::new(n, self.source))
            .collect()
    }
}
