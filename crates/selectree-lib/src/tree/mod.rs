//! Read-only view of a concrete syntax tree.
//!
//! The engine only ever reads nodes through [`TreeNode`]; [`SourceNode`] adapts tree-sitter.

mod ts;

#[cfg(test)]
mod mod_tests;

use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use serde::{Deserialize, Serialize};

pub use ts::SourceNode;

/// Zero-based row and column, ordered by row then column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// `(line delta, column delta)`; smaller is closer.
    pub fn distance(self, other: Point) -> (usize, usize) {
        (
            self.row.abs_diff(other.row),
            self.column.abs_diff(other.column),
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Half-open `[start, end)` range of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Point,
    pub end: Point,
}

impl TextRange {
    pub fn new(start: Point, end: Point) -> Self {
        debug_assert!(start <= end, "range start after end");
        Self { start, end }
    }

    pub fn empty(at: Point) -> Self {
        Self::new(at, at)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, point: Point) -> bool {
        self.start <= point && point < self.end
    }

    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A node of an immutable CST, borrowed for the duration of one query.
pub trait TreeNode: Clone {
    type Id: Copy + Eq + Hash + fmt::Debug;

    fn id(&self) -> Self::Id;
    fn kind(&self) -> &str;
    fn text(&self) -> &str;
    fn is_named(&self) -> bool;
    fn start_point(&self) -> Point;
    fn end_point(&self) -> Point;
    fn byte_range(&self) -> Range<usize>;
    fn parent(&self) -> Option<Self>;
    fn child_count(&self) -> usize;
    fn child(&self, index: usize) -> Option<Self>;

    fn children(&self) -> Vec<Self> {
        (0..self.child_count()).filter_map(|i| self.child(i)).collect()
    }

    fn range(&self) -> TextRange {
        TextRange::new(self.start_point(), self.end_point())
    }

    fn same_node(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Position among the parent's children, `None` for the root.
    fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let id = self.id();
        (0..parent.child_count()).find(|&i| parent.child(i).is_some_and(|c| c.id() == id))
    }

    /// The parent's children, or just this node for the root.
    fn siblings(&self) -> Vec<Self> {
        match self.parent() {
            Some(parent) => parent.children(),
            None => vec![self.clone()],
        }
    }
}

/// Preorder traversal of `root` and all its descendants.
pub fn walk<N: TreeNode>(root: N) -> Walk<N> {
    Walk { stack: vec![root] }
}

pub struct Walk<N> {
    stack: Vec<N>,
}

impl<N: TreeNode> Iterator for Walk<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.stack.pop()?;
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}
