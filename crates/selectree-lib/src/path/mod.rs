//! Root-to-descendant spines over a tree, independent of the tree itself.
//!
//! Records live in an append-only arena. Exploring a different sibling never mutates an
//! existing path: [`PathNode::copy_from_root`] allocates a fresh ancestor chain that points
//! at the same tree nodes, and the alternate child is grafted onto the copy.

mod iter;
mod locate;

#[cfg(test)]
mod locate_tests;
#[cfg(test)]
mod mod_tests;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use iter::{Direction, IterClosest, IterDirection, IterUp, iter_closest, iter_direction};
pub use locate::{LocateMode, locate, locate_nearest, locate_with};

use crate::tree::TreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PathId(u32);

#[derive(Debug)]
struct PathRecord<N> {
    node: N,
    /// Index of this record's node among the parent's children, and the parent record.
    parent: Option<(usize, PathId)>,
    child: Option<(usize, PathId)>,
}

#[derive(Debug)]
struct PathArena<N> {
    records: RefCell<Vec<PathRecord<N>>>,
}

impl<N: Clone> PathArena<N> {
    fn alloc(&self, node: N, parent: Option<(usize, PathId)>) -> PathId {
        let mut records = self.records.borrow_mut();
        let id = PathId(records.len() as u32);
        records.push(PathRecord {
            node,
            parent,
            child: None,
        });
        id
    }

    fn node(&self, id: PathId) -> N {
        self.records.borrow()[id.0 as usize].node.clone()
    }

    fn parent(&self, id: PathId) -> Option<(usize, PathId)> {
        self.records.borrow()[id.0 as usize].parent
    }

    fn child(&self, id: PathId) -> Option<(usize, PathId)> {
        self.records.borrow()[id.0 as usize].child
    }

    fn set_child(&self, id: PathId, index: usize, child: PathId) {
        let mut records = self.records.borrow_mut();
        let record = &mut records[id.0 as usize];
        assert!(record.child.is_none(), "path child is already set");
        record.child = Some((index, child));
    }
}

/// Handle to one record of a path. Cheap to clone; all handles share one arena.
pub struct PathNode<N> {
    arena: Rc<PathArena<N>>,
    id: PathId,
}

impl<N> Clone for PathNode<N> {
    fn clone(&self) -> Self {
        Self {
            arena: Rc::clone(&self.arena),
            id: self.id,
        }
    }
}

impl<N: TreeNode> PathNode<N> {
    /// A one-record path starting at `root`.
    pub fn new_root(root: N) -> Self {
        let arena = Rc::new(PathArena {
            records: RefCell::new(Vec::new()),
        });
        let id = arena.alloc(root, None);
        Self { arena, id }
    }

    fn handle(&self, id: PathId) -> Self {
        Self {
            arena: Rc::clone(&self.arena),
            id,
        }
    }

    pub fn node(&self) -> N {
        self.arena.node(self.id)
    }

    pub fn parent(&self) -> Option<Self> {
        self.arena.parent(self.id).map(|(_, id)| self.handle(id))
    }

    pub fn child(&self) -> Option<Self> {
        self.arena.child(self.id).map(|(_, id)| self.handle(id))
    }

    /// Index of this node among its parent's children, `None` at the path root.
    pub fn index_in_parent(&self) -> Option<usize> {
        self.arena.parent(self.id).map(|(index, _)| index)
    }

    /// Extend the path with the tree child at `index`. Panics if this record already has a child.
    pub fn push_child(&self, index: usize) -> Self {
        let node = self
            .node()
            .child(index)
            .unwrap_or_else(|| panic!("child index {index} out of range"));
        let id = self.arena.alloc(node, Some((index, self.id)));
        self.arena.set_child(self.id, index, id);
        self.handle(id)
    }

    pub fn root(&self) -> Self {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    pub fn leaf(&self) -> Self {
        let mut current = self.clone();
        while let Some(child) = current.child() {
            current = child;
        }
        current
    }

    /// Number of ancestors above this record.
    pub fn depth(&self) -> usize {
        self.iter_up().count() - 1
    }

    /// Copy of the chain from the root down to this record, without this record's child.
    ///
    /// The copy refers to the same tree nodes; the original path is untouched.
    pub fn copy_from_root(&self) -> Self {
        let mut spine = Vec::new();
        let mut current = Some(self.clone());
        while let Some(path) = current {
            spine.push((path.index_in_parent(), path.node()));
            current = path.parent();
        }

        let mut copy: Option<PathNode<N>> = None;
        for (index, node) in spine.into_iter().rev() {
            copy = Some(match (copy, index) {
                (None, _) => self.handle(self.arena.alloc(node, None)),
                (Some(parent), Some(index)) => {
                    let id = self.arena.alloc(node, Some((index, parent.id)));
                    self.arena.set_child(parent.id, index, id);
                    self.handle(id)
                }
                (Some(_), None) => unreachable!("only the path root lacks a parent index"),
            });
        }
        copy.unwrap_or_else(|| unreachable!("a path has at least one record"))
    }

    /// Copy of the path up to this record's parent, with the sibling at `index` grafted below.
    ///
    /// Panics at the path root, which has no siblings.
    pub fn graft_sibling(&self, index: usize) -> Self {
        let parent = self.parent().expect("the path root has no siblings");
        parent.copy_from_root().push_child(index)
    }

    /// This record, then each ancestor up to the root.
    pub fn iter_up(&self) -> IterUp<N> {
        IterUp::new(self.clone())
    }

    /// Tree nodes from the root down to this record.
    pub fn nodes(&self) -> Vec<N> {
        let mut nodes: Vec<N> = self.iter_up().map(|p| p.node()).collect();
        nodes.reverse();
        nodes
    }
}

impl<N: TreeNode> fmt::Debug for PathNode<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<String> = self.nodes().iter().map(|n| n.kind().to_owned()).collect();
        write!(f, "PathNode({})", kinds.join(" > "))
    }
}
