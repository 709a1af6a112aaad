//! Lazy traversals outward from a located path.
//!
//! All iterators keep an explicit work list instead of recursing, so deep trees cost heap,
//! not stack. Each yielded path is a fresh graft; the path they started from is never touched.

use std::iter::Peekable;

use super::PathNode;
use crate::tree::{Point, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Backwards,
    Forwards,
}

/// A path record, then each ancestor up to the root.
pub struct IterUp<N> {
    next: Option<PathNode<N>>,
}

impl<N: TreeNode> IterUp<N> {
    pub(super) fn new(start: PathNode<N>) -> Self {
        Self { next: Some(start) }
    }
}

impl<N: TreeNode> Iterator for IterUp<N> {
    type Item = PathNode<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

enum Pending<N> {
    /// Child `index` of `parent`, not yet materialized as a path.
    Visit { parent: PathNode<N>, index: usize },
    /// Already expanded; yield when popped.
    Emit(PathNode<N>),
}

/// Every position strictly before or after a path record, in document order away from it.
///
/// Backwards yields each preceding subtree children-first from its last descendant,
/// so the nearest node comes first. Forwards yields each following subtree in preorder.
pub struct IterDirection<N> {
    direction: Direction,
    /// Record whose siblings are being enumerated; climbs towards the root.
    level: Option<PathNode<N>>,
    next_sibling: Option<usize>,
    pending: Vec<Pending<N>>,
}

pub fn iter_direction<N: TreeNode>(direction: Direction, from: &PathNode<N>) -> IterDirection<N> {
    let mut iter = IterDirection {
        direction,
        level: None,
        next_sibling: None,
        pending: Vec::new(),
    };
    iter.enter_level(from.clone());
    iter
}

impl<N: TreeNode> IterDirection<N> {
    fn enter_level(&mut self, level: PathNode<N>) {
        self.next_sibling = match (level.index_in_parent(), level.parent()) {
            (Some(index), Some(parent)) => match self.direction {
                Direction::Backwards => index.checked_sub(1),
                Direction::Forwards => {
                    let next = index + 1;
                    (next < parent.node().child_count()).then_some(next)
                }
            },
            _ => None,
        };
        self.level = Some(level);
    }

    /// Queue the next sibling subtree, climbing levels as they run out.
    fn advance_sibling(&mut self) -> bool {
        loop {
            let Some(level) = self.level.clone() else {
                return false;
            };
            let Some(parent) = level.parent() else {
                self.level = None;
                return false;
            };

            let Some(index) = self.next_sibling else {
                self.enter_level(parent);
                continue;
            };

            self.next_sibling = match self.direction {
                Direction::Backwards => index.checked_sub(1),
                Direction::Forwards => {
                    let next = index + 1;
                    (next < parent.node().child_count()).then_some(next)
                }
            };
            self.pending.push(Pending::Visit { parent, index });
            return true;
        }
    }

    fn expand(&mut self, path: &PathNode<N>) {
        let count = path.node().child_count();
        let children = (0..count).map(|index| Pending::Visit {
            parent: path.clone(),
            index,
        });
        match self.direction {
            // Popped first-child first.
            Direction::Forwards => self.pending.extend(children.rev()),
            // Popped last-child first.
            Direction::Backwards => self.pending.extend(children),
        }
    }
}

impl<N: TreeNode> Iterator for IterDirection<N> {
    type Item = PathNode<N>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(item) = self.pending.pop() else {
                if !self.advance_sibling() {
                    return None;
                }
                continue;
            };

            match item {
                Pending::Emit(path) => return Some(path),
                Pending::Visit { parent, index } => {
                    let path = parent.copy_from_root().push_child(index);
                    match self.direction {
                        Direction::Forwards => {
                            self.expand(&path);
                            return Some(path);
                        }
                        Direction::Backwards => {
                            self.pending.push(Pending::Emit(path.clone()));
                            self.expand(&path);
                        }
                    }
                }
            }
        }
    }
}

/// Backward and forward positions merged by distance to `from`.
///
/// Backward heads are measured from their end, forward heads from their start;
/// line distance decides first, then column distance, and ties go backwards.
pub struct IterClosest<N: TreeNode> {
    from: Point,
    backwards: Peekable<IterDirection<N>>,
    forwards: Peekable<IterDirection<N>>,
}

pub fn iter_closest<N: TreeNode>(from: Point, leaf: &PathNode<N>) -> IterClosest<N> {
    IterClosest {
        from,
        backwards: iter_direction(Direction::Backwards, leaf).peekable(),
        forwards: iter_direction(Direction::Forwards, leaf).peekable(),
    }
}

impl<N: TreeNode> Iterator for IterClosest<N> {
    type Item = PathNode<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let take_backwards = match (self.backwards.peek(), self.forwards.peek()) {
            (Some(back), Some(fwd)) => {
                let to_back = self.from.distance(back.node().end_point());
                let to_fwd = self.from.distance(fwd.node().start_point());
                to_back <= to_fwd
            }
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };

        if take_backwards {
            self.backwards.next()
        } else {
            self.forwards.next()
        }
    }
}
