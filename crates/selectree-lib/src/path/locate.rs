//! Finding the path under a cursor.
//!
//! Each level binary-searches the children by range, so a lookup costs
//! O(depth · log(branching)) rather than a scan over the whole tree.

use std::cmp::Ordering;

use tracing::trace;

use super::PathNode;
use crate::tree::{Point, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateMode {
    /// Stop at the deepest node that contains the position.
    #[default]
    Exact,
    /// When no child contains the position, keep descending into the closest one.
    Nearest,
}

/// Where a node lies relative to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Before,
    Within,
    After,
}

fn placement<N: TreeNode>(node: &N, position: Point) -> Placement {
    if node.end_point() <= position {
        Placement::Before
    } else if node.start_point() > position {
        Placement::After
    } else {
        Placement::Within
    }
}

/// Path to the deepest node containing `position`, `None` if `root` does not contain it.
pub fn locate<N: TreeNode>(position: Point, root: N) -> Option<PathNode<N>> {
    locate_with(position, root, LocateMode::Exact)
}

/// Path to the leaf nearest to `position`, even when it sits between tokens or outside `root`.
pub fn locate_nearest<N: TreeNode>(position: Point, root: N) -> PathNode<N> {
    let root_path = PathNode::new_root(root.clone());
    locate_with(position, root, LocateMode::Nearest).unwrap_or(root_path)
}

pub fn locate_with<N: TreeNode>(position: Point, root: N, mode: LocateMode) -> Option<PathNode<N>> {
    if mode == LocateMode::Exact && !root.range().contains(position) {
        return None;
    }

    let mut path = PathNode::new_root(root);
    loop {
        let node = path.node();
        let Some(index) = choose_child(&node, position, mode) else {
            trace!(kind = node.kind(), %position, "located");
            return Some(path);
        };
        path = path.push_child(index);
    }
}

fn choose_child<N: TreeNode>(node: &N, position: Point, mode: LocateMode) -> Option<usize> {
    let count = node.child_count();
    if count == 0 {
        return None;
    }

    // First child that does not end at or before `position`.
    let (mut lo, mut hi) = (0, count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let child = node.child(mid)?;
        if placement(&child, position) == Placement::Before {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    let next = (lo < count).then(|| node.child(lo)).flatten();
    let prev = lo.checked_sub(1).and_then(|i| node.child(i));
    let within = next
        .as_ref()
        .is_some_and(|n| placement(n, position) == Placement::Within);
    let prev_touches = prev.as_ref().is_some_and(|p| p.end_point() == position);

    match (prev, next) {
        (Some(prev), Some(next)) if within && prev_touches => {
            Some(tie_break(&prev, &next, position, lo - 1, lo, lo))
        }
        (_, Some(_)) if within => Some(lo),
        _ if mode == LocateMode::Exact => None,
        (Some(prev), Some(next)) => Some(tie_break(&prev, &next, position, lo - 1, lo, lo - 1)),
        (Some(_), None) => Some(lo - 1),
        (None, Some(_)) => Some(lo),
        (None, None) => None,
    }
}

/// Named beats anonymous; otherwise the closer edge wins, by line and then by column.
fn tie_break<N: TreeNode>(
    prev: &N,
    next: &N,
    position: Point,
    prev_index: usize,
    next_index: usize,
    on_tie: usize,
) -> usize {
    match (prev.is_named(), next.is_named()) {
        (true, false) => return prev_index,
        (false, true) => return next_index,
        _ => {}
    }

    let to_prev = position.distance(prev.end_point());
    let to_next = position.distance(next.start_point());
    match to_prev.cmp(&to_next) {
        Ordering::Less => prev_index,
        Ordering::Greater => next_index,
        Ordering::Equal => on_tie,
    }
}
