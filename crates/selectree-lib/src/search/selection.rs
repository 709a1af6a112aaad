use serde::{Deserialize, Serialize};

use crate::tree::{Point, TextRange};

/// An editor selection: `anchor` stays put, `active` is where the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub active: Point,
}

impl Selection {
    pub fn new(anchor: Point, active: Point) -> Self {
        Self { anchor, active }
    }

    pub fn cursor(at: Point) -> Self {
        Self::new(at, at)
    }

    pub fn start(&self) -> Point {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Point {
        self.anchor.max(self.active)
    }

    /// The cursor sits before the anchor.
    pub fn is_reversed(&self) -> bool {
        self.active < self.anchor
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start(), self.end())
    }
}

impl From<TextRange> for Selection {
    fn from(range: TextRange) -> Self {
        Self::new(range.start, range.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Replace the selection by the target.
    #[default]
    Select,
    /// Put the cursor on the target.
    Move,
    /// Grow the selection to reach the target.
    Extend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Start,
    End,
}

impl Side {
    fn of(self, range: TextRange) -> Point {
        match self {
            Side::Start => range.start,
            Side::End => range.end,
        }
    }
}

/// New selections after applying `action` towards each of `targets`.
///
/// - `Move` collapses onto `side` of the target, its start by default.
/// - `Select` takes the target as a forward selection, or collapses onto `side`.
/// - `Extend` keeps the anchor and moves the cursor onto `side` of the target; without a
///   side it covers both the current selection and the target, reversed when the target
///   starts before the current selection.
pub fn apply_action(
    action: Action,
    side: Option<Side>,
    current: Selection,
    targets: &[TextRange],
) -> Vec<Selection> {
    targets
        .iter()
        .map(|&target| match (action, side) {
            (Action::Move, side) => Selection::cursor(side.unwrap_or(Side::Start).of(target)),
            (Action::Select, None) => Selection::from(target),
            (Action::Select, Some(side)) => Selection::cursor(side.of(target)),
            (Action::Extend, Some(side)) => Selection::new(current.anchor, side.of(target)),
            (Action::Extend, None) => {
                let covered = current.range().cover(target);
                if target.start < current.start() {
                    Selection::new(covered.end, covered.start)
                } else {
                    Selection::new(covered.start, covered.end)
                }
            }
        })
        .collect()
}
