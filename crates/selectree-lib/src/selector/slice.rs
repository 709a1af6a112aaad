//! Python-style slices over ordered candidate sets.

use std::fmt;

/// `start:stop:step` with negative indices counted from the end.
///
/// `stop == None` runs to the natural end in the iteration direction.
/// `step` is never zero; the parser rejects it before a `Slice` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: i64,
    pub stop: Option<i64>,
    pub step: i64,
}

impl Slice {
    /// Every element, in order. This is also what a bare stage (no brackets) uses.
    pub const FULL: Slice = Slice {
        start: 0,
        stop: None,
        step: 1,
    };

    pub fn new(start: i64, stop: Option<i64>, step: i64) -> Self {
        assert!(step != 0, "slice step cannot be zero");
        Self { start, stop, step }
    }

    /// Exactly the element at `index`, `[-1]` being the last.
    pub fn index(index: i64) -> Self {
        let stop = if index == -1 {
            None
        } else {
            Some(index.saturating_add(1))
        };
        Self::new(index, stop, 1)
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Whether this slice can only ever select one element (the `[n]` form).
    pub fn is_single(&self) -> bool {
        if self.step != 1 {
            return false;
        }
        match self.stop {
            None => self.start == -1,
            Some(stop) => self.start != -1 && stop == self.start.saturating_add(1),
        }
    }

    pub fn indices(&self, len: usize) -> SliceIndices {
        let len = len as i64;
        let (next, stop) = if self.step > 0 {
            let start = clamp_index(self.start, len, 0, len);
            let stop = self.stop.map_or(len, |stop| clamp_index(stop, len, 0, len));
            (start, stop)
        } else {
            let start = clamp_index(self.start, len, -1, len - 1);
            let stop = self
                .stop
                .map_or(-1, |stop| clamp_index(stop, len, -1, len - 1));
            (start, stop)
        };
        SliceIndices {
            next,
            stop,
            step: self.step,
        }
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.indices(items.len())
            .map(|i| items[i].clone())
            .collect()
    }
}

/// Resolve a possibly negative index against `len`, then clamp into `[low, high]`.
fn clamp_index(index: i64, len: i64, low: i64, high: i64) -> i64 {
    let index = if index < 0 { index + len } else { index };
    index.clamp(low, high)
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_full() {
            return f.write_str("[]");
        }
        if self.is_single() {
            return write!(f, "[{}]", self.start);
        }

        f.write_str("[")?;
        let default_start = if self.step > 0 { 0 } else { -1 };
        if self.start != default_start {
            write!(f, "{}", self.start)?;
        }
        f.write_str(":")?;
        if let Some(stop) = self.stop {
            write!(f, "{stop}")?;
        }
        if self.step != 1 {
            write!(f, ":{}", self.step)?;
        }
        f.write_str("]")
    }
}

/// Indices selected by a [`Slice`] over a sequence of known length.
#[derive(Debug, Clone)]
pub struct SliceIndices {
    next: i64,
    stop: i64,
    step: i64,
}

impl Iterator for SliceIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let more = if self.step > 0 {
            self.next < self.stop
        } else {
            self.next > self.stop
        };
        if !more {
            return None;
        }
        let current = self.next;
        self.next = self.next.saturating_add(self.step);
        Some(current as usize)
    }
}
