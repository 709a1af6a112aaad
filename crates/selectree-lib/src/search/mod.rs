//! Turning a selection and a set of selector chains into target nodes.
//!
//! The search locates the node under the cursor, walks candidate positions in priority
//! order and asks the [`Matcher`] about each one until enough match lists were seen.

mod selection;

#[cfg(test)]
mod search_tests;

pub use selection::{Action, Selection, Side, apply_action};

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matcher::Matcher;
use crate::path::{Direction, PathNode, iter_closest, iter_direction, locate, locate_nearest};
use crate::selector::SelectorChain;
use crate::tree::{Point, TextRange, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDirection {
    /// Enclosing nodes first, then whatever is closest on either side.
    #[default]
    Smart,
    Backwards,
    Forwards,
}

impl SearchDirection {
    pub fn name(self) -> &'static str {
        match self {
            SearchDirection::Smart => "smart",
            SearchDirection::Backwards => "backwards",
            SearchDirection::Forwards => "forwards",
        }
    }
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart" => Ok(SearchDirection::Smart),
            "backwards" => Ok(SearchDirection::Backwards),
            "forwards" => Ok(SearchDirection::Forwards),
            other => Err(format!("unknown direction `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub direction: SearchDirection,
    /// Report the `count`-th match list instead of the first.
    pub count: usize,
    /// Climb through all enclosing nodes and report the outermost match.
    pub greedy: bool,
    /// One range per matched node instead of one range over all of them.
    pub every: bool,
    /// Shrink ranges to the inside of their delimiters: first child's end to last child's start.
    pub inside: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            direction: SearchDirection::Smart,
            count: 1,
            greedy: false,
            every: false,
            inside: false,
        }
    }
}

impl SearchOptions {
    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count.max(1);
        self
    }

    pub fn greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    pub fn every(mut self, every: bool) -> Self {
        self.every = every;
        self
    }

    pub fn inside(mut self, inside: bool) -> Self {
        self.inside = inside;
        self
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutput<N> {
    pub matches: Vec<N>,
    pub ranges: Vec<TextRange>,
}

impl<N: TreeNode> SearchOutput<N> {
    fn empty() -> Self {
        Self {
            matches: Vec::new(),
            ranges: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Owned, serializable view of the matches.
    pub fn report(&self) -> SearchReport {
        SearchReport {
            matches: self.matches.iter().map(MatchedNode::from_node).collect(),
            ranges: self.ranges.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedNode {
    pub kind: String,
    pub text: String,
    pub named: bool,
    pub range: TextRange,
}

impl MatchedNode {
    pub fn from_node<N: TreeNode>(node: &N) -> Self {
        Self {
            kind: node.kind().to_owned(),
            text: node.text().to_owned(),
            named: node.is_named(),
            range: node.range(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub matches: Vec<MatchedNode>,
    pub ranges: Vec<TextRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Ancestors of the located node.
    Enclosing,
    /// Positions before or after it.
    Around,
}

/// A configured search over one set of chains.
pub struct NodeSearch<'m, 'c> {
    matcher: Matcher<'m>,
    chains: &'c [SelectorChain],
    options: SearchOptions,
}

impl<'m, 'c> NodeSearch<'m, 'c> {
    pub fn new(matcher: Matcher<'m>, chains: &'c [SelectorChain]) -> Self {
        Self {
            matcher,
            chains,
            options: SearchOptions::default(),
        }
    }

    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn find<N: TreeNode>(&self, root: N, selection: Selection) -> SearchOutput<N> {
        let direction = self.options.direction;
        let source = match direction {
            SearchDirection::Backwards => selection.start(),
            SearchDirection::Forwards => selection.end(),
            SearchDirection::Smart => selection.active,
        };

        let leaf = locate(source, root.clone()).unwrap_or_else(|| locate_nearest(source, root));
        let located = leaf.node();
        debug!(%direction, %source, leaf = located.kind(), "search");

        let Some(matches) = self.select(candidates(direction, source, &leaf), selection) else {
            debug!("no match");
            return SearchOutput::empty();
        };
        debug!(count = matches.len(), first = matches[0].kind(), "matched");

        let ranges = if self.options.every {
            matches
                .iter()
                .filter_map(|n| self.node_range(n))
                .collect()
        } else {
            matches
                .iter()
                .filter_map(|n| self.node_range(n))
                .reduce(TextRange::cover)
                .into_iter()
                .collect()
        };
        SearchOutput { matches, ranges }
    }

    /// Walk candidates until the requested match list turns up.
    fn select<N: TreeNode>(
        &self,
        candidates: impl Iterator<Item = (Phase, PathNode<N>)>,
        selection: Selection,
    ) -> Option<Vec<N>> {
        let mut remaining = self.options.count.max(1);
        let mut seen: HashSet<Vec<N::Id>> = HashSet::new();
        let mut outermost: Option<Vec<N>> = None;

        for (phase, path) in candidates {
            let greedy = self.options.greedy && phase == Phase::Enclosing;
            if outermost.is_some() && !greedy {
                break;
            }

            let matches: Vec<N> = self
                .match_candidate(&path.node())
                .into_iter()
                .filter(|n| self.keeps(n, selection))
                .collect();
            if matches.is_empty() {
                continue;
            }
            if !seen.insert(matches.iter().map(|n| n.id()).collect()) {
                continue;
            }

            if greedy {
                outermost = Some(matches);
                continue;
            }
            remaining -= 1;
            if remaining == 0 {
                return Some(matches);
            }
        }
        outermost
    }

    /// The first chain that matches at `node` decides.
    ///
    /// Chains with multi-node stages run top-down from the node; the rest check the node
    /// itself bottom-up.
    fn match_candidate<N: TreeNode>(&self, node: &N) -> Vec<N> {
        for chain in self.chains {
            if chain.is_multiple() {
                let matches = self
                    .matcher
                    .match_top_down(std::slice::from_ref(node), chain);
                if !matches.is_empty() {
                    return matches;
                }
            } else if let Some(found) = self.matcher.match_bottom_up(node, chain) {
                return vec![found];
            }
        }
        Vec::new()
    }

    fn keeps<N: TreeNode>(&self, node: &N, selection: Selection) -> bool {
        match self.options.direction {
            SearchDirection::Backwards => node.end_point() < selection.start(),
            SearchDirection::Forwards => node.start_point() > selection.end(),
            SearchDirection::Smart => true,
        }
    }

    fn node_range<N: TreeNode>(&self, node: &N) -> Option<TextRange> {
        if !self.options.inside {
            return Some(node.range());
        }
        inside_range(node)
    }
}

/// Between the first child's end and the last child's start, for nodes like `(...)`.
pub fn inside_range<N: TreeNode>(node: &N) -> Option<TextRange> {
    let count = node.child_count();
    if count < 2 {
        return None;
    }
    let first = node.child(0)?;
    let last = node.child(count - 1)?;
    Some(TextRange::new(first.end_point(), last.start_point()))
}

fn candidates<'n, N: TreeNode + 'n>(
    direction: SearchDirection,
    source: Point,
    leaf: &PathNode<N>,
) -> Box<dyn Iterator<Item = (Phase, PathNode<N>)> + 'n> {
    match direction {
        SearchDirection::Smart => Box::new(
            leaf.iter_up()
                .map(|p| (Phase::Enclosing, p))
                .chain(iter_closest(source, leaf).map(|p| (Phase::Around, p))),
        ),
        SearchDirection::Backwards => Box::new(
            iter_direction(Direction::Backwards, leaf).map(|p| (Phase::Around, p)),
        ),
        SearchDirection::Forwards => Box::new(
            iter_direction(Direction::Forwards, leaf).map(|p| (Phase::Around, p)),
        ),
    }
}
