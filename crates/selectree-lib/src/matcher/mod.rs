//! Evaluating selector chains against tree nodes.
//!
//! Two strategies share [`Matcher::test_nodes`]:
//! - top-down: start from a candidate set and descend into children, one stage per level
//! - bottom-up: start from one node at the leaf stage and climb, checking the node keeps
//!   its place among its siblings at every stage

mod context;


pub use context::{FinalSlice, MatchContext};

use selectree_core::SubtypeMap;
use tracing::trace;

use crate::selector::{Directive, SelectorChain, Stage, StageId};
use crate::tree::TreeNode;

/// Matches chains, optionally widening name tests with a grammar's subtype map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher<'r> {
    subtypes: Option<&'r SubtypeMap>,
}

/// Result of one top-down level.
struct Found<N> {
    nodes: Vec<N>,
    /// Every stage from here down to the leaf was skipped, so the caller may fold matches
    /// up into enclosing nodes.
    foldable: bool,
}

impl<N> Found<N> {
    fn none() -> Self {
        Self {
            nodes: Vec::new(),
            foldable: false,
        }
    }
}

impl<'r> Matcher<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subtypes(subtypes: &'r SubtypeMap) -> Self {
        Self {
            subtypes: Some(subtypes),
        }
    }

    pub fn subtypes(&self) -> Option<&'r SubtypeMap> {
        self.subtypes
    }

    /// Filter `candidates` through one stage: the node test, then each directive group
    /// followed by its slice. Survivors keep their order.
    pub fn test_nodes<N: TreeNode>(
        &self,
        candidates: &[N],
        stage: &Stage,
        ctx: &mut MatchContext<N>,
        mode: FinalSlice,
    ) -> Vec<N> {
        let mut survivors: Vec<N> = candidates
            .iter()
            .filter(|n| stage.test.accepts(n.kind(), self.subtypes))
            .cloned()
            .collect();

        for group in &stage.groups {
            for directive in &group.directives {
                match directive {
                    Directive::Mark => ctx.set_mark(&survivors),
                    directive => survivors.retain(|n| directive.accepts(n)),
                }
            }
            if group.implicit && mode == FinalSlice::Skip {
                continue;
            }
            survivors = group.slice.apply(&survivors);
        }
        survivors
    }

    /// Whether `node` alone passes the stage's node test and per-node directives.
    ///
    /// Slices are not consulted: a single node has no siblings to index into.
    pub fn accepts_node<N: TreeNode>(&self, node: &N, stage: &Stage) -> bool {
        stage.test.accepts(node.kind(), self.subtypes)
            && stage
                .groups
                .iter()
                .flat_map(|g| &g.directives)
                .filter(|d| d.is_per_node())
                .all(|d| d.accepts(node))
    }

    /// Run `chain` from the candidate set `nodes`, descending one level per stage.
    pub fn match_top_down<N: TreeNode>(&self, nodes: &[N], chain: &SelectorChain) -> Vec<N> {
        let mut ctx = MatchContext::new();
        self.match_top_down_with(nodes, chain, &mut ctx, FinalSlice::Apply)
    }

    /// [`Matcher::match_top_down`] with a caller-owned context.
    ///
    /// With [`FinalSlice::Apply`] a leaf stage without brackets reports the first match
    /// only; [`FinalSlice::Skip`] reports every node the chain reaches.
    pub fn match_top_down_with<N: TreeNode>(
        &self,
        nodes: &[N],
        chain: &SelectorChain,
        ctx: &mut MatchContext<N>,
        mode: FinalSlice,
    ) -> Vec<N> {
        let mut found = self.top_down(nodes, &[], chain, chain.root(), ctx, mode);
        if found.nodes.is_empty() {
            return Vec::new();
        }
        let bare_leaf = chain
            .stage(chain.leaf())
            .groups
            .last()
            .is_some_and(|g| g.implicit);
        if mode == FinalSlice::Apply && bare_leaf {
            found.nodes.truncate(1);
        }
        match ctx.mark.clone() {
            Some(marked) => marked,
            None => found.nodes,
        }
    }

    fn top_down<N: TreeNode>(
        &self,
        nodes: &[N],
        parents: &[N],
        chain: &SelectorChain,
        id: StageId,
        ctx: &mut MatchContext<N>,
        mode: FinalSlice,
    ) -> Found<N> {
        let stage = chain.stage(id);
        let mark_before = ctx.mark.clone();
        let survivors = self.test_nodes(nodes, stage, ctx, mode);
        trace!(
            stage = id.index(),
            candidates = nodes.len(),
            survivors = survivors.len(),
            "top-down"
        );

        let Some(child) = chain.child(id) else {
            if !survivors.is_empty() {
                ctx.root_stage.get_or_insert(id);
                return Found {
                    nodes: survivors,
                    foldable: true,
                };
            }
            ctx.mark = mark_before;
            if stage.optional && !parents.is_empty() {
                ctx.skipped += 1;
                return Found {
                    nodes: parents.to_vec(),
                    foldable: false,
                };
            }
            return Found::none();
        };

        let mut through = Found::none();
        if !survivors.is_empty() {
            let root_before = ctx.root_stage;
            ctx.root_stage.get_or_insert(id);
            let children: Vec<N> = survivors.iter().flat_map(|n| n.children()).collect();
            let found = self.top_down(&children, &survivors, chain, child, ctx, mode);
            if found.nodes.is_empty() {
                ctx.root_stage = root_before;
            } else {
                through = self.fold(found, stage);
            }
        }
        if through.nodes.is_empty() {
            ctx.mark = mark_before;
        }

        if !stage.optional {
            return through;
        }

        // Candidates this stage rejected still reach the rest of the chain.
        ctx.skipped += 1;
        let past = self.top_down(nodes, parents, chain, child, ctx, mode);
        if past.nodes.is_empty() {
            ctx.skipped -= 1;
            return through;
        }
        let past = self.fold(past, stage);
        if through.nodes.is_empty() {
            return past;
        }
        merge(through, past)
    }

    /// Optional stages directly above the leaf widen the matches to enclosing nodes;
    /// the first required stage ends the run.
    fn fold<N: TreeNode>(&self, found: Found<N>, stage: &Stage) -> Found<N> {
        if !found.foldable || !stage.optional {
            return Found {
                nodes: found.nodes,
                foldable: false,
            };
        }
        Found {
            nodes: self.backfill(found.nodes, stage),
            foldable: true,
        }
    }

    /// Replace each match by its parent where the parent satisfies `stage`.
    fn backfill<N: TreeNode>(&self, matches: Vec<N>, stage: &Stage) -> Vec<N> {
        let mut folded: Vec<N> = Vec::with_capacity(matches.len());
        for node in matches {
            let node = match node.parent() {
                Some(parent) if self.accepts_node(&parent, stage) => {
                    trace!(from = node.kind(), to = parent.kind(), "backfill");
                    parent
                }
                _ => node,
            };
            if !folded.iter().any(|n| n.same_node(&node)) {
                folded.push(node);
            }
        }
        folded
    }

    /// Check that `node` is reachable by `chain` ending at the leaf stage.
    ///
    /// Returns the reported node: `node` itself, or an enclosing node when optional stages
    /// right above the leaf are present in the tree. Chains with multi-node stages never
    /// match, since one position cannot stand for several nodes.
    pub fn match_bottom_up<N: TreeNode>(&self, node: &N, chain: &SelectorChain) -> Option<N> {
        let mut ctx = MatchContext::new();
        self.match_bottom_up_with(node, chain, &mut ctx)
    }

    pub fn match_bottom_up_with<N: TreeNode>(
        &self,
        node: &N,
        chain: &SelectorChain,
        ctx: &mut MatchContext<N>,
    ) -> Option<N> {
        let mut current = node.clone();
        let mut id = chain.leaf();
        let mut reported: Option<N> = None;
        let mut folding = true;

        loop {
            let stage = chain.stage(id);
            if stage.is_multiple() {
                trace!(stage = id.index(), "bottom-up: multi stage");
                return None;
            }

            if !self.holds_position(&current, stage) {
                if !stage.optional {
                    trace!(stage = id.index(), kind = current.kind(), "bottom-up: rejected");
                    return None;
                }
                ctx.skipped += 1;
                match chain.parent(id) {
                    Some(parent) => {
                        id = parent;
                        continue;
                    }
                    None => break,
                }
            }

            if reported.is_none() || (folding && stage.optional) {
                reported = Some(current.clone());
            } else {
                folding = false;
            }
            if stage.has_mark() && ctx.mark.is_none() {
                ctx.mark = Some(vec![current.clone()]);
            }
            ctx.root_stage = Some(id);

            let Some(parent_stage) = chain.parent(id) else {
                break;
            };
            let Some(parent_node) = current.parent() else {
                if chain.all_optional_through_root(parent_stage) {
                    break;
                }
                return None;
            };
            current = parent_node;
            id = parent_stage;
        }

        let reported = reported?;
        match ctx.mark.as_ref().and_then(|m| m.first()) {
            Some(marked) => Some(marked.clone()),
            None => Some(reported),
        }
    }

    /// `node` survives `stage` when the stage runs over its siblings.
    fn holds_position<N: TreeNode>(&self, node: &N, stage: &Stage) -> bool {
        let mut scratch = MatchContext::new();
        self.test_nodes(&node.siblings(), stage, &mut scratch, FinalSlice::Skip)
            .iter()
            .any(|n| n.same_node(node))
    }
}

/// Both result sets in source order, outer nodes before the nodes they enclose.
fn merge<N: TreeNode>(a: Found<N>, b: Found<N>) -> Found<N> {
    let foldable = a.foldable && b.foldable;
    let mut nodes: Vec<N> = Vec::with_capacity(a.nodes.len() + b.nodes.len());
    for node in a.nodes.into_iter().chain(b.nodes) {
        if !nodes.iter().any(|n| n.same_node(&node)) {
            nodes.push(node);
        }
    }
    nodes.sort_by(|x, y| {
        let (x, y) = (x.byte_range(), y.byte_range());
        x.start.cmp(&y.start).then(y.end.cmp(&x.end))
    });
    Found { nodes, foldable }
}
