use crate::selector::StageId;

/// Per-attempt state shared by the stages of one match.
#[derive(Debug, Clone)]
pub struct MatchContext<N> {
    /// Nodes captured by `@mark`; the first capture wins.
    pub mark: Option<Vec<N>>,
    /// Outermost stage that matched a node in this attempt.
    pub root_stage: Option<StageId>,
    /// Optional stages passed over without consuming a node.
    pub skipped: usize,
}

impl<N> MatchContext<N> {
    pub fn new() -> Self {
        Self {
            mark: None,
            root_stage: None,
            skipped: 0,
        }
    }

    pub(crate) fn set_mark(&mut self, nodes: &[N])
    where
        N: Clone,
    {
        if self.mark.is_none() {
            self.mark = Some(nodes.to_vec());
        }
    }
}

impl<N> Default for MatchContext<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether groups without brackets keep only their first survivor.
///
/// `Skip` lets every node of the right kind through a bare stage; explicit slices always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalSlice {
    #[default]
    Apply,
    Skip,
}
