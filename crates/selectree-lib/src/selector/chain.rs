//! Parsed selector: a chain of stages, root first.

use std::fmt;

use selectree_core::SubtypeMap;

use super::directive::{Directive, write_name};
use super::slice::Slice;
use crate::Span;

/// Index of a stage within its [`SelectorChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(u32);

impl StageId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a stage checks about a node's kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeTest {
    Name(String),
    Choice(Vec<String>),
    Wildcard,
}

impl NodeTest {
    /// A name also accepts its transitive subtypes when a subtype map is given.
    pub fn accepts(&self, kind: &str, subtypes: Option<&SubtypeMap>) -> bool {
        let is = |name: &str| match subtypes {
            Some(map) => map.is_subtype(name, kind),
            None => name == kind,
        };
        match self {
            NodeTest::Name(name) => is(name),
            NodeTest::Choice(names) => names.iter().any(|name| is(name)),
            NodeTest::Wildcard => true,
        }
    }

    /// Names the test refers to, for grammar checks.
    pub fn names(&self) -> &[String] {
        match self {
            NodeTest::Name(name) => std::slice::from_ref(name),
            NodeTest::Choice(names) => names,
            NodeTest::Wildcard => &[],
        }
    }
}

impl fmt::Display for NodeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTest::Name(name) => write_name(f, name),
            NodeTest::Choice(names) => {
                f.write_str("(")?;
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write_name(f, name)?;
                }
                f.write_str(")")
            }
            NodeTest::Wildcard => f.write_str("*"),
        }
    }
}

/// A conjunction of directives followed by a slice over the survivors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectiveGroup {
    pub directives: Vec<Directive>,
    pub slice: Slice,
    /// No bracket closed this group; `slice` is `[0]`, the first survivor.
    pub implicit: bool,
}

impl DirectiveGroup {
    pub fn explicit(directives: Vec<Directive>, slice: Slice) -> Self {
        Self {
            directives,
            slice,
            implicit: false,
        }
    }

    pub fn implicit(directives: Vec<Directive>) -> Self {
        Self {
            directives,
            slice: Slice::index(0),
            implicit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stage {
    pub test: NodeTest,
    pub optional: bool,
    pub groups: Vec<DirectiveGroup>,
}

impl Stage {
    /// Some explicit slice here can select more than one node.
    pub fn is_multiple(&self) -> bool {
        self.groups
            .iter()
            .any(|g| !g.implicit && !g.slice.is_single())
    }

    pub fn has_mark(&self) -> bool {
        self.groups
            .iter()
            .any(|g| g.directives.contains(&Directive::Mark))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.test)?;
        for group in &self.groups {
            for directive in &group.directives {
                write!(f, "{directive}")?;
            }
            if !group.implicit {
                write!(f, "{}", group.slice)?;
            }
        }
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Stages linked root to leaf: stage `i`'s parent is `i - 1`, its child `i + 1`.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    stages: Vec<Stage>,
    spans: Vec<Span>,
}

impl SelectorChain {
    pub(crate) fn new(stages: Vec<Stage>, spans: Vec<Span>) -> Self {
        assert!(!stages.is_empty(), "selector chain without stages");
        assert_eq!(stages.len(), spans.len());
        Self { stages, spans }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn root(&self) -> StageId {
        StageId(0)
    }

    pub fn leaf(&self) -> StageId {
        StageId(self.stages.len() as u32 - 1)
    }

    pub fn is_leaf(&self, id: StageId) -> bool {
        id == self.leaf()
    }

    pub fn parent(&self, id: StageId) -> Option<StageId> {
        id.0.checked_sub(1).map(StageId)
    }

    pub fn child(&self, id: StageId) -> Option<StageId> {
        let next = id.0 + 1;
        ((next as usize) < self.stages.len()).then_some(StageId(next))
    }

    pub fn stage(&self, id: StageId) -> &Stage {
        &self.stages[id.index()]
    }

    pub fn span(&self, id: StageId) -> Span {
        self.spans[id.index()]
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = StageId> {
        (0..self.stages.len() as u32).map(StageId)
    }

    /// Some stage can select more than one node, so a single node position cannot satisfy it.
    pub fn is_multiple(&self) -> bool {
        self.stages.iter().any(Stage::is_multiple)
    }

    /// Every stage from `id` up to the root is optional.
    pub fn all_optional_through_root(&self, id: StageId) -> bool {
        self.stages[..=id.index()].iter().all(|s| s.optional)
    }
}

/// Chains compare by structure; spans are ignored.
impl PartialEq for SelectorChain {
    fn eq(&self, other: &Self) -> bool {
        self.stages == other.stages
    }
}

impl Eq for SelectorChain {}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}
