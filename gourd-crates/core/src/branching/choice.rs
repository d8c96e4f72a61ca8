use std::fmt::Debug;
use std::fmt::Display;
use std::sync::Arc;

use downcast_rs::impl_downcast;
use downcast_rs::DowncastSync;

use super::AlternativeLiteral;
use super::BrancherId;

impl_downcast!(sync ChoiceDescription);

/// The brancher specific part of a [`Choice`]: everything needed to commit any of its
/// alternatives without looking at the domains again.
pub trait ChoiceDescription: DowncastSync + Debug {
    /// The number of alternatives, at least two.
    fn alternatives(&self) -> u32;

    /// Describe the alternative, e.g. `x3 = 4`.
    fn fmt_alternative(&self, alternative: u32, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result;

    /// The constraint committed by the alternative, if it can be stated without the brancher.
    ///
    /// Alternatives without a literal cannot take part in no-goods.
    fn literal(&self, _alternative: u32) -> Option<Box<dyn AlternativeLiteral>> {
        None
    }
}

/// An immutable record of the alternatives offered by a brancher at one node.
///
/// A choice is cheap to clone; the search path keeps one per edge and may commit it many times
/// during recomputation, also on other threads.
#[derive(Clone, Debug)]
pub struct Choice {
    brancher: BrancherId,
    description: Arc<dyn ChoiceDescription>,
}

impl Choice {
    pub(crate) fn new(brancher: BrancherId, description: Box<dyn ChoiceDescription>) -> Choice {
        Choice {
            brancher,
            description: Arc::from(description),
        }
    }

    pub fn brancher(&self) -> BrancherId {
        self.brancher
    }

    pub fn alternatives(&self) -> u32 {
        self.description.alternatives()
    }

    pub fn description(&self) -> &dyn ChoiceDescription {
        &*self.description
    }

    /// A displayable description of one alternative.
    pub fn alternative(&self, alternative: u32) -> impl Display + '_ {
        AlternativeDisplay {
            description: &*self.description,
            alternative,
        }
    }
}

struct AlternativeDisplay<'a> {
    description: &'a dyn ChoiceDescription,
    alternative: u32,
}

impl Display for AlternativeDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.description.fmt_alternative(self.alternative, f)
    }
}
