use std::fmt::Debug;

use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::ChoiceDescription;
use crate::basic_types::EmptyDomain;
use crate::containers::StorageKey;
use crate::propagation::Domains;
use crate::propagation::PropagationContext;
#[cfg(doc)]
use crate::Space;

// Cloning a space clones its brancher chain.
clone_trait_object!(Brancher);

/// A [`Brancher`] produces the choices which split the search space at a node of the search
/// tree.
///
/// The branchers of a [`Space`] form an ordered chain; the first brancher which reports through
/// [`Brancher::status`] that it still has work is asked for the next choice. A brancher is part
/// of the space, so any state it keeps is cloned together with the domains.
pub trait Brancher: DynClone + Debug + Send {
    /// The name of the brancher, used for logging.
    fn name(&self) -> &str;

    /// Whether the brancher can still produce a choice in the current space.
    ///
    /// Once a brancher reports `false` in a space, it is never asked again in that space or in
    /// any of its descendants.
    fn status(&mut self, domains: Domains) -> bool;

    /// Produce the choice for the current node; only called after [`Brancher::status`] returned
    /// `true`, at most once per node, and must not change any domain.
    fn choice(&mut self, domains: Domains) -> Box<dyn ChoiceDescription>;

    /// Apply the given alternative of a choice produced by this brancher.
    ///
    /// The outcome must only depend on the domains, the choice and the alternative, since
    /// recomputation replays commits into earlier copies of the space. Committing is a single
    /// tell: it narrows domains but does not run propagation.
    fn commit(
        &mut self,
        context: &mut PropagationContext,
        choice: &dyn ChoiceDescription,
        alternative: u32,
    ) -> Result<(), EmptyDomain>;
}

/// The position of a brancher in the brancher chain of a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrancherId(pub(crate) u32);

impl StorageKey for BrancherId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        BrancherId(index as u32)
    }
}
