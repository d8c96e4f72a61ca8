use std::fmt::Debug;

use super::DomainId;
use super::TransformableVariable;
use crate::engine::ModEvent;
use crate::engine::VariableStore;

/// The behaviour shared by integer variables and views over them, such as retrieving a bound
/// ([`IntegerVariable::lower_bound`]) or narrowing the domain ([`IntegerVariable::remove`]).
///
/// Narrowing operations never empty a domain; an operation which would do so returns
/// [`ModEvent::Failed`] and leaves the store untouched.
pub trait IntegerVariable:
    Clone + Debug + Send + Sync + 'static + TransformableVariable<Self::AffineView>
{
    type AffineView: IntegerVariable;

    /// The variable this is a view of; subscriptions are registered on it.
    fn domain_id(&self) -> DomainId;

    /// Get the lower bound of the variable.
    fn lower_bound(&self, store: &VariableStore) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, store: &VariableStore) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, store: &VariableStore, value: i32) -> bool;

    /// The number of values in the domain.
    fn size(&self, store: &VariableStore) -> u64 {
        store.integer(self.domain_id()).size()
    }

    fn is_assigned(&self, store: &VariableStore) -> bool {
        self.lower_bound(store) == self.upper_bound(store)
    }

    /// Iterate over the values of the domain.
    fn iterate_domain(&self, store: &VariableStore) -> impl Iterator<Item = i32>;

    fn set_lower_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent;

    fn set_upper_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent;

    fn assign(&self, store: &mut VariableStore, value: i32) -> ModEvent;

    fn remove(&self, store: &mut VariableStore, value: i32) -> ModEvent;
}
