use super::AffineView;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::containers::StorageKey;
use crate::engine::ModEvent;
use crate::engine::VariableStore;

/// A handle to an integer variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId {
    pub(crate) id: u32,
}

impl IntegerVariable for DomainId {
    type AffineView = AffineView<Self>;

    fn domain_id(&self) -> DomainId {
        *self
    }

    fn lower_bound(&self, store: &VariableStore) -> i32 {
        store.integer(*self).min()
    }

    fn upper_bound(&self, store: &VariableStore) -> i32 {
        store.integer(*self).max()
    }

    fn contains(&self, store: &VariableStore, value: i32) -> bool {
        store.integer(*self).contains(value)
    }

    fn iterate_domain(&self, store: &VariableStore) -> impl Iterator<Item = i32> {
        store.integer(*self).iter()
    }

    fn set_lower_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        store.narrow_integer(*self, |domain| domain.with_lower_bound(value))
    }

    fn set_upper_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        store.narrow_integer(*self, |domain| domain.with_upper_bound(value))
    }

    fn assign(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        store.narrow_integer(*self, |domain| domain.with_value(value))
    }

    fn remove(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        store.narrow_integer(*self, |domain| domain.without_value(value))
    }
}

impl TransformableVariable<AffineView<DomainId>> for DomainId {
    fn scaled(&self, scale: i32) -> AffineView<DomainId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<DomainId> {
        AffineView::new(*self, 1, offset)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
