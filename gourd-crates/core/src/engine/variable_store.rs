use std::sync::Arc;

use super::domains::FloatDomain;
use super::domains::IntDomain;
use super::domains::Narrowing;
use super::domains::SetDomain;
use super::variables::DomainId;
use super::variables::FloatVar;
use super::variables::SetVar;
use super::ModEvent;
use crate::containers::KeyedVec;

/// Owns the domains of all variables of a space.
///
/// Domains are reference counted: cloning the store shares every domain with the clone, and a
/// narrowing operation installs a fresh domain for the narrowed variable only. Neither side can
/// observe the writes of the other.
#[derive(Clone, Debug, Default)]
pub struct VariableStore {
    integers: KeyedVec<DomainId, Arc<IntDomain>>,
    sets: KeyedVec<SetVar, Arc<SetDomain>>,
    floats: KeyedVec<FloatVar, Arc<FloatDomain>>,
}

impl VariableStore {
    pub(crate) fn new_integer(&mut self, domain: IntDomain) -> DomainId {
        self.integers.push(Arc::new(domain))
    }

    pub(crate) fn new_set(&mut self, domain: SetDomain) -> SetVar {
        self.sets.push(Arc::new(domain))
    }

    pub(crate) fn new_float(&mut self, domain: FloatDomain) -> FloatVar {
        self.floats.push(Arc::new(domain))
    }

    pub fn integer(&self, domain: DomainId) -> &IntDomain {
        &self.integers[domain]
    }

    pub fn set(&self, set: SetVar) -> &SetDomain {
        &self.sets[set]
    }

    pub fn float(&self, float: FloatVar) -> &FloatDomain {
        &self.floats[float]
    }

    pub fn num_integers(&self) -> usize {
        self.integers.len()
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn num_floats(&self) -> usize {
        self.floats.len()
    }

    pub(crate) fn integers(&self) -> impl Iterator<Item = DomainId> {
        self.integers.keys()
    }

    pub(crate) fn narrow_integer(
        &mut self,
        domain: DomainId,
        narrowing: impl FnOnce(&IntDomain) -> Narrowing<IntDomain>,
    ) -> ModEvent {
        let current = &self.integers[domain];
        match narrowing(current) {
            Narrowing::Unchanged => ModEvent::None,
            Narrowing::Empty => ModEvent::Failed,
            Narrowing::Changed(narrowed) => {
                let event = current.event_towards(&narrowed);
                self.integers[domain] = Arc::new(narrowed);
                event
            }
        }
    }

    pub(crate) fn narrow_set(
        &mut self,
        set: SetVar,
        narrowing: impl FnOnce(&SetDomain) -> Narrowing<SetDomain>,
    ) -> ModEvent {
        let current = &self.sets[set];
        match narrowing(current) {
            Narrowing::Unchanged => ModEvent::None,
            Narrowing::Empty => ModEvent::Failed,
            Narrowing::Changed(narrowed) => {
                let event = current.event_towards(&narrowed);
                self.sets[set] = Arc::new(narrowed);
                event
            }
        }
    }

    pub(crate) fn narrow_float(
        &mut self,
        float: FloatVar,
        narrowing: impl FnOnce(&FloatDomain) -> Narrowing<FloatDomain>,
    ) -> ModEvent {
        let current = &self.floats[float];
        match narrowing(current) {
            Narrowing::Unchanged => ModEvent::None,
            Narrowing::Empty => ModEvent::Failed,
            Narrowing::Changed(narrowed) => {
                let event = current.event_towards(&narrowed);
                self.floats[float] = Arc::new(narrowed);
                event
            }
        }
    }

    /// An estimate of the number of bytes used by the domains which are not shared with another
    /// store.
    pub(crate) fn memory(&self) -> usize {
        let integers: usize = self
            .integers
            .iter()
            .filter(|domain| Arc::strong_count(*domain) == 1)
            .map(|domain| {
                std::mem::size_of::<IntDomain>()
                    + domain.number_of_ranges() * std::mem::size_of::<(i32, i32)>()
            })
            .sum();
        let sets: usize = self
            .sets
            .iter()
            .filter(|domain| Arc::strong_count(*domain) == 1)
            .map(|domain| {
                std::mem::size_of::<SetDomain>()
                    + (domain.glb().len() + domain.lub().len()) * std::mem::size_of::<i32>()
            })
            .sum();
        let pointers = (self.integers.len() + self.sets.len() + self.floats.len())
            * std::mem::size_of::<Arc<()>>();

        integers + sets + self.floats.len() * std::mem::size_of::<FloatDomain>() + pointers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::IntegerVariable;

    #[test]
    fn clones_share_until_written() {
        let mut store = VariableStore::default();
        let x = store.new_integer(IntDomain::interval(0, 9).unwrap());
        let copy = store.clone();

        assert!(Arc::ptr_eq(&store.integers[x], &copy.integers[x]));

        let _ = x.set_upper_bound(&mut store, 4);

        assert!(!Arc::ptr_eq(&store.integers[x], &copy.integers[x]));
        assert_eq!(x.upper_bound(&store), 4);
        assert_eq!(x.upper_bound(&copy), 9);
    }

    #[test]
    fn failing_operations_leave_the_domain_untouched() {
        let mut store = VariableStore::default();
        let x = store.new_integer(IntDomain::interval(3, 5).unwrap());

        assert_eq!(x.set_upper_bound(&mut store, 2), ModEvent::Failed);
        assert_eq!(store.integer(x).size(), 3);
    }
}
