use std::sync::Arc;

use super::variables::DomainId;
use super::variables::FloatVar;
use super::variables::SetVar;
use super::variables::VariableRef;
use super::DomainEvents;
use crate::containers::KeyedVec;
use crate::propagation::PropagatorId;

/// A propagator's interest in the changes of one variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Subscription {
    pub(crate) propagator: PropagatorId,
    pub(crate) events: DomainEvents,
}

/// The dependency graph between variables and propagators.
///
/// The lists are shared between clones of a space and copied on the first write, which only
/// happens when a propagator is posted, subsumed or rewritten.
#[derive(Clone, Debug, Default)]
pub struct WatchLists {
    integers: KeyedVec<DomainId, Arc<Vec<Subscription>>>,
    sets: KeyedVec<SetVar, Arc<Vec<Subscription>>>,
    floats: KeyedVec<FloatVar, Arc<Vec<Subscription>>>,
    subscribed_to: KeyedVec<PropagatorId, Arc<Vec<VariableRef>>>,
}

impl WatchLists {
    pub(crate) fn subscribe(
        &mut self,
        variable: VariableRef,
        propagator: PropagatorId,
        events: DomainEvents,
    ) {
        Arc::make_mut(self.list_mut(variable)).push(Subscription { propagator, events });

        self.subscribed_to.accomodate(propagator, Arc::default());
        Arc::make_mut(&mut self.subscribed_to[propagator]).push(variable);
    }

    /// Remove every subscription of the propagator.
    pub(crate) fn unsubscribe_all(&mut self, propagator: PropagatorId) {
        let Some(variables) = self.subscribed_to.get_mut(propagator) else {
            return;
        };
        let variables = std::mem::take(variables);

        for &variable in variables.iter() {
            Arc::make_mut(self.list_mut(variable))
                .retain(|subscription| subscription.propagator != propagator);
        }
    }

    pub(crate) fn watchers(&self, variable: VariableRef) -> &[Subscription] {
        let list = match variable {
            VariableRef::Integer(domain) => self.integers.get(domain),
            VariableRef::Set(set) => self.sets.get(set),
            VariableRef::Float(float) => self.floats.get(float),
        };
        list.map(|list| list.as_slice()).unwrap_or_default()
    }

    /// The number of subscriptions on the variable.
    pub(crate) fn degree(&self, variable: VariableRef) -> usize {
        self.watchers(variable).len()
    }

    pub(crate) fn memory(&self) -> usize {
        let subscriptions: usize = self
            .integers
            .iter()
            .chain(self.sets.iter())
            .chain(self.floats.iter())
            .filter(|list| Arc::strong_count(*list) == 1)
            .map(|list| list.len() * std::mem::size_of::<Subscription>())
            .sum();
        subscriptions + self.subscribed_to.len() * std::mem::size_of::<Arc<()>>()
    }

    fn list_mut(&mut self, variable: VariableRef) -> &mut Arc<Vec<Subscription>> {
        match variable {
            VariableRef::Integer(domain) => {
                self.integers.accomodate(domain, Arc::default());
                &mut self.integers[domain]
            }
            VariableRef::Set(set) => {
                self.sets.accomodate(set, Arc::default());
                &mut self.sets[set]
            }
            VariableRef::Float(float) => {
                self.floats.accomodate(float, Arc::default());
                &mut self.floats[float]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn unsubscribing_removes_the_propagator_everywhere() {
        let mut watch_lists = WatchLists::default();
        let x = DomainId::create_from_index(0);
        let y = DomainId::create_from_index(1);
        let p0 = PropagatorId(0);
        let p1 = PropagatorId(1);

        watch_lists.subscribe(x.into(), p0, DomainEvents::BOUNDS);
        watch_lists.subscribe(y.into(), p0, DomainEvents::DOMAIN);
        watch_lists.subscribe(y.into(), p1, DomainEvents::VALUE);
        assert_eq!(watch_lists.degree(y.into()), 2);

        watch_lists.unsubscribe_all(p0);

        assert_eq!(watch_lists.degree(x.into()), 0);
        assert_eq!(watch_lists.watchers(y.into())[0].propagator, p1);
    }

    #[test]
    fn clones_are_unaffected_by_unsubscription() {
        let mut watch_lists = WatchLists::default();
        let x = DomainId::create_from_index(0);
        watch_lists.subscribe(x.into(), PropagatorId(0), DomainEvents::BOUNDS);

        let copy = watch_lists.clone();
        watch_lists.unsubscribe_all(PropagatorId(0));

        assert_eq!(copy.degree(x.into()), 1);
        assert_eq!(watch_lists.degree(x.into()), 0);
    }
}
