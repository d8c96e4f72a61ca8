use super::domains::FloatDomain;
use super::domains::Narrowing;
use super::domains::SetDomain;
use super::propagator_queue::PropagatorQueue;
use super::variables::FloatVar;
use super::variables::IntegerVariable;
use super::variables::SetVar;
use super::variables::VariableRef;
use super::ModEvent;
use super::VariableStore;
use super::WatchLists;
use crate::containers::KeyedVec;
use crate::propagation::Domains;
use crate::propagation::PropagationCost;
use crate::propagation::PropagatorId;

/// The part of a space which narrowing operations act on: the domains, the subscriptions, and
/// the propagators scheduled because of earlier narrowing.
#[derive(Clone, Debug, Default)]
pub(crate) struct State {
    pub(crate) variables: VariableStore,
    pub(crate) watch_lists: WatchLists,
    pub(crate) queue: PropagatorQueue,
    pub(crate) costs: KeyedVec<PropagatorId, PropagationCost>,
    pub(crate) failed: bool,
}

impl State {
    pub(crate) fn is_failed(&self) -> bool {
        self.failed
    }

    /// Mark the state as failed. This cannot be undone.
    pub(crate) fn fail(&mut self) {
        self.failed = true;
        self.queue.clear();
    }

    pub(crate) fn domains(&self) -> Domains<'_> {
        Domains::new(&self.variables, &self.watch_lists)
    }

    pub(crate) fn schedule(&mut self, propagator: PropagatorId) {
        let cost = self.costs[propagator];
        self.queue.enqueue_propagator(propagator, cost);
    }

    /// Apply a narrowing operation on an integer variable and schedule the propagators which
    /// are subscribed to the resulting event. Does nothing on a failed state.
    pub(crate) fn narrow<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        operation: impl FnOnce(&Var, &mut VariableStore) -> ModEvent,
    ) -> ModEvent {
        if self.failed {
            return ModEvent::Failed;
        }
        let event = operation(var, &mut self.variables);
        self.notify(var.domain_id().into(), event);
        event
    }

    pub(crate) fn narrow_set(
        &mut self,
        var: SetVar,
        narrowing: impl FnOnce(&SetDomain) -> Narrowing<SetDomain>,
    ) -> ModEvent {
        if self.failed {
            return ModEvent::Failed;
        }
        let event = self.variables.narrow_set(var, narrowing);
        self.notify(var.into(), event);
        event
    }

    pub(crate) fn narrow_float(
        &mut self,
        var: FloatVar,
        narrowing: impl FnOnce(&FloatDomain) -> Narrowing<FloatDomain>,
    ) -> ModEvent {
        if self.failed {
            return ModEvent::Failed;
        }
        let event = self.variables.narrow_float(var, narrowing);
        self.notify(var.into(), event);
        event
    }

    fn notify(&mut self, variable: VariableRef, event: ModEvent) {
        if event.is_failed() {
            self.fail();
            return;
        }
        if !event.is_modified() {
            return;
        }

        for subscription in self.watch_lists.watchers(variable) {
            if subscription.events.is_triggered_by(event) {
                self.queue
                    .enqueue_propagator(subscription.propagator, self.costs[subscription.propagator]);
            }
        }
    }
}
