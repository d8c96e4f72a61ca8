use super::Domains;
use super::Propagator;
use super::PropagatorId;
use crate::engine::variables::FloatVar;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVar;
use crate::engine::DomainEvents;
use crate::engine::State;
#[cfg(doc)]
use crate::Space;

/// A propagator constructor creates a fully initialised instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// scheduled. Additionally, the propagator can be initialised with values that come from the
/// current domains.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator + Clone;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// An object-safe [`PropagatorConstructor`], used to rewrite a propagator during propagation.
pub trait DynPropagatorConstructor: Send {
    fn create_boxed(self: Box<Self>, context: PropagatorConstructorContext) -> Box<dyn Propagator>;
}

impl<Constructor> DynPropagatorConstructor for Constructor
where
    Constructor: PropagatorConstructor + Send,
{
    fn create_boxed(self: Box<Self>, context: PropagatorConstructorContext) -> Box<dyn Propagator> {
        Box::new((*self).create(context))
    }
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// Propagators use it to subscribe to domain changes of variables and to retrieve the current
/// domains of variables.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    state: &'a mut State,
    pub(crate) propagator_id: PropagatorId,
}

impl PropagatorConstructorContext<'_> {
    pub(crate) fn new(
        propagator_id: PropagatorId,
        state: &mut State,
    ) -> PropagatorConstructorContext<'_> {
        PropagatorConstructorContext {
            state,
            propagator_id,
        }
    }

    /// Get domain information.
    pub fn domains(&self) -> Domains<'_> {
        self.state.domains()
    }

    /// Subscribe the propagator to the given [`DomainEvents`] of an integer variable.
    ///
    /// The propagator is scheduled for its first execution regardless of its subscriptions.
    pub fn register(&mut self, var: impl IntegerVariable, domain_events: DomainEvents) {
        self.state
            .watch_lists
            .subscribe(var.domain_id().into(), self.propagator_id, domain_events);
    }

    /// Subscribe the propagator to the given [`DomainEvents`] of a set variable.
    pub fn register_set(&mut self, var: SetVar, domain_events: DomainEvents) {
        self.state
            .watch_lists
            .subscribe(var.into(), self.propagator_id, domain_events);
    }

    /// Subscribe the propagator to the given [`DomainEvents`] of a float variable.
    pub fn register_float(&mut self, var: FloatVar, domain_events: DomainEvents) {
        self.state
            .watch_lists
            .subscribe(var.into(), self.propagator_id, domain_events);
    }
}
