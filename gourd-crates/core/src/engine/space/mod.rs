mod objective;

use std::sync::Arc;

pub use objective::Maximise;
pub use objective::Minimise;
pub use objective::Objective;

use super::domains::FloatDomain;
use super::domains::IntDomain;
use super::domains::SetDomain;
use super::propagator_queue::PropagatorQueue;
use super::propagator_queue::SchedulingPolicy;
use super::variables::BoolVar;
use super::variables::DomainId;
use super::variables::FloatVar;
use super::variables::IntegerVariable;
use super::variables::SetVar;
use super::ModEvent;
use super::State;
use super::VariableStore;
use super::WatchLists;
use crate::basic_types::Inconsistency;
use crate::basic_types::ModelError;
use crate::branching::Brancher;
use crate::branching::BrancherId;
use crate::branching::Choice;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::gourd_assert_simple;
use crate::propagation::Domains;
use crate::propagation::ExecStatus;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorId;
use crate::propagation::ReadDomains;

/// The outcome of running propagation to a fixpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpaceStatus {
    /// At fixpoint, and a brancher can produce a choice.
    Branch,
    /// At fixpoint, and no brancher has work left.
    Solved,
    /// A domain became empty or a propagator detected a conflict. This is permanent.
    Failed,
}

/// The constraint store of one node of the search tree.
///
/// A space owns its variables, the propagators posted on them, and a chain of branchers. Cloning
/// a space produces a completely independent copy; domains and subscriptions are shared between
/// the copies until one of them writes to them.
///
/// # Example
/// ```rust
/// # use gourd_core::Space;
/// # use gourd_core::SpaceStatus;
/// # use gourd_core::constraints;
/// let mut space = Space::default();
/// let x = space.new_integer(1, 3).unwrap();
/// let y = space.new_integer(1, 3).unwrap();
///
/// // x < y
/// constraints::less_than(&mut space, x, y).unwrap();
///
/// assert_eq!(space.status(), SpaceStatus::Solved);
/// assert_eq!(space.upper_bound_of(x), 2);
/// assert_eq!(space.lower_bound_of(y), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Space {
    state: State,
    propagators: KeyedVec<PropagatorId, Option<Box<dyn Propagator>>>,
    branchers: KeyedVec<BrancherId, Box<dyn Brancher>>,
    /// Branchers before this index have no work left.
    first_active: usize,
    objective: Option<Arc<dyn Objective>>,
    propagations: u64,
}

impl Default for Space {
    fn default() -> Self {
        Space::with_scheduling(SchedulingPolicy::default())
    }
}

impl Space {
    /// Create an empty space whose fixpoint loop executes propagators in the given order.
    pub fn with_scheduling(policy: SchedulingPolicy) -> Space {
        Space {
            state: State {
                queue: PropagatorQueue::new(policy),
                ..State::default()
            },
            propagators: KeyedVec::default(),
            branchers: KeyedVec::default(),
            first_active: 0,
            objective: None,
            propagations: 0,
        }
    }

    /// Create an integer variable with domain `[lower_bound, upper_bound]`.
    pub fn new_integer(&mut self, lower_bound: i32, upper_bound: i32) -> Result<DomainId, ModelError> {
        let domain = IntDomain::interval(lower_bound, upper_bound).ok_or(ModelError::EmptyDomain {
            lower: lower_bound.into(),
            upper: upper_bound.into(),
        })?;
        Ok(self.state.variables.new_integer(domain))
    }

    /// Create `n` integer variables with domain `[lower_bound, upper_bound]`.
    pub fn new_integers(
        &mut self,
        n: usize,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<Vec<DomainId>, ModelError> {
        (0..n)
            .map(|_| self.new_integer(lower_bound, upper_bound))
            .collect()
    }

    /// Create an integer variable whose domain consists of the given values.
    pub fn new_integer_from_values(
        &mut self,
        values: impl IntoIterator<Item = i32>,
    ) -> Result<DomainId, ModelError> {
        let domain = IntDomain::from_values(values)
            .ok_or(ModelError::EmptyDomain { lower: 1, upper: 0 })?;
        Ok(self.state.variables.new_integer(domain))
    }

    pub fn new_bool(&mut self) -> BoolVar {
        // [0, 1] is never empty
        let domain = IntDomain::interval(0, 1).unwrap_or_else(|| unreachable!());
        BoolVar::new(self.state.variables.new_integer(domain))
    }

    /// Create a set variable `s` with `glb ⊆ s ⊆ lub` and `card_min <= |s| <= card_max`.
    pub fn new_set(
        &mut self,
        glb: impl IntoIterator<Item = i32>,
        lub: impl IntoIterator<Item = i32>,
        card_min: u32,
        card_max: u32,
    ) -> Result<SetVar, ModelError> {
        let domain = SetDomain::new(glb, lub, card_min, card_max).ok_or(
            ModelError::EmptyDomain {
                lower: card_min.into(),
                upper: card_max.into(),
            },
        )?;
        Ok(self.state.variables.new_set(domain))
    }

    pub fn new_float(&mut self, lower_bound: f64, upper_bound: f64) -> Result<FloatVar, ModelError> {
        let domain = FloatDomain::new(lower_bound, upper_bound).ok_or(ModelError::EmptyDomain {
            lower: lower_bound.floor() as i64,
            upper: upper_bound.ceil() as i64,
        })?;
        Ok(self.state.variables.new_float(domain))
    }

    /// Post a propagator into the space.
    ///
    /// The propagator is scheduled, but does not run until the next call to [`Space::status`].
    pub fn post<Constructor>(&mut self, constructor: Constructor) -> Result<PropagatorId, ModelError>
    where
        Constructor: PropagatorConstructor,
    {
        if self.state.is_failed() {
            return Err(ModelError::InfeasibleState);
        }

        let propagator_id = self.propagators.push(None);
        let propagator = constructor.create(PropagatorConstructorContext::new(
            propagator_id,
            &mut self.state,
        ));
        self.install(propagator_id, Box::new(propagator));

        Ok(propagator_id)
    }

    /// Append a brancher to the brancher chain.
    pub fn branch(&mut self, brancher: impl Brancher + 'static) -> BrancherId {
        self.branchers.push(Box::new(brancher))
    }

    pub fn set_objective(&mut self, objective: impl Objective + 'static) {
        self.objective = Some(Arc::new(objective));
    }

    pub fn minimise<Var: IntegerVariable>(&mut self, var: Var) {
        self.set_objective(Minimise(var));
    }

    pub fn maximise<Var: IntegerVariable>(&mut self, var: Var) {
        self.set_objective(Maximise(var));
    }

    pub fn has_objective(&self) -> bool {
        self.objective.is_some()
    }

    /// The value of the objective, if the space has an objective and it is assigned.
    pub fn objective_value(&self) -> Option<i64> {
        self.objective
            .as_ref()
            .and_then(|objective| objective.value(self))
    }

    /// Run propagation to a fixpoint and report the status of the space.
    pub fn status(&mut self) -> SpaceStatus {
        if self.propagate().is_err() {
            return SpaceStatus::Failed;
        }

        while self.first_active < self.branchers.len() {
            let domains = self.state.domains();
            let brancher = BrancherId::create_from_index(self.first_active);
            if self.branchers[brancher].status(domains) {
                return SpaceStatus::Branch;
            }
            self.first_active += 1;
        }

        SpaceStatus::Solved
    }

    /// Ask the first brancher with work left for a choice.
    ///
    /// Must only be called directly after [`Space::status`] returned [`SpaceStatus::Branch`].
    pub fn choice(&mut self) -> Choice {
        gourd_assert_simple!(
            !self.state.is_failed() && self.first_active < self.branchers.len(),
            "a choice can only be made in a space with status Branch"
        );

        let brancher = BrancherId::create_from_index(self.first_active);
        let domains = self.state.domains();
        let description = self.branchers[brancher].choice(domains);
        gourd_assert_simple!(description.alternatives() >= 2);

        Choice::new(brancher, description)
    }

    /// Apply an alternative of a choice; the status is undetermined until the next call to
    /// [`Space::status`].
    ///
    /// The choice may have been created in an ancestor of this space.
    pub fn commit(&mut self, choice: &Choice, alternative: u32) {
        gourd_assert_simple!(alternative < choice.alternatives());
        if self.state.is_failed() {
            return;
        }

        let mut context = PropagationContext::new(&mut self.state);
        if self.branchers[choice.brancher()]
            .commit(&mut context, choice.description(), alternative)
            .is_err()
        {
            self.state.fail();
        }
    }

    /// Constrain the space to be better than `best` according to the objective; does nothing
    /// when the space has no objective.
    pub fn constrain(&mut self, best: &Space) {
        if let Some(objective) = &self.objective {
            let objective = Arc::clone(objective);
            objective.constrain(self, best);
        }
    }

    pub fn is_failed(&self) -> bool {
        self.state.is_failed()
    }

    /// Fail the space.
    pub fn fail(&mut self) {
        self.state.fail();
    }

    /// The number of propagator executions in this space and the spaces it was cloned from.
    pub fn propagations(&self) -> u64 {
        self.propagations
    }

    /// The number of propagators which are not subsumed.
    pub fn num_propagators(&self) -> usize {
        self.propagators.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn num_branchers(&self) -> usize {
        self.branchers.len()
    }

    pub fn propagator(&self, propagator_id: PropagatorId) -> Option<&dyn Propagator> {
        self.propagators
            .get(propagator_id)
            .and_then(|slot| slot.as_deref())
    }

    /// An estimate of the number of bytes owned by this space which are not shared with other
    /// spaces.
    pub fn memory(&self) -> usize {
        std::mem::size_of::<Space>()
            + self.state.variables.memory()
            + self.state.watch_lists.memory()
            + self.propagators.len() * std::mem::size_of::<Option<Box<dyn Propagator>>>()
            + self.branchers.len() * std::mem::size_of::<Box<dyn Brancher>>()
    }

    /// Read-only access to the domains, as seen by propagators and branchers.
    pub fn domains(&self) -> Domains<'_> {
        self.state.domains()
    }

    pub fn variables(&self) -> &VariableStore {
        &self.state.variables
    }

    pub fn lower_bound_of(&self, var: DomainId) -> i32 {
        self.lower_bound(&var)
    }

    pub fn upper_bound_of(&self, var: DomainId) -> i32 {
        self.upper_bound(&var)
    }

    /// The value of an assigned integer variable.
    pub fn value_of(&self, var: DomainId) -> Option<i32> {
        self.fixed_value(&var)
    }

    pub fn int_lq<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> ModEvent {
        self.state
            .narrow(var, |var, store| var.set_upper_bound(store, value))
    }

    pub fn int_le<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> ModEvent {
        match value.checked_sub(1) {
            Some(bound) => self.int_lq(var, bound),
            None => {
                self.state.fail();
                ModEvent::Failed
            }
        }
    }

    pub fn int_gq<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> ModEvent {
        self.state
            .narrow(var, |var, store| var.set_lower_bound(store, value))
    }

    pub fn int_gr<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> ModEvent {
        match value.checked_add(1) {
            Some(bound) => self.int_gq(var, bound),
            None => {
                self.state.fail();
                ModEvent::Failed
            }
        }
    }

    pub fn int_eq<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> ModEvent {
        self.state.narrow(var, |var, store| var.assign(store, value))
    }

    pub fn int_nq<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> ModEvent {
        self.state.narrow(var, |var, store| var.remove(store, value))
    }

    /// Restrict the domain of `var` to the given values.
    pub fn int_in<Var: IntegerVariable>(&mut self, var: &Var, values: &[i32]) -> ModEvent {
        let mut context = PropagationContext::new(&mut self.state);
        context.restrict_to(var, values).unwrap_or(ModEvent::Failed)
    }

    pub fn set_include(&mut self, var: SetVar, value: i32) -> ModEvent {
        self.state.narrow_set(var, |domain| domain.including(value))
    }

    pub fn set_exclude(&mut self, var: SetVar, value: i32) -> ModEvent {
        self.state.narrow_set(var, |domain| domain.excluding(value))
    }

    pub fn set_cardinality(&mut self, var: SetVar, min: u32, max: u32) -> ModEvent {
        self.state
            .narrow_set(var, |domain| domain.with_cardinality(min, max))
    }

    pub fn float_lq(&mut self, var: FloatVar, value: f64) -> ModEvent {
        self.state
            .narrow_float(var, |domain| domain.with_upper_bound(value))
    }

    pub fn float_gq(&mut self, var: FloatVar, value: f64) -> ModEvent {
        self.state
            .narrow_float(var, |domain| domain.with_lower_bound(value))
    }

    fn install(&mut self, propagator_id: PropagatorId, propagator: Box<dyn Propagator>) {
        self.state
            .costs
            .accomodate(propagator_id, propagator.cost());
        self.state.costs[propagator_id] = propagator.cost();
        self.propagators[propagator_id] = Some(propagator);
        self.state.schedule(propagator_id);
    }

    /// Run the scheduled propagators until none is scheduled or the space fails.
    fn propagate(&mut self) -> Result<(), Inconsistency> {
        if self.state.is_failed() {
            return Err(Inconsistency::EmptyDomain);
        }

        while let Some(propagator_id) = self.state.queue.pop() {
            let Some(mut propagator) = self.propagators[propagator_id].take() else {
                continue;
            };
            self.propagations += 1;

            let result = propagator.propagate(PropagationContext::new(&mut self.state));
            match result {
                Err(inconsistency) => {
                    log::trace!("{} failed the space", propagator.name());
                    self.propagators[propagator_id] = Some(propagator);
                    self.state.fail();
                    return Err(inconsistency);
                }
                Ok(ExecStatus::Fix) => {
                    self.state.queue.remove(propagator_id);
                    self.propagators[propagator_id] = Some(propagator);
                }
                Ok(ExecStatus::NoFix) => {
                    self.propagators[propagator_id] = Some(propagator);
                }
                Ok(ExecStatus::Subsumed) => {
                    propagator.dispose();
                    self.state.watch_lists.unsubscribe_all(propagator_id);
                    self.state.queue.remove(propagator_id);
                }
                Ok(ExecStatus::Rewrite(constructor)) => {
                    propagator.dispose();
                    self.state.watch_lists.unsubscribe_all(propagator_id);
                    self.state.queue.remove(propagator_id);

                    let replacement = constructor.create_boxed(PropagatorConstructorContext::new(
                        propagator_id,
                        &mut self.state,
                    ));
                    log::trace!("{} rewritten into {}", propagator.name(), replacement.name());
                    self.install(propagator_id, replacement);
                }
            }
        }

        Ok(())
    }
}

impl ReadDomains for Space {
    fn store(&self) -> &VariableStore {
        &self.state.variables
    }

    fn watch_lists(&self) -> &WatchLists {
        &self.state.watch_lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    #[test]
    fn clones_are_independent() {
        let mut space = Space::default();
        let x = space.new_integer(0, 10).expect("non-empty domain");

        let mut clone = space.clone();
        let _ = clone.int_lq(&x, 3);
        let _ = space.int_gq(&x, 5);

        assert_eq!(clone.upper_bound_of(x), 3);
        assert_eq!(clone.lower_bound_of(x), 0);
        assert_eq!(space.lower_bound_of(x), 5);
        assert_eq!(space.upper_bound_of(x), 10);
    }

    #[test]
    fn strict_bounds_at_the_edge_of_the_value_range_fail_the_space() {
        let mut below = Space::default();
        let x = below.new_integer(0, 10).expect("non-empty domain");
        assert_eq!(below.int_le(&x, i32::MIN), ModEvent::Failed);
        assert!(below.is_failed());

        let mut above = Space::default();
        let y = above.new_integer(0, 10).expect("non-empty domain");
        assert_eq!(above.int_gr(&y, i32::MAX), ModEvent::Failed);
        assert!(above.is_failed());

        let mut inside = Space::default();
        let z = inside.new_integer(0, 10).expect("non-empty domain");
        let _ = inside.int_le(&z, 4);
        let _ = inside.int_gr(&z, 1);
        assert_eq!(inside.lower_bound_of(z), 2);
        assert_eq!(inside.upper_bound_of(z), 3);
    }

    #[test]
    fn failure_is_permanent() {
        let mut space = Space::default();
        let x = space.new_integer(0, 10).expect("non-empty domain");
        let y = space.new_integer(0, 10).expect("non-empty domain");

        assert_eq!(space.int_gq(&x, 11), ModEvent::Failed);
        assert!(space.is_failed());
        assert_eq!(space.status(), SpaceStatus::Failed);

        // Nothing can be posted into or narrowed in a failed space.
        assert!(matches!(
            constraints::less_than(&mut space, x, y),
            Err(ModelError::InfeasibleState)
        ));
        let _ = space.int_lq(&y, 5);
        assert_eq!(space.status(), SpaceStatus::Failed);
    }

    #[test]
    fn propagation_alone_can_solve_a_space() {
        let mut space = Space::default();
        let x = space.new_integer(0, 1).expect("non-empty domain");
        let y = space.new_integer(0, 1).expect("non-empty domain");
        let _ = constraints::less_than(&mut space, x, y).expect("not failed");

        assert_eq!(space.status(), SpaceStatus::Solved);
        assert_eq!(space.value_of(x), Some(0));
        assert_eq!(space.value_of(y), Some(1));
        assert!(space.propagations() > 0);
    }

    #[test]
    fn constrain_uses_the_objective() {
        let mut space = Space::default();
        let x = space.new_integer(0, 10).expect("non-empty domain");
        space.minimise(x);

        let mut best = space.clone();
        let _ = best.int_eq(&x, 6);
        space.constrain(&best);

        assert_eq!(space.upper_bound_of(x), 5);
        assert_eq!(best.objective_value(), Some(6));
        assert_eq!(space.objective_value(), None);
    }

    #[test]
    fn constrain_without_objective_does_nothing() {
        let mut space = Space::default();
        let x = space.new_integer(0, 10).expect("non-empty domain");
        let best = space.clone();

        space.constrain(&best);

        assert_eq!(space.upper_bound_of(x), 10);
    }

    #[test]
    fn empty_domains_are_rejected_when_creating_variables() {
        let mut space = Space::default();

        assert!(matches!(
            space.new_integer(3, 2),
            Err(ModelError::EmptyDomain { .. })
        ));
    }
}
