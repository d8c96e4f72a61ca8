use super::Domains;
use super::ReadDomains;
use crate::basic_types::EmptyDomain;
use crate::engine::variables::FloatVar;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVar;
use crate::engine::ModEvent;
use crate::engine::State;
use crate::engine::VariableStore;
use crate::engine::WatchLists;

/// [`PropagationContext`] is passed to propagators during propagation and to branchers when
/// they commit an alternative.
///
/// It may be queried to retrieve information about the current variable domains, or used to
/// narrow the domain of a variable. A narrowing which empties a domain fails the space and
/// returns [`EmptyDomain`], which converts into an [`Inconsistency`](crate::Inconsistency) with
/// `?`.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    state: &'a mut State,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(state: &'a mut State) -> Self {
        PropagationContext { state }
    }

    pub fn domains(&self) -> Domains<'_> {
        self.state.domains()
    }

    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow(var, |var, store| var.set_lower_bound(store, value)))
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow(var, |var, store| var.set_upper_bound(store, value)))
    }

    pub fn assign<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow(var, |var, store| var.assign(store, value)))
    }

    pub fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow(var, |var, store| var.remove(store, value)))
    }

    /// Restrict the domain of a variable to the given values.
    pub fn restrict_to<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        values: &[i32],
    ) -> Result<ModEvent, EmptyDomain> {
        let removed = var
            .iterate_domain(&self.state.variables)
            .filter(|value| !values.contains(value))
            .collect::<Vec<_>>();
        let mut strongest = ModEvent::None;
        for value in removed {
            strongest = strongest.strongest(self.remove(var, value)?);
        }
        Ok(strongest)
    }

    pub fn include(&mut self, var: SetVar, value: i32) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow_set(var, |domain| domain.including(value)))
    }

    pub fn exclude(&mut self, var: SetVar, value: i32) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow_set(var, |domain| domain.excluding(value)))
    }

    pub fn set_cardinality(
        &mut self,
        var: SetVar,
        min: u32,
        max: u32,
    ) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow_set(var, |domain| domain.with_cardinality(min, max)))
    }

    pub fn set_float_lower_bound(
        &mut self,
        var: FloatVar,
        value: f64,
    ) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow_float(var, |domain| domain.with_lower_bound(value)))
    }

    pub fn set_float_upper_bound(
        &mut self,
        var: FloatVar,
        value: f64,
    ) -> Result<ModEvent, EmptyDomain> {
        as_result(self.state.narrow_float(var, |domain| domain.with_upper_bound(value)))
    }
}

impl ReadDomains for PropagationContext<'_> {
    fn store(&self) -> &VariableStore {
        &self.state.variables
    }

    fn watch_lists(&self) -> &WatchLists {
        &self.state.watch_lists
    }
}

fn as_result(event: ModEvent) -> Result<ModEvent, EmptyDomain> {
    if event.is_failed() {
        Err(EmptyDomain)
    } else {
        Ok(event)
    }
}
