use crate::engine::domains::FloatDomain;
use crate::engine::domains::SetDomain;
use crate::engine::variables::FloatVar;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVar;
use crate::engine::variables::VariableRef;
use crate::engine::VariableStore;
use crate::engine::WatchLists;

/// Read-only access to the domains of a space.
#[derive(Clone, Copy, Debug)]
pub struct Domains<'a> {
    store: &'a VariableStore,
    watch_lists: &'a WatchLists,
}

impl<'a> Domains<'a> {
    pub(crate) fn new(store: &'a VariableStore, watch_lists: &'a WatchLists) -> Self {
        Domains { store, watch_lists }
    }
}

impl ReadDomains for Domains<'_> {
    fn store(&self) -> &VariableStore {
        self.store
    }

    fn watch_lists(&self) -> &WatchLists {
        self.watch_lists
    }
}

/// Queries on the domains of variables, available wherever the domains can be read.
pub trait ReadDomains {
    #[doc(hidden)]
    fn store(&self) -> &VariableStore;

    #[doc(hidden)]
    fn watch_lists(&self) -> &WatchLists;

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.store())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.store())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.store(), value)
    }

    fn size<Var: IntegerVariable>(&self, var: &Var) -> u64 {
        var.size(self.store())
    }

    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        var.is_assigned(self.store())
    }

    /// The value of an assigned variable, or [`None`] if it is not assigned.
    fn fixed_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        self.is_fixed(var).then(|| self.lower_bound(var))
    }

    /// The lower middle value of the domain of `var`.
    fn median<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        let index = (self.size(var) - 1) / 2;
        var.iterate_domain(self.store())
            .nth(index as usize)
            .unwrap_or_else(|| self.lower_bound(var))
    }

    fn iterate_domain<'s, Var: IntegerVariable>(
        &'s self,
        var: &'s Var,
    ) -> impl Iterator<Item = i32> + 's {
        var.iterate_domain(self.store())
    }

    /// The number of live subscriptions on the variable underlying `var`.
    fn degree<Var: IntegerVariable>(&self, var: &Var) -> usize {
        self.watch_lists().degree(var.domain_id().into())
    }

    fn set_domain(&self, var: SetVar) -> &SetDomain {
        self.store().set(var)
    }

    fn set_degree(&self, var: SetVar) -> usize {
        self.watch_lists().degree(VariableRef::Set(var))
    }

    fn float_domain(&self, var: FloatVar) -> &FloatDomain {
        self.store().float(var)
    }
}
