use super::AffineView;
use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::ModEvent;
use crate::engine::VariableStore;

/// A Boolean variable, i.e. a view over an integer variable with domain `{0, 1}`.
///
/// The negation of a [`BoolVar`] is a view `1 - x` over the same integer variable.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct BoolVar {
    integer_variable: AffineView<DomainId>,
}

impl BoolVar {
    pub(crate) fn new(integer_variable: DomainId) -> BoolVar {
        BoolVar {
            integer_variable: integer_variable.scaled(1),
        }
    }

    /// The Boolean variable which is true exactly when `self` is false.
    pub fn negated(&self) -> BoolVar {
        BoolVar {
            integer_variable: self.integer_variable.scaled(-1).offset(1),
        }
    }

    pub fn is_true(&self, store: &VariableStore) -> bool {
        self.integer_variable.lower_bound(store) == 1
    }

    pub fn is_false(&self, store: &VariableStore) -> bool {
        self.integer_variable.upper_bound(store) == 0
    }
}

impl IntegerVariable for BoolVar {
    type AffineView = AffineView<Self>;

    fn domain_id(&self) -> DomainId {
        self.integer_variable.domain_id()
    }

    fn lower_bound(&self, store: &VariableStore) -> i32 {
        self.integer_variable.lower_bound(store)
    }

    fn upper_bound(&self, store: &VariableStore) -> i32 {
        self.integer_variable.upper_bound(store)
    }

    fn contains(&self, store: &VariableStore, value: i32) -> bool {
        self.integer_variable.contains(store, value)
    }

    fn iterate_domain(&self, store: &VariableStore) -> impl Iterator<Item = i32> {
        self.integer_variable.iterate_domain(store)
    }

    fn set_lower_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        self.integer_variable.set_lower_bound(store, value)
    }

    fn set_upper_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        self.integer_variable.set_upper_bound(store, value)
    }

    fn assign(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        self.integer_variable.assign(store, value)
    }

    fn remove(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        self.integer_variable.remove(store, value)
    }
}

impl TransformableVariable<AffineView<BoolVar>> for BoolVar {
    fn scaled(&self, scale: i32) -> AffineView<BoolVar> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<BoolVar> {
        AffineView::new(*self, 1, offset)
    }
}
