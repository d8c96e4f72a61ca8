use std::fmt::Debug;

use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use crate::basic_types::EmptyDomain;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVar;
use crate::propagation::DomainEvents;
use crate::propagation::Domains;
use crate::propagation::PropagationContext;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

// No-goods are cloned together with the space which propagates them.
clone_trait_object!(AlternativeLiteral);

/// The constraint added by committing one alternative of a choice, expressed independently of
/// the brancher which made the choice.
///
/// Literals are what no-goods are made of, see
/// [`NoGoods`](crate::search::NoGoods).
pub trait AlternativeLiteral: DynClone + Debug + Send + Sync {
    /// Whether the literal holds in `domains`; `None` while it is undecided.
    fn truth_value(&self, domains: Domains) -> Option<bool>;

    /// Narrow the domains such that the literal cannot hold anymore.
    fn exclude(&self, context: &mut PropagationContext) -> Result<(), EmptyDomain>;

    /// Register the variable of the literal with the propagator being constructed.
    fn subscribe(&self, context: &mut PropagatorConstructorContext);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntRelation {
    Equal,
    NotEqual,
    LessOrEqual,
    GreaterOrEqual,
}

/// `variable <relation> value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntLiteral<Var> {
    pub variable: Var,
    pub relation: IntRelation,
    pub value: i32,
}

impl<Var: IntegerVariable> AlternativeLiteral for IntLiteral<Var> {
    fn truth_value(&self, domains: Domains) -> Option<bool> {
        let lower_bound = domains.lower_bound(&self.variable);
        let upper_bound = domains.upper_bound(&self.variable);

        match self.relation {
            IntRelation::Equal | IntRelation::NotEqual => {
                let equal = if !domains.contains(&self.variable, self.value) {
                    Some(false)
                } else if lower_bound == upper_bound {
                    Some(true)
                } else {
                    None
                };
                if self.relation == IntRelation::Equal {
                    equal
                } else {
                    equal.map(|equal| !equal)
                }
            }
            IntRelation::LessOrEqual if upper_bound <= self.value => Some(true),
            IntRelation::LessOrEqual if lower_bound > self.value => Some(false),
            IntRelation::GreaterOrEqual if lower_bound >= self.value => Some(true),
            IntRelation::GreaterOrEqual if upper_bound < self.value => Some(false),
            IntRelation::LessOrEqual | IntRelation::GreaterOrEqual => None,
        }
    }

    fn exclude(&self, context: &mut PropagationContext) -> Result<(), EmptyDomain> {
        let _ = match self.relation {
            IntRelation::Equal => context.remove(&self.variable, self.value)?,
            IntRelation::NotEqual => context.assign(&self.variable, self.value)?,
            IntRelation::LessOrEqual => {
                let bound = self.value.checked_add(1).ok_or(EmptyDomain)?;
                context.set_lower_bound(&self.variable, bound)?
            }
            IntRelation::GreaterOrEqual => {
                let bound = self.value.checked_sub(1).ok_or(EmptyDomain)?;
                context.set_upper_bound(&self.variable, bound)?
            }
        };
        Ok(())
    }

    fn subscribe(&self, context: &mut PropagatorConstructorContext) {
        context.register(self.variable.clone(), DomainEvents::DOMAIN);
    }
}

/// `value in set` or, negated, `value not in set`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetLiteral {
    pub set: SetVar,
    pub value: i32,
    pub included: bool,
}

impl AlternativeLiteral for SetLiteral {
    fn truth_value(&self, domains: Domains) -> Option<bool> {
        let domain = domains.set_domain(self.set);
        if domain.is_included(self.value) {
            Some(self.included)
        } else if !domain.may_contain(self.value) {
            Some(!self.included)
        } else {
            None
        }
    }

    fn exclude(&self, context: &mut PropagationContext) -> Result<(), EmptyDomain> {
        let _ = if self.included {
            context.exclude(self.set, self.value)?
        } else {
            context.include(self.set, self.value)?
        };
        Ok(())
    }

    fn subscribe(&self, context: &mut PropagatorConstructorContext) {
        context.register_set(self.set, DomainEvents::DOMAIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;

    fn truth_value(space: &Space, literal: &dyn AlternativeLiteral) -> Option<bool> {
        literal.truth_value(space.domains())
    }

    #[test]
    fn integer_literals_are_decided_by_the_domain() {
        let mut space = Space::default();
        let x = space.new_integer(0, 5).expect("non-empty domain");
        let literal = |relation, value| IntLiteral {
            variable: x,
            relation,
            value,
        };

        assert_eq!(truth_value(&space, &literal(IntRelation::Equal, 3)), None);
        assert_eq!(truth_value(&space, &literal(IntRelation::LessOrEqual, 5)), Some(true));
        assert_eq!(truth_value(&space, &literal(IntRelation::GreaterOrEqual, 6)), Some(false));

        let _ = space.int_nq(&x, 3);
        assert_eq!(truth_value(&space, &literal(IntRelation::Equal, 3)), Some(false));
        assert_eq!(truth_value(&space, &literal(IntRelation::NotEqual, 3)), Some(true));

        let _ = space.int_eq(&x, 4);
        assert_eq!(truth_value(&space, &literal(IntRelation::Equal, 4)), Some(true));
        assert_eq!(truth_value(&space, &literal(IntRelation::LessOrEqual, 3)), Some(false));
        assert_eq!(truth_value(&space, &literal(IntRelation::GreaterOrEqual, 4)), Some(true));
    }

    #[test]
    fn set_literals_are_decided_by_the_bounds_of_the_set() {
        let mut space = Space::default();
        let set = space.new_set([1], [1, 2, 3], 0, 3).expect("consistent set");
        let included = |value| SetLiteral {
            set,
            value,
            included: true,
        };

        assert_eq!(truth_value(&space, &included(1)), Some(true));
        assert_eq!(truth_value(&space, &included(2)), None);
        assert_eq!(truth_value(&space, &included(4)), Some(false));

        let _ = space.set_exclude(set, 2);
        let excluded = SetLiteral {
            included: false,
            ..included(2)
        };
        assert_eq!(truth_value(&space, &excluded), Some(true));
    }
}
