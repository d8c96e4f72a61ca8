use crate::basic_types::EmptyDomain;
use crate::branching::AlternativeLiteral;
use crate::branching::Brancher;
use crate::branching::ChoiceDescription;
use crate::branching::SetLiteral;
use crate::engine::variables::SetVar;
use crate::gourd_assert_moderate;
use crate::propagation::Domains;
use crate::propagation::PropagationContext;
use crate::propagation::ReadDomains;

/// A [`Brancher`] over set variables which decides the smallest undecided element of the first
/// unassigned set, trying to include it first.
#[derive(Clone, Debug)]
pub struct SetBrancher {
    variables: Vec<SetVar>,
    start: usize,
}

impl SetBrancher {
    pub fn new(variables: &[SetVar]) -> SetBrancher {
        SetBrancher {
            variables: variables.to_vec(),
            start: 0,
        }
    }
}

impl Brancher for SetBrancher {
    fn name(&self) -> &str {
        "SetBrancher"
    }

    fn status(&mut self, domains: Domains) -> bool {
        while self.start < self.variables.len()
            && domains.set_domain(self.variables[self.start]).is_assigned()
        {
            self.start += 1;
        }
        self.start < self.variables.len()
    }

    fn choice(&mut self, domains: Domains) -> Box<dyn ChoiceDescription> {
        let variable = self.variables[self.start];
        let Some(value) = domains.set_domain(variable).unknown().next() else {
            panic!("An unassigned set variable has an undecided element");
        };
        Box::new(SetChoice { variable, value })
    }

    fn commit(
        &mut self,
        context: &mut PropagationContext,
        choice: &dyn ChoiceDescription,
        alternative: u32,
    ) -> Result<(), EmptyDomain> {
        let choice = choice.downcast_ref::<SetChoice>();
        gourd_assert_moderate!(
            choice.is_some(),
            "The SetBrancher can only commit its own choices"
        );
        let Some(choice) = choice else {
            return Err(EmptyDomain);
        };

        let _ = if alternative == 0 {
            context.include(choice.variable, choice.value)?
        } else {
            context.exclude(choice.variable, choice.value)?
        };
        Ok(())
    }
}

/// The choice made by a [`SetBrancher`]: `value ∈ variable | value ∉ variable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetChoice {
    pub variable: SetVar,
    pub value: i32,
}

impl ChoiceDescription for SetChoice {
    fn alternatives(&self) -> u32 {
        2
    }

    fn fmt_alternative(&self, alternative: u32, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = if alternative == 0 { "in" } else { "not in" };
        write!(f, "{} {operator} {:?}", self.value, self.variable)
    }

    fn literal(&self, alternative: u32) -> Option<Box<dyn AlternativeLiteral>> {
        Some(Box::new(SetLiteral {
            set: self.variable,
            value: self.value,
            included: alternative == 0,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IntBrancher;
    use crate::branching::ValueSelection;
    use crate::branching::VariableSelection;
    use crate::Space;
    use crate::SpaceStatus;

    #[test]
    fn smallest_undecided_element_is_included_first() {
        let mut space = Space::default();
        let set = space.new_set([2], [1, 2, 5], 0, 3).expect("consistent set");
        let _ = space.branch(SetBrancher::new(&[set]));
        assert_eq!(space.status(), SpaceStatus::Branch);

        let choice = space.choice();
        assert_eq!(choice.alternative(0).to_string(), "1 in s0");

        let mut excluded = space.clone();
        excluded.commit(&choice, 1);
        space.commit(&choice, 0);

        assert!(space.set_domain(set).is_included(1));
        assert!(!excluded.set_domain(set).may_contain(1));
    }

    #[test]
    #[should_panic(expected = "can only commit its own choices")]
    fn a_choice_of_another_brancher_is_rejected() {
        let mut integers = Space::default();
        let x = integers.new_integer(0, 3).expect("non-empty domain");
        let _ = integers.branch(IntBrancher::with_strategy(
            &[x],
            VariableSelection::InputOrder,
            ValueSelection::Min,
        ));
        assert_eq!(integers.status(), SpaceStatus::Branch);
        let choice = integers.choice();

        let mut sets = Space::default();
        let set = sets.new_set([], [1, 2], 0, 2).expect("consistent set");
        let _ = sets.branch(SetBrancher::new(&[set]));
        sets.commit(&choice, 0);
    }
}
