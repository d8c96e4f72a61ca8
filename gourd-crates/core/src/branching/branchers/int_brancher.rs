use crate::basic_types::EmptyDomain;
use crate::branching::value_selection::ValueChoice;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::AlternativeLiteral;
use crate::branching::Brancher;
use crate::branching::ChoiceDescription;
use crate::branching::IntLiteral;
use crate::branching::IntRelation;
use crate::branching::Symmetry;
use crate::branching::ValueSelection;
use crate::branching::VariableSelection;
use crate::engine::variables::IntegerVariable;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::propagation::Domains;
use crate::propagation::PropagationContext;
use crate::propagation::ReadDomains;

/// A [`Brancher`] over integer variables which first selects a variable with a
/// [`VariableSelector`] and then splits its domain with a [`ValueSelector`].
///
/// Optionally, the brancher breaks [`Symmetry`]s of the variables during search: whenever the
/// alternative `x_i != v` is committed, the literals symmetric to `x_i = v` are excluded too.
#[derive(Clone, Debug)]
pub struct IntBrancher<Var> {
    variables: Vec<Var>,
    /// Every variable before this position is assigned.
    start: usize,
    variable_selector: Box<dyn VariableSelector<Var>>,
    value_selector: Box<dyn ValueSelector<Var>>,
    symmetries: Vec<Symmetry>,
}

impl<Var: IntegerVariable> IntBrancher<Var> {
    pub fn new(
        variables: &[Var],
        variable_selector: impl VariableSelector<Var> + 'static,
        value_selector: impl ValueSelector<Var> + 'static,
    ) -> Self {
        if variables.is_empty() {
            log::warn!("The IntBrancher was not provided with any variables");
        }
        IntBrancher {
            variables: variables.to_vec(),
            start: 0,
            variable_selector: Box::new(variable_selector),
            value_selector: Box::new(value_selector),
            symmetries: vec![],
        }
    }

    /// Create a brancher with one of the predefined strategies.
    pub fn with_strategy(
        variables: &[Var],
        variable_selection: VariableSelection,
        value_selection: ValueSelection,
    ) -> Self {
        IntBrancher {
            variables: variables.to_vec(),
            start: 0,
            variable_selector: variable_selection.into_selector(),
            value_selector: value_selection.into_selector(),
            symmetries: vec![],
        }
    }

    /// Break the given symmetries during search.
    ///
    /// The positions in a [`Symmetry::VariableInterchange`] refer to the order of the variables
    /// given to this brancher.
    pub fn with_symmetries(mut self, symmetries: impl IntoIterator<Item = Symmetry>) -> Self {
        self.symmetries.extend(symmetries);
        gourd_assert_simple!(self.symmetries.iter().all(|symmetry| match symmetry {
            Symmetry::VariableInterchange(positions) => {
                positions.iter().all(|&position| position < self.variables.len())
            }
            Symmetry::ValueInterchange(_) => true,
        }));
        self
    }

    fn commit_equality(
        &mut self,
        context: &mut PropagationContext,
        choice: &IntChoice<Var>,
        value: i32,
        alternative: u32,
    ) -> Result<(), EmptyDomain> {
        if alternative == 0 {
            self.symmetries
                .iter_mut()
                .for_each(|symmetry| symmetry.update(choice.position, value));
            let _ = context.assign(&choice.variable, value)?;
            return Ok(());
        }

        let _ = context.remove(&choice.variable, value)?;
        for symmetry in &self.symmetries {
            for (position, symmetric_value) in symmetry.symmetric_literals(choice.position, value)
            {
                let _ = context.remove(&self.variables[position], symmetric_value)?;
            }
        }
        Ok(())
    }
}

impl<Var: IntegerVariable> Brancher for IntBrancher<Var> {
    fn name(&self) -> &str {
        "IntBrancher"
    }

    fn status(&mut self, domains: Domains) -> bool {
        while self.start < self.variables.len() && domains.is_fixed(&self.variables[self.start]) {
            self.start += 1;
        }
        self.start < self.variables.len()
    }

    fn choice(&mut self, domains: Domains) -> Box<dyn ChoiceDescription> {
        let position = self
            .variable_selector
            .select_variable(domains, &self.variables, self.start);
        gourd_assert_simple!(!domains.is_fixed(&self.variables[position]));

        let variable = self.variables[position].clone();
        let value = self.value_selector.select_value(domains, &variable);
        Box::new(IntChoice {
            position,
            variable,
            value,
            breaks_symmetries: !self.symmetries.is_empty(),
        })
    }

    fn commit(
        &mut self,
        context: &mut PropagationContext,
        choice: &dyn ChoiceDescription,
        alternative: u32,
    ) -> Result<(), EmptyDomain> {
        let choice = choice.downcast_ref::<IntChoice<Var>>();
        gourd_assert_moderate!(
            choice.is_some(),
            "The IntBrancher can only commit its own choices"
        );
        let Some(choice) = choice else {
            return Err(EmptyDomain);
        };

        match choice.value {
            ValueChoice::Equal(value) => {
                return self.commit_equality(context, choice, value, alternative);
            }
            ValueChoice::LessOrEqual(value) if alternative == 0 => {
                let _ = context.set_upper_bound(&choice.variable, value)?;
            }
            ValueChoice::LessOrEqual(value) => {
                let _ = context.set_lower_bound(&choice.variable, value + 1)?;
            }
            ValueChoice::GreaterOrEqual(value) if alternative == 0 => {
                let _ = context.set_lower_bound(&choice.variable, value)?;
            }
            ValueChoice::GreaterOrEqual(value) => {
                let _ = context.set_upper_bound(&choice.variable, value - 1)?;
            }
            ValueChoice::Values(ref values) => {
                let _ = context.assign(&choice.variable, values[alternative as usize])?;
            }
        }
        Ok(())
    }
}

/// The choice made by an [`IntBrancher`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntChoice<Var> {
    /// The position of the variable among the variables of the brancher.
    pub position: usize,
    pub variable: Var,
    pub value: ValueChoice,
    /// Committing an alternative also updates the symmetries of the brancher.
    breaks_symmetries: bool,
}

impl<Var: IntegerVariable> ChoiceDescription for IntChoice<Var> {
    fn alternatives(&self) -> u32 {
        self.value.alternatives()
    }

    fn fmt_alternative(&self, alternative: u32, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variable = &self.variable;
        match (&self.value, alternative) {
            (ValueChoice::Equal(value), 0) => write!(f, "{variable:?} = {value}"),
            (ValueChoice::Equal(value), _) => write!(f, "{variable:?} != {value}"),
            (ValueChoice::LessOrEqual(value), 0) => write!(f, "{variable:?} <= {value}"),
            (ValueChoice::LessOrEqual(value), _) => write!(f, "{variable:?} > {value}"),
            (ValueChoice::GreaterOrEqual(value), 0) => write!(f, "{variable:?} >= {value}"),
            (ValueChoice::GreaterOrEqual(value), _) => write!(f, "{variable:?} < {value}"),
            (ValueChoice::Values(values), alternative) => {
                write!(f, "{variable:?} = {}", values[alternative as usize])
            }
        }
    }

    fn literal(&self, alternative: u32) -> Option<Box<dyn AlternativeLiteral>> {
        if self.breaks_symmetries {
            return None;
        }

        let (relation, value) = match (&self.value, alternative) {
            (ValueChoice::Equal(value), 0) => (IntRelation::Equal, *value),
            (ValueChoice::Equal(value), _) => (IntRelation::NotEqual, *value),
            (ValueChoice::LessOrEqual(value), 0) => (IntRelation::LessOrEqual, *value),
            (ValueChoice::LessOrEqual(value), _) => {
                (IntRelation::GreaterOrEqual, value.checked_add(1)?)
            }
            (ValueChoice::GreaterOrEqual(value), 0) => (IntRelation::GreaterOrEqual, *value),
            (ValueChoice::GreaterOrEqual(value), _) => {
                (IntRelation::LessOrEqual, value.checked_sub(1)?)
            }
            (ValueChoice::Values(values), alternative) => {
                (IntRelation::Equal, *values.get(alternative as usize)?)
            }
        };

        Some(Box::new(IntLiteral {
            variable: self.variable.clone(),
            relation,
            value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::engine::variables::DomainId;
    use crate::Space;
    use crate::SpaceStatus;

    fn branching_space(symmetries: Vec<Symmetry>) -> (Space, Vec<DomainId>) {
        let mut space = Space::default();
        let variables = space.new_integers(3, 1, 3).expect("non-empty domains");
        let _ = space.branch(
            IntBrancher::new(&variables, InputOrder, InDomainMin).with_symmetries(symmetries),
        );
        (space, variables)
    }

    #[test]
    fn equality_choice_has_two_alternatives() {
        let (mut space, variables) = branching_space(vec![]);
        assert_eq!(space.status(), SpaceStatus::Branch);

        let choice = space.choice();

        assert_eq!(choice.alternatives(), 2);
        assert_eq!(choice.alternative(0).to_string(), "x0 = 1");
        assert_eq!(choice.alternative(1).to_string(), "x0 != 1");

        let mut left = space.clone();
        left.commit(&choice, 0);
        assert_eq!(left.value_of(variables[0]), Some(1));

        space.commit(&choice, 1);
        assert_eq!(space.lower_bound_of(variables[0]), 2);
    }

    #[test]
    fn right_alternative_excludes_symmetric_literals() {
        let (mut space, variables) =
            branching_space(vec![Symmetry::VariableInterchange(vec![0, 1, 2])]);
        assert_eq!(space.status(), SpaceStatus::Branch);

        let choice = space.choice();
        space.commit(&choice, 1);

        for variable in variables {
            assert_eq!(space.lower_bound_of(variable), 2);
        }
    }

    #[test]
    fn left_alternative_breaks_the_symmetry_of_the_assigned_variable() {
        let (mut space, variables) =
            branching_space(vec![Symmetry::VariableInterchange(vec![0, 1, 2])]);
        assert_eq!(space.status(), SpaceStatus::Branch);
        let first = space.choice();
        space.commit(&first, 0);

        assert_eq!(space.status(), SpaceStatus::Branch);
        let second = space.choice();
        space.commit(&second, 1);

        assert_eq!(space.value_of(variables[0]), Some(1));
        assert_eq!(space.lower_bound_of(variables[1]), 2);
        assert_eq!(space.lower_bound_of(variables[2]), 2);
    }

    #[test]
    fn alternatives_are_described_by_literals_unless_symmetries_are_broken() {
        let (mut space, variables) = branching_space(vec![]);
        assert_eq!(space.status(), SpaceStatus::Branch);
        let choice = space.choice();

        let left = choice.description().literal(0).expect("an equality");
        let right = choice.description().literal(1).expect("a disequality");
        assert_eq!(left.truth_value(space.domains()), None);

        let _ = space.int_eq(&variables[0], 1);
        assert_eq!(left.truth_value(space.domains()), Some(true));
        assert_eq!(right.truth_value(space.domains()), Some(false));

        let (mut symmetric, _) =
            branching_space(vec![Symmetry::VariableInterchange(vec![0, 1, 2])]);
        assert_eq!(symmetric.status(), SpaceStatus::Branch);
        assert!(symmetric.choice().description().literal(0).is_none());
    }

    #[test]
    fn brancher_is_done_once_all_variables_are_assigned() {
        let (mut space, variables) = branching_space(vec![]);
        for variable in &variables {
            let _ = space.int_eq(variable, 2);
        }

        assert_eq!(space.status(), SpaceStatus::Solved);
    }

    #[test]
    fn all_values_creates_one_alternative_per_value() {
        let mut space = Space::default();
        let x = space
            .new_integer_from_values([2, 4, 8])
            .expect("non-empty domain");
        let _ = space.branch(IntBrancher::with_strategy(
            &[x],
            VariableSelection::InputOrder,
            ValueSelection::AllValues,
        ));
        assert_eq!(space.status(), SpaceStatus::Branch);

        let choice = space.choice();
        assert_eq!(choice.alternatives(), 3);

        space.commit(&choice, 2);
        assert_eq!(space.value_of(x), Some(8));
    }
}
