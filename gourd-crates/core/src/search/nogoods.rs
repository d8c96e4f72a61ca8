use std::fmt::Display;

use crate::basic_types::ModelError;
use crate::branching::Choice;
use crate::propagators::NoGoodLevel;
use crate::propagators::NoGoodsPropagatorArgs;
use crate::Space;

/// A literal of a no-good extracted from the search path.
///
/// Together with the alternatives taken on the edges above `depth`, it describes a subtree which
/// has been explored completely: committing `alternative` of `choice` at `depth` cannot lead to a
/// solution which was not reported already.
#[derive(Clone, Debug)]
pub struct NoGoodLiteral {
    pub depth: usize,
    pub choice: Choice,
    pub alternative: u32,
}

impl Display for NoGoodLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.depth, self.choice.alternative(self.alternative))
    }
}

/// The no-goods of a search path, from the root down to the no-good depth limit.
///
/// Every edge contributes the alternatives left of the one it took; these are explored
/// completely, given the alternatives taken above them.
#[derive(Clone, Debug, Default)]
pub struct NoGoods {
    /// The choice of every edge and the alternative it took.
    edges: Vec<(Choice, u32)>,
}

impl NoGoods {
    pub(crate) fn new(edges: Vec<(Choice, u32)>) -> NoGoods {
        NoGoods { edges }
    }

    /// The number of literals.
    pub fn len(&self) -> usize {
        self.edges.iter().map(|(_, taken)| *taken as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The literals ordered by depth.
    pub fn literals(&self) -> impl Iterator<Item = NoGoodLiteral> + '_ {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(depth, (choice, taken))| {
                (0..*taken).map(move |alternative| NoGoodLiteral {
                    depth,
                    choice: choice.clone(),
                    alternative,
                })
            })
    }

    /// Post the no-goods into `space`, which must have the variables of the space they were
    /// extracted from.
    ///
    /// The no-goods are cut off at the first taken alternative which cannot be expressed as a
    /// literal; explored alternatives without a literal are left out.
    pub fn post(&self, space: &mut Space) -> Result<(), ModelError> {
        let mut levels = vec![];

        for (depth, (choice, taken)) in self.edges.iter().enumerate() {
            let description = choice.description();
            let explored = (0..*taken)
                .filter_map(|alternative| description.literal(alternative))
                .collect::<Vec<_>>();
            let taken = if depth + 1 < self.edges.len() {
                description.literal(*taken)
            } else {
                None
            };

            let is_last = taken.is_none();
            levels.push(NoGoodLevel { explored, taken });
            if is_last {
                break;
            }
        }

        while levels.last().is_some_and(|level| level.explored.is_empty()) {
            let _ = levels.pop();
        }
        let Some(last) = levels.last_mut() else {
            return Ok(());
        };
        last.taken = None;

        log::debug!("posting no-goods over {} levels", levels.len());
        let _ = space.post(NoGoodsPropagatorArgs { levels })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IntBrancher;
    use crate::branching::ValueSelection;
    use crate::branching::VariableSelection;
    use crate::constraints;
    use crate::engine::variables::DomainId;
    use crate::search;
    use crate::search::SearchOptions;
    use crate::termination::NodeBudget;

    fn permutations(value_selection: ValueSelection) -> (Space, Vec<DomainId>) {
        let mut space = Space::default();
        let variables = space.new_integers(4, 0, 3).expect("non-empty domain");
        let _ = constraints::all_different(&mut space, variables.clone()).expect("posted");
        let _ = space.branch(IntBrancher::with_strategy(
            &variables,
            VariableSelection::InputOrder,
            value_selection,
        ));
        (space, variables)
    }

    fn values(solution: &Space, variables: &[DomainId]) -> Vec<i32> {
        variables
            .iter()
            .map(|&variable| solution.value_of(variable).expect("assigned"))
            .collect()
    }

    #[test]
    fn the_nogoods_of_a_stopped_search_exclude_exactly_what_it_explored() {
        let selections = [
            ValueSelection::Min,
            ValueSelection::Split,
            ValueSelection::AllValues,
        ];

        for value_selection in selections {
            for budget in [1, 4, 9, 17, 30] {
                let (mut space, variables) = permutations(value_selection);
                let mut master = space.clone();

                let options = SearchOptions::default().with_stop(NodeBudget::new(budget));
                let mut engine = search::dfs(&mut space, options).expect("valid options");
                let mut found = vec![];
                while let Some(solution) = engine.next() {
                    found.push(values(&solution, &variables));
                }
                assert!(engine.stopped());

                engine
                    .nogoods()
                    .post(&mut master)
                    .expect("the master is not failed");

                let mut rest =
                    search::dfs(&mut master, SearchOptions::default()).expect("valid options");
                while let Some(solution) = rest.next() {
                    let solution = values(&solution, &variables);
                    assert!(
                        !found.contains(&solution),
                        "{solution:?} is found again after {budget} nodes with {value_selection:?}"
                    );
                    found.push(solution);
                }

                assert_eq!(
                    found.len(),
                    24,
                    "solutions lost after {budget} nodes with {value_selection:?}"
                );
            }
        }
    }

    #[test]
    fn literals_are_ordered_by_depth() {
        let (mut space, _) = permutations(ValueSelection::Min);
        let options = SearchOptions::default().with_stop(NodeBudget::new(12));
        let mut engine = search::dfs(&mut space, options).expect("valid options");
        while engine.next().is_some() {}

        let nogoods = engine.nogoods();
        let depths = nogoods
            .literals()
            .map(|literal| literal.depth)
            .collect::<Vec<_>>();

        assert!(!nogoods.is_empty());
        assert_eq!(depths.len(), nogoods.len());
        assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
