/// A symmetry of the variables of an [`IntBrancher`](super::branchers::IntBrancher), used for
/// symmetry breaking during search.
///
/// When the alternative `x_i != v` of an equality choice is committed, every literal which is
/// symmetric to `x_i = v` under a symmetry that is still intact is excluded as well. Committing
/// `x_i = v` breaks the symmetries which move `x_i` or `v`, so the brancher keeps its
/// symmetries up to date as the search descends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// The variables at the given positions of the brancher can be permuted freely.
    VariableInterchange(Vec<usize>),
    /// The given values can be permuted freely.
    ValueInterchange(Vec<i32>),
}

impl Symmetry {
    /// Account for the decision that the variable at `position` takes `value`.
    pub(crate) fn update(&mut self, position: usize, value: i32) {
        match self {
            Symmetry::VariableInterchange(positions) => positions.retain(|&other| other != position),
            Symmetry::ValueInterchange(values) => values.retain(|&other| other != value),
        }
    }

    /// The literals `(position, value)` which are symmetric to the given literal.
    pub(crate) fn symmetric_literals(
        &self,
        position: usize,
        value: i32,
    ) -> impl Iterator<Item = (usize, i32)> + '_ {
        let mut positions: &[usize] = &[];
        let mut values: &[i32] = &[];
        match self {
            Symmetry::VariableInterchange(interchangeable) if interchangeable.contains(&position) => {
                positions = interchangeable.as_slice();
            }
            Symmetry::ValueInterchange(interchangeable) if interchangeable.contains(&value) => {
                values = interchangeable.as_slice();
            }
            _ => {}
        }

        positions
            .iter()
            .filter(move |&&other| other != position)
            .map(move |&other| (other, value))
            .chain(
                values
                    .iter()
                    .filter(move |&&other| other != value)
                    .map(move |&other| (position, other)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interchangeable_variables_take_the_same_value() {
        let symmetry = Symmetry::VariableInterchange(vec![0, 2, 3]);

        let literals = symmetry.symmetric_literals(2, 7).collect::<Vec<_>>();

        assert_eq!(literals, vec![(0, 7), (3, 7)]);
    }

    #[test]
    fn interchangeable_values_stay_on_the_same_variable() {
        let symmetry = Symmetry::ValueInterchange(vec![1, 2, 3]);

        let literals = symmetry.symmetric_literals(4, 1).collect::<Vec<_>>();

        assert_eq!(literals, vec![(4, 2), (4, 3)]);
    }

    #[test]
    fn decided_variables_leave_the_symmetry() {
        let mut symmetry = Symmetry::VariableInterchange(vec![0, 1, 2]);
        symmetry.update(0, 5);

        assert_eq!(symmetry.symmetric_literals(0, 5).count(), 0);
        assert_eq!(
            symmetry.symmetric_literals(1, 5).collect::<Vec<_>>(),
            vec![(2, 5)]
        );
    }
}
