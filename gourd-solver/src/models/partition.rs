use super::Model;
use crate::branching::branchers::SetBrancher;
use crate::constraints;
use crate::propagation::ReadDomains;
use crate::variables::SetVar;
use crate::ModelError;
use crate::Space;

/// Split the numbers `1..=n` into two halves of the same size.
///
/// The half containing `1` is the set variable `half`, the other half is its complement. For odd
/// `n` the half containing `1` is the smaller one.
#[derive(Debug)]
pub struct Partition {
    space: Space,
    pub half: SetVar,
    n: i32,
}

pub fn partition(mut space: Space, n: usize) -> Result<Partition, ModelError> {
    let n = n as i32;
    let half = space.new_set([1], 1..=n, 0, n as u32)?;

    let cardinality = space.new_integer(0, n)?;
    let _ = constraints::set_cardinality(&mut space, half, cardinality)?;
    let _ = space.int_eq(&cardinality, n / 2);

    let _ = space.branch(SetBrancher::new(&[half]));

    Ok(Partition { space, half, n })
}

impl Model for Partition {
    fn space(&mut self) -> &mut Space {
        &mut self.space
    }

    fn format_solution(&self, solution: &Space) -> String {
        let domain = solution.set_domain(self.half);

        let render = |values: Vec<i32>| {
            values
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let included = domain.glb().to_vec();
        let excluded = (1..=self.n)
            .filter(|&value| !domain.may_contain(value))
            .collect::<Vec<_>>();

        format!("{{{}}} | {{{}}}", render(included), render(excluded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search;
    use crate::search::SearchOptions;

    #[test]
    fn every_half_containing_one_is_found() {
        let mut model = partition(Space::default(), 6).expect("valid model");
        let mut engine = search::dfs(model.space(), SearchOptions::default()).expect("valid");

        let mut solutions = vec![];
        while let Some(solution) = engine.next() {
            solutions.push(model.format_solution(&solution));
        }

        // Choose two of the five numbers 2..=6.
        assert_eq!(solutions.len(), 10);
        assert!(solutions.contains(&"{1, 2, 3} | {4, 5, 6}".to_owned()));
    }

    #[test]
    fn one_number_cannot_be_split() {
        let mut model = partition(Space::default(), 1).expect("valid model");
        let mut engine = search::dfs(model.space(), SearchOptions::default()).expect("valid");

        assert!(engine.next().is_none());
    }
}
