use super::Model;
use crate::branching::branchers::IntBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::InputOrder;
use crate::constraints;
use crate::variables::DomainId;
use crate::ModelError;
use crate::Space;

/// A Golomb ruler with `n` marks: all distances between two marks are distinct, and the length
/// of the ruler is minimised.
#[derive(Debug)]
pub struct Golomb {
    space: Space,
    pub marks: Vec<DomainId>,
}

pub fn golomb(mut space: Space, n: usize) -> Result<Golomb, ModelError> {
    let upper_bound = (n * n) as i32;
    let marks = space.new_integers(n, 0, upper_bound)?;

    if let Some(first) = marks.first() {
        let _ = space.int_eq(first, 0);
    }
    for pair in marks.windows(2) {
        let _ = constraints::less_than(&mut space, pair[0], pair[1])?;
    }

    let mut distances = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            let distance = space.new_integer(1, upper_bound)?;
            // marks[j] - marks[i] - distance = 0
            let _ = constraints::weighted_equal(
                &mut space,
                &[1, -1, -1],
                &[marks[j], marks[i], distance],
                0,
            )?;
            distances.push(distance);
        }
    }

    if distances.len() > 1 {
        // Mirror symmetry: the first distance is shorter than the last one.
        let _ = constraints::less_than(&mut space, distances[0], distances[distances.len() - 1])?;
        let _ = constraints::all_different(&mut space, distances)?;
    }

    if let Some(&last) = marks.last() {
        space.minimise(last);
    }
    let _ = space.branch(IntBrancher::new(&marks, InputOrder, InDomainMin));

    Ok(Golomb { space, marks })
}

impl Golomb {
    /// The length of the ruler in `solution`.
    pub fn length(&self, solution: &Space) -> Option<i32> {
        self.marks.last().and_then(|&last| solution.value_of(last))
    }
}

impl Model for Golomb {
    fn space(&mut self) -> &mut Space {
        &mut self.space
    }

    fn format_solution(&self, solution: &Space) -> String {
        let marks = self
            .marks
            .iter()
            .filter_map(|&mark| solution.value_of(mark))
            .map(|value| value.to_string())
            .collect::<Vec<_>>();

        match self.length(solution) {
            Some(length) => format!("marks = [{}], length = {length}", marks.join(", ")),
            None => format!("marks = [{}]", marks.join(", ")),
        }
    }
}
