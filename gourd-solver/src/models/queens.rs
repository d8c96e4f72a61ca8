use super::Model;
use crate::branching::branchers::IntBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::FirstFail;
use crate::constraints;
use crate::variables::DomainId;
use crate::ModelError;
use crate::Space;

/// Place `n` queens on an `n` by `n` board such that no two queens attack each other.
///
/// `rows[i]` is the row of the queen in column `i`.
#[derive(Debug)]
pub struct Queens {
    space: Space,
    pub rows: Vec<DomainId>,
}

pub fn queens(mut space: Space, n: usize) -> Result<Queens, ModelError> {
    let rows = space.new_integers(n, 0, n as i32 - 1)?;

    for i in 0..n {
        for j in i + 1..n {
            let offset = (j - i) as i32;
            let _ = constraints::not_equals(&mut space, rows[i], rows[j])?;
            let _ = constraints::not_equals_with_offset(&mut space, rows[i], rows[j], offset)?;
            let _ = constraints::not_equals_with_offset(&mut space, rows[i], rows[j], -offset)?;
        }
    }

    let _ = space.branch(IntBrancher::new(&rows, FirstFail, InDomainMin));

    Ok(Queens { space, rows })
}

impl Model for Queens {
    fn space(&mut self) -> &mut Space {
        &mut self.space
    }

    fn format_solution(&self, solution: &Space) -> String {
        let rows = self
            .rows
            .iter()
            .map(|&row| match solution.value_of(row) {
                Some(value) => value.to_string(),
                None => "_".to_owned(),
            })
            .collect::<Vec<_>>();

        format!("rows = [{}]", rows.join(", "))
    }
}
