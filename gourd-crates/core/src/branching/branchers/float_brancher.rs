use crate::basic_types::EmptyDomain;
use crate::branching::Brancher;
use crate::branching::ChoiceDescription;
use crate::engine::variables::FloatVar;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::propagation::Domains;
use crate::propagation::PropagationContext;
use crate::propagation::ReadDomains;

/// A [`Brancher`] over float variables which bisects the first variable whose interval is wider
/// than the precision, trying the lower half first.
#[derive(Clone, Debug)]
pub struct FloatBrancher {
    variables: Vec<FloatVar>,
    precision: f64,
    start: usize,
}

impl FloatBrancher {
    /// Bisect the variables until every interval is at most `precision` wide.
    pub fn new(variables: &[FloatVar], precision: f64) -> FloatBrancher {
        gourd_assert_simple!(precision > 0.0, "The precision must be positive");
        FloatBrancher {
            variables: variables.to_vec(),
            precision,
            start: 0,
        }
    }
}

impl Brancher for FloatBrancher {
    fn name(&self) -> &str {
        "FloatBrancher"
    }

    fn status(&mut self, domains: Domains) -> bool {
        while self.start < self.variables.len()
            && domains.float_domain(self.variables[self.start]).width() <= self.precision
        {
            self.start += 1;
        }
        self.start < self.variables.len()
    }

    fn choice(&mut self, domains: Domains) -> Box<dyn ChoiceDescription> {
        let variable = self.variables[self.start];
        Box::new(FloatChoice {
            variable,
            value: domains.float_domain(variable).median(),
        })
    }

    fn commit(
        &mut self,
        context: &mut PropagationContext,
        choice: &dyn ChoiceDescription,
        alternative: u32,
    ) -> Result<(), EmptyDomain> {
        let choice = choice.downcast_ref::<FloatChoice>();
        gourd_assert_moderate!(
            choice.is_some(),
            "The FloatBrancher can only commit its own choices"
        );
        let Some(choice) = choice else {
            return Err(EmptyDomain);
        };

        let _ = if alternative == 0 {
            context.set_float_upper_bound(choice.variable, choice.value)?
        } else {
            context.set_float_lower_bound(choice.variable, choice.value)?
        };
        Ok(())
    }
}

/// The choice made by a [`FloatBrancher`]: `variable <= value | variable >= value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatChoice {
    pub variable: FloatVar,
    pub value: f64,
}

impl ChoiceDescription for FloatChoice {
    fn alternatives(&self) -> u32 {
        2
    }

    fn fmt_alternative(&self, alternative: u32, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = if alternative == 0 { "<=" } else { ">=" };
        write!(f, "{:?} {operator} {}", self.variable, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;
    use crate::SpaceStatus;

    #[test]
    fn bisection_stops_at_the_precision() {
        let mut space = Space::default();
        let x = space.new_float(0.0, 1.0).expect("non-empty interval");
        let _ = space.branch(FloatBrancher::new(&[x], 0.3));

        let mut depth = 0;
        while space.status() == SpaceStatus::Branch {
            let choice = space.choice();
            space.commit(&choice, 0);
            depth += 1;
        }

        assert_eq!(depth, 2);
        assert_eq!(space.float_domain(x).upper_bound(), 0.25);
    }
}
