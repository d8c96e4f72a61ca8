#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

//! Properties of propagation which hold for every model: the fixpoint does not depend on the
//! order in which propagators run, and narrowing never grows a domain.

use gourd_solver::constraints;
use gourd_solver::propagation::ReadDomains;
use gourd_solver::variables::DomainId;
use gourd_solver::ModEvent;
use gourd_solver::SchedulingPolicy;
use gourd_solver::Space;
use gourd_solver::SpaceStatus;
use proptest::prelude::*;

const LOWEST: i32 = -5;
const HIGHEST: i32 = 9;

/// A randomly generated model over a handful of integer variables.
#[derive(Clone, Debug)]
struct RandomModel {
    bounds: Vec<(i32, i32)>,
    weights: Vec<i32>,
    rhs: i32,
    sum: i32,
    differences: Vec<(usize, usize, i32)>,
}

fn model_strategy() -> impl Strategy<Value = RandomModel> {
    (2_usize..6)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((LOWEST..=HIGHEST, 0..8_i32), n),
                prop::collection::vec(prop_oneof![-3..=-1_i32, 1..=3_i32], n),
                -20..40_i32,
                0..30_i32,
                prop::collection::vec((0..n, 0..n, -2..=2_i32), 0..6),
            )
        })
        .prop_map(|(bounds, weights, rhs, sum, differences)| RandomModel {
            bounds: bounds
                .into_iter()
                .map(|(lower, width)| (lower, (lower + width).min(HIGHEST)))
                .collect(),
            weights,
            rhs,
            sum,
            differences: differences
                .into_iter()
                .filter(|(a, b, _)| a != b)
                .collect(),
        })
}

impl RandomModel {
    fn build(&self, policy: SchedulingPolicy) -> (Space, Vec<DomainId>) {
        let mut space = Space::with_scheduling(policy);
        let variables = self
            .bounds
            .iter()
            .map(|&(lower, upper)| space.new_integer(lower, upper).expect("lower <= upper"))
            .collect::<Vec<_>>();

        let _ = constraints::weighted_less_or_equal(&mut space, &self.weights, &variables, self.rhs)
            .expect("space is not failed");
        let _ = constraints::linear_equal(&mut space, variables.clone(), self.sum)
            .expect("space is not failed");
        for &(a, b, offset) in &self.differences {
            let _ = constraints::not_equals_with_offset(&mut space, variables[a], variables[b], offset)
                .expect("space is not failed");
        }

        (space, variables)
    }
}

/// The domains of the variables after propagation, or `None` if the space failed.
fn fixpoint(model: &RandomModel, policy: SchedulingPolicy) -> Option<Vec<Vec<i32>>> {
    let (mut space, variables) = model.build(policy);

    if space.status() == SpaceStatus::Failed {
        return None;
    }

    Some(
        variables
            .iter()
            .map(|variable| {
                (LOWEST..=HIGHEST)
                    .filter(|&value| space.contains(variable, value))
                    .collect()
            })
            .collect(),
    )
}

#[derive(Clone, Copy, Debug)]
enum Narrowing {
    LessOrEqual(i32),
    GreaterOrEqual(i32),
    NotEqual(i32),
    Equal(i32),
}

fn narrowing_strategy() -> impl Strategy<Value = Narrowing> {
    prop_oneof![
        (LOWEST..=HIGHEST).prop_map(Narrowing::LessOrEqual),
        (LOWEST..=HIGHEST).prop_map(Narrowing::GreaterOrEqual),
        (LOWEST..=HIGHEST).prop_map(Narrowing::NotEqual),
        (LOWEST..=HIGHEST).prop_map(Narrowing::Equal),
    ]
}

proptest! {
    #[test]
    fn the_fixpoint_does_not_depend_on_the_schedule(model in model_strategy(), seed in any::<u64>()) {
        let expected = fixpoint(&model, SchedulingPolicy::CostOrdered);

        prop_assert_eq!(&fixpoint(&model, SchedulingPolicy::Fifo), &expected);
        prop_assert_eq!(&fixpoint(&model, SchedulingPolicy::Randomised { seed }), &expected);
    }

    #[test]
    fn narrowing_never_grows_a_domain(
        narrowings in prop::collection::vec(narrowing_strategy(), 1..20),
    ) {
        let mut space = Space::default();
        let x = space.new_integer(LOWEST, HIGHEST).expect("lower <= upper");
        let mut size = space.size(&x);

        for narrowing in narrowings {
            let event = match narrowing {
                Narrowing::LessOrEqual(value) => space.int_lq(&x, value),
                Narrowing::GreaterOrEqual(value) => space.int_gq(&x, value),
                Narrowing::NotEqual(value) => space.int_nq(&x, value),
                Narrowing::Equal(value) => space.int_eq(&x, value),
            };

            if event == ModEvent::Failed {
                prop_assert!(space.is_failed());
                break;
            }

            let new_size = space.size(&x);
            prop_assert!(new_size <= size);
            prop_assert_eq!(event == ModEvent::None, new_size == size);
            prop_assert_eq!(event == ModEvent::Assigned, new_size == 1 && size > 1);
            size = new_size;
        }
    }
}
