//! Models and utilities shared by the integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;
use std::time::Duration;

use gourd_solver::branching::branchers::IntBrancher;
use gourd_solver::branching::value_selection::InDomainMin;
use gourd_solver::branching::variable_selection::InputOrder;
use gourd_solver::constraints;
use gourd_solver::models;
use gourd_solver::models::Model;
use gourd_solver::search::SearchEngine;
use gourd_solver::variables::DomainId;
use gourd_solver::Space;
use wait_timeout::ChildExt;

/// The n-queens model as a bare space, with the row variables.
pub(crate) fn queens(n: usize) -> (Space, Vec<DomainId>) {
    let mut model = models::queens(Space::default(), n).expect("valid model");
    let rows = model.rows.clone();
    (std::mem::take(model.space()), rows)
}

/// `x < y` and `y < x` over `{0, 1}`: fails during the propagation of the root.
pub(crate) fn infeasible_pair() -> Space {
    let mut space = Space::default();
    let x = space.new_integer(0, 1).expect("non-empty domain");
    let y = space.new_integer(0, 1).expect("non-empty domain");
    let _ = constraints::less_than(&mut space, x, y).expect("not failed");
    let _ = constraints::less_than(&mut space, y, x).expect("not failed");
    let _ = space.branch(IntBrancher::new(&[x, y], InputOrder, InDomainMin));
    space
}

/// `x + y = 6` over `[0, 3]`: propagation alone assigns both variables.
pub(crate) fn propagation_only() -> (Space, [DomainId; 2]) {
    let mut space = Space::default();
    let x = space.new_integer(0, 3).expect("non-empty domain");
    let y = space.new_integer(0, 3).expect("non-empty domain");
    let _ = constraints::linear_equal(&mut space, [x, y], 6).expect("not failed");
    let _ = space.branch(IntBrancher::new(&[x, y], InputOrder, InDomainMin));
    (space, [x, y])
}

/// Maximise `x` subject to `x + y = 10`, `x < y` over `[0, 10]`; the optimum is `x = 4`.
pub(crate) fn small_optimisation() -> (Space, DomainId) {
    let mut space = Space::default();
    let x = space.new_integer(0, 10).expect("non-empty domain");
    let y = space.new_integer(0, 10).expect("non-empty domain");
    let _ = constraints::linear_equal(&mut space, [x, y], 10).expect("not failed");
    let _ = constraints::less_than(&mut space, x, y).expect("not failed");
    space.maximise(x);
    let _ = space.branch(IntBrancher::new(&[x, y], InputOrder, InDomainMin));
    (space, x)
}

/// Run the engine to the end and collect the solutions.
pub(crate) fn all_solutions(engine: &mut dyn SearchEngine) -> Vec<Space> {
    let mut solutions = vec![];
    while let Some(solution) = engine.next() {
        solutions.push(solution);
    }
    solutions
}

/// The values of `variables` in `solution`, in order.
pub(crate) fn values(solution: &Space, variables: &[DomainId]) -> Vec<i32> {
    variables
        .iter()
        .map(|&variable| solution.value_of(variable).expect("solutions are assigned"))
        .collect()
}

/// Run the compiled binary with the given arguments and return its output.
pub(crate) fn run_solver<'a>(args: impl IntoIterator<Item = &'a str>) -> Output {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let solver = PathBuf::from(env!("CARGO_BIN_EXE_gourd-solver"));

    let mut child = Command::new(solver)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(_)) => {}
        Err(e) => panic!("error starting solver: {e}"),
    }

    child.wait_with_output().expect("Failed to read the output of the solver.")
}

/// The lines written to stdout which are not log messages.
pub(crate) fn output_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.starts_with("c "))
        .map(str::to_owned)
        .collect()
}
