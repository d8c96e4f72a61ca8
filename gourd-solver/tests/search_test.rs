#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use std::collections::BTreeSet;
use std::sync::Arc;

use gourd_solver::branching::branchers::IntBrancher;
use gourd_solver::branching::value_selection::InDomainMin;
use gourd_solver::branching::variable_selection::InputOrder;
use gourd_solver::branching::Symmetry;
use gourd_solver::constraints;
use gourd_solver::search;
use gourd_solver::sequence_generators::SequenceGeneratorType;
use gourd_solver::search::tracer::NodeKind;
use gourd_solver::search::tracer::TraceEvent;
use gourd_solver::search::tracer::TraceRecorder;
use gourd_solver::search::EngineKind;
use gourd_solver::search::SearchOptions;
use gourd_solver::search::SearchStatistics;
use gourd_solver::termination::TerminationCondition;
use gourd_solver::Space;
use helpers::all_solutions;
use helpers::infeasible_pair;
use helpers::propagation_only;
use helpers::queens;
use helpers::small_optimisation;
use helpers::values;

fn queens_solutions(options: SearchOptions) -> BTreeSet<Vec<i32>> {
    let (mut space, rows) = queens(8);
    let mut engine = search::dfs(&mut space, options).expect("valid options");

    let solutions = all_solutions(engine.as_mut());
    assert_eq!(engine.statistics().solutions, solutions.len() as u64);

    solutions
        .iter()
        .map(|solution| values(solution, &rows))
        .collect()
}

#[test]
fn eight_queens_has_92_solutions() {
    let solutions = queens_solutions(SearchOptions::default());

    assert_eq!(solutions.len(), 92);
}

#[test]
fn the_copy_distances_do_not_change_the_solutions() {
    let expected = queens_solutions(SearchOptions::default());

    for (copy_distance, adaptive_distance) in [(1, 0), (1, 2), (3, 1), (100, 2), (100, 100)] {
        let options = SearchOptions::default()
            .with_copy_distance(copy_distance)
            .with_adaptive_distance(adaptive_distance);

        assert_eq!(
            queens_solutions(options),
            expected,
            "c_d = {copy_distance}, a_d = {adaptive_distance}"
        );
    }
}

#[test]
fn parallel_search_finds_the_same_solutions() {
    let expected = queens_solutions(SearchOptions::default());

    let solutions = queens_solutions(SearchOptions::default().with_threads(4));

    assert_eq!(solutions, expected);
}

#[test]
fn parallel_search_reports_every_solution_once() {
    let (mut space, _) = queens(8);
    let mut engine =
        search::dfs(&mut space, SearchOptions::default().with_threads(4)).expect("valid options");

    assert_eq!(all_solutions(engine.as_mut()).len(), 92);
}

#[test]
fn branch_and_bound_reports_strictly_better_solutions() {
    let (mut space, x) = small_optimisation();
    let mut engine = search::bab(&mut space, SearchOptions::default()).expect("valid options");

    let objectives = all_solutions(engine.as_mut())
        .iter()
        .map(|solution| solution.value_of(x).expect("assigned"))
        .collect::<Vec<_>>();

    assert!(objectives.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(objectives.last(), Some(&4));
}

#[test]
fn parallel_branch_and_bound_finds_the_optimum() {
    let (mut space, x) = small_optimisation();
    let options = SearchOptions::default().with_threads(3);
    let mut engine = search::bab(&mut space, options).expect("valid options");

    let solutions = all_solutions(engine.as_mut());

    assert_eq!(solutions.last().and_then(|best| best.value_of(x)), Some(4));
}

#[test]
fn restarts_find_the_optimum() {
    let (mut space, x) = small_optimisation();
    let mut engine =
        search::engine(EngineKind::Rbs, &mut space, SearchOptions::default()).expect("valid");

    let solutions = all_solutions(engine.as_mut());

    assert_eq!(solutions.last().and_then(|best| best.value_of(x)), Some(4));
    assert_eq!(engine.statistics().restarts, solutions.len() as u64);
}

#[test]
fn an_infeasible_root_fails_once() {
    let mut space = infeasible_pair();
    let mut engine = search::dfs(&mut space, SearchOptions::default()).expect("valid options");

    assert!(engine.next().is_none());
    assert!(!engine.stopped());

    let statistics = engine.statistics();
    assert_eq!(statistics.fails, 1);
    assert_eq!(statistics.solutions, 0);
}

#[test]
fn propagation_alone_solves_the_root() {
    let (mut space, variables) = propagation_only();
    let mut engine = search::dfs(&mut space, SearchOptions::default()).expect("valid options");

    let solutions = all_solutions(engine.as_mut());

    assert_eq!(solutions.len(), 1);
    assert_eq!(values(&solutions[0], &variables), vec![3, 3]);
    assert_eq!(engine.statistics().nodes, 1);
    assert_eq!(engine.statistics().fails, 0);
}

/// Stops the search every `interval` nodes.
#[derive(Debug)]
struct Interrupt {
    interval: u64,
    last: u64,
}

impl TerminationCondition for Interrupt {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        if statistics.nodes > 0
            && statistics.nodes % self.interval == 0
            && statistics.nodes != self.last
        {
            self.last = statistics.nodes;
            return true;
        }
        false
    }
}

#[test]
fn a_stopped_search_resumes_where_it_left_off() {
    let (mut space, rows) = queens(6);
    let options = SearchOptions::default().with_stop(Interrupt {
        interval: 7,
        last: 0,
    });
    let mut engine = search::dfs(&mut space, options).expect("valid options");

    let mut solutions = BTreeSet::new();
    let mut stops = 0;
    loop {
        match engine.next() {
            Some(solution) => {
                assert!(solutions.insert(values(&solution, &rows)));
            }
            None if engine.stopped() => stops += 1,
            None => break,
        }
    }

    assert!(stops > 0);
    assert_eq!(solutions.len(), 4);
}

#[test]
fn symmetry_breaking_keeps_one_representative() {
    let mut space = Space::default();
    let variables = space.new_integers(3, 0, 1).expect("non-empty domains");
    let _ = constraints::linear_equal(&mut space, variables.clone(), 1).expect("not failed");
    let _ = space.branch(
        IntBrancher::new(&variables, InputOrder, InDomainMin)
            .with_symmetries([Symmetry::VariableInterchange(vec![0, 1, 2])]),
    );

    let mut engine = search::dfs(&mut space, SearchOptions::default()).expect("valid options");
    let solutions = all_solutions(engine.as_mut());

    assert_eq!(solutions.len(), 1);
    assert_eq!(values(&solutions[0], &variables), vec![0, 0, 1]);
}

#[test]
fn limited_discrepancy_search_finds_the_leftmost_solution_first() {
    let (mut dfs_space, rows) = queens(6);
    let mut lds_space = dfs_space.clone();

    let mut dfs = search::dfs(&mut dfs_space, SearchOptions::default()).expect("valid options");
    let mut lds = search::lds(
        &mut lds_space,
        SearchOptions::default().with_discrepancy_limit(usize::MAX),
    )
    .expect("valid options");

    let first = dfs.next().expect("six queens fit");
    let lds_solutions = all_solutions(lds.as_mut());

    assert_eq!(lds_solutions.len(), 4);
    assert!(lds_solutions
        .iter()
        .any(|solution| values(solution, &rows) == values(&first, &rows)));
}

#[test]
fn the_tracer_sees_every_node() {
    let (mut space, _) = queens(5);
    let recorder = Arc::new(TraceRecorder::default());
    let options = SearchOptions::default()
        .with_copy_distance(2)
        .with_tracer(Arc::clone(&recorder));

    let mut engine = search::dfs(&mut space, options).expect("valid options");
    let solutions = all_solutions(engine.as_mut());
    let statistics = engine.statistics();
    drop(engine);

    let nodes = recorder.nodes();
    assert_eq!(nodes.len() as u64, statistics.nodes);
    assert_eq!(
        nodes
            .iter()
            .filter(|(_, node)| node.kind == NodeKind::Solved)
            .count(),
        solutions.len()
    );
    assert_eq!(
        nodes
            .iter()
            .filter(|(_, node)| node.kind == NodeKind::Failed)
            .count() as u64,
        statistics.fails
    );

    // Only the root has no parent.
    assert_eq!(
        nodes.iter().filter(|(edge, _)| edge.parent.is_none()).count(),
        1
    );
    assert_eq!(recorder.events().first(), Some(&TraceEvent::Round(0)));
    assert_eq!(recorder.events().last(), Some(&TraceEvent::Done));
}

#[test]
fn nogoods_describe_the_explored_left_alternatives() {
    let (mut space, _) = queens(6);
    let mut engine = search::dfs(&mut space, SearchOptions::default()).expect("valid options");

    let _ = engine.next().expect("six queens fit");
    let nogoods = engine.nogoods();
    let depths = nogoods
        .literals()
        .map(|literal| literal.depth)
        .collect::<Vec<_>>();

    assert!(!nogoods.is_empty());
    assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(engine.statistics().nogoods, nogoods.len() as u64);
}

#[test]
fn restarts_with_a_constant_cutoff_find_every_solution() {
    let expected = queens_solutions(SearchOptions::default());

    let (mut space, rows) = queens(8);
    let options = SearchOptions::default()
        .with_cutoff(SequenceGeneratorType::Constant.create(2, 1.0));
    let mut engine = search::rbs(&mut space, options).expect("valid options");

    let solutions = all_solutions(engine.as_mut())
        .iter()
        .map(|solution| values(solution, &rows))
        .collect::<Vec<_>>();

    assert_eq!(solutions.len(), 92);
    assert_eq!(solutions.into_iter().collect::<BTreeSet<_>>(), expected);
    assert!(engine.statistics().restarts > 0);
    assert!(!engine.stopped());
}

#[test]
fn limited_discrepancy_search_reports_whether_it_saw_the_whole_tree() {
    let (mut space, _) = queens(6);
    let mut limited = search::lds(
        &mut space.clone(),
        SearchOptions::default().with_discrepancy_limit(1),
    )
    .expect("valid options");
    let mut unlimited = search::lds(
        &mut space,
        SearchOptions::default().with_discrepancy_limit(usize::MAX),
    )
    .expect("valid options");

    let _ = all_solutions(limited.as_mut());
    let _ = all_solutions(unlimited.as_mut());

    assert!(!limited.stopped());
    assert!(!limited.is_complete());
    assert!(limited.statistics().depth > 0);
    assert!(unlimited.is_complete());
}

#[test]
fn parallel_and_sequential_search_agree_on_many_solutions() {
    let (mut sequential_space, rows) = queens(9);
    let parallel_space = sequential_space.clone();

    let mut sequential =
        search::dfs(&mut sequential_space, SearchOptions::default()).expect("valid options");
    let expected = all_solutions(sequential.as_mut())
        .iter()
        .map(|solution| values(solution, &rows))
        .collect::<Vec<_>>();

    for threads in [2, 4] {
        let options = SearchOptions::default()
            .with_threads(threads)
            .with_steal_limit(0);
        let mut parallel =
            search::dfs(&mut parallel_space.clone(), options).expect("valid options");
        let solutions = all_solutions(parallel.as_mut())
            .iter()
            .map(|solution| values(solution, &rows))
            .collect::<Vec<_>>();

        assert_eq!(solutions.len(), expected.len(), "{threads} threads");
        assert_eq!(
            solutions.into_iter().collect::<BTreeSet<_>>(),
            expected.iter().cloned().collect::<BTreeSet<_>>(),
            "{threads} threads"
        );
    }

    assert_eq!(expected.len(), 352);
}
