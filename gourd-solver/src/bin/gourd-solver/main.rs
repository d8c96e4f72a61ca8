mod os_signal_termination;
mod result;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use gourd_solver::convert_case::Case;
use gourd_solver::models;
use gourd_solver::models::Model;
use gourd_solver::search;
use gourd_solver::search::EngineKind;
use gourd_solver::search::SearchOptions;
use gourd_solver::sequence_generators::SequenceGeneratorType;
use gourd_solver::statistics::configure_statistic_logging;
use gourd_solver::statistics::log_statistic;
use gourd_solver::statistics::log_statistic_postfix;
use gourd_solver::statistics::Statistic;
use gourd_solver::statistics::StatisticLogger;
use gourd_solver::termination::Combinator;
use gourd_solver::termination::FailBudget;
use gourd_solver::termination::NodeBudget;
use gourd_solver::termination::TerminationCondition;
use gourd_solver::termination::TimeBudget;
use gourd_solver::SchedulingPolicy;
use gourd_solver::Space;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::GourdError;
use result::GourdResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The model to solve.
    #[arg(value_enum)]
    model: ModelKind,

    /// The size of the instance: the number of queens, the number of marks on the ruler, or the
    /// number of elements to partition.
    ///
    /// Possible values: usize
    #[arg(short = 'n', long, default_value_t = 8, verbatim_doc_comment)]
    size: usize,

    /// The search engine. When omitted, branch and bound is used for models with an objective
    /// and depth-first search otherwise.
    #[arg(short = 'e', long, value_enum)]
    engine: Option<EngineKind>,

    /// The number of worker threads for depth-first search and branch and bound.
    ///
    /// Possible values: usize (at least 1)
    #[arg(short = 'j', long, default_value_t = 1, verbatim_doc_comment)]
    threads: usize,

    /// The maximal number of commits between two copies stored on the search path.
    ///
    /// A value of 1 copies every node, larger values recompute more.
    ///
    /// Possible values: usize
    #[arg(long, default_value_t = 8, verbatim_doc_comment)]
    copy_distance: usize,

    /// The distance from the last copy beyond which recomputation stores an extra copy halfway.
    ///
    /// Possible values: usize
    #[arg(long, default_value_t = 2, verbatim_doc_comment)]
    adaptive_distance: usize,

    /// The maximal number of discrepancies of limited discrepancy search.
    ///
    /// Possible values: usize
    #[arg(long, default_value_t = 3, verbatim_doc_comment)]
    discrepancy_limit: usize,

    /// Report all solutions in the case of satisfaction problems, or print intermediate
    /// solutions of increasing quality in the case of optimisation problems.
    ///
    /// Possible values: bool
    #[arg(short = 'a', long = "all-solutions", verbatim_doc_comment)]
    all_solutions: bool,

    /// The time budget for the search, given in milliseconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The maximal number of nodes to explore.
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "node-limit", verbatim_doc_comment)]
    node_limit: Option<u64>,

    /// The maximal number of failed nodes.
    ///
    /// Possible values: u64 (Optional)
    #[arg(long = "fail-limit", verbatim_doc_comment)]
    fail_limit: Option<u64>,

    /// The sequence of fail limits between two restarts of restart-based search.
    ///
    /// - The "constant" approach restarts after the same number of fails every time
    /// - The "geometric" approach uses a geometrically increasing sequence
    /// - The "luby" approach uses a recursive sequence of the form 1, 1, 2, 1, 1, 2, 4, 1, 1, 2,
    ///   1, 1, 2, 4, 8, 1, 1, 2.... (see "Optimal speedup of Las Vegas algorithms - Luby et al.
    ///   (1993)")
    ///
    /// To be used in combination with "--restart-base".
    #[arg(long, value_enum, default_value_t = SequenceGeneratorType::Geometric, verbatim_doc_comment)]
    restart_sequence: SequenceGeneratorType,

    /// The base of the restart sequence: the constant, the first value of the geometric
    /// sequence, or the multiplier of the Luby sequence.
    ///
    /// Possible values: i64
    #[arg(long, default_value_t = 250, verbatim_doc_comment)]
    restart_base: i64,

    /// The factor of the geometric restart sequence.
    ///
    /// Possible values: f64
    #[arg(long, default_value_t = 1.5, verbatim_doc_comment)]
    restart_factor: f64,

    /// Execute the propagators in a random order drawn from this seed instead of cheapest
    /// first. The solutions do not depend on the order.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 'r', long = "seed", verbatim_doc_comment)]
    seed: Option<u64>,

    /// Enables logging of statistics from the search.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "statistics", verbatim_doc_comment)]
    statistics: bool,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModelKind {
    /// Place n non-attacking queens on an n by n board.
    Queens,
    /// Find a shortest Golomb ruler with n marks.
    Golomb,
    /// Split the numbers 1 to n into two halves of the same size.
    Partition,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging(
            "%%%mzn-stat:",
            Some("%%%mzn-stat-end"),
            Some(Case::Camel),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "c ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> GourdResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.statistics);

    if gourd_solver::asserts::GOURD_ASSERT_LEVEL_DEFINITION
        >= gourd_solver::asserts::GOURD_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the Gourd assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            gourd_solver::asserts::GOURD_ASSERT_LEVEL_DEFINITION
        );
    };

    if args.threads == 0 {
        return Err(GourdError::InvalidArgument(
            "the number of threads must be at least 1".to_owned(),
        ));
    }

    let space = match args.seed {
        Some(seed) => Space::with_scheduling(SchedulingPolicy::Randomised { seed }),
        None => Space::default(),
    };

    let mut model: Box<dyn Model> = match args.model {
        ModelKind::Queens => Box::new(models::queens(space, args.size)?),
        ModelKind::Golomb => Box::new(models::golomb(space, args.size)?),
        ModelKind::Partition => Box::new(models::partition(space, args.size)?),
    };

    let has_objective = model.space().has_objective();
    let engine_kind = args.engine.unwrap_or(if has_objective {
        EngineKind::Bab
    } else {
        EngineKind::Dfs
    });
    // Only these engines report solutions of increasing quality.
    let optimising = has_objective && matches!(engine_kind, EngineKind::Bab | EngineKind::Rbs);

    let options = SearchOptions::default()
        .with_copy_distance(args.copy_distance)
        .with_adaptive_distance(args.adaptive_distance)
        .with_threads(args.threads)
        .with_discrepancy_limit(args.discrepancy_limit)
        .with_cutoff(
            args.restart_sequence
                .create(args.restart_base, args.restart_factor),
        )
        .with_stop(stop_condition(&args)?);

    info!(
        "solving {:?} of size {} with {engine_kind} on {} thread(s)",
        args.model, args.size, args.threads
    );

    let mut engine = search::engine(engine_kind, model.space(), options)?;

    let mut last = None;
    let mut count = 0_u64;
    while let Some(solution) = engine.next() {
        count += 1;

        if args.all_solutions {
            print_solution(model.as_ref(), &solution, count);
        }
        last = Some(solution);

        if !optimising && !args.all_solutions {
            break;
        }
    }

    if !args.all_solutions {
        if let Some(solution) = &last {
            print_solution(model.as_ref(), solution, count);
        }
    }

    // Only a search which ran to the end has proven its result.
    let complete = !engine.stopped()
        && engine.is_complete()
        && (optimising || args.all_solutions || last.is_none());
    match (last.is_some(), complete) {
        (false, true) => println!("=====UNSATISFIABLE====="),
        (false, false) => println!("=====UNKNOWN====="),
        (true, true) => println!("=========="),
        (true, false) => {}
    }

    if args.statistics {
        let statistics = engine.statistics();
        statistics.log(StatisticLogger::default());
        log_statistic("engine", engine_kind);
        log_statistic_postfix();
    }

    Ok(())
}

fn print_solution(model: &dyn Model, solution: &Space, index: u64) {
    println!("solution {index}: {}", model.format_solution(solution));
    if let Some(objective) = solution.objective_value() {
        println!("objective = {objective}");
    }
    println!("----------");
}

/// The stop of the search: a termination signal, and whatever budgets are given.
fn stop_condition(args: &Args) -> GourdResult<Box<dyn TerminationCondition>> {
    let mut stop: Box<dyn TerminationCondition> = Box::new(OsSignal::install()?);

    if let Some(time_limit) = args.time_limit {
        let budget = TimeBudget::starting_now(Duration::from_millis(time_limit));
        stop = Box::new(Combinator::new(stop, budget));
    }
    if let Some(node_limit) = args.node_limit {
        stop = Box::new(Combinator::new(stop, NodeBudget::new(node_limit)));
    }
    if let Some(fail_limit) = args.fail_limit {
        stop = Box::new(Combinator::new(stop, FailBudget::new(fail_limit)));
    }

    Ok(stop)
}
