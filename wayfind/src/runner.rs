//! Runs a batch of solvers concurrently over one shared graph.
//!
//! Each [`Task`] gets its own OS thread, its own RNG and a clone of the
//! event sender; the only shared object is the immutable `Arc<Graph>`.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use wayfind_core::{Event, EventSink, Graph, Path, Tag};
use wayfind_search::{GreedyOrder, Strategy, branch_and_bound, greedy, tree_search};

use crate::config::RunConfig;
use crate::error::{Result, RunError};

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Where branch-and-bound takes its first incumbent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Incumbent {
    /// The always-present path `0, 1, ..., N-1`.
    Backbone,
    /// A greedy walk, reported under the same tag before the search starts.
    Greedy(GreedyOrder),
}

/// One solver and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Solver {
    Tree(Strategy),
    BranchAndBound(Incumbent),
    Greedy(GreedyOrder),
}

impl Solver {
    pub fn name(self) -> &'static str {
        match self {
            Solver::Tree(s) => s.name(),
            Solver::BranchAndBound(_) => wayfind_search::bnb::LABEL,
            Solver::Greedy(order) => order.name(),
        }
    }
}

/// A solver bound to the tag its events are reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub tag: Tag,
    pub solver: Solver,
}

impl Task {
    pub const fn new(tag: Tag, solver: Solver) -> Self {
        Self { tag, solver }
    }
}

/// Branch-and-bound from the backbone plus all five tree searches.
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::new(0, Solver::BranchAndBound(Incumbent::Backbone)),
        Task::new(1, Solver::Tree(Strategy::AStar)),
        Task::new(2, Solver::Tree(Strategy::Greedy)),
        Task::new(3, Solver::Tree(Strategy::DepthFirst)),
        Task::new(4, Solver::Tree(Strategy::BreadthFirst)),
        Task::new(5, Solver::Tree(Strategy::UniformCost)),
    ]
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// What one task produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverReport {
    pub tag: Tag,
    pub name: String,
    /// `None` only if a tree search exhausted its frontier.
    pub path: Option<Path>,
    pub length: Option<f64>,
    /// Extensions for tree search, recursive steps for branch-and-bound,
    /// backtracks for greedy walks.
    pub steps: u64,
}

/// Everything a [`run`] produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The seed actually used, after resolving `0` to a clock-derived one.
    pub seed: u64,
    pub graph: Arc<Graph>,
    /// In task order.
    pub reports: Vec<SolverReport>,
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

/// RNG for one task, derived from the run seed and the task's tag.
pub fn task_rng(seed: u64, tag: Tag) -> StdRng {
    StdRng::seed_from_u64(seed ^ (tag as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Run one task on the calling thread.
pub fn run_task<S: EventSink + ?Sized>(
    graph: &Graph,
    task: Task,
    rng: &mut StdRng,
    sink: &S,
) -> Result<SolverReport> {
    let tag = task.tag;
    let (path, steps) = match task.solver {
        Solver::Tree(strategy) => {
            let out = tree_search(graph, strategy, sink, tag);
            (out.path, out.steps as u64)
        }
        Solver::BranchAndBound(incumbent) => {
            let seed = match incumbent {
                Incumbent::Backbone => graph.backbone(),
                Incumbent::Greedy(order) => greedy(graph, order, rng, sink, tag).path,
            };
            let out = branch_and_bound(graph, seed, sink, tag)?;
            (Some(out.path), out.steps)
        }
        Solver::Greedy(order) => {
            let out = greedy(graph, order, rng, sink, tag);
            (Some(out.path), out.backtracks as u64)
        }
    };

    Ok(SolverReport {
        tag,
        name: task.solver.name().to_string(),
        length: path.as_deref().map(|p| graph.path_length(p)),
        path,
        steps,
    })
}

/// Start every task on its own named thread.
pub fn spawn(
    graph: &Arc<Graph>,
    tasks: &[Task],
    sender: &Sender<Event>,
    seed: u64,
) -> Result<Vec<JoinHandle<Result<SolverReport>>>> {
    let mut handles = Vec::with_capacity(tasks.len());
    for &task in tasks {
        let graph = Arc::clone(graph);
        let tx = sender.clone();
        let mut rng = task_rng(seed, task.tag);
        let handle = thread::Builder::new()
            .name(format!("solver-{}", task.tag))
            .spawn(move || run_task(&graph, task, &mut rng, &tx))?;
        log::debug!("spawned {} on tag {}", task.solver.name(), task.tag);
        handles.push(handle);
    }
    Ok(handles)
}

/// Wait for every handle, in order.
pub fn join(handles: Vec<JoinHandle<Result<SolverReport>>>) -> Result<Vec<SolverReport>> {
    handles
        .into_iter()
        .map(|handle| {
            let name = handle.thread().name().unwrap_or("solver").to_string();
            handle.join().map_err(|_| RunError::Panicked(name))?
        })
        .collect()
}

/// Build the graph, announce it, and run every configured task to the end.
///
/// Blocks until all tasks finish. `sender` is consumed so the receiving end
/// sees the channel close once the last task is done; the caller has to
/// drain the receiver from another thread while this runs.
pub fn run(config: &RunConfig, sender: Sender<Event>) -> Result<RunSummary> {
    config.validate()?;
    let seed = config.effective_seed();
    log::info!(
        "building graph: {} nodes, edge probability {}, seed {seed}",
        config.graph.num_nodes,
        config.graph.edge_probability
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let graph = Arc::new(Graph::random(&config.graph, &mut rng)?);
    sender.emit(Event::Overlay(graph.overlay()));

    let handles = spawn(&graph, &config.tasks, &sender, seed)?;
    drop(sender);
    let reports = join(handles)?;

    Ok(RunSummary {
        seed,
        graph,
        reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use std::collections::BTreeMap;
    use wayfind_core::{GraphConfig, NullSink};

    fn config(tasks: Vec<Task>) -> RunConfig {
        RunConfig {
            graph: GraphConfig {
                num_nodes: 8,
                edge_probability: 0.5,
                canvas_size: 1000.0,
            },
            seed: 17,
            channel_capacity: 4,
            tasks,
        }
    }

    fn by_tag(events: &[Event]) -> BTreeMap<Tag, Vec<Event>> {
        let mut map: BTreeMap<Tag, Vec<Event>> = BTreeMap::new();
        for e in events {
            if let Some(tag) = e.tag() {
                map.entry(tag).or_default().push(e.clone());
            }
        }
        map
    }

    #[test]
    fn all_solvers_run_concurrently_without_loss() {
        let cfg = config(default_tasks());
        let (tx, rx) = bounded(cfg.channel_capacity);
        let consumer = thread::spawn(move || rx.iter().collect::<Vec<Event>>());
        let summary = run(&cfg, tx).unwrap();
        let events = consumer.join().unwrap();

        assert!(matches!(events[0], Event::Overlay(_)));
        assert_eq!(events.iter().filter(|e| e.tag().is_none()).count(), 1);
        assert_eq!(summary.reports.len(), 6);

        // Replay each task alone into an unbounded channel: the concurrent
        // stream for every tag must match it event for event.
        let concurrent = by_tag(&events);
        for &task in &cfg.tasks {
            let (tx, rx) = unbounded();
            let report = run_task(&summary.graph, task, &mut task_rng(17, task.tag), &tx).unwrap();
            drop(tx);
            let alone: Vec<Event> = rx.iter().collect();
            assert_eq!(concurrent[&task.tag], alone, "tag {}", task.tag);
            assert_eq!(summary.reports[task.tag as usize], report);
        }
    }

    #[test]
    fn optimal_solvers_agree() {
        let cfg = config(default_tasks());
        let (tx, rx) = unbounded();
        let summary = run(&cfg, tx).unwrap();
        drop(rx);

        let length = |tag: usize| summary.reports[tag].length.unwrap();
        let (bnb, astar, ucs) = (length(0), length(1), length(5));
        assert!((bnb - astar).abs() < 1e-9);
        assert!((ucs - astar).abs() < 1e-9);
        for report in &summary.reports {
            let path = report.path.as_ref().unwrap();
            assert!(summary.graph.is_complete(path), "{}", report.name);
            assert!(report.length.unwrap() >= astar - 1e-9);
        }
    }

    #[test]
    fn greedy_incumbent_feeds_branch_and_bound() {
        let graph = Graph::random(
            &GraphConfig {
                num_nodes: 9,
                edge_probability: 0.6,
                canvas_size: 500.0,
            },
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();
        let seeded = Task::new(0, Solver::BranchAndBound(Incumbent::Greedy(GreedyOrder::Informed)));
        let plain = Task::new(1, Solver::BranchAndBound(Incumbent::Backbone));
        let a = run_task(&graph, seeded, &mut task_rng(1, 0), &NullSink).unwrap();
        let b = run_task(&graph, plain, &mut task_rng(1, 1), &NullSink).unwrap();
        assert!((a.length.unwrap() - b.length.unwrap()).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_reports() {
        let cfg = config(vec![
            Task::new(0, Solver::Greedy(GreedyOrder::Random)),
            Task::new(1, Solver::Tree(Strategy::AStar)),
        ]);
        let first = run(&cfg, unbounded().0).unwrap();
        let second = run(&cfg, unbounded().0).unwrap();
        assert_eq!(first.graph, second.graph);
        assert_eq!(first.reports, second.reports);
    }

    #[test]
    fn invalid_config_is_rejected_before_spawning() {
        let mut cfg = config(default_tasks());
        cfg.graph.num_nodes = 1;
        let (tx, rx) = unbounded();
        assert!(matches!(run(&cfg, tx), Err(RunError::Graph(_))));
        assert!(rx.try_recv().is_err());
    }
}
