//! Tree search over paths.
//!
//! One algorithm serves every [`Strategy`]; only the [`Frontier`] changes.
//! Cycle avoidance is a membership check against the path being extended,
//! never a global visited set, so the same node may sit at the end of many
//! pending paths at once.

use wayfind_core::{Emitter, EventSink, Graph, Path, Tag};

use crate::frontier::Frontier;

/// Which frontier, and so which search, to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    DepthFirst,
    BreadthFirst,
    UniformCost,
    Greedy,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::UniformCost,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    /// Short label used in status lines.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::DepthFirst => "DFS",
            Strategy::BreadthFirst => "BFS",
            Strategy::UniformCost => "UCS",
            Strategy::Greedy => "Greedy",
            Strategy::AStar => "A*",
        }
    }

    /// Whether the first complete path dequeued is a shortest one.
    ///
    /// Holds for uniform-cost and A* because weights are non-negative and
    /// the straight-line distance never overestimates the remaining cost.
    pub fn is_optimal(self) -> bool {
        matches!(self, Strategy::UniformCost | Strategy::AStar)
    }

    /// An empty frontier implementing this strategy on `graph`.
    pub fn frontier(self, graph: &Graph) -> Frontier<'_> {
        let dest = graph.destination();
        match self {
            Strategy::DepthFirst => Frontier::stack(),
            Strategy::BreadthFirst => Frontier::queue(),
            Strategy::UniformCost => {
                Frontier::priority(move |path: &[usize]| graph.path_length(path))
            }
            Strategy::Greedy => {
                Frontier::priority(move |path: &[usize]| graph.distance(path[path.len() - 1], dest))
            }
            Strategy::AStar => Frontier::priority(move |path: &[usize]| {
                graph.path_length(path) + graph.distance(path[path.len() - 1], dest)
            }),
        }
    }
}

/// Result of one tree search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeSearchOutcome {
    /// First complete path dequeued, `None` if the frontier ran dry.
    pub path: Option<Path>,
    /// Number of paths taken off the frontier and expanded.
    pub expanded: usize,
    /// Number of extensions pushed onto the frontier.
    pub steps: usize,
}

impl TreeSearchOutcome {
    pub fn length(&self, graph: &Graph) -> Option<f64> {
        self.path.as_deref().map(|p| graph.path_length(p))
    }
}

/// Run `strategy` from the source to the destination of `graph`, reporting
/// progress under `tag`.
pub fn tree_search<S: EventSink + ?Sized>(
    graph: &Graph,
    strategy: Strategy,
    sink: &S,
    tag: Tag,
) -> TreeSearchOutcome {
    let emitter = Emitter::new(sink, tag, strategy.name());
    search(graph, strategy.frontier(graph), &emitter)
}

/// The generic algorithm behind [`tree_search`], for any frontier.
///
/// Every dequeued path is drawn and reported; the first one that ends at
/// the destination is returned.
pub fn search<S: EventSink + ?Sized>(
    graph: &Graph,
    mut frontier: Frontier<'_>,
    emitter: &Emitter<'_, S>,
) -> TreeSearchOutcome {
    let dest = graph.destination();
    let mut expanded = 0;
    let mut steps = 0;

    log::debug!("{} (tag {}): starting", emitter.label(), emitter.tag());
    frontier.enqueue(vec![graph.source()]);

    while !frontier.is_empty() {
        let path = frontier.dequeue();
        let last = path[path.len() - 1];
        let length = graph.path_length(&path);
        emitter.path(graph, &path);

        if last == dest {
            emitter.status(length, &path, &format!(" - completed in {steps} steps"));
            log::debug!(
                "{} (tag {}): found {:?} of length {length:.2} after {expanded} expansions",
                emitter.label(),
                emitter.tag(),
                path
            );
            return TreeSearchOutcome {
                path: Some(path),
                expanded,
                steps,
            };
        }
        emitter.status(length, &path, "");
        expanded += 1;

        for node in graph.neighbors(last) {
            if path.contains(&node) {
                continue;
            }
            steps += 1;
            let mut next = Vec::with_capacity(path.len() + 1);
            next.extend_from_slice(&path);
            next.push(node);
            log::trace!("{}: enqueue {:?}", emitter.label(), next);
            frontier.enqueue(next);
        }
    }

    emitter.text(format!("{}: no path found after {steps} steps", emitter.label()));
    log::debug!("{} (tag {}): frontier exhausted", emitter.label(), emitter.tag());
    TreeSearchOutcome {
        path: None,
        expanded,
        steps,
    }
}
