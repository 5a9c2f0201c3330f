//! Source-to-destination search over [`wayfind_core::Graph`]s.
//!
//! - **Tree search** with a pluggable [`Frontier`]: depth-first,
//!   breadth-first, uniform-cost, greedy best-first and A\*
//!   ([`tree_search`])
//! - **Branch-and-bound** exhaustive search with incumbent pruning
//!   ([`branch_and_bound`])
//! - **Greedy backtracking** walks that produce a quick first solution
//!   ([`greedy`])
//!
//! Every solver reports its progress as [`wayfind_core::Event`]s tagged
//! with the caller's [`wayfind_core::Tag`], and owns all of its mutable
//! state, so any number of them can run at once over one shared graph.
//!
//! | Solver | Optimal |
//! |---|---|
//! | [`Strategy::UniformCost`], [`Strategy::AStar`] | yes |
//! | [`branch_and_bound`] | yes |
//! | [`Strategy::DepthFirst`], [`Strategy::BreadthFirst`], [`Strategy::Greedy`], [`greedy`] | no |

pub mod bnb;
pub mod error;
pub mod frontier;
pub mod greedy;
pub mod tree;

pub use bnb::{BnbOutcome, BranchAndBound, branch_and_bound};
pub use error::SearchError;
pub use frontier::{Frontier, PriorityQueue, Scorer};
pub use greedy::{GreedyOrder, GreedyOutcome, greedy};
pub use tree::{Strategy, TreeSearchOutcome, search, tree_search};

#[cfg(test)]
pub(crate) mod testutil {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wayfind_core::{Graph, GraphConfig, Point};

    pub(crate) struct Oracle {
        pub length: f64,
        pub fewest_edges: usize,
    }

    /// Exhaustive enumeration of every simple source-destination path.
    pub(crate) fn oracle(g: &Graph) -> Oracle {
        fn walk(g: &Graph, path: &mut Vec<usize>, best: &mut Oracle) {
            let last = path[path.len() - 1];
            if last == g.destination() {
                best.length = best.length.min(g.path_length(path));
                best.fewest_edges = best.fewest_edges.min(path.len() - 1);
                return;
            }
            for n in g.neighbors(last).collect::<Vec<_>>() {
                if !path.contains(&n) {
                    path.push(n);
                    walk(g, path, best);
                    path.pop();
                }
            }
        }

        let mut best = Oracle {
            length: f64::INFINITY,
            fewest_edges: usize::MAX,
        };
        walk(g, &mut vec![g.source()], &mut best);
        best
    }

    pub(crate) fn random_graph(seed: u64, num_nodes: usize, edge_probability: f64) -> Graph {
        let cfg = GraphConfig {
            num_nodes,
            edge_probability,
            canvas_size: 100.0,
        };
        Graph::random(&cfg, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    /// Unit square: 0 (0,0), 1 (1,0), 2 (0,1), 3 (1,1).
    pub(crate) fn square(edge_probability: f64) -> Graph {
        let nodes = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ];
        Graph::with_nodes(nodes, 1.0, edge_probability, &mut StdRng::seed_from_u64(0)).unwrap()
    }
}
