//! Greedy backtracking: cheap complete paths for seeding branch-and-bound.
//!
//! A depth-first walk that commits to the first neighbor in some preferred
//! order and only backs off from dead ends. A node is marked dead once every
//! continuation from it has failed and is never entered again, so each node
//! is expanded at most once and the walk always reaches the destination of a
//! connected graph. Backtrack counts follow from this marking rule and are
//! not comparable with walks that mark nodes visited on their first failure.

use rand::Rng;
use rand::seq::SliceRandom;
use wayfind_core::{Emitter, EventSink, Graph, Path, Tag};

/// Neighbor preference of a greedy walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreedyOrder {
    /// One random ranking of all nodes, drawn before the walk.
    Random,
    /// Nodes closest to the destination first.
    Informed,
    /// Nearest neighbor of the current node first.
    Lazy,
}

impl GreedyOrder {
    pub const ALL: [GreedyOrder; 3] = [
        GreedyOrder::Random,
        GreedyOrder::Informed,
        GreedyOrder::Lazy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GreedyOrder::Random => "Greedy (pure random)",
            GreedyOrder::Informed => "Greedy (informed)",
            GreedyOrder::Lazy => "Greedy (lazy)",
        }
    }
}

/// Result of a greedy walk.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyOutcome {
    pub path: Path,
    pub length: f64,
    /// Number of times the walk stepped back out of a failed branch.
    pub backtracks: usize,
}

/// Walk from the source to the destination of `graph` in `order`.
///
/// `rng` is only consulted by [`GreedyOrder::Random`].
pub fn greedy<R: Rng + ?Sized, S: EventSink + ?Sized>(
    graph: &Graph,
    order: GreedyOrder,
    rng: &mut R,
    sink: &S,
    tag: Tag,
) -> GreedyOutcome {
    let emitter = Emitter::new(sink, tag, order.name());
    emitter.text(order.name());

    let ranking = match order {
        GreedyOrder::Random => {
            let mut all: Vec<usize> = (0..graph.len()).collect();
            all.shuffle(rng);
            Some(all)
        }
        GreedyOrder::Informed => {
            let dest = graph.destination();
            Some(std::iter::once(dest).chain(graph.nodes_sorted(dest)).collect())
        }
        GreedyOrder::Lazy => None,
    };

    let mut walk = Walk {
        graph,
        ranking,
        current: vec![graph.source()],
        on_path: vec![false; graph.len()],
        dead: vec![false; graph.len()],
        backtracks: 0,
    };
    walk.on_path[graph.source()] = true;

    let path = if walk.step() {
        walk.current
    } else {
        log::warn!("{}: destination unreachable, falling back to the backbone", order.name());
        graph.backbone()
    };
    let length = graph.path_length(&path);
    let backtracks = walk.backtracks;

    let plural = if backtracks == 1 { "" } else { "s" };
    emitter.path(graph, &path);
    emitter.status(
        length,
        &path,
        &format!(" - completed with {backtracks} backtrack{plural}"),
    );
    log::debug!("{} (tag {tag}): {:?}, {backtracks} backtracks", order.name(), path);

    GreedyOutcome {
        path,
        length,
        backtracks,
    }
}

struct Walk<'g> {
    graph: &'g Graph,
    /// Fixed preference over all nodes; `None` means nearest-first from
    /// wherever the walk is.
    ranking: Option<Vec<usize>>,
    current: Path,
    on_path: Vec<bool>,
    dead: Vec<bool>,
    backtracks: usize,
}

impl Walk<'_> {
    fn step(&mut self) -> bool {
        let graph = self.graph;
        let last = self.current[self.current.len() - 1];
        if last == graph.destination() {
            return true;
        }

        let candidates = match &self.ranking {
            Some(ranking) => ranking
                .iter()
                .copied()
                .filter(|&n| graph.has_edge(last, n))
                .collect(),
            None => graph.nearest_neighbors(last),
        };

        for next in candidates {
            if self.on_path[next] || self.dead[next] {
                continue;
            }
            self.current.push(next);
            self.on_path[next] = true;
            if self.step() {
                return true;
            }
            self.on_path[next] = false;
            self.current.pop();
            self.backtracks += 1;
        }

        self.dead[last] = true;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{random_graph, square};
    use crossbeam_channel::unbounded;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wayfind_core::{Event, NullSink};

    #[test]
    fn every_order_reaches_the_destination() {
        for seed in 0..40 {
            let g = random_graph(seed, 2 + (seed as usize % 12), (seed % 4) as f64 / 3.0);
            for order in GreedyOrder::ALL {
                let mut rng = StdRng::seed_from_u64(seed);
                let out = greedy(&g, order, &mut rng, &NullSink, 0);
                assert!(g.is_complete(&out.path), "seed {seed} {}", order.name());
                assert_eq!(out.length, g.path_length(&out.path));
            }
        }
    }

    #[test]
    fn random_order_is_reproducible() {
        let g = random_graph(4, 15, 0.5);
        let a = greedy(&g, GreedyOrder::Random, &mut StdRng::seed_from_u64(1), &NullSink, 0);
        let b = greedy(&g, GreedyOrder::Random, &mut StdRng::seed_from_u64(1), &NullSink, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn lazy_follows_nearest_neighbors() {
        let g = square(0.0);
        let out = greedy(&g, GreedyOrder::Lazy, &mut StdRng::seed_from_u64(0), &NullSink, 0);
        assert_eq!(out.path, vec![0, 1, 3]);
        assert_eq!(out.backtracks, 0);
    }

    #[test]
    fn informed_heads_for_the_destination() {
        let g = square(1.0);
        let out = greedy(&g, GreedyOrder::Informed, &mut StdRng::seed_from_u64(0), &NullSink, 0);
        assert_eq!(out.path, vec![0, 3]);
    }

    #[test]
    fn unreachable_destination_falls_back_to_the_backbone() {
        let g = square(0.0).without_edges(&[(1, 3), (2, 3)]);
        for order in GreedyOrder::ALL {
            let out = greedy(&g, order, &mut StdRng::seed_from_u64(3), &NullSink, 0);
            assert_eq!(out.path, g.backbone(), "{}", order.name());
            assert!(out.backtracks > 0);
        }
    }

    #[test]
    fn reports_under_its_tag() {
        let g = square(0.0);
        let (tx, rx) = unbounded();
        greedy(&g, GreedyOrder::Lazy, &mut StdRng::seed_from_u64(0), &tx, 6);
        drop(tx);
        let events: Vec<Event> = rx.iter().collect();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.tag() == Some(6)));
        match events.last() {
            Some(Event::Status(s)) => {
                assert_eq!(s.text, "Greedy (lazy): 2.00 (3 nodes) - completed with 0 backtracks")
            }
            other => panic!("unexpected last event {other:?}"),
        }
    }
}
