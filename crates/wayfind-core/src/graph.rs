//! Randomized planar graphs with a guaranteed source-destination backbone.
//!
//! Node `0` is the source and node `N-1` the destination. Edges are
//! undirected and weighted by the Euclidean distance between their
//! endpoints; a weight of `0.0` means "no edge". A [`Graph`] is never mutated
//! after construction, so one instance can be shared (e.g. behind an `Arc`)
//! by any number of concurrent searches.

use rand::Rng;

use crate::config::{self, GraphConfig};
use crate::error::{GraphError, Result};
use crate::events::{Circle, StaticOverlay};
use crate::geom::{Point, Segment};

/// Ordered sequence of distinct node indices starting at the source.
pub type Path = Vec<usize>;

/// Radius of the circle drawn for each node in the static overlay.
pub const NODE_RADIUS: f64 = 5.0;

/// An immutable weighted graph of points on a square canvas.
///
/// With the `serde` feature a graph serializes as its nodes, canvas size and
/// weight matrix; deserializing re-checks every construction invariant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GraphData", into = "GraphData")
)]
pub struct Graph {
    canvas_size: f64,
    nodes: Vec<Point>,
    /// Flattened `N x N` weight matrix, row-major.
    weights: Vec<f64>,
}

impl Graph {
    /// Build a random graph.
    ///
    /// The source sits near the bottom-left corner of the canvas and the
    /// destination near the top-right one. Every other node is drawn
    /// uniformly at random and redrawn until it lies at least
    /// [`GraphConfig::min_separation`] away from every node placed so far.
    /// Edges are then added as described in [`Graph::with_nodes`].
    pub fn random<R: Rng + ?Sized>(config: &GraphConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let n = config.num_nodes;
        let cs = config.canvas_size;
        let min_sep = config.min_separation();

        let mut nodes = vec![Point::ZERO; n];
        nodes[0] = Point::new(cs * 0.05, cs * 0.95);
        nodes[n - 1] = Point::new(cs * 0.95, cs * 0.05);

        for t in 1..n - 1 {
            let mut rejected = 0usize;
            loop {
                let candidate = Point::new(cs * rng.random::<f64>(), cs * rng.random::<f64>());
                let nearest = nodes[..t]
                    .iter()
                    .chain(std::iter::once(&nodes[n - 1]))
                    .map(|p| p.distance(candidate))
                    .fold(f64::INFINITY, f64::min);
                if nearest >= min_sep {
                    nodes[t] = candidate;
                    break;
                }
                rejected += 1;
            }
            if rejected > 0 {
                log::trace!("node {t} placed after {rejected} rejected candidates");
            }
        }

        Self::with_nodes(nodes, cs, config.edge_probability, rng)
    }

    /// Build a graph over caller-chosen node positions.
    ///
    /// 1. The backbone edges `(i, i+1)` are always present.
    /// 2. For every node, all other nodes are ranked by ascending distance
    ///    (ties broken by index). The nearest one is always connected; each
    ///    following rank is connected only while independent
    ///    `Bernoulli(edge_probability)` trials keep succeeding, and the scan
    ///    stops at the first failed trial.
    pub fn with_nodes<R: Rng + ?Sized>(
        nodes: Vec<Point>,
        canvas_size: f64,
        edge_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        config::check_edge_probability(edge_probability)?;
        check_nodes(&nodes, canvas_size)?;

        let n = nodes.len();
        let mut graph = Self {
            canvas_size,
            nodes,
            weights: vec![0.0; n * n],
        };

        for i in 0..n - 1 {
            graph.connect(i, i + 1);
        }

        for n0 in 0..n {
            for (rank, other) in graph.nodes_sorted(n0).into_iter().enumerate() {
                if rank > 0 && rng.random::<f64>() >= edge_probability {
                    break;
                }
                graph.connect(n0, other);
            }
        }

        log::debug!(
            "built graph: {} nodes, {} edges (p = {edge_probability})",
            n,
            graph.edges().count()
        );
        Ok(graph)
    }

    /// The same graph without the given edges. Removing a backbone edge can
    /// disconnect the destination, which nothing else can produce.
    #[doc(hidden)]
    pub fn without_edges(mut self, edges: &[(usize, usize)]) -> Self {
        let n = self.nodes.len();
        for &(a, b) in edges {
            self.weights[a * n + b] = 0.0;
            self.weights[b * n + a] = 0.0;
        }
        self
    }

    fn connect(&mut self, a: usize, b: usize) {
        let d = self.distance(a, b);
        let n = self.nodes.len();
        self.weights[a * n + b] = d;
        self.weights[b * n + a] = d;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a graph has at least two nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn source(&self) -> usize {
        0
    }

    #[inline]
    pub fn destination(&self) -> usize {
        self.nodes.len() - 1
    }

    #[inline]
    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    #[inline]
    pub fn node(&self, v: usize) -> Point {
        self.nodes[v]
    }

    #[inline]
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// Weight of the edge between `a` and `b`, `0.0` if there is none.
    #[inline]
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.weights[a * self.nodes.len() + b]
    }

    #[inline]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.weight(a, b) > 0.0
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Straight-line distance between two nodes, edge or not.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.nodes[a].distance(self.nodes[b])
    }

    /// Sum of the edge weights along `path`; `0.0` for a single node.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).fold(0.0, |len, w| len + self.weight(w[0], w[1]))
    }

    /// Nodes sharing an edge with `v`, in index order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&i| self.has_edge(v, i))
    }

    /// Number of edges touching `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).count()
    }

    /// Every node but `v`, by ascending distance from `v` (ties by index).
    pub fn nodes_sorted(&self, v: usize) -> Vec<usize> {
        let mut others: Vec<usize> = (0..self.nodes.len()).filter(|&i| i != v).collect();
        others.sort_by(|&a, &b| {
            self.distance(v, a)
                .total_cmp(&self.distance(v, b))
                .then(a.cmp(&b))
        });
        others
    }

    /// Neighbors of `v`, nearest first.
    pub fn nearest_neighbors(&self, v: usize) -> Vec<usize> {
        let mut sorted = self.nodes_sorted(v);
        sorted.retain(|&i| self.has_edge(v, i));
        sorted
    }

    /// Every edge once, as `(a, b, weight)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.nodes.len();
        (0..n).flat_map(move |a| {
            (a + 1..n)
                .filter(move |&b| self.has_edge(a, b))
                .map(move |b| (a, b, self.weight(a, b)))
        })
    }

    /// The path `0, 1, ..., N-1` along the backbone edges.
    pub fn backbone(&self) -> Path {
        (0..self.nodes.len()).collect()
    }

    /// Whether `path` starts at the source, never repeats a node, and only
    /// steps along real edges.
    pub fn is_valid_path(&self, path: &[usize]) -> bool {
        let n = self.nodes.len();
        if path.first() != Some(&self.source()) {
            return false;
        }
        let mut seen = vec![false; n];
        for &v in path {
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        path.windows(2).all(|w| self.has_edge(w[0], w[1]))
    }

    /// A valid path that ends at the destination.
    pub fn is_complete(&self, path: &[usize]) -> bool {
        self.is_valid_path(path) && path.last() == Some(&self.destination())
    }

    /// Coordinates of the nodes along `path`.
    pub fn points(&self, path: &[usize]) -> Vec<Point> {
        path.iter().map(|&v| self.nodes[v]).collect()
    }

    /// The static skeleton: one circle per node, one segment per edge.
    pub fn overlay(&self) -> StaticOverlay {
        StaticOverlay {
            circles: self
                .nodes
                .iter()
                .map(|&center| Circle {
                    center,
                    radius: NODE_RADIUS,
                })
                .collect(),
            segments: self
                .edges()
                .map(|(a, b, _)| Segment::new(self.nodes[a], self.nodes[b]))
                .collect(),
        }
    }
}

fn check_nodes(nodes: &[Point], canvas_size: f64) -> Result<()> {
    config::check_num_nodes(nodes.len())?;
    config::check_canvas_size(canvas_size)?;
    if let Some(index) = nodes.iter().position(|p| !p.is_finite()) {
        return Err(GraphError::NonFiniteNode { index });
    }
    for a in 0..nodes.len() {
        for b in a + 1..nodes.len() {
            if nodes[a] == nodes[b] {
                return Err(GraphError::CoincidentNodes { a, b });
            }
        }
    }
    Ok(())
}

/// Wire form of a [`Graph`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GraphData {
    canvas_size: f64,
    nodes: Vec<Point>,
    weights: Vec<f64>,
}

#[cfg(feature = "serde")]
impl From<Graph> for GraphData {
    fn from(g: Graph) -> Self {
        Self {
            canvas_size: g.canvas_size,
            nodes: g.nodes,
            weights: g.weights,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GraphData> for Graph {
    type Error = GraphError;

    fn try_from(data: GraphData) -> Result<Self> {
        check_nodes(&data.nodes, data.canvas_size)?;
        let n = data.nodes.len();
        if data.weights.len() != n * n {
            return Err(GraphError::WeightMatrixSize {
                expected: n * n,
                found: data.weights.len(),
            });
        }

        let graph = Self {
            canvas_size: data.canvas_size,
            nodes: data.nodes,
            weights: data.weights,
        };
        for a in 0..n {
            for b in a..n {
                let (w, back) = (graph.weight(a, b), graph.weight(b, a));
                let d = graph.distance(a, b);
                let is_edge = a != b && (w - d).abs() <= 1e-9 * d.max(1.0);
                if w.to_bits() != back.to_bits() || !(w == 0.0 || is_edge) {
                    return Err(GraphError::EdgeWeight { a, b });
                }
            }
        }
        if let Some(a) = (0..n - 1).find(|&a| !graph.has_edge(a, a + 1)) {
            return Err(GraphError::MissingBackbone { a, b: a + 1 });
        }
        Ok(graph)
    }
}
