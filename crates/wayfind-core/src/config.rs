//! Graph construction parameters.

use crate::error::{GraphError, Result};

/// Parameters for [`Graph::random`](crate::Graph::random).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Number of nodes, source and destination included.
    pub num_nodes: usize,
    /// Probability of each successive nearest-neighbor edge (see
    /// [`Graph::with_nodes`](crate::Graph::with_nodes)).
    pub edge_probability: f64,
    /// Side of the square canvas the nodes are placed on.
    pub canvas_size: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            edge_probability: 0.5,
            canvas_size: 1000.0,
        }
    }
}

impl GraphConfig {
    /// Check every field, returning the first offending one.
    pub fn validate(&self) -> Result<()> {
        check_num_nodes(self.num_nodes)?;
        check_edge_probability(self.edge_probability)?;
        check_canvas_size(self.canvas_size)
    }

    /// Minimum distance a randomly placed node keeps from every node placed
    /// before it.
    pub fn min_separation(&self) -> f64 {
        self.canvas_size / (5.0 * self.num_nodes as f64)
    }
}

pub(crate) fn check_num_nodes(n: usize) -> Result<()> {
    if n < 2 {
        return Err(GraphError::TooFewNodes(n));
    }
    Ok(())
}

pub(crate) fn check_edge_probability(p: f64) -> Result<()> {
    // Written so that NaN is rejected too.
    if !(0.0..=1.0).contains(&p) {
        return Err(GraphError::EdgeProbability(p));
    }
    Ok(())
}

pub(crate) fn check_canvas_size(size: f64) -> Result<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(GraphError::CanvasSize(size));
    }
    Ok(())
}
