//! Error types for graph construction.

use thiserror::Error;

/// Rejected graph construction input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("a graph needs at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    #[error("edge probability must lie in [0, 1], got {0}")]
    EdgeProbability(f64),

    #[error("canvas size must be positive and finite, got {0}")]
    CanvasSize(f64),

    #[error("node {index} has a non-finite coordinate")]
    NonFiniteNode { index: usize },

    #[error("nodes {a} and {b} share the same position")]
    CoincidentNodes { a: usize, b: usize },

    #[error("weight matrix has {found} entries, expected {expected}")]
    WeightMatrixSize { expected: usize, found: usize },

    #[error("edge ({a}, {b}) has a weight that is not the distance between its endpoints")]
    EdgeWeight { a: usize, b: usize },

    #[error("backbone edge ({a}, {b}) is missing")]
    MissingBackbone { a: usize, b: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
