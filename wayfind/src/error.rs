//! Error type for configuring and running a batch of solvers.

use thiserror::Error;
use wayfind_core::GraphError;
use wayfind_search::SearchError;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("solver thread {0} panicked")]
    Panicked(String),
}

pub type Result<T> = std::result::Result<T, RunError>;
