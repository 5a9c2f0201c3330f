//! Error types for the solvers.

use thiserror::Error;
use wayfind_core::Path;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Branch-and-bound needs a complete source-to-destination path to start
    /// from.
    #[error("seed {0:?} is not a complete source-to-destination path")]
    InvalidSeed(Path),
}

pub type Result<T> = std::result::Result<T, SearchError>;
