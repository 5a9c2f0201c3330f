//! **wayfind**: run every graph-search strategy at once over one graph.
//!
//! The binary builds a random graph from a [`RunConfig`], starts each
//! configured solver on its own thread, and drains the shared event channel
//! into the log. The same entry points are available here for embedding.

pub mod config;
pub mod error;
pub mod runner;

pub use config::RunConfig;
pub use error::RunError;
pub use runner::{
    Incumbent, RunSummary, Solver, SolverReport, Task, default_tasks, run, run_task, spawn,
};
