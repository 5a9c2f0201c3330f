//! Run configuration, optionally loaded from a JSON file.

use std::collections::HashSet;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use wayfind_core::GraphConfig;

use crate::error::{Result, RunError};
use crate::runner::{Task, default_tasks};

/// Everything needed to reproduce a run.
///
/// Missing JSON fields take their default value:
///
/// ```json
/// { "graph": { "num_nodes": 12 }, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub graph: GraphConfig,
    /// RNG seed; `0` picks one from the clock.
    pub seed: u64,
    /// Capacity of the bounded event channel.
    pub channel_capacity: usize,
    pub tasks: Vec<Task>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            seed: 42,
            channel_capacity: 1000,
            tasks: default_tasks(),
        }
    }
}

impl RunConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.graph.validate()?;
        if self.channel_capacity == 0 {
            return Err(RunError::Config("channel_capacity must be at least 1".into()));
        }
        let mut tags = HashSet::new();
        for task in &self.tasks {
            if !tags.insert(task.tag) {
                return Err(RunError::Config(format!("tag {} used twice", task.tag)));
            }
        }
        Ok(())
    }

    /// The seed to use: `seed` itself, or a clock-derived non-zero one when
    /// `seed` is `0`.
    pub fn effective_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        nanos.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Incumbent, Solver};
    use wayfind_search::{GreedyOrder, Strategy};

    #[test]
    fn default_is_valid() {
        let cfg = RunConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.effective_seed(), 42);
        assert_eq!(cfg.tasks.len(), 6);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let cfg: RunConfig =
            serde_json::from_str(r#"{ "graph": { "num_nodes": 12 }, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.graph.num_nodes, 12);
        assert_eq!(cfg.graph.edge_probability, 0.5);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.channel_capacity, 1000);
        assert_eq!(cfg.tasks, default_tasks());
    }

    #[test]
    fn tasks_parse_from_json() {
        let json = r#"{
            "tasks": [
                { "tag": 0, "solver": { "BranchAndBound": { "Greedy": "Lazy" } } },
                { "tag": 1, "solver": { "Tree": "AStar" } },
                { "tag": 2, "solver": { "Greedy": "Random" } }
            ]
        }"#;
        let cfg: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            cfg.tasks,
            vec![
                Task::new(0, Solver::BranchAndBound(Incumbent::Greedy(GreedyOrder::Lazy))),
                Task::new(1, Solver::Tree(Strategy::AStar)),
                Task::new(2, Solver::Greedy(GreedyOrder::Random)),
            ]
        );
    }

    #[test]
    fn rejects_duplicate_tags_and_empty_channel() {
        let mut cfg = RunConfig::default();
        cfg.tasks.push(Task::new(1, Solver::Tree(Strategy::DepthFirst)));
        assert!(matches!(cfg.validate(), Err(RunError::Config(_))));

        let cfg = RunConfig {
            channel_capacity: 0,
            ..RunConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(RunError::Config(_))));
    }

    #[test]
    fn zero_seed_is_resolved() {
        let cfg = RunConfig {
            seed: 0,
            ..RunConfig::default()
        };
        assert_ne!(cfg.effective_seed(), 0);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = RunConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RunError::Io(_)));
    }

    #[test]
    fn load_round_trips_through_a_file() {
        let path = std::env::temp_dir().join(format!("wayfind-config-{}.json", std::process::id()));
        let cfg = RunConfig {
            seed: 99,
            ..RunConfig::default()
        };
        std::fs::write(&path, serde_json::to_string(&cfg).unwrap()).unwrap();
        let loaded = RunConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, cfg);
    }
}
