//! Exhaustive branch-and-bound over simple paths.
//!
//! The solver explores every simple path from the source by backtracking on
//! one mutable buffer, and abandons a partial path as soon as it is no
//! shorter than the best complete path known (the incumbent). Pruning is
//! sound because edge weights are non-negative: extending a path never makes
//! it shorter.

use wayfind_core::{Emitter, EventSink, Graph, Path, Tag};

use crate::error::{Result, SearchError};

/// Label used in status lines.
pub const LABEL: &str = "BnB";

/// Result of a branch-and-bound run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbOutcome {
    /// Final incumbent: the seed if nothing shorter exists.
    pub path: Path,
    pub length: f64,
    /// Number of recursive steps taken.
    pub steps: u64,
    /// Length of every incumbent that replaced the previous one, in order.
    pub improvements: Vec<f64>,
}

/// Run branch-and-bound starting from the complete path `seed`.
///
/// Fails with [`SearchError::InvalidSeed`] before doing any work if `seed`
/// is not a complete source-to-destination path of `graph`.
pub fn branch_and_bound<S: EventSink + ?Sized>(
    graph: &Graph,
    seed: Path,
    sink: &S,
    tag: Tag,
) -> Result<BnbOutcome> {
    let mut solver = BranchAndBound::new(graph, seed, Emitter::new(sink, tag, LABEL))?;
    Ok(solver.solve())
}

/// Search state of one branch-and-bound run. Never shared between runs.
pub struct BranchAndBound<'g, 's, S: EventSink + ?Sized> {
    graph: &'g Graph,
    emitter: Emitter<'s, S>,
    /// Path being extended, always starting at the source.
    current: Path,
    /// `prefix[i]` is the length of `current[..=i]`.
    prefix: Vec<f64>,
    on_path: Vec<bool>,
    best: Path,
    best_len: f64,
    steps: u64,
    improvements: Vec<f64>,
}

impl<'g, 's, S: EventSink + ?Sized> BranchAndBound<'g, 's, S> {
    pub fn new(graph: &'g Graph, seed: Path, emitter: Emitter<'s, S>) -> Result<Self> {
        if !graph.is_complete(&seed) {
            return Err(SearchError::InvalidSeed(seed));
        }
        let n = graph.len();
        let mut current = Vec::with_capacity(n);
        current.push(graph.source());
        let mut prefix = Vec::with_capacity(n);
        prefix.push(0.0);
        let mut on_path = vec![false; n];
        on_path[graph.source()] = true;

        Ok(Self {
            graph,
            emitter,
            current,
            prefix,
            on_path,
            best_len: graph.path_length(&seed),
            best: seed,
            steps: 0,
            improvements: Vec::new(),
        })
    }

    /// Current incumbent.
    pub fn best(&self) -> &[usize] {
        &self.best
    }

    pub fn best_length(&self) -> f64 {
        self.best_len
    }

    /// Explore the whole search space and return the final incumbent.
    ///
    /// Step and improvement counts cover this call only; a repeated call
    /// starts from the incumbent the previous one left behind.
    pub fn solve(&mut self) -> BnbOutcome {
        self.steps = 0;
        self.improvements.clear();
        self.emitter.text("Branch and bound");
        self.emitter.status(self.best_len, &self.best, " - warming up");
        log::debug!(
            "{LABEL} (tag {}): seed length {:.2}",
            self.emitter.tag(),
            self.best_len
        );

        self.step();

        self.emitter.path(self.graph, &self.best);
        self.emitter.status(
            self.best_len,
            &self.best,
            &format!(" - completed in {} steps", self.steps),
        );
        log::debug!(
            "{LABEL} (tag {}): best {:?} of length {:.2} after {} steps, {} improvements",
            self.emitter.tag(),
            self.best,
            self.best_len,
            self.steps,
            self.improvements.len()
        );

        BnbOutcome {
            path: self.best.clone(),
            length: self.best_len,
            steps: self.steps,
            improvements: self.improvements.clone(),
        }
    }

    fn step(&mut self) {
        self.steps += 1;
        let graph = self.graph;
        let last = self.current[self.current.len() - 1];
        let len = self.prefix[self.prefix.len() - 1];

        if last == graph.destination() && len < self.best_len {
            self.improve(len);
            return;
        }
        if len >= self.best_len {
            // bound
            return;
        }

        for next in graph.neighbors(last) {
            if self.on_path[next] {
                continue;
            }
            self.push(next, len + graph.weight(last, next));
            self.step();
            self.pop();
        }
    }

    fn improve(&mut self, len: f64) {
        self.best.clear();
        self.best.extend_from_slice(&self.current);
        self.best_len = len;
        self.improvements.push(len);
        self.emitter.path(self.graph, &self.best);
        self.emitter.status(len, &self.best, "");
        log::trace!("{LABEL}: improved to {len:.2} via {:?}", self.best);
    }

    fn push(&mut self, node: usize, len: f64) {
        self.current.push(node);
        self.prefix.push(len);
        self.on_path[node] = true;
    }

    fn pop(&mut self) {
        if let Some(node) = self.current.pop() {
            self.on_path[node] = false;
        }
        self.prefix.pop();
    }
}
