//! Frontiers: the containers of pending paths that make one tree-search
//! algorithm behave as DFS, BFS, uniform-cost, greedy or A*.
//!
//! The set of orderings is closed, so [`Frontier`] is an enum rather than a
//! trait object. A priority frontier owns the scoring function it was built
//! with.
//!
//! Equal scores in a [`Frontier::Priority`] are dequeued in insertion order
//! (FIFO), which keeps searches deterministic.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use wayfind_core::Path;

/// Pure function scoring a path; lower is dequeued first.
pub type Scorer<'a> = Box<dyn Fn(&[usize]) -> f64 + 'a>;

// ---------------------------------------------------------------------------
// Priority queue
// ---------------------------------------------------------------------------

struct Entry {
    path: Path,
    score: f64,
    /// Insertion counter breaking score ties, lower first.
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Natural order, smaller score first then earlier insertion; the heap
    // wraps entries in `Reverse`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-heap of paths keyed by `(score, insertion order)`.
pub struct PriorityQueue<'a> {
    heap: BinaryHeap<Reverse<Entry>>,
    scorer: Scorer<'a>,
    seq: u64,
}

impl<'a> PriorityQueue<'a> {
    pub fn new(scorer: impl Fn(&[usize]) -> f64 + 'a) -> Self {
        Self {
            heap: BinaryHeap::new(),
            scorer: Box::new(scorer),
            seq: 0,
        }
    }

    pub fn push(&mut self, path: Path) {
        let score = (self.scorer)(&path);
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { path, score, seq }));
    }

    pub fn pop(&mut self) -> Option<Path> {
        self.heap.pop().map(|Reverse(entry)| entry.path)
    }

    /// Pop the best path together with its score.
    pub fn pop_with_score(&mut self) -> Option<(Path, f64)> {
        self.heap.pop().map(|Reverse(entry)| (entry.path, entry.score))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// A container of pending paths with a strategy-specific dequeue order.
pub enum Frontier<'a> {
    /// Last in, first out.
    Stack(Vec<Path>),
    /// First in, first out.
    Queue(VecDeque<Path>),
    /// Lowest score first, ties in insertion order.
    Priority(PriorityQueue<'a>),
}

impl<'a> Frontier<'a> {
    pub fn stack() -> Self {
        Frontier::Stack(Vec::new())
    }

    pub fn queue() -> Self {
        Frontier::Queue(VecDeque::new())
    }

    pub fn priority(scorer: impl Fn(&[usize]) -> f64 + 'a) -> Self {
        Frontier::Priority(PriorityQueue::new(scorer))
    }

    pub fn enqueue(&mut self, path: Path) {
        match self {
            Frontier::Stack(v) => v.push(path),
            Frontier::Queue(q) => q.push_back(path),
            Frontier::Priority(h) => h.push(path),
        }
    }

    /// Remove the next path, `None` when empty.
    pub fn pop(&mut self) -> Option<Path> {
        match self {
            Frontier::Stack(v) => v.pop(),
            Frontier::Queue(q) => q.pop_front(),
            Frontier::Priority(h) => h.pop(),
        }
    }

    /// Remove the next path.
    ///
    /// # Panics
    ///
    /// Panics if the frontier is empty; check [`is_empty`](Self::is_empty)
    /// first.
    pub fn dequeue(&mut self) -> Path {
        match self.pop() {
            Some(path) => path,
            None => panic!("dequeue called on an empty frontier"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Frontier::Stack(v) => v.is_empty(),
            Frontier::Queue(q) => q.is_empty(),
            Frontier::Priority(h) => h.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Stack(v) => v.len(),
            Frontier::Queue(q) => q.len(),
            Frontier::Priority(h) => h.len(),
        }
    }
}
