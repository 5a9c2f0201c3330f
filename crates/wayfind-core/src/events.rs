//! Drawing and status events emitted by the solvers.
//!
//! Solvers never render anything themselves. They push [`Event`]s into an
//! [`EventSink`], normally the sending half of a bounded
//! `crossbeam_channel`, and a single external consumer drains it. Every
//! per-search event carries the [`Tag`] of the task that produced it so the
//! consumer can demultiplex interleaved streams.

use crossbeam_channel::Sender;

use crate::geom::{Point, Segment};
use crate::graph::Graph;

/// Identifies one solver invocation's event stream.
pub type Tag = i32;

// ---------------------------------------------------------------------------
// Event payloads
// ---------------------------------------------------------------------------

/// A candidate or result path, as a line strip through node coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDraw {
    pub tag: Tag,
    pub points: Vec<Point>,
}

/// One human-readable status line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusText {
    pub tag: Tag,
    pub text: String,
}

/// A node marker in the static overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// The graph skeleton, emitted once after construction.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticOverlay {
    pub circles: Vec<Circle>,
    pub segments: Vec<Segment>,
}

/// Anything a solver can tell the outside world.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Path(PathDraw),
    Status(StatusText),
    Overlay(StaticOverlay),
}

impl Event {
    /// The originating task, `None` for the untagged overlay.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Event::Path(p) => Some(p.tag),
            Event::Status(s) => Some(s.tag),
            Event::Overlay(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for solver events.
///
/// Implementations must keep the order in which a single thread emits;
/// there is no ordering requirement across threads.
pub trait EventSink {
    fn emit(&self, event: Event);
}

/// Blocking send: a full bounded channel stalls the solver until the
/// consumer catches up. Events sent after the consumer hung up are dropped.
impl EventSink for Sender<Event> {
    fn emit(&self, event: Event) {
        if let Err(err) = self.send(event) {
            log::warn!("event consumer disconnected, dropping event from tag {:?}", err.0.tag());
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: Event) {
        (**self).emit(event)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// A sink bound to one task's tag and label, with the formatting shared by
/// every solver.
pub struct Emitter<'a, S: EventSink + ?Sized> {
    sink: &'a S,
    tag: Tag,
    label: String,
}

impl<'a, S: EventSink + ?Sized> Emitter<'a, S> {
    pub fn new(sink: &'a S, tag: Tag, label: impl Into<String>) -> Self {
        Self {
            sink,
            tag,
            label: label.into(),
        }
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Emit the line strip for `path`.
    pub fn path(&self, graph: &Graph, path: &[usize]) {
        self.sink.emit(Event::Path(PathDraw {
            tag: self.tag,
            points: graph.points(path),
        }));
    }

    /// Emit a free-form status line.
    pub fn text(&self, text: impl Into<String>) {
        self.sink.emit(Event::Status(StatusText {
            tag: self.tag,
            text: text.into(),
        }));
    }

    /// Emit `"<label>: <cost> (<n> nodes)"` followed by `suffix`.
    pub fn status(&self, cost: f64, path: &[usize], suffix: &str) {
        self.text(status_line(&self.label, cost, path.len(), suffix));
    }
}

/// `"<label>: <cost> (<n> nodes)<suffix>"`, cost to two decimals.
pub fn status_line(label: &str, cost: f64, nodes: usize, suffix: &str) -> String {
    format!("{label}: {cost:.2} ({nodes} nodes){suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn line_graph() -> Graph {
        let nodes = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(6.0, 8.0)];
        Graph::with_nodes(nodes, 10.0, 0.0, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn status_line_format() {
        assert_eq!(status_line("A*", 12.3456, 4, ""), "A*: 12.35 (4 nodes)");
        assert_eq!(
            status_line("BnB", 2.0, 3, " - completed in 9 steps"),
            "BnB: 2.00 (3 nodes) - completed in 9 steps"
        );
    }

    #[test]
    fn emitter_tags_events_in_order() {
        let g = line_graph();
        let (tx, rx) = unbounded();
        let em = Emitter::new(&tx, 7, "DFS");
        em.path(&g, &[0, 1]);
        em.status(g.path_length(&[0, 1]), &[0, 1], "");
        drop(tx);

        let events: Vec<Event> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                Event::Path(PathDraw {
                    tag: 7,
                    points: vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)],
                }),
                Event::Status(StatusText {
                    tag: 7,
                    text: "DFS: 5.00 (2 nodes)".into(),
                }),
            ]
        );
        assert!(events.iter().all(|e| e.tag() == Some(7)));
    }

    #[test]
    fn overlay_is_untagged() {
        assert_eq!(Event::Overlay(line_graph().overlay()).tag(), None);
    }

    #[test]
    fn disconnected_channel_does_not_block() {
        let (tx, rx) = bounded::<Event>(1);
        drop(rx);
        Emitter::new(&tx, 1, "x").text("lost");
    }

    #[test]
    fn null_sink_accepts_everything() {
        let em = Emitter::new(&NullSink, 0, "none");
        em.path(&line_graph(), &[0, 1, 2]);
        em.text("ignored");
    }
}
