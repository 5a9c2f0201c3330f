//! **wayfind-core**: graphs and events shared by every wayfind solver.
//!
//! This crate provides the randomized, connectivity-guaranteed planar
//! [`Graph`] the solvers search, the [`Point`] geometry it is built from,
//! and the [`Event`] stream solvers use to report progress to an external
//! consumer.

pub mod config;
pub mod error;
pub mod events;
pub mod geom;
pub mod graph;

pub use config::GraphConfig;
pub use error::GraphError;
pub use events::{
    Circle, Emitter, Event, EventSink, NullSink, PathDraw, StaticOverlay, StatusText, Tag,
};
pub use geom::{Point, Segment};
pub use graph::{Graph, NODE_RADIUS, Path};
