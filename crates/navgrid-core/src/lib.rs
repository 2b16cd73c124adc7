//! Shared foundation for the navgrid path-planning engine.
//!
//! This crate holds everything the planner crates agree on:
//!
//! - [`Pos`] and the grid distance functions ([`manhattan`], [`euclid`])
//! - [`Grid`] and [`CellKind`], the occupancy grid the planners read
//! - the trace protocol: [`SearchStep`] for graph/reactive traces and
//!   [`PlanStep`] for sampling traces
//! - the algorithm registry: [`AlgorithmId`] and [`Group`]
//!
//! Planners take a [`Grid`] by value (it is cheap to clone) and emit one
//! snapshot per unit of work through a plain `Iterator`, so a caller can
//! animate, single-step, or abandon a run at its own pace. The grid a caller
//! holds is never mutated by a run.

mod geom;
mod grid;
mod registry;
mod trace;

pub use geom::{euclid, manhattan, Pos};
pub use grid::{CellKind, Grid, GridError};
pub use registry::{AlgorithmId, Group};
pub use trace::{NodeScore, NodeScores, PlanNode, PlanStep, SearchStep};
