//! Graph search over occupancy grids, one frontier expansion at a time.
//!
//! All five algorithms run through a single resumable computation,
//! [`GraphSearch`], and differ only in how the frontier is ordered and which
//! costs are tracked (see [`Strategy`]):
//!
//! | Strategy | Frontier order | Cost tracked | Optimal |
//! |---|---|---|---|
//! | [`Strategy::Bfs`] | FIFO | none | edge count |
//! | [`Strategy::Dfs`] | LIFO, neighbors reversed | none | no |
//! | [`Strategy::Dijkstra`] | ascending g | g | path cost |
//! | [`Strategy::Greedy`] | ascending h (Manhattan) | h | no |
//! | [`Strategy::Astar`] | ascending f = g + h | g and h | path cost |
//!
//! [`GraphSearch`] implements `Iterator`: each `next()` performs exactly one
//! frontier expansion and returns the full [`SearchStep`] snapshot, so the
//! caller decides the pacing (drain it, single-step it, or drop it to
//! cancel). The iterator ends right after its completed step.
//!
//! [`SearchStep`]: navgrid_core::SearchStep

mod frontier;
mod node;
mod search;

pub use search::{GraphSearch, Strategy};
