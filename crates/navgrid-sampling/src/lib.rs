//! Sampling-based planners: explore by drawing random positions instead of
//! enumerating the grid.
//!
//! Three planners share the primitives in [`space`]: Euclidean steering, a
//! discretized segment collision test, and uniform in-bounds sampling.
//!
//! - [`Prm`] is batch: sample a roadmap, connect nearby pairs, then query it
//!   with a breadth-first search.
//! - [`Rrt`] is incremental: grow a tree from the start toward random
//!   samples, with a goal bias.
//! - [`RrtStar`] is RRT plus locally optimal parent choice and rewiring, so
//!   path cost keeps improving as the tree densifies.
//!
//! Randomness is injected: every planner is generic over [`rand::Rng`], so a
//! test (or a reproducible demo) passes a seeded `StdRng` while interactive
//! callers pass `rand::rng()`. Each planner implements `Iterator`, emitting
//! one [`PlanStep`] snapshot per unit of observable progress; iterations
//! whose sample is rejected consume budget silently, exactly like the
//! tree they fail to grow.
//!
//! [`PlanStep`]: navgrid_core::PlanStep

mod prm;
mod rrt;
mod rrt_star;
pub mod space;
mod tree;

pub use prm::Prm;
pub use rrt::Rrt;
pub use rrt_star::RrtStar;
