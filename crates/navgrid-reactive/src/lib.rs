//! Reactive navigation: local, sensor-style decisions, one cell at a time.
//!
//! Unlike graph search, these navigators keep no frontier and no global
//! visited bookkeeping: each move is decided from the occupancy of the
//! cells immediately around the robot. What they *do* keep is a revisit log
//! so a display can shade where the robot has been.
//!
//! Three policies:
//!
//! - [`WallFollow`], the textbook left-hand rule. Famously loops forever on
//!   some obstacle topologies; that failure mode is intentional and the
//!   [`STEP_BUDGET`] turns it into a clean "no route" result.
//! - [`Bug`] heads straight for the goal, hugs obstacles when blocked.
//! - [`Dwa`], a one-cell-per-step reduction of the Dynamic Window Approach:
//!   scores all eight neighbor cells by goal distance and clearance.
//!
//! Each navigator implements `Iterator`, emitting one [`SearchStep`] per
//! executed move. The final step always has `complete == true`, with the
//! path populated only if the goal was actually reached.
//!
//! [`SearchStep`]: navgrid_core::SearchStep

mod bug;
mod dir;
mod dwa;
mod trail;
mod wall_follow;

pub use bug::Bug;
pub use dir::Dir;
pub use dwa::Dwa;
pub use wall_follow::WallFollow;

/// Moves a navigator may execute before giving up.
///
/// Guarantees termination when the goal is unreachable or the policy cycles;
/// hitting the budget is reported the same way as true unreachability.
pub const STEP_BUDGET: u32 = 500;
