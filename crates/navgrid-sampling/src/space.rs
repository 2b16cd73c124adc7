//! Continuous-space primitives over the discrete grid.

use navgrid_core::{euclid, Grid, Pos};
use rand::{Rng, RngExt};

/// Whether the straight segment between two positions stays on passable
/// cells.
///
/// The segment is discretized into `max(|Δrow|, |Δcol|)` sub-steps, each
/// rounded to the nearest cell; a sample on a wall or outside the grid
/// rejects the whole segment.
pub fn segment_clear(grid: &Grid, from: Pos, to: Pos) -> bool {
    let steps = (to.row - from.row).abs().max((to.col - from.col).abs());
    for i in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            f64::from(i) / f64::from(steps)
        };
        let row = (f64::from(from.row) + f64::from(to.row - from.row) * t).round() as i32;
        let col = (f64::from(from.col) + f64::from(to.col - from.col) * t).round() as i32;
        if !grid.passable(Pos::new(row, col)) {
            return false;
        }
    }
    true
}

/// Draw a uniformly random in-bounds position. The grid must be non-empty.
pub fn sample_uniform<R: Rng>(grid: &Grid, rng: &mut R) -> Pos {
    Pos::new(
        rng.random_range(0..grid.rows()),
        rng.random_range(0..grid.cols()),
    )
}

/// Move from `from` toward `to`, clipping the step to `max_dist`.
///
/// Within range the target itself is returned; otherwise the point at
/// `max_dist` along the segment, rounded to a cell.
pub fn steer(from: Pos, to: Pos, max_dist: f64) -> Pos {
    let dist = euclid(from, to);
    if dist <= max_dist {
        return to;
    }
    let ratio = max_dist / dist;
    Pos::new(
        (f64::from(from.row) + f64::from(to.row - from.row) * ratio).round() as i32,
        (f64::from(from.col) + f64::from(to.col - from.col) * ratio).round() as i32,
    )
}
