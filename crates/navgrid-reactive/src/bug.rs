use navgrid_core::{Grid, Pos, SearchStep};

use crate::dir::Dir;
use crate::trail::Trail;
use crate::STEP_BUDGET;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    MoveToGoal,
    FollowWall,
}

/// The Bug algorithm: march straight at the goal, and when the direct move
/// is blocked, fall back to hugging the obstacle until a goal-ward step
/// opens up again.
///
/// In `MoveToGoal` the navigator steps along whichever single axis reduces
/// Manhattan distance, preferring the row move. In `FollowWall` it takes the
/// first passable direction in up/right/down/left order, and returns to
/// `MoveToGoal` as soon as a direct goal-ward step from the new cell is
/// passable. Capped at [`STEP_BUDGET`] moves.
pub struct Bug {
    grid: Grid,
    goal: Pos,
    current: Pos,
    mode: Mode,
    path: Vec<Pos>,
    trail: Trail,
    steps: u32,
    done: bool,
}

impl Bug {
    /// Build a Bug run from `start` to `goal`.
    pub fn new(grid: Grid, start: Pos, goal: Pos) -> Self {
        let mut trail = Trail::new(&grid);
        trail.record(start);
        Self {
            grid,
            goal,
            current: start,
            mode: Mode::MoveToGoal,
            path: vec![start],
            trail,
            steps: 0,
            done: false,
        }
    }

    fn finished(&mut self, reached: bool) -> SearchStep {
        self.done = true;
        if !reached && self.steps >= STEP_BUDGET {
            log::debug!("bug: step budget spent without reaching the goal");
        }
        SearchStep {
            explored: self.trail.positions(),
            path: if reached { self.path.clone() } else { Vec::new() },
            complete: true,
            ..SearchStep::default()
        }
    }

    /// The direct goal-ward candidates from `p`: the row-reducing move
    /// first, then the column-reducing move.
    fn direct_moves(&self, p: Pos) -> [Option<Pos>; 2] {
        let dr = (self.goal.row - p.row).signum();
        let dc = (self.goal.col - p.col).signum();
        [
            (dr != 0).then(|| Pos::new(p.row + dr, p.col)),
            (dc != 0).then(|| Pos::new(p.row, p.col + dc)),
        ]
    }
}

impl Iterator for Bug {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        if self.done {
            return None;
        }
        if self.current == self.goal {
            return Some(self.finished(true));
        }
        if self.steps >= STEP_BUDGET {
            return Some(self.finished(false));
        }
        self.steps += 1;

        let mut next = None;
        if self.mode == Mode::MoveToGoal {
            next = self
                .direct_moves(self.current)
                .into_iter()
                .flatten()
                .find(|&p| self.grid.passable(p));
            if next.is_none() {
                // Hit an obstacle; start hugging it.
                self.mode = Mode::FollowWall;
            }
        }

        if next.is_none() {
            next = Dir::CARDINAL
                .into_iter()
                .map(|d| d.apply(self.current))
                .find(|&p| self.grid.passable(p));
            if let Some(p) = next {
                // Leave the wall once a diagonal-corner probe toward the
                // goal is clear from where we would stand.
                let dr = (self.goal.row - p.row).signum();
                let dc = (self.goal.col - p.col).signum();
                if self.grid.passable(Pos::new(p.row + dr, p.col + dc)) {
                    self.mode = Mode::MoveToGoal;
                }
            }
        }

        let Some(next) = next else {
            return Some(self.finished(false));
        };

        self.current = next;
        self.path.push(next);
        self.trail.record(next);

        let reached = self.current == self.goal;
        if reached {
            self.done = true;
        }
        Some(SearchStep {
            explored: self.trail.positions(),
            frontier: Vec::new(),
            path: self.path.clone(),
            current: Some(self.current),
            complete: reached,
            scores: None,
        })
    }
}
