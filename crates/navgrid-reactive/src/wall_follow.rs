use navgrid_core::{Grid, Pos, SearchStep};

use crate::dir::Dir;
use crate::trail::Trail;
use crate::STEP_BUDGET;

/// The left-hand rule: keep a facing, prefer turning left, then going
/// straight, then turning right, then doubling back; the first passable
/// option wins and becomes the new facing.
///
/// On some obstacle topologies (a closed ring with the goal inside, say)
/// this circles forever, the classic teaching point, so the run is capped
/// at [`STEP_BUDGET`] moves and then reports no route.
pub struct WallFollow {
    grid: Grid,
    goal: Pos,
    current: Pos,
    facing: Dir,
    path: Vec<Pos>,
    trail: Trail,
    steps: u32,
    done: bool,
}

impl WallFollow {
    /// Build a wall-following run from `start` to `goal`. The initial facing
    /// is right.
    pub fn new(grid: Grid, start: Pos, goal: Pos) -> Self {
        let mut trail = Trail::new(&grid);
        trail.record(start);
        Self {
            grid,
            goal,
            current: start,
            facing: Dir::Right,
            path: vec![start],
            trail,
            steps: 0,
            done: false,
        }
    }

    fn finished(&mut self, reached: bool) -> SearchStep {
        self.done = true;
        if !reached && self.steps >= STEP_BUDGET {
            log::debug!("wall-following: step budget spent without reaching the goal");
        }
        SearchStep {
            explored: self.trail.positions(),
            path: if reached { self.path.clone() } else { Vec::new() },
            complete: true,
            ..SearchStep::default()
        }
    }
}

impl Iterator for WallFollow {
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

        let tries = [
            self.facing.turn_left(),
            self.facing,
            self.facing.turn_right(),
            self.facing.reverse(),
        ];
        let Some(dir) = tries.into_iter().find(|d| self.grid.passable(d.apply(self.current)))
        else {
            // Boxed in on all four sides.
            return Some(self.finished(false));
        };

        self.current = dir.apply(self.current);
        self.facing = dir;
        self.path.push(self.current);
        self.trail.record(self.current);

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

#[cfg(test)]
mod tests {
    use super::*;

    /// The documented pedagogical failure: a ring wall with the goal inside.
    fn ring_trap() -> Grid {
        Grid::from_text(
            "S....\n\
             .###.\n\
             .#G#.\n\
             .###.\n\
             .....",
        )
        .unwrap()
    }

    fn drain(grid: &Grid) -> Vec<SearchStep> {
        let start = grid.start().unwrap();
        let goal = grid.goal().unwrap();
        WallFollow::new(grid.clone(), start, goal).collect()
    }

    #[test]
    fn reaches_goal_in_an_open_corridor() {
        let grid = Grid::from_text("S....G").unwrap();
        let steps = drain(&grid);
        let last = steps.last().unwrap();
        assert!(last.complete);
        assert_eq!(
            last.path,
            (0..6).map(|c| Pos::new(0, c)).collect::<Vec<_>>()
        );
        // One step per move, the last one completing.
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn ring_trap_exhausts_the_budget_without_a_route() {
        let grid = ring_trap();
        let steps = drain(&grid);
        // 500 moves plus the terminal report.
        assert_eq!(steps.len(), STEP_BUDGET as usize + 1);
        let last = steps.last().unwrap();
        assert!(last.no_route());
        // It kept circling: the goal was never visited.
        assert!(!last.explored.contains(&Pos::new(2, 2)));
    }

    #[test]
    fn start_equals_goal_is_immediate() {
        let grid = Grid::new(3, 3);
        let p = Pos::new(1, 1);
        let steps: Vec<_> = WallFollow::new(grid, p, p).collect();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].complete);
        assert_eq!(steps[0].path, vec![p]);
        assert_eq!(steps[0].explored, vec![p]);
    }

    #[test]
    fn boxed_in_start_reports_no_route() {
        let grid = Grid::from_text(
            "#####\n\
             #S#G#\n\
             #####",
        )
        .unwrap();
        let steps = drain(&grid);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].no_route());
    }

    #[test]
    fn facing_is_adopted_from_the_move() {
        // Start facing right; left of "right" is up, which is blocked on the
        // top row, so the first move goes right along the wall.
        let grid = Grid::from_text(
            "S...\n\
             ...G",
        )
        .unwrap();
        let steps = drain(&grid);
        assert_eq!(steps[0].current, Some(Pos::new(0, 1)));
        assert!(steps.last().unwrap().complete);
    }
}
