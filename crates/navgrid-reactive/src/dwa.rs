use navgrid_core::{manhattan, Grid, Pos, SearchStep};

use crate::dir::OCTANT;
use crate::trail::Trail;
use crate::STEP_BUDGET;

/// Weight of the clearance term in the candidate score.
const CLEARANCE_WEIGHT: f64 = 0.5;

/// How many runner-up candidates a step advertises as its `frontier`.
const ALTERNATIVES: usize = 3;

/// A one-cell-per-step reduction of the Dynamic Window Approach.
///
/// Each step scores all eight surrounding cells by
/// `distance_to_goal - 0.5 * clearance`, where clearance counts the passable
/// cells among the candidate's own eight neighbors, and moves to the lowest
/// score. The next-best three candidates are exposed as an advisory
/// `frontier` so a display can show what was almost chosen. Capped at
/// [`STEP_BUDGET`] moves.
pub struct Dwa {
    grid: Grid,
    goal: Pos,
    current: Pos,
    path: Vec<Pos>,
    trail: Trail,
    steps: u32,
    done: bool,
}

struct Candidate {
    pos: Pos,
    score: f64,
}

impl Dwa {
    /// Build a DWA run from `start` to `goal`.
    pub fn new(grid: Grid, start: Pos, goal: Pos) -> Self {
        let mut trail = Trail::new(&grid);
        trail.record(start);
        Self {
            grid,
            goal,
            current: start,
            path: vec![start],
            trail,
            steps: 0,
            done: false,
        }
    }

    fn finished(&mut self, reached: bool) -> SearchStep {
        self.done = true;
        if !reached && self.steps >= STEP_BUDGET {
            log::debug!("dwa: step budget spent without reaching the goal");
        }
        SearchStep {
            explored: self.trail.positions(),
            path: if reached { self.path.clone() } else { Vec::new() },
            complete: true,
            ..SearchStep::default()
        }
    }

    fn clearance(&self, p: Pos) -> i32 {
        OCTANT
            .iter()
            .filter(|&&(dr, dc)| self.grid.passable(p.shift(dr, dc)))
            .count() as i32
    }

    /// Score every passable surrounding cell, best first. The sort is
    /// stable, so equal scores keep the cardinal-before-diagonal order.
    fn candidates(&self) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = OCTANT
            .iter()
            .map(|&(dr, dc)| self.current.shift(dr, dc))
            .filter(|&p| self.grid.passable(p))
            .map(|pos| Candidate {
                pos,
                score: manhattan(pos, self.goal) as f64
                    - CLEARANCE_WEIGHT * self.clearance(pos) as f64,
            })
            .collect();
        out.sort_by(|a, b| a.score.total_cmp(&b.score));
        out
    }
}

impl Iterator for Dwa {
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

        let candidates = self.candidates();
        let Some(best) = candidates.first() else {
            // Nowhere to go at all.
            return Some(self.finished(false));
        };

        self.current = best.pos;
        self.path.push(self.current);
        self.trail.record(self.current);

        let reached = self.current == self.goal;
        if reached {
            self.done = true;
        }
        Some(SearchStep {
            explored: self.trail.positions(),
            frontier: candidates
                .iter()
                .skip(1)
                .take(ALTERNATIVES)
                .map(|c| c.pos)
                .collect(),
            path: self.path.clone(),
            current: Some(self.current),
            complete: reached,
            scores: None,
        })
    }
}
