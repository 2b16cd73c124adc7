use navgrid_core::{euclid, Grid, PlanStep, Pos};
use rand::{Rng, RngExt};

use crate::space::{sample_uniform, segment_clear, steer};
use crate::tree::PlanTree;

/// Iteration budget shared by RRT and RRT*.
pub(crate) const MAX_ITERATIONS: usize = 300;
/// Maximum extension per iteration, in cells.
pub(crate) const STEP_SIZE: f64 = 3.0;
/// Probability of sampling the goal itself instead of a random position.
pub(crate) const GOAL_BIAS: f64 = 0.1;

/// Rapidly-exploring random tree.
///
/// Grows a single tree rooted at the start for up to [`MAX_ITERATIONS`]
/// iterations: sample (with a [`GOAL_BIAS`] chance of aiming straight at the
/// goal), extend the nearest node by at most [`STEP_SIZE`] toward the
/// sample, and keep the new node only if it lands on free space over a
/// collision-free segment. A rejected iteration spends budget without
/// emitting a step. Reaching within [`STEP_SIZE`] of the goal attaches a
/// final goal node and terminates with the reconstructed path.
pub struct Rrt<R: Rng> {
    grid: Grid,
    goal: Pos,
    rng: R,
    tree: PlanTree,
    iterations: usize,
    done: bool,
}

impl<R: Rng> Rrt<R> {
    /// Build an RRT run from `start` to `goal`, drawing samples from `rng`.
    pub fn new(grid: Grid, start: Pos, goal: Pos, rng: R) -> Self {
        Self {
            tree: PlanTree::rooted(start),
            goal,
            grid,
            rng,
            iterations: 0,
            done: false,
        }
    }

    fn draw(&mut self) -> Pos {
        if self.rng.random::<f64>() < GOAL_BIAS {
            self.goal
        } else {
            sample_uniform(&self.grid, &mut self.rng)
        }
    }

    fn step(&self, current: Option<Pos>, sampled: Option<Pos>) -> PlanStep {
        PlanStep {
            nodes: self.tree.nodes_snapshot(),
            edges: self.tree.edge_endpoints(),
            path: Vec::new(),
            current,
            sampled,
            complete: false,
        }
    }

    /// Attach the goal as a child of `idx` and emit the terminal step.
    fn arrive(&mut self, idx: usize, current: Pos, sampled: Pos) -> PlanStep {
        let cost = self.tree.node(idx).cost + euclid(current, self.goal);
        let goal_idx = self.tree.push(self.goal, Some(idx), cost);
        self.tree.link(idx, goal_idx);
        self.done = true;
        let mut step = self.step(Some(current), Some(sampled));
        step.path = self.tree.path_to(goal_idx);
        step.complete = true;
        step
    }

    fn exhausted(&mut self) -> PlanStep {
        self.done = true;
        log::debug!("rrt: iteration budget spent without reaching the goal");
        let mut step = self.step(None, None);
        step.complete = true;
        step
    }
}

impl<R: Rng> Iterator for Rrt<R> {
    type Item = PlanStep;

    fn next(&mut self) -> Option<PlanStep> {
        if self.done {
            return None;
        }
        if self.tree.node(0).pos == self.goal {
            self.done = true;
            let mut step = self.step(None, None);
            step.path = vec![self.goal];
            step.complete = true;
            return Some(step);
        }
        while self.iterations < MAX_ITERATIONS {
            self.iterations += 1;

            let sample = self.draw();
            let nearest = self.tree.nearest(sample);
            let new_pos = steer(self.tree.node(nearest).pos, sample, STEP_SIZE);

            if !self.grid.passable(new_pos)
                || !segment_clear(&self.grid, self.tree.node(nearest).pos, new_pos)
            {
                continue;
            }

            let cost = self.tree.node(nearest).cost + euclid(self.tree.node(nearest).pos, new_pos);
            let idx = self.tree.push(new_pos, Some(nearest), cost);
            self.tree.link(nearest, idx);

            if euclid(new_pos, self.goal) < STEP_SIZE {
                return Some(self.arrive(idx, new_pos, sample));
            }
            return Some(self.step(Some(new_pos), Some(sample)));
        }
        Some(self.exhausted())
    }
}
