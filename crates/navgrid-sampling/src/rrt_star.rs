use navgrid_core::{euclid, Grid, PlanStep, Pos};
use rand::{Rng, RngExt};

use crate::rrt::{GOAL_BIAS, MAX_ITERATIONS, STEP_SIZE};
use crate::space::{sample_uniform, segment_clear, steer};
use crate::tree::PlanTree;

/// Radius of the neighborhood searched for better parents and rewiring.
const REWIRE_RADIUS: f64 = 5.0;

/// RRT*: RRT with locally optimal parent choice and rewiring.
///
/// Sampling, steering and rejection are identical to [`Rrt`](crate::Rrt).
/// Before attaching a new node, every existing node within
/// [`REWIRE_RADIUS`] is considered as a parent and the cheapest
/// collision-free one wins; after attaching, any neighbor whose cost would
/// strictly drop by routing through the new node is re-parented (its old
/// inbound edge is replaced). This is what makes RRT* paths improve as the
/// iteration budget is spent.
///
/// Rewiring updates the re-parented node's cost but not its descendants'
/// recorded costs; parent links stay authoritative and paths are always
/// reconstructed from them.
pub struct RrtStar<R: Rng> {
    grid: Grid,
    goal: Pos,
    rng: R,
    tree: PlanTree,
    iterations: usize,
    done: bool,
}

impl<R: Rng> RrtStar<R> {
    /// Build an RRT* run from `start` to `goal`, drawing samples from `rng`.
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

    /// The cheapest collision-free parent for `new_pos` among `near`,
    /// starting from the plain nearest node.
    fn choose_parent(&self, near: &[usize], nearest: usize, new_pos: Pos) -> (usize, f64) {
        let mut best = nearest;
        let mut best_cost = self.tree.node(nearest).cost + euclid(self.tree.node(nearest).pos, new_pos);
        for &i in near {
            let candidate = self.tree.node(i);
            let cost = candidate.cost + euclid(candidate.pos, new_pos);
            if cost < best_cost && segment_clear(&self.grid, candidate.pos, new_pos) {
                best = i;
                best_cost = cost;
            }
        }
        (best, best_cost)
    }

    /// Re-parent every neighbor whose cost strictly drops through `new_idx`.
    fn rewire(&mut self, near: &[usize], new_idx: usize) {
        let new_pos = self.tree.node(new_idx).pos;
        let new_cost = self.tree.node(new_idx).cost;
        for &i in near {
            let through = new_cost + euclid(new_pos, self.tree.node(i).pos);
            if through < self.tree.node(i).cost
                && segment_clear(&self.grid, new_pos, self.tree.node(i).pos)
            {
                self.tree.reparent(i, new_idx, through);
            }
        }
    }
}

impl<R: Rng> Iterator for RrtStar<R> {
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

            // Neighborhood is gathered before insertion, so it never
            // contains the new node itself.
            let near = self.tree.near(new_pos, REWIRE_RADIUS);
            let (parent, cost) = self.choose_parent(&near, nearest, new_pos);
            let idx = self.tree.push(new_pos, Some(parent), cost);
            self.tree.link(parent, idx);
            self.rewire(&near, idx);

            if euclid(new_pos, self.goal) < STEP_SIZE {
                let goal_cost = cost + euclid(new_pos, self.goal);
                let goal_idx = self.tree.push(self.goal, Some(idx), goal_cost);
                self.tree.link(idx, goal_idx);
                self.done = true;
                let mut step = self.step(Some(new_pos), Some(sample));
                step.path = self.tree.path_to(goal_idx);
                step.complete = true;
                return Some(step);
            }
            return Some(self.step(Some(new_pos), Some(sample)));
        }
        self.done = true;
        log::debug!("rrt*: iteration budget spent without reaching the goal");
        let mut step = self.step(None, None);
        step.complete = true;
        Some(step)
    }
}
