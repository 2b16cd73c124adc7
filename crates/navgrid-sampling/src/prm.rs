use std::collections::VecDeque;

use navgrid_core::{euclid, CellKind, Grid, PlanStep, Pos};
use rand::Rng;

use crate::space::{sample_uniform, segment_clear};
use crate::tree::PlanTree;

/// How many random candidates the sampling phase draws.
const SAMPLE_COUNT: usize = 100;
/// Node pairs within this Euclidean distance are candidates for an edge.
const CONNECT_RADIUS: f64 = 5.0;
/// Redraws allowed per candidate to get off a wall cell.
const RESAMPLE_ATTEMPTS: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Sampling,
    Connecting,
    Querying,
}

/// Probabilistic roadmap planner.
///
/// Three phases, each advanced one observable event per `next()` call:
/// sampling emits a step per accepted random node, connection emits a step
/// per verified edge between nodes within [`CONNECT_RADIUS`], and the query
/// phase runs one breadth-first search over the finished roadmap and emits
/// the terminal step. Start and goal are always nodes 0 and 1, so rerunning
/// the query on the same roadmap is deterministic.
pub struct Prm<R: Rng> {
    grid: Grid,
    goal: Pos,
    rng: R,
    tree: PlanTree,
    phase: Phase,
    drawn: usize,
    scan: (usize, usize),
    done: bool,
}

impl<R: Rng> Prm<R> {
    /// Build a PRM run from `start` to `goal`, drawing samples from `rng`.
    pub fn new(grid: Grid, start: Pos, goal: Pos, rng: R) -> Self {
        Self {
            tree: PlanTree::seeded(start, goal),
            goal,
            grid,
            rng,
            phase: Phase::Sampling,
            drawn: 0,
            scan: (0, 1),
            done: false,
        }
    }

    fn step(&self, sampled: Option<Pos>) -> PlanStep {
        PlanStep {
            nodes: self.tree.nodes_snapshot(),
            edges: self.tree.edge_endpoints(),
            path: Vec::new(),
            current: None,
            sampled,
            complete: false,
        }
    }

    /// Unweighted BFS over the roadmap from node 0 to the goal position.
    fn query(&self) -> Vec<Pos> {
        let n = self.tree.len();
        let mut adjacent: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(a, b) in self.tree.edges() {
            adjacent[a].push(b);
            adjacent[b].push(a);
        }

        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[0] = true;
        queue.push_back(0);

        while let Some(i) = queue.pop_front() {
            if self.tree.node(i).pos == self.goal {
                let mut path = vec![self.tree.node(i).pos];
                let mut cur = i;
                while let Some(p) = prev[cur] {
                    path.push(self.tree.node(p).pos);
                    cur = p;
                }
                path.reverse();
                return path;
            }
            for &j in &adjacent[i] {
                if !visited[j] {
                    visited[j] = true;
                    prev[j] = Some(i);
                    queue.push_back(j);
                }
            }
        }
        Vec::new()
    }
}

impl<R: Rng> Iterator for Prm<R> {
    type Item = PlanStep;

    fn next(&mut self) -> Option<PlanStep> {
        if self.done {
            return None;
        }
        if self.tree.node(0).pos == self.goal {
            // Degenerate query: the start already satisfies it.
            self.done = true;
            let mut step = self.step(None);
            step.path = vec![self.goal];
            step.complete = true;
            return Some(step);
        }
        loop {
            match self.phase {
                Phase::Sampling => {
                    while self.drawn < SAMPLE_COUNT {
                        self.drawn += 1;
                        let mut sample = sample_uniform(&self.grid, &mut self.rng);
                        let mut attempts = 0;
                        while self.grid.at(sample) == Some(CellKind::Wall)
                            && attempts < RESAMPLE_ATTEMPTS
                        {
                            sample = sample_uniform(&self.grid, &mut self.rng);
                            attempts += 1;
                        }
                        if self.grid.at(sample) != Some(CellKind::Wall) {
                            self.tree.push(sample, None, 0.0);
                            return Some(self.step(Some(sample)));
                        }
                        // Draw burned on walls; move on to the next one.
                    }
                    self.phase = Phase::Connecting;
                }
                Phase::Connecting => {
                    let n = self.tree.len();
                    while self.scan.0 < n {
                        let (i, j) = self.scan;
                        if j >= n {
                            self.scan = (i + 1, i + 2);
                            continue;
                        }
                        self.scan.1 += 1;
                        let a = self.tree.node(i).pos;
                        let b = self.tree.node(j).pos;
                        if euclid(a, b) <= CONNECT_RADIUS && segment_clear(&self.grid, a, b) {
                            self.tree.link(i, j);
                            return Some(self.step(None));
                        }
                    }
                    self.phase = Phase::Querying;
                }
                Phase::Querying => {
                    self.done = true;
                    let path = self.query();
                    if path.is_empty() {
                        log::debug!(
                            "prm: start and goal are in disconnected roadmap components"
                        );
                    }
                    let mut step = self.step(None);
                    step.path = path;
                    step.complete = true;
                    return Some(step);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Drain a run without retaining every snapshot (each one carries the
    /// full roadmap): keep only the final step plus the counters.
    fn drain(grid: &Grid, start: Pos, goal: Pos, seed: u64) -> (PlanStep, usize, usize) {
        let mut total = 0;
        let mut samples = 0;
        let mut last = None;
        for step in Prm::new(grid.clone(), start, goal, StdRng::seed_from_u64(seed)) {
            total += 1;
            if step.sampled.is_some() {
                samples += 1;
            }
            last = Some(step);
        }
        (last.expect("at least one step"), samples, total)
    }

    #[test]
    fn small_open_grid_always_connects() {
        // Every cell of a 4x4 open grid is within the connection radius of
        // every other (diagonal ~4.24 < 5), so whatever the samples are the
        // roadmap is complete and the query finds a route.
        let grid = Grid::new(4, 4);
        let start = Pos::new(0, 0);
        let goal = Pos::new(3, 3);
        for seed in 0..5 {
            let (last, samples, _) = drain(&grid, start, goal, seed);
            assert!(last.complete);
            assert_eq!(last.path.first().copied(), Some(start));
            assert_eq!(last.path.last().copied(), Some(goal));
            // All 100 draws land on open cells.
            assert_eq!(samples, SAMPLE_COUNT);
            assert_eq!(last.node_count(), SAMPLE_COUNT + 2);
        }
    }

    #[test]
    fn split_world_reports_no_route() {
        // A full wall column separates start from goal; no edge can cross
        // it, so the components stay disconnected for any sample set.
        let mut grid = Grid::new(8, 8);
        for row in 0..8 {
            grid.set(Pos::new(row, 4), CellKind::Wall);
        }
        let (last, _, _) = drain(&grid, Pos::new(0, 0), Pos::new(7, 7), 11);
        assert!(last.no_route());
        // No edge endpoint may sit on the wall column.
        for (a, b) in &last.edges {
            assert_ne!(a.col, 4);
            assert_ne!(b.col, 4);
        }
    }

    #[test]
    fn identical_seeds_build_identical_roadmaps() {
        let mut grid = Grid::new(10, 10);
        for col in 2..9 {
            grid.set(Pos::new(5, col), CellKind::Wall);
        }
        let (la, sa, ta) = drain(&grid, Pos::new(0, 0), Pos::new(9, 9), 42);
        let (lb, sb, tb) = drain(&grid, Pos::new(0, 0), Pos::new(9, 9), 42);
        assert_eq!(ta, tb);
        assert_eq!(sa, sb);
        assert_eq!(la.path, lb.path);
        assert_eq!(la.edges, lb.edges);
        assert_eq!(la.node_count(), lb.node_count());
    }

    #[test]
    fn edges_stay_within_the_radius() {
        let grid = Grid::new(12, 12);
        let (last, _, _) = drain(&grid, Pos::new(0, 0), Pos::new(11, 11), 3);
        assert!(!last.edges.is_empty());
        for &(a, b) in &last.edges {
            assert!(euclid(a, b) <= CONNECT_RADIUS);
        }
    }

    #[test]
    fn start_equals_goal_is_immediate() {
        let grid = Grid::new(5, 5);
        let p = Pos::new(2, 2);
        let (last, _, total) = drain(&grid, p, p, 9);
        assert_eq!(total, 1);
        assert!(last.complete);
        assert_eq!(last.path, vec![p]);
    }
}
