use navgrid_core::{manhattan, Grid, NodeScore, NodeScores, Pos, SearchStep};

use crate::frontier::Frontier;
use crate::node::{SearchNode, UNREACHED};

/// Frontier ordering and cost bookkeeping for [`GraphSearch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    Bfs,
    Dfs,
    Dijkstra,
    Greedy,
    Astar,
}

impl Strategy {
    /// Whether visited bookkeeping happens when a node is popped (priority
    /// strategies, which may hold superseded duplicates) rather than when it
    /// is pushed (BFS/DFS, which never enqueue a position twice).
    fn visits_on_pop(self) -> bool {
        matches!(self, Self::Dijkstra | Self::Greedy | Self::Astar)
    }

    fn tracks_g(self) -> bool {
        matches!(self, Self::Dijkstra | Self::Astar)
    }

    fn heuristic(self, p: Pos, goal: Pos) -> i32 {
        match self {
            Self::Greedy | Self::Astar => manhattan(p, goal),
            _ => 0,
        }
    }

    /// Frontier priority of a node. Unused by BFS/DFS.
    fn key(self, g: i32, h: i32) -> i32 {
        match self {
            Self::Dijkstra => g,
            Self::Greedy => h,
            _ => g + h,
        }
    }

    /// Secondary ordering among equal keys. A* prefers the deeper node so
    /// that an exact heuristic walks straight to the goal instead of
    /// flood-filling the equal-f plateau.
    fn tie(self, g: i32) -> i32 {
        match self {
            Self::Astar => -g,
            _ => 0,
        }
    }
}

/// A resumable graph search: one `next()` call performs one frontier
/// expansion and returns the resulting [`SearchStep`] snapshot.
///
/// The search owns a private copy of the grid; the caller's grid is never
/// touched. Construction with an out-of-bounds start yields an immediately
/// exhausted iterator (no steps), per the caller-validates-input contract.
///
/// ```
/// use navgrid_core::{Grid, Pos};
/// use navgrid_search::GraphSearch;
///
/// let grid = Grid::from_text("S...\n.##.\n...G").unwrap();
/// let steps: Vec<_> =
///     GraphSearch::astar(grid.clone(), grid.start().unwrap(), grid.goal().unwrap()).collect();
/// let last = steps.last().unwrap();
/// assert!(last.complete);
/// assert_eq!(last.path.len(), 6);
/// ```
pub struct GraphSearch {
    grid: Grid,
    goal: Pos,
    strategy: Strategy,
    nodes: Vec<SearchNode>,
    frontier: Frontier,
    visited: Vec<bool>,
    visit_log: Vec<Pos>,
    best_g: Vec<i32>,
    done: bool,
}

impl GraphSearch {
    /// Build a search over `grid` from `start` to `goal`.
    pub fn new(grid: Grid, start: Pos, goal: Pos, strategy: Strategy) -> Self {
        let cells = (grid.rows() * grid.cols()).max(0) as usize;
        let mut search = Self {
            goal,
            strategy,
            nodes: Vec::new(),
            frontier: match strategy {
                Strategy::Bfs => Frontier::queue(),
                Strategy::Dfs => Frontier::stack(),
                _ => Frontier::heap(),
            },
            visited: vec![false; cells],
            visit_log: Vec::new(),
            best_g: vec![UNREACHED; cells],
            grid,
            done: false,
        };

        let Some(si) = search.flat(start) else {
            // Malformed start: emit no steps rather than anything harmful.
            search.done = true;
            return search;
        };

        let h = strategy.heuristic(start, goal);
        search.nodes.push(SearchNode {
            pos: start,
            g: 0,
            h,
            parent: None,
        });
        search
            .frontier
            .push(0, strategy.key(0, h), strategy.tie(0));
        if strategy.tracks_g() {
            search.best_g[si] = 0;
        }
        if !strategy.visits_on_pop() {
            search.visited[si] = true;
            search.visit_log.push(start);
        }
        search
    }

    /// Breadth-first search: FIFO frontier, shortest path in edge count.
    pub fn bfs(grid: Grid, start: Pos, goal: Pos) -> Self {
        Self::new(grid, start, goal, Strategy::Bfs)
    }

    /// Depth-first search: LIFO frontier, neighbors reversed before push.
    pub fn dfs(grid: Grid, start: Pos, goal: Pos) -> Self {
        Self::new(grid, start, goal, Strategy::Dfs)
    }

    /// Dijkstra: frontier ordered by accumulated cost g.
    pub fn dijkstra(grid: Grid, start: Pos, goal: Pos) -> Self {
        Self::new(grid, start, goal, Strategy::Dijkstra)
    }

    /// Greedy best-first: frontier ordered by Manhattan distance to goal.
    pub fn greedy(grid: Grid, start: Pos, goal: Pos) -> Self {
        Self::new(grid, start, goal, Strategy::Greedy)
    }

    /// A*: frontier ordered by f = g + h with the Manhattan heuristic.
    pub fn astar(grid: Grid, start: Pos, goal: Pos) -> Self {
        Self::new(grid, start, goal, Strategy::Astar)
    }

    /// The strategy this search runs.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    fn flat(&self, p: Pos) -> Option<usize> {
        if !self.grid.contains(p) {
            return None;
        }
        Some((p.row * self.grid.cols() + p.col) as usize)
    }

    /// Walk the parent chain back to the root and return it start-first.
    fn reconstruct(&self, mut idx: usize) -> Vec<Pos> {
        let mut path = vec![self.nodes[idx].pos];
        while let Some(parent) = self.nodes[idx].parent {
            path.push(self.nodes[parent].pos);
            idx = parent;
        }
        path.reverse();
        path
    }

    fn frontier_positions(&self) -> Vec<Pos> {
        self.frontier
            .waiting()
            .into_iter()
            .map(|i| self.nodes[i].pos)
            .collect()
    }

    /// Frontier (g, h, f) table, exposed by A* only.
    fn scores(&self) -> Option<NodeScores> {
        if self.strategy != Strategy::Astar {
            return None;
        }
        let mut scores = NodeScores::new();
        for i in self.frontier.waiting() {
            let n = &self.nodes[i];
            scores.insert(
                n.pos,
                NodeScore {
                    g: n.g,
                    h: n.h,
                    f: n.f(),
                },
            );
        }
        Some(scores)
    }

    /// Push every admissible neighbor of the node at `ci`.
    fn expand(&mut self, ci: usize) {
        let cpos = self.nodes[ci].pos;
        let cg = self.nodes[ci].g;
        let mut neighbors = cpos.neighbors4();
        if self.strategy == Strategy::Dfs {
            neighbors.reverse();
        }

        for npos in neighbors {
            if !self.grid.passable(npos) {
                continue;
            }
            let Some(ni) = self.flat(npos) else {
                continue;
            };
            if self.visited[ni] {
                continue;
            }

            let g = cg + 1;
            if self.strategy.tracks_g() {
                // Standard relaxation: re-insert on a strictly cheaper g and
                // let the visited guard discard the superseded entry later.
                if self.best_g[ni] != UNREACHED && g >= self.best_g[ni] {
                    continue;
                }
                self.best_g[ni] = g;
            }

            let h = self.strategy.heuristic(npos, self.goal);
            let idx = self.nodes.len();
            self.nodes.push(SearchNode {
                pos: npos,
                g,
                h,
                parent: Some(ci),
            });
            self.frontier
                .push(idx, self.strategy.key(g, h), self.strategy.tie(g));
            if !self.strategy.visits_on_pop() {
                self.visited[ni] = true;
                self.visit_log.push(npos);
            }
        }
    }
}

impl Iterator for GraphSearch {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        if self.done {
            return None;
        }
        loop {
            let Some(ci) = self.frontier.pop() else {
                // Frontier exhausted: the goal is unreachable.
                self.done = true;
                log::debug!(
                    "{:?}: frontier exhausted after {} cells, no route",
                    self.strategy,
                    self.visit_log.len()
                );
                return Some(SearchStep {
                    explored: self.visit_log.clone(),
                    complete: true,
                    ..SearchStep::default()
                });
            };

            let cpos = self.nodes[ci].pos;
            if self.strategy.visits_on_pop() {
                let Some(fi) = self.flat(cpos) else {
                    continue;
                };
                if self.visited[fi] {
                    // A superseded duplicate; discard and keep going.
                    continue;
                }
                self.visited[fi] = true;
                self.visit_log.push(cpos);
            }

            if cpos == self.goal {
                self.done = true;
                return Some(SearchStep {
                    explored: self.visit_log.clone(),
                    frontier: Vec::new(),
                    path: self.reconstruct(ci),
                    current: Some(cpos),
                    complete: true,
                    scores: self.scores(),
                });
            }

            // Snapshot before expanding, so the frontier shows the state the
            // examined node was chosen from.
            let step = SearchStep {
                explored: self.visit_log.clone(),
                frontier: self.frontier_positions(),
                path: Vec::new(),
                current: Some(cpos),
                complete: false,
                scores: self.scores(),
            };
            self.expand(ci);
            return Some(step);
        }
    }
}
