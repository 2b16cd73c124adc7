//! Shared scenario boards and the algorithm dispatch used by the demo
//! binaries.
//!
//! The library crates expose two step types (graph/reactive traces and
//! sampling traces); [`TraceStep`] unifies them so a front-end can drive any
//! of the eleven planners through one loop, which is exactly what
//! `walkthrough.rs` does.

use navgrid_core::{AlgorithmId, CellKind, Grid, PlanStep, Pos, SearchStep};
use navgrid_reactive::{Bug, Dwa, WallFollow};
use navgrid_sampling::{Prm, Rrt, RrtStar};
use navgrid_search::GraphSearch;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A step from whichever planner family is running.
#[derive(Clone, Debug)]
pub enum TraceStep {
    Search(SearchStep),
    Plan(PlanStep),
}

impl TraceStep {
    /// Whether the run is finished.
    pub fn complete(&self) -> bool {
        match self {
            Self::Search(s) => s.complete,
            Self::Plan(s) => s.complete,
        }
    }

    /// The route, empty until a successful completion.
    pub fn path(&self) -> &[Pos] {
        match self {
            Self::Search(s) => &s.path,
            Self::Plan(s) => &s.path,
        }
    }

    /// A terminal step that found no route.
    pub fn no_route(&self) -> bool {
        match self {
            Self::Search(s) => s.no_route(),
            Self::Plan(s) => s.no_route(),
        }
    }

    /// How much of the world the planner has touched (cells or nodes).
    pub fn coverage(&self) -> usize {
        match self {
            Self::Search(s) => s.explored_count(),
            Self::Plan(s) => s.node_count(),
        }
    }
}

/// Construct the chosen planner over `(grid, start, goal)` and box its step
/// stream. Sampling planners draw from a `StdRng` seeded with `seed`, so a
/// demo run is reproducible.
pub fn launch(
    id: AlgorithmId,
    grid: &Grid,
    start: Pos,
    goal: Pos,
    seed: u64,
) -> Box<dyn Iterator<Item = TraceStep>> {
    let grid = grid.clone();
    let rng = StdRng::seed_from_u64(seed);
    match id {
        AlgorithmId::Bfs => Box::new(GraphSearch::bfs(grid, start, goal).map(TraceStep::Search)),
        AlgorithmId::Dfs => Box::new(GraphSearch::dfs(grid, start, goal).map(TraceStep::Search)),
        AlgorithmId::Dijkstra => {
            Box::new(GraphSearch::dijkstra(grid, start, goal).map(TraceStep::Search))
        }
        AlgorithmId::Greedy => {
            Box::new(GraphSearch::greedy(grid, start, goal).map(TraceStep::Search))
        }
        AlgorithmId::Astar => {
            Box::new(GraphSearch::astar(grid, start, goal).map(TraceStep::Search))
        }
        AlgorithmId::WallFollowing => {
            Box::new(WallFollow::new(grid, start, goal).map(TraceStep::Search))
        }
        AlgorithmId::Bug => Box::new(Bug::new(grid, start, goal).map(TraceStep::Search)),
        AlgorithmId::Dwa => Box::new(Dwa::new(grid, start, goal).map(TraceStep::Search)),
        AlgorithmId::Prm => Box::new(Prm::new(grid, start, goal, rng).map(TraceStep::Plan)),
        AlgorithmId::Rrt => Box::new(Rrt::new(grid, start, goal, rng).map(TraceStep::Plan)),
        AlgorithmId::RrtStar => {
            Box::new(RrtStar::new(grid, start, goal, rng).map(TraceStep::Plan))
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario boards
// ---------------------------------------------------------------------------

/// A named board with its start and goal already placed.
pub struct Scenario {
    pub name: &'static str,
    pub grid: Grid,
    pub start: Pos,
    pub goal: Pos,
}

impl Scenario {
    fn from_text(name: &'static str, text: &str) -> Self {
        let grid = Grid::from_text(text).expect("scenario board parses");
        let start = grid.start().expect("scenario has a start");
        let goal = grid.goal().expect("scenario has a goal");
        Self {
            name,
            grid,
            start,
            goal,
        }
    }

    /// All built-in boards, in menu order.
    pub fn all() -> Vec<Scenario> {
        vec![Self::open_board(), Self::slalom(), Self::ring_trap()]
    }

    /// Look a board up by name.
    pub fn by_name(name: &str) -> Option<Scenario> {
        Self::all().into_iter().find(|s| s.name == name)
    }

    /// The interactive default: a 15x20 board with a loose scatter of
    /// obstacles.
    pub fn open_board() -> Self {
        Self::from_text(
            "open",
            "....................\n\
             ....................\n\
             ......##............\n\
             ......##.....#......\n\
             .............#......\n\
             .....#.......#......\n\
             .....#..............\n\
             ..S..#.........G....\n\
             .....#..............\n\
             .....#.......###....\n\
             .............###....\n\
             ....................\n\
             ...####.............\n\
             ....................\n\
             ....................",
        )
    }

    /// Walls forcing every planner into repeated direction changes.
    pub fn slalom() -> Self {
        Self::from_text(
            "slalom",
            "S...#...............\n\
             ....#....#..........\n\
             ....#....#..........\n\
             ....#....#....#.....\n\
             .........#....#.....\n\
             .........#....#.....\n\
             ..............#.....\n\
             ..............#....G",
        )
    }

    /// The wall-following trap: a sealed ring with the goal inside.
    pub fn ring_trap() -> Self {
        Self::from_text(
            "ring-trap",
            "S....\n\
             .###.\n\
             .#G#.\n\
             .###.\n\
             .....",
        )
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Paint a trace step over a copy of the base board, using the display
/// vocabulary of [`CellKind`]. World cells (walls, start, goal) keep their
/// kind; free cells take on what the step says about them.
pub fn paint(base: &Grid, step: &TraceStep) -> Grid {
    let mut out = base.clone();
    let mut mark = |pos: Pos, kind: CellKind| {
        if matches!(out.at(pos), Some(CellKind::Empty | CellKind::Explored | CellKind::Frontier | CellKind::Path)) {
            out.set(pos, kind);
        }
    };
    match step {
        TraceStep::Search(s) => {
            for &p in &s.explored {
                mark(p, CellKind::Explored);
            }
            for &p in &s.frontier {
                mark(p, CellKind::Frontier);
            }
            for &p in &s.path {
                mark(p, CellKind::Path);
            }
            if let Some(p) = s.current {
                mark(p, CellKind::Current);
            }
        }
        TraceStep::Plan(s) => {
            for node in &s.nodes {
                mark(node.pos, CellKind::Explored);
            }
            if let Some(p) = s.sampled {
                mark(p, CellKind::Frontier);
            }
            for &p in &s.path {
                mark(p, CellKind::Path);
            }
            if let Some(p) = s.current {
                mark(p, CellKind::Current);
            }
        }
    }
    out
}

/// One glyph per cell kind.
pub fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Empty => '.',
        CellKind::Wall => '#',
        CellKind::Start => 'S',
        CellKind::Goal => 'G',
        CellKind::Explored => 'o',
        CellKind::Frontier => '+',
        CellKind::Path => '*',
        CellKind::Current => '@',
    }
}

/// Render a board as one string, one line per row.
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.rows() * (grid.cols() + 1)) as usize);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            out.push(glyph(grid.at(Pos::new(row, col)).unwrap_or(CellKind::Wall)));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenarios_are_well_formed() {
        for scenario in Scenario::all() {
            assert!(scenario.grid.start().is_some(), "{}", scenario.name);
            assert!(scenario.grid.goal().is_some(), "{}", scenario.name);
            assert!(Scenario::by_name(scenario.name).is_some());
        }
        assert!(Scenario::by_name("no-such-board").is_none());
    }

    #[test]
    fn every_planner_completes_on_the_open_board() {
        let board = Scenario::open_board();
        for id in AlgorithmId::ALL {
            let mut steps = 0usize;
            let mut last = None;
            for step in launch(id, &board.grid, board.start, board.goal, 1234) {
                steps += 1;
                assert!(steps < 20_000, "{id} never finished");
                last = Some(step);
            }
            let last = last.expect("at least one step");
            assert!(last.complete(), "{id} ended without completing");
        }
    }

    #[test]
    fn graph_planners_find_routes_on_the_open_board() {
        let board = Scenario::open_board();
        for id in AlgorithmId::in_group(navgrid_core::Group::Grid) {
            let last = launch(id, &board.grid, board.start, board.goal, 0)
                .last()
                .unwrap();
            assert!(!last.path().is_empty(), "{id} found no route");
            assert_eq!(last.path().first().copied(), Some(board.start));
            assert_eq!(last.path().last().copied(), Some(board.goal));
        }
    }

    #[test]
    fn reactive_planners_cross_an_unobstructed_board() {
        // Bug and DWA are only guaranteed when nothing can trap them; their
        // obstacle pathologies are covered in their own crates.
        let mut grid = Grid::new(15, 20);
        grid.set_start(Pos::new(2, 2));
        grid.set_goal(Pos::new(12, 17));
        for id in [AlgorithmId::Bug, AlgorithmId::Dwa] {
            let last = launch(id, &grid, Pos::new(2, 2), Pos::new(12, 17), 0)
                .last()
                .unwrap();
            assert_eq!(last.path().last().copied(), Some(Pos::new(12, 17)), "{id}");
        }
    }

    #[test]
    fn ring_trap_defeats_wall_following() {
        let board = Scenario::ring_trap();
        let last = launch(
            AlgorithmId::WallFollowing,
            &board.grid,
            board.start,
            board.goal,
            0,
        )
        .last()
        .unwrap();
        assert!(last.no_route());
    }

    #[test]
    fn painting_marks_the_path() {
        let board = Scenario::ring_trap();
        let step = TraceStep::Search(SearchStep {
            explored: vec![Pos::new(0, 1)],
            frontier: vec![Pos::new(0, 2)],
            path: vec![Pos::new(0, 1), Pos::new(0, 2)],
            current: Some(Pos::new(0, 2)),
            complete: true,
            scores: None,
        });
        let painted = paint(&board.grid, &step);
        // Path paints over explored/frontier, current over path.
        assert_eq!(painted.at(Pos::new(0, 1)), Some(CellKind::Path));
        assert_eq!(painted.at(Pos::new(0, 2)), Some(CellKind::Current));
        // World cells survive.
        assert_eq!(painted.at(Pos::new(0, 0)), Some(CellKind::Start));
        assert_eq!(painted.at(Pos::new(1, 1)), Some(CellKind::Wall));
        let text = render(&painted);
        assert!(text.contains('*'));
        assert!(text.contains('@'));
        assert!(text.starts_with('S'));
    }
}
