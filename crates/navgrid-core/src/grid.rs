//! The occupancy grid the planners operate on.

use std::fmt;

use crate::geom::Pos;

/// Classification of a single grid cell.
///
/// `Empty`, `Wall`, `Start` and `Goal` describe the world; the remaining
/// variants exist so a caller can paint trace snapshots back onto a display
/// grid using the same vocabulary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    Goal,
    Explored,
    Frontier,
    Path,
    Current,
}

/// A fixed-size occupancy grid, stored row-major.
///
/// Walls are immutable during a run by convention: planners clone the grid
/// they are given and only ever read it. At most one cell is `Start` and at
/// most one is `Goal`; [`Grid::set_start`] and [`Grid::set_goal`] maintain
/// that invariant, and [`Grid::from_text`] rejects duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create an all-[`CellKind::Empty`] grid of the given dimensions.
    ///
    /// Non-positive dimensions yield an empty zero-cell grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let (rows, cols) = (rows.max(0), cols.max(0));
        Self {
            rows,
            cols,
            cells: vec![CellKind::Empty; (rows * cols) as usize],
        }
    }

    /// Parse a grid from ASCII art: `.` empty, `#` wall, `S` start, `G` goal.
    ///
    /// Lines must all have the same width. At most one `S` and one `G` are
    /// allowed.
    pub fn from_text(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        let mut cells = Vec::new();
        let mut cols: i32 = -1;
        let mut start = None;
        let mut goal = None;
        let mut rows = 0;

        for (r, line) in s.lines().enumerate() {
            let width = line.chars().count() as i32;
            if cols >= 0 && width != cols {
                return Err(GridError::InconsistentWidth { line: r });
            }
            cols = width;
            rows += 1;
            for (c, ch) in line.chars().enumerate() {
                let pos = Pos::new(r as i32, c as i32);
                let kind = match ch {
                    '.' => CellKind::Empty,
                    '#' => CellKind::Wall,
                    'S' => {
                        if let Some(prev) = start {
                            return Err(GridError::DuplicateStart(prev));
                        }
                        start = Some(pos);
                        CellKind::Start
                    }
                    'G' => {
                        if let Some(prev) = goal {
                            return Err(GridError::DuplicateGoal(prev));
                        }
                        goal = Some(pos);
                        CellKind::Goal
                    }
                    _ => return Err(GridError::UnknownGlyph { ch, pos }),
                };
                cells.push(kind);
            }
        }

        Ok(Self {
            rows,
            cols: cols.max(0),
            cells,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Whether the position is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    #[inline]
    fn index(&self, p: Pos) -> usize {
        (p.row * self.cols + p.col) as usize
    }

    /// The cell at a position, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<CellKind> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Set the cell at a position. Does nothing if out of bounds.
    pub fn set(&mut self, p: Pos, kind: CellKind) {
        if !self.contains(p) {
            return;
        }
        let idx = self.index(p);
        self.cells[idx] = kind;
    }

    /// Whether a planner may stand on this position: in-bounds and not a
    /// wall. Out-of-bounds is always blocked, there is no wraparound.
    #[inline]
    pub fn passable(&self, p: Pos) -> bool {
        matches!(self.at(p), Some(kind) if kind != CellKind::Wall)
    }

    /// Position of the first cell of the given kind, scanning row-major.
    pub fn find(&self, kind: CellKind) -> Option<Pos> {
        self.cells
            .iter()
            .position(|&c| c == kind)
            .map(|i| Pos::new(i as i32 / self.cols, i as i32 % self.cols))
    }

    /// The start cell, if one is placed.
    pub fn start(&self) -> Option<Pos> {
        self.find(CellKind::Start)
    }

    /// The goal cell, if one is placed.
    pub fn goal(&self) -> Option<Pos> {
        self.find(CellKind::Goal)
    }

    /// Place the start marker, clearing any previous one.
    pub fn set_start(&mut self, p: Pos) {
        if !self.contains(p) {
            return;
        }
        if let Some(prev) = self.start() {
            self.set(prev, CellKind::Empty);
        }
        self.set(p, CellKind::Start);
    }

    /// Place the goal marker, clearing any previous one.
    pub fn set_goal(&mut self, p: Pos) {
        if !self.contains(p) {
            return;
        }
        if let Some(prev) = self.goal() {
            self.set(prev, CellKind::Empty);
        }
        self.set(p, CellKind::Goal);
    }

    /// Fill every cell with the given kind.
    pub fn fill(&mut self, kind: CellKind) {
        self.cells.fill(kind);
    }

    /// Row-major iteration over `(Pos, CellKind)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &kind)| (Pos::new(i as i32 / self.cols, i as i32 % self.cols), kind))
    }
}

/// Error from [`Grid::from_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A line's width differs from the first line's.
    InconsistentWidth { line: usize },
    /// A character with no cell meaning.
    UnknownGlyph { ch: char, pos: Pos },
    /// A second `S` was found; the previous one is reported.
    DuplicateStart(Pos),
    /// A second `G` was found; the previous one is reported.
    DuplicateGoal(Pos),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth { line } => {
                write!(f, "grid: line {line} has a different width")
            }
            Self::UnknownGlyph { ch, pos } => {
                write!(f, "grid: unknown glyph {ch:?} at {pos}")
            }
            Self::DuplicateStart(prev) => write!(f, "grid: second start, first at {prev}"),
            Self::DuplicateGoal(prev) => write!(f, "grid: second goal, first at {prev}"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert!(g.iter().all(|(_, kind)| kind == CellKind::Empty));
        assert_eq!(g.iter().count(), 12);
    }

    #[test]
    fn set_and_at() {
        let mut g = Grid::new(4, 4);
        let p = Pos::new(2, 3);
        g.set(p, CellKind::Wall);
        assert_eq!(g.at(p), Some(CellKind::Wall));
        assert_eq!(g.at(Pos::new(0, 0)), Some(CellKind::Empty));
        assert_eq!(g.at(Pos::new(4, 0)), None);
        // Out-of-bounds set is a no-op.
        g.set(Pos::new(-1, 0), CellKind::Wall);
        assert_eq!(g.iter().filter(|&(_, k)| k == CellKind::Wall).count(), 1);
    }

    #[test]
    fn passable_rules() {
        let mut g = Grid::new(3, 3);
        g.set(Pos::new(1, 1), CellKind::Wall);
        assert!(g.passable(Pos::new(0, 0)));
        assert!(!g.passable(Pos::new(1, 1)));
        // Out of bounds is blocked, no wraparound.
        assert!(!g.passable(Pos::new(-1, 0)));
        assert!(!g.passable(Pos::new(0, 3)));
        // Start and goal cells are passable.
        g.set_start(Pos::new(0, 1));
        g.set_goal(Pos::new(2, 2));
        assert!(g.passable(Pos::new(0, 1)));
        assert!(g.passable(Pos::new(2, 2)));
    }

    #[test]
    fn start_goal_markers_are_unique() {
        let mut g = Grid::new(3, 3);
        g.set_start(Pos::new(0, 0));
        g.set_start(Pos::new(1, 1));
        assert_eq!(g.start(), Some(Pos::new(1, 1)));
        assert_eq!(g.at(Pos::new(0, 0)), Some(CellKind::Empty));

        g.set_goal(Pos::new(2, 2));
        g.set_goal(Pos::new(0, 2));
        assert_eq!(g.goal(), Some(Pos::new(0, 2)));
        assert_eq!(g.at(Pos::new(2, 2)), Some(CellKind::Empty));
    }

    #[test]
    fn from_text_round_trip() {
        let g = Grid::from_text(
            "S..#\n\
             .#.#\n\
             ...G",
        )
        .unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
        assert_eq!(g.goal(), Some(Pos::new(2, 3)));
        assert_eq!(g.at(Pos::new(1, 1)), Some(CellKind::Wall));
        assert!(!g.passable(Pos::new(0, 3)));
    }

    #[test]
    fn from_text_rejects_bad_input() {
        assert!(matches!(
            Grid::from_text("..\n..."),
            Err(GridError::InconsistentWidth { line: 1 })
        ));
        assert!(matches!(
            Grid::from_text("..x"),
            Err(GridError::UnknownGlyph { ch: 'x', .. })
        ));
        assert!(matches!(
            Grid::from_text("S.S"),
            Err(GridError::DuplicateStart(_))
        ));
        assert!(matches!(
            Grid::from_text("G\nG"),
            Err(GridError::DuplicateGoal(_))
        ));
    }

    #[test]
    fn find_scans_row_major() {
        let mut g = Grid::new(2, 2);
        g.set(Pos::new(1, 0), CellKind::Wall);
        g.set(Pos::new(0, 1), CellKind::Wall);
        assert_eq!(g.find(CellKind::Wall), Some(Pos::new(0, 1)));
    }
}
