use navgrid_core::Pos;

/// A cardinal facing, clockwise from up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    /// Scan order used by the wall-hugging fallbacks: up, right, down, left.
    pub const CARDINAL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    /// (drow, dcol) of one step in this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// The cell one step in this direction.
    #[inline]
    pub fn apply(self, p: Pos) -> Pos {
        let (dr, dc) = self.delta();
        p.shift(dr, dc)
    }

    /// Counter-clockwise quarter turn.
    #[inline]
    pub fn turn_left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Right => Self::Up,
            Self::Down => Self::Right,
            Self::Left => Self::Down,
        }
    }

    /// Clockwise quarter turn.
    #[inline]
    pub fn turn_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Half turn.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

/// The eight candidate offsets DWA scores, cardinals before diagonals.
pub(crate) const OCTANT: [(i32, i32); 8] = [
    (-1, 0), // up
    (0, 1),  // right
    (1, 0),  // down
    (0, -1), // left
    (-1, 1), // up-right
    (-1, -1), // up-left
    (1, 1),  // down-right
    (1, -1), // down-left
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_compose() {
        for d in Dir::CARDINAL {
            assert_eq!(d.turn_left().turn_right(), d);
            assert_eq!(d.turn_left().turn_left(), d.reverse());
            assert_eq!(d.reverse().reverse(), d);
        }
    }

    #[test]
    fn apply_moves_one_cell() {
        let p = Pos::new(3, 3);
        assert_eq!(Dir::Up.apply(p), Pos::new(2, 3));
        assert_eq!(Dir::Right.apply(p), Pos::new(3, 4));
        assert_eq!(Dir::Down.apply(p), Pos::new(4, 3));
        assert_eq!(Dir::Left.apply(p), Pos::new(3, 2));
    }

    #[test]
    fn octant_covers_all_neighbors() {
        let set: std::collections::HashSet<_> = OCTANT.iter().collect();
        assert_eq!(set.len(), 8);
        assert!(OCTANT.iter().all(|&(dr, dc)| (dr, dc) != (0, 0)));
    }
}
