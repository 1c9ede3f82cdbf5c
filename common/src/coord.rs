use crate::{NR_COLS, NR_ROWS};

/// A cell coordinate on the rectangular board grid. Row 0 is the top row.
///
/// Invariant: can only represent coordinates inside the grid. Whether the
/// cell is playable is up to the board, not the coordinate.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct Coord {
    row: i8,
    col: i8,
}

impl Coord {
    pub fn new(row: i8, col: i8) -> Option<Self> {
        let coord = Coord { row, col };
        if coord.is_valid() {
            Some(coord)
        } else {
            None
        }
    }

    pub fn shift(self, row: i8, col: i8) -> Option<Coord> {
        Self::new(self.row + row, self.col + col)
    }

    fn is_valid(self) -> bool {
        (0..NR_ROWS as i8).contains(&self.row) && (0..NR_COLS as i8).contains(&self.col)
    }

    /// Every grid coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NR_ROWS as i8).flat_map(|row| (0..NR_COLS as i8).map(move |col| Coord { row, col }))
    }

    pub fn row(self) -> usize {
        self.row as usize
    }
    pub fn col(self) -> usize {
        self.col as usize
    }
}

/// The six ways a peg can jump on the triangle.
///
/// The grid doubles the horizontal spacing, so diagonal neighbours sit one
/// column over and horizontal neighbours two columns over.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Left,
    Right,
}

impl Direction {
    /// Fixed scan order. This order decides which winning board is found first.
    pub const ALL: [Direction; 6] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::Left,
        Direction::Right,
    ];

    /// Offset of the jumped-over neighbour. The landing cell is twice as far.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
            Direction::Left => (0, -2),
            Direction::Right => (0, 2),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
