pub mod coord;
pub mod search;
pub mod visit_map;

use crate::coord::{Coord, Direction};

pub const NR_ROWS: usize = 9;
pub const NR_COLS: usize = 13;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Cell {
    /// Outside the playing area. Never changes.
    Invalid,
    Empty,
    Occupied,
}

/// One position of the puzzle: the full grid plus the cell the last peg
/// landed in. The root board has no last move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    cells: [[Cell; NR_COLS]; NR_ROWS],
    last_moved: Option<Coord>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Jump {
    src: Coord,
    mid: Coord,
    dst: Coord,
    direction: Direction,
}

impl Jump {
    /// The jump starting at `src` in the given direction, if its jumped and
    /// landing cells lie on the grid. Says nothing about legality on a board.
    pub fn new(src: Coord, direction: Direction) -> Option<Jump> {
        let (dr, dc) = direction.offset();
        let mid = src.shift(dr, dc)?;
        let dst = mid.shift(dr, dc)?;
        Some(Jump {
            src,
            mid,
            dst,
            direction,
        })
    }

    /// The same line of cells travelled the other way.
    pub fn reversed(self) -> Jump {
        Jump {
            src: self.dst,
            mid: self.mid,
            dst: self.src,
            direction: self.direction.opposite(),
        }
    }

    pub fn src(self) -> Coord {
        self.src
    }
    pub fn mid(self) -> Coord {
        self.mid
    }
    pub fn dst(self) -> Coord {
        self.dst
    }
    pub fn direction(self) -> Direction {
        self.direction
    }
}

/// The four starting layouts of the 15-hole triangle. They differ only in
/// which hole starts empty.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Layout {
    /// Middle of the third triangle row.
    Center,
    /// The top of the triangle.
    Apex,
    /// Left hole of the second triangle row.
    SecondRowLeft,
    /// Left edge of the third triangle row.
    ThirdRowLeft,
}

impl Layout {
    pub const ALL: [Layout; 4] = [
        Layout::Center,
        Layout::Apex,
        Layout::SecondRowLeft,
        Layout::ThirdRowLeft,
    ];

    #[rustfmt::skip]
    fn ascii(self) -> [&'static str; NR_ROWS] {
        match self {
            Layout::Center => [
                "_____________",
                "_____________",
                "______#______",
                "_____#_#_____",
                "____#_._#____",
                "___#_#_#_#___",
                "__#_#_#_#_#__",
                "_____________",
                "_____________",
            ],
            Layout::Apex => [
                "_____________",
                "_____________",
                "______.______",
                "_____#_#_____",
                "____#_#_#____",
                "___#_#_#_#___",
                "__#_#_#_#_#__",
                "_____________",
                "_____________",
            ],
            Layout::SecondRowLeft => [
                "_____________",
                "_____________",
                "______#______",
                "_____._#_____",
                "____#_#_#____",
                "___#_#_#_#___",
                "__#_#_#_#_#__",
                "_____________",
                "_____________",
            ],
            Layout::ThirdRowLeft => [
                "_____________",
                "_____________",
                "______#______",
                "_____#_#_____",
                "____._#_#____",
                "___#_#_#_#___",
                "__#_#_#_#_#__",
                "_____________",
                "_____________",
            ],
        }
    }
}

impl Board {
    /// Parse a board from one line per grid row: `_` is outside the board,
    /// `.` an empty hole and `#` a peg.
    pub fn from_ascii(lines: [&str; NR_ROWS]) -> Self {
        let mut cells = [[Cell::Invalid; NR_COLS]; NR_ROWS];
        for (row, line) in lines.iter().enumerate() {
            let mut counted_chars = 0;
            for (col, c) in line.chars().enumerate() {
                if col >= NR_COLS {
                    panic!("too many chars in ascii row {row}");
                }
                cells[row][col] = match c {
                    '_' => Cell::Invalid,
                    '.' => Cell::Empty,
                    '#' => Cell::Occupied,
                    _ => panic!("invalid char in ascii"),
                };
                counted_chars += 1;
            }
            if counted_chars < NR_COLS {
                panic!("not enough chars in ascii row {row}");
            }
        }

        Board {
            cells,
            last_moved: None,
        }
    }

    pub fn initial(layout: Layout) -> Self {
        Self::from_ascii(layout.ascii())
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[coord.row()][coord.col()]
    }

    pub fn last_moved(&self) -> Option<Coord> {
        self.last_moved
    }

    pub fn is_last_moved(&self, coord: Coord) -> bool {
        self.last_moved == Some(coord)
    }

    /// Every grid coordinate in row-major order, including invalid cells.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        Coord::all()
    }

    /// Number of playable holes, occupied or not.
    pub fn nr_holes(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Invalid)
            .count()
    }

    /// Number of pegs on the board
    pub fn count_pegs(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Occupied)
            .count() as u32
    }

    pub fn can_jump(&self, jump: Jump) -> bool {
        self.cell(jump.src) == Cell::Occupied
            && self.cell(jump.mid) == Cell::Occupied
            && self.cell(jump.dst) == Cell::Empty
    }

    /// Copy of this board with `jump` applied. The landing hole becomes the
    /// only last-moved cell.
    pub fn apply_jump(&self, jump: Jump) -> Board {
        debug_assert!(self.can_jump(jump), "applying illegal jump {jump:?}");

        let mut next = *self;
        next.cells[jump.src.row()][jump.src.col()] = Cell::Empty;
        next.cells[jump.mid.row()][jump.mid.col()] = Cell::Empty;
        next.cells[jump.dst.row()][jump.dst.col()] = Cell::Occupied;
        next.last_moved = Some(jump.dst);
        next
    }

    /// All legal jumps, scanning pegs in row-major order and trying the
    /// directions in [`Direction::ALL`] order for each peg.
    pub fn jumps(&self) -> impl Iterator<Item = Jump> + '_ {
        Coord::all()
            .filter(|&coord| self.cell(coord) == Cell::Occupied)
            .flat_map(|src| {
                Direction::ALL
                    .into_iter()
                    .filter_map(move |dir| Jump::new(src, dir))
            })
            .filter(|&jump| self.can_jump(jump))
    }

    /// Occupancy of the playable holes as a bit set, in row-major order.
    ///
    /// Two boards only have comparable keys if they share the same shape.
    pub fn key(&self) -> u64 {
        let mut key = 0;
        let mut mask = 1u64;
        for cell in self.cells.iter().flatten() {
            match cell {
                Cell::Invalid => continue,
                Cell::Empty => {}
                Cell::Occupied => key |= mask,
            }
            mask <<= 1;
        }
        key
    }
}
