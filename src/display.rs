use std::{
    io::{self, Write},
    ops::RangeInclusive,
    thread,
    time::Duration,
};

use colored::Colorize;

use common::{
    Board, Cell, NR_COLS,
    coord::Coord,
    search::{BoardId, Node, Observer},
};

const TOP_BORDER: &str = "++++++++++++++++++++++";
const BOTTOM_BORDER: &str = "----------------------";
const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[H";
const LABELLED_ROWS: RangeInclusive<usize> = 2..=6;

/// One board framed by its border lines. Grid rows 2 to 6 are numbered
/// from 1, and with `highlight` the peg that moved last is shown in
/// reverse video.
pub fn render(board: &Board, highlight: bool) -> String {
    let coords: Vec<Coord> = board.coords().collect();
    let mut out = String::new();

    out.push_str(TOP_BORDER);
    out.push('\n');

    for row in coords.chunks(NR_COLS) {
        let grid_row = row[0].row();
        if LABELLED_ROWS.contains(&grid_row) {
            out.push_str(&format!("{}  ", grid_row - 1));
        }
        for &c in row {
            match board.cell(c) {
                Cell::Occupied if highlight && board.is_last_moved(c) => {
                    out.push_str(&"X".reversed().to_string())
                }
                Cell::Occupied => out.push('X'),
                Cell::Empty | Cell::Invalid => out.push(' '),
            }
        }
        out.push('\n');
    }

    out.push_str(BOTTOM_BORDER);
    out.push('\n');
    out
}

/// Where the replay goes. With a pause set, every board is drawn over the
/// previous one and left up for that long.
pub struct Screen<W: Write> {
    out: W,
    pause: Option<Duration>,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, pause: Option<Duration>) -> Self {
        Self { out, pause }
    }

    /// Blank the terminal before the first board. Only in paced mode.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.pause.is_some() {
            write!(self.out, "{CLEAR_SCREEN}{CURSOR_HOME}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn show(&mut self, board: &Board) -> io::Result<()> {
        if self.pause.is_some() {
            write!(self.out, "{CURSOR_HOME}")?;
        }
        writeln!(self.out, "{}", render(board, true))?;
        self.out.flush()?;

        if let Some(pause) = self.pause {
            thread::sleep(pause);
        }
        Ok(())
    }
}

/// Dumps every board the search visits, with its depth, peg count and
/// discovery order.
///
/// The search itself cannot fail, so the first write error is kept and
/// everything after it is dropped. [`TraceObserver::finish`] reports it.
pub struct TraceObserver<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TraceObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write_visit(&mut self, id: BoardId, node: &Node) -> io::Result<()> {
        if node.is_winner() {
            writeln!(self.out, "Board is a winner!")?;
        }
        writeln!(
            self.out,
            "DEPTH: {} COUNT: {} BOARDNUM {} PREV {}",
            node.depth(),
            node.board().count_pegs(),
            id.ordinal(),
            node.parent().map_or(0, BoardId::ordinal)
        )?;
        writeln!(self.out, "{}", render(node.board(), true))
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Observer for TraceObserver<W> {
    fn on_visit(&mut self, id: BoardId, node: &Node) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_visit(id, node) {
            log::warn!("search trace stopped: {err}");
            self.error = Some(err);
        }
    }
}
