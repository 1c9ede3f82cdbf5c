use clap::{Parser, ValueEnum};

use common::Layout;

#[derive(Parser, Debug)]
#[command(
    name = "tri_solitaire",
    version,
    about = "Explore every jump sequence of the 15-hole triangle peg puzzle"
)]
pub struct Cli {
    /// Print every board visited during the search
    #[arg(short, long)]
    pub debug: bool,

    /// Replay the winning path in place, pausing between boards.
    /// Has no effect together with --debug
    #[arg(short, long)]
    pub visual: bool,

    /// Which hole starts empty
    #[arg(short, long, value_enum, default_value_t = StartLayout::Center)]
    pub layout: StartLayout,

    /// Pause between boards in visual mode
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub delay_ms: u64,

    /// Also print the number of winning boards and distinct positions
    #[arg(long)]
    pub stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartLayout {
    /// Middle of the third row
    Center,
    /// Top of the triangle
    Apex,
    /// Left hole of the second row
    SecondRowLeft,
    /// Left edge of the third row
    ThirdRowLeft,
}

impl From<StartLayout> for Layout {
    fn from(layout: StartLayout) -> Self {
        match layout {
            StartLayout::Center => Layout::Center,
            StartLayout::Apex => Layout::Apex,
            StartLayout::SecondRowLeft => Layout::SecondRowLeft,
            StartLayout::ThirdRowLeft => Layout::ThirdRowLeft,
        }
    }
}

impl Cli {
    /// Redraw in place and pause between boards. The debug trace always
    /// prints plain sequential dumps instead.
    pub fn paced(&self) -> bool {
        self.visual && !self.debug
    }
}
