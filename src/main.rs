mod cli;
mod display;

use std::{
    env,
    io::{self, BufWriter},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;

use common::{Board, Layout, search::SearchTree};

use crate::{
    cli::Cli,
    display::{Screen, TraceObserver},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let layout = Layout::from(cli.layout);
    log::info!("searching from layout {layout:?}");

    // keep the moved peg marked when stdout is piped, unless NO_COLOR is set
    if env::var_os("NO_COLOR").is_none() {
        colored::control::set_override(true);
    }

    let pause = cli.paced().then(|| Duration::from_millis(cli.delay_ms));
    let mut screen = Screen::new(io::stdout(), pause);
    screen.clear().context("clearing the screen")?;

    let start = Instant::now();
    let root = Board::initial(layout);
    let tree = if cli.debug {
        let mut trace = TraceObserver::new(BufWriter::new(io::stdout()));
        let tree = SearchTree::explore_with(root, &mut trace);
        trace.finish().context("writing the search trace")?;
        tree
    } else {
        SearchTree::explore(root)
    };
    log::info!(
        "explored {} boards in {}s",
        tree.total_boards(),
        start.elapsed().as_secs_f32()
    );

    screen
        .line(&format!("Total boards: {}", tree.total_boards()))
        .context("writing the board count")?;

    if cli.stats {
        screen
            .line(&format!("Winning boards: {}", tree.total_wins()))
            .context("writing the winning board count")?;
        screen
            .line(&format!("Distinct positions: {}", tree.distinct_positions()))
            .context("writing the distinct position count")?;
    }

    match tree.first_win() {
        Some(winner) => log::info!(
            "{} winning boards, replaying board {}",
            tree.total_wins(),
            winner.ordinal()
        ),
        None => log::info!("no winning board reachable from {layout:?}"),
    }

    for node in tree.winning_path() {
        screen.show(node.board()).context("replaying the winning path")?;
    }

    Ok(())
}
