//! Terminal walkthrough: animate any planner over a built-in board.
//!
//! Run: cargo run --bin walkthrough -- <algorithm> [board] [seed]
//!
//! `algorithm` is a registry id (`bfs`, `astar`, `rrt-star`, ...), `board`
//! one of the built-in scenario names (default `open`), and `seed` fixes the
//! sampling planners' randomness (default 0).

use std::error::Error;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use navgrid_core::{AlgorithmId, Group};
use navgrid_demos::{launch, paint, render, Scenario};

fn usage() -> String {
    let mut out = String::from("usage: walkthrough <algorithm> [board] [seed]\n\nalgorithms:\n");
    for group in Group::ALL {
        out.push_str(&format!("  {} ({})\n", group.name(), group.summary()));
        for algo in AlgorithmId::in_group(group) {
            out.push_str(&format!("    {:<15} {}\n", algo.id(), algo.blurb()));
        }
    }
    out.push_str("\nboards:\n");
    for scenario in Scenario::all() {
        out.push_str(&format!("    {}\n", scenario.name));
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(algo) = args.first().and_then(|s| AlgorithmId::from_id(s)) else {
        eprint!("{}", usage());
        std::process::exit(2);
    };
    let board_name = args.get(1).map(String::as_str).unwrap_or("open");
    let Some(scenario) = Scenario::by_name(board_name) else {
        return Err(format!("unknown board {board_name:?}").into());
    };
    let seed: u64 = match args.get(2) {
        Some(s) => s.parse()?,
        None => 0,
    };

    let mut out = stdout();
    let mut frames = 0usize;
    let mut last = None;

    for step in launch(algo, &scenario.grid, scenario.start, scenario.goal, seed) {
        frames += 1;
        execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        writeln!(out, "{} on {:?} (step {frames})", algo.name(), scenario.name)?;
        writeln!(out, "{}", render(&paint(&scenario.grid, &step)))?;
        out.flush()?;
        std::thread::sleep(Duration::from_millis(25));
        last = Some(step);
    }

    let last = last.ok_or("planner emitted no steps")?;
    if last.no_route() {
        writeln!(out, "no route found ({} cells/nodes touched)", last.coverage())?;
    } else {
        writeln!(
            out,
            "route found: {} cells, {} cells/nodes touched",
            last.path().len(),
            last.coverage()
        )?;
    }
    Ok(())
}
