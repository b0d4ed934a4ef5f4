#[macro_use]
extern crate prettytable;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::Local;
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod calendar;
mod cli;
mod error;
mod interface;
mod model;
mod session;
mod timeline;

use crate::calendar::Calendar;
use crate::session::{Reply, Session};
use cli::CommandLineArgs;

/// Send logs to stderr so they never mix with the screen. RUST_LOG wins
/// over the verbosity flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    io::stdout().flush().context("Failed to flush stdout.")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Get the command-line arguments.
    let CommandLineArgs {
        week_start,
        day,
        user,
        verbose,
    } = CommandLineArgs::from_args();

    init_logging(verbose);

    let calendar = Calendar::new(Local, week_start);
    info!(week_start = %calendar.week_start(), "session started");

    let mut session = Session::new(calendar, user);
    if let Some(day) = day {
        session.select_day(day);
    }
    interface::print(&session.screen());

    // One command per line until quit or end of input.
    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read a command from stdin.")?;
        match cli::parse_line(&line).and_then(|command| match command {
            Some(command) => session.apply(command).map(Some),
            None => Ok(None),
        }) {
            Ok(Some(Reply::Quit)) => break,
            Ok(Some(Reply::Screen(tables))) => interface::print(&tables),
            Ok(None) => {}
            Err(err) => println!("{}", err),
        }
        prompt()?;
    }

    debug!(tasks = session.store().len(), "session ended");
    Ok(())
}
