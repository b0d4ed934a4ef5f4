use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDate, Weekday};
use humantime::parse_duration;
use structopt::clap::AppSettings;
use structopt::StructOpt;

use crate::calendar::WeekStart;
use crate::error::InputError;
use crate::model::Category;

/// A command typed at the session prompt.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "hourline",
    setting = AppSettings::NoBinaryName,
    setting = AppSettings::DisableVersion,
    setting = AppSettings::VersionlessSubcommands
)]
pub enum Command {
    /// Add a task, stamped with the current time.
    Add {
        /// The task name.
        #[structopt()]
        name: String,

        /// A longer description.
        #[structopt(short, long, default_value = "")]
        description: String,

        /// One of General, Bug, Idea, Modifiers, Challenge, Coding.
        #[structopt(short, long, default_value = "General")]
        category: Category,

        /// Stamp the task this long ago instead of now (parse_duration).
        #[structopt(long, parse(try_from_str = parse_duration))]
        ago: Option<Duration>,
    },
    /// Select a day of the week (e.g. "wed") or a date (YYYY-MM-DD).
    Select {
        #[structopt()]
        day: DayRef,
    },
    /// Select today.
    Today,
    /// Show the week and the timeline of the selected day.
    Show,
    /// Show the week selector.
    Week,
    /// List every task, in the order they were added.
    List,
    /// Show the categories and their colors.
    Categories,
    /// End the session.
    #[structopt(alias = "exit")]
    Quit,
}

/// A day picked by the user: either a weekday of the displayed week or a
/// calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRef {
    Weekday(Weekday),
    Date(NaiveDate),
}

impl FromStr for DayRef {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(DayRef::Date(date));
        }
        trimmed
            .parse::<Weekday>()
            .map(DayRef::Weekday)
            .map_err(|_| InputError::UnknownDay(s.to_string()))
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "hourline",
    about = "A single-screen planner: your week and a 24-hour timeline of tasks."
)]
pub struct CommandLineArgs {
    /// First day of the week: sunday or monday.
    #[structopt(long, env = "HOURLINE_WEEK_START", default_value = "sunday")]
    pub week_start: WeekStart,

    /// Day selected when the session starts (YYYY-MM-DD). Defaults to today.
    #[structopt(long)]
    pub day: Option<NaiveDate>,

    /// Name used in the greeting.
    #[structopt(long, env = "HOURLINE_USER", default_value = "there")]
    pub user: String,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,
}

/// Turn a prompt line into a command. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, InputError> {
    let words = shell_words::split(line)?;
    if words.is_empty() {
        return Ok(None);
    }
    Command::from_iter_safe(words)
        .map(Some)
        .map_err(|err| InputError::Command(err.message))
}
