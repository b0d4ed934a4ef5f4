use std::fmt;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use prettytable::Table;
use tracing::{debug, info};

use crate::calendar::{Calendar, WeekDay};
use crate::cli::{Command, DayRef};
use crate::error::InputError;
use crate::interface;
use crate::model::{Category, Task, TaskStore};
use crate::timeline::{bucket_by_hour, Timeline};

/// What the prompt loop should do after a command.
pub enum Reply {
    /// Print these tables.
    Screen(Vec<Table>),
    Quit,
}

/// The state behind the screen: the calendar, the selected day and the
/// tasks added so far. Commands update the state, then the affected part
/// of the screen is rendered again from it.
pub struct Session<Tz: TimeZone> {
    calendar: Calendar<Tz>,
    store: TaskStore,
    selected_day: NaiveDate,
    user: String,
}

impl<Tz: TimeZone> Session<Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn new(calendar: Calendar<Tz>, user: impl Into<String>) -> Session<Tz> {
        let selected_day = calendar.today();
        Session {
            calendar,
            store: TaskStore::new(),
            selected_day,
            user: user.into(),
        }
    }

    pub fn calendar(&self) -> &Calendar<Tz> {
        &self.calendar
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        debug!(%day, "day selected");
        self.selected_day = day;
    }

    /// The week row shown above the timeline: the week of the selected day.
    pub fn week(&self) -> Vec<WeekDay> {
        self.calendar.current_week(self.selected_day)
    }

    /// The selected day's tasks, by hour.
    pub fn timeline(&self) -> Timeline<'_, Tz> {
        let hours = self.calendar.hours_of_day(self.selected_day);
        bucket_by_hour(&self.calendar, self.store.list(), self.selected_day, &hours)
    }

    /// Validate the add form and store the resulting task.
    pub fn add_task(
        &mut self,
        name: &str,
        description: &str,
        category: Category,
        added_at: DateTime<Utc>,
    ) -> Result<&Task, InputError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::EmptyName);
        }

        let task = Task::new(name, description.trim(), category, added_at);
        info!(id = %task.id, name = %task.name, category = %task.category, added_at = %task.added_at, "task added");
        self.store.add(task);
        Ok(&self.store.list()[self.store.len() - 1])
    }

    /// Apply one prompt command and tell the loop what to show next.
    pub fn apply(&mut self, command: Command) -> Result<Reply, InputError> {
        match command {
            Command::Add {
                name,
                description,
                category,
                ago,
            } => {
                let added_at = stamp(Utc::now(), ago)?;
                self.add_task(&name, &description, category, added_at)?;
                Ok(Reply::Screen(self.screen()))
            }
            Command::Select { day } => {
                let day = self.resolve(day)?;
                self.select_day(day);
                Ok(Reply::Screen(self.screen()))
            }
            Command::Today => {
                let today = self.calendar.today();
                self.select_day(today);
                Ok(Reply::Screen(self.screen()))
            }
            Command::Show => Ok(Reply::Screen(self.screen())),
            Command::Week => Ok(Reply::Screen(vec![interface::week_row(
                &self.week(),
                self.selected_day,
            )])),
            Command::List => Ok(Reply::Screen(vec![interface::task_list(
                &self.calendar,
                self.store.list(),
                Utc::now(),
            )])),
            Command::Categories => Ok(Reply::Screen(vec![interface::categories()])),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    /// Header, week row and timeline.
    pub fn screen(&self) -> Vec<Table> {
        let now = self.calendar.now();
        vec![
            interface::header(self.user(), &now, self.store.len()),
            interface::week_row(&self.week(), self.selected_day),
            interface::timeline(&self.timeline(), &now),
        ]
    }

    fn resolve(&self, day: DayRef) -> Result<NaiveDate, InputError> {
        match day {
            DayRef::Date(date) => Ok(date),
            DayRef::Weekday(weekday) => self
                .week()
                .into_iter()
                .map(|week_day| week_day.date)
                .find(|date| date.weekday() == weekday)
                .ok_or_else(|| InputError::UnknownDay(weekday.to_string())),
        }
    }
}

/// The creation time of a new task: `now`, or `ago` before it.
fn stamp(now: DateTime<Utc>, ago: Option<StdDuration>) -> Result<DateTime<Utc>, InputError> {
    match ago {
        None => Ok(now),
        Some(ago) => Duration::from_std(ago)
            .ok()
            .and_then(|ago| now.checked_sub_signed(ago))
            .ok_or_else(|| InputError::AgoOutOfRange(humantime::format_duration(ago).to_string())),
    }
}
