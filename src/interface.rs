use std::fmt;
use std::time::Duration as StdDuration;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use humantime::format_duration;
use prettytable::{format, Cell, Row, Table};

use crate::calendar::{Calendar, WeekDay};
use crate::model::{Category, Task};
use crate::timeline::Timeline;

const DESCRIPTION_WIDTH: usize = 40;
const EMPTY_SLOT: &str = "- - - - - - - - - - - - - - - -";

fn clean_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table
}

/// Print each table to stdout, with colors when stdout is a terminal.
pub fn print(tables: &[Table]) {
    for table in tables {
        table.printstd();
        println!();
    }
}

/// The greeting block: title, welcome line and the current month.
pub fn header<Tz: TimeZone>(user: &str, now: &DateTime<Tz>, tasks_count: usize) -> Table
where
    Tz::Offset: fmt::Display,
{
    let mut table = clean_table();
    table.add_row(Row::new(vec![Cell::new("Today").style_spec("b")]));
    table.add_row(row![format!("Welcome, {}", user)]);
    table.add_row(row![now.format("%b %Y").to_string()]);
    table.add_row(row![fmt_tasks_count(tasks_count)]);
    table
}

fn fmt_tasks_count(count: usize) -> String {
    match count {
        0 => "No tasks yet. Use 'add <name>' to add one.".to_string(),
        1 => "1 task".to_string(),
        n => format!("{} tasks", n),
    }
}

/// The week selector. The selected day is bracketed, today is starred.
pub fn week_row(week: &[WeekDay], selected: NaiveDate) -> Table {
    let mut table = clean_table();
    let mut names = Vec::new();
    let mut days = Vec::new();

    for day in week {
        let mut number = day.date.format("%d").to_string();
        if day.is_today {
            number.push('*');
        }
        if day.date == selected {
            names.push(Cell::new(day.short_name()).style_spec("bFb"));
            days.push(Cell::new(&format!("[{}]", number)).style_spec("bFb"));
        } else {
            names.push(Cell::new(day.short_name()).style_spec("FD"));
            days.push(Cell::new(&number).style_spec("FD"));
        }
    }

    table.add_row(Row::new(names));
    table.add_row(Row::new(days));
    table
}

/// One row per hour slot. Empty slots get a dashed marker; the current
/// hour of today is pointed at.
pub fn timeline<Tz: TimeZone>(timeline: &Timeline<'_, Tz>, now: &DateTime<Tz>) -> Table
where
    Tz::Offset: fmt::Display,
{
    let mut table = clean_table();
    let is_today = timeline.day == now.date_naive();

    for (hour, tasks) in timeline.iter() {
        let marker = if is_today && hour.hour() == now.hour() { ">" } else { "" };
        let label = hour.format("%-I %p").to_string();

        if tasks.is_empty() {
            table.add_row(Row::new(vec![
                Cell::new(marker),
                Cell::new(&label),
                Cell::new(EMPTY_SLOT).style_spec("FD"),
            ]));
            continue;
        }

        for (index, task) in tasks.iter().enumerate() {
            let (marker, label) = if index == 0 { (marker, label.as_str()) } else { ("", "") };
            table.add_row(Row::new(vec![
                Cell::new(marker),
                Cell::new(label),
                task_cell(task),
            ]));
        }
    }
    table
}

fn task_cell(task: &Task) -> Cell {
    let mut text = task.name.to_uppercase();
    if task.has_description() {
        text.push('\n');
        text.push_str(&textwrap::fill(&task.description, DESCRIPTION_WIDTH));
    }
    Cell::new(&text).style_spec(task.category.color().style_spec())
}

/// Every task in the order it was added.
pub fn task_list<Tz: TimeZone>(calendar: &Calendar<Tz>, tasks: &[Task], now: DateTime<Utc>) -> Table
where
    Tz::Offset: fmt::Display,
{
    let mut table = clean_table();
    table.set_titles(row!["#", "added", "task", "category", "description"]);

    for (index, task) in tasks.iter().enumerate() {
        let added = format!(
            "{} ({})",
            calendar.local(&task.added_at).format("%Y-%m-%d %H:%M"),
            fmt_ago(now, task.added_at)
        );
        table.add_row(Row::new(vec![
            Cell::new(&(index + 1).to_string()),
            Cell::new(&added),
            Cell::new(&task.name),
            Cell::new(task.category.label()).style_spec(task.category.color().style_spec()),
            Cell::new(&textwrap::fill(&task.description, DESCRIPTION_WIDTH)),
        ]));
    }
    table
}

/// How long ago `then` was, to the minute.
fn fmt_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    match (now - then).to_std() {
        Ok(elapsed) if elapsed.as_secs() >= 60 => {
            let minutes = StdDuration::from_secs(elapsed.as_secs() / 60 * 60);
            format!("{} ago", format_duration(minutes))
        }
        _ => "just now".to_string(),
    }
}

/// The category legend.
pub fn categories() -> Table {
    let mut table = clean_table();
    table.set_titles(row!["category", "color", "rgb"]);
    for category in Category::ALL.iter() {
        let color = category.color();
        let (r, g, b) = color.rgb();
        table.add_row(Row::new(vec![
            Cell::new(category.label()).style_spec(color.style_spec()),
            Cell::new(color.name()),
            Cell::new(&format!("#{:02X}{:02X}{:02X}", r, g, b)),
        ]));
    }
    table
}
