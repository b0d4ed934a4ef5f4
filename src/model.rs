use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::InputError;

/// A single task, as submitted through the add form. Tasks are never
/// edited or removed once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    /// When the task was added. Also decides its slot on the timeline.
    pub added_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub category: Category,
}

impl Task {
    /// Build a task with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        added_at: DateTime<Utc>,
    ) -> Task {
        Task {
            id: Uuid::new_v4(),
            added_at,
            name: name.into(),
            description: description.into(),
            category,
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

/// The fixed set of labels a task can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    Bug,
    Idea,
    Modifiers,
    Challenge,
    Coding,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::General,
        Category::Bug,
        Category::Idea,
        Category::Modifiers,
        Category::Challenge,
        Category::Coding,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Bug => "Bug",
            Category::Idea => "Idea",
            Category::Modifiers => "Modifiers",
            Category::Challenge => "Challenge",
            Category::Coding => "Coding",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Category::General => Color::Gray,
            Category::Bug => Color::Green,
            Category::Idea => Color::Pink,
            Category::Modifiers => Color::Blue,
            Category::Challenge => Color::Purple,
            Category::Coding => Color::Brown,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownCategory(s.to_string()))
    }
}

/// Display colors of the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Gray,
    Green,
    Pink,
    Blue,
    Purple,
    Brown,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Gray => "gray",
            Color::Green => "green",
            Color::Pink => "pink",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Brown => "brown",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Gray => (142, 142, 147),
            Color::Green => (52, 199, 89),
            Color::Pink => (255, 45, 85),
            Color::Blue => (0, 122, 255),
            Color::Purple => (175, 82, 222),
            Color::Brown => (162, 132, 94),
        }
    }

    /// The closest terminal foreground, as a prettytable style spec.
    pub fn style_spec(self) -> &'static str {
        match self {
            Color::Gray => "FD",
            Color::Green => "Fg",
            Color::Pink => "FR",
            Color::Blue => "Fb",
            Color::Purple => "Fm",
            Color::Brown => "Fy",
        }
    }
}

/// The in-memory task list of a session, in insertion order.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> TaskStore {
        TaskStore { tasks: Vec::new() }
    }

    /// Append a task. The store accepts any task; form validation happens
    /// before a task gets here.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// All the tasks, oldest submission first.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
