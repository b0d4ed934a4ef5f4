use thiserror::Error;

/// Everything that can go wrong while turning user input into a session
/// command. The planner core itself never fails.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Unknown category '{0}'. Expected one of: General, Bug, Idea, Modifiers, Challenge, Coding.")]
    UnknownCategory(String),

    #[error("Unknown week start '{0}'. Expected 'sunday' or 'monday'.")]
    UnknownWeekStart(String),

    #[error("'{0}' is neither a weekday nor a YYYY-MM-DD date.")]
    UnknownDay(String),

    #[error("A task needs a name.")]
    EmptyName,

    #[error("Cannot place a task {0} in the past.")]
    AgoOutOfRange(String),

    #[error("Failed to split the command line: {0}")]
    Tokenize(#[from] shell_words::ParseError),

    #[error("{0}")]
    Command(String),
}
