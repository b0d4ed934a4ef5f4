use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike, Utc, Weekday};

use crate::error::InputError;

/// The day a week starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// How many days `date` lies after the start of its week.
    fn days_into_week(self, date: NaiveDate) -> u64 {
        let offset = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        u64::from(offset)
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::Sunday
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => f.write_str("sunday"),
            WeekStart::Monday => f.write_str("monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(InputError::UnknownWeekStart(s.to_string())),
        }
    }
}

/// One entry of the week selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    /// Full weekday name, e.g. "Sunday".
    pub name: String,
    pub date: NaiveDate,
    pub is_today: bool,
}

impl WeekDay {
    pub fn short_name(&self) -> &str {
        self.name.get(..3).unwrap_or(&self.name)
    }
}

/// Date arithmetic in a given time zone with a given week convention.
#[derive(Debug, Clone)]
pub struct Calendar<Tz: TimeZone> {
    tz: Tz,
    week_start: WeekStart,
}

impl<Tz: TimeZone> Calendar<Tz> {
    pub fn new(tz: Tz, week_start: WeekStart) -> Calendar<Tz> {
        Calendar { tz, week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// The current instant, seen from this calendar's zone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    /// The current real-world date in this calendar's zone.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// `instant` on this calendar's wall clock.
    pub fn local(&self, instant: &DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// The calendar day `instant` falls on.
    pub fn day_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    /// The hour of the day (0-23) `instant` falls in.
    pub fn hour_of(&self, instant: &DateTime<Utc>) -> u32 {
        self.local(instant).hour()
    }

    /// The start of every hour of `day`, in order.
    ///
    /// An hour that does not exist on the wall clock (a daylight saving gap)
    /// is left out, so such a day yields 23 slots. An hour that happens twice
    /// is represented by its first occurrence.
    pub fn hours_of_day(&self, day: NaiveDate) -> Vec<DateTime<Tz>> {
        (0..24)
            .filter_map(|hour| day.and_hms_opt(hour, 0, 0))
            .filter_map(|local| self.tz.from_local_datetime(&local).earliest())
            .collect()
    }

    /// The seven days of the week containing `reference`, flagging the one
    /// that is today.
    pub fn current_week(&self, reference: NaiveDate) -> Vec<WeekDay> {
        self.week_of(reference, self.today())
    }

    /// Same as `current_week`, with "today" given by the caller.
    pub fn week_of(&self, reference: NaiveDate, today: NaiveDate) -> Vec<WeekDay> {
        let offset = Days::new(self.week_start.days_into_week(reference));
        let first_day = match reference.checked_sub_days(offset) {
            Some(day) => day,
            None => return Vec::new(),
        };

        (0..7)
            .filter_map(|index| first_day.checked_add_days(Days::new(index)))
            .map(|date| WeekDay {
                name: date.format("%A").to_string(),
                date,
                is_today: date == today,
            })
            .collect()
    }
}
