use chrono::{DateTime, NaiveDate, TimeZone, Timelike};

use crate::calendar::Calendar;
use crate::model::Task;

/// The tasks of one hour slot.
#[derive(Debug, Clone)]
pub struct HourBucket<'a, Tz: TimeZone> {
    pub hour: DateTime<Tz>,
    pub tasks: Vec<&'a Task>,
}

impl<'a, Tz: TimeZone> HourBucket<'a, Tz> {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Tasks of a single day grouped by hour, one bucket per requested slot
/// and in the same order as the slots.
#[derive(Debug, Clone)]
pub struct Timeline<'a, Tz: TimeZone> {
    pub day: NaiveDate,
    buckets: Vec<HourBucket<'a, Tz>>,
}

impl<'a, Tz: TimeZone> Timeline<'a, Tz> {
    pub fn buckets(&self) -> &[HourBucket<'a, Tz>] {
        &self.buckets
    }

    /// The tasks of the slot starting at `hour`, if there is such a slot.
    pub fn get(&self, hour: &DateTime<Tz>) -> Option<&[&'a Task]> {
        self.buckets
            .iter()
            .find(|bucket| bucket.hour == *hour)
            .map(|bucket| bucket.tasks.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateTime<Tz>, &[&'a Task])> {
        self.buckets
            .iter()
            .map(|bucket| (&bucket.hour, bucket.tasks.as_slice()))
    }

    /// Number of tasks placed on the timeline.
    pub fn task_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.tasks.len()).sum()
    }
}

/// Place every task added on `day` in the slot of `hours` matching the hour
/// it was added at. Tasks of other days are left out. Within a slot, tasks
/// keep the order of `tasks`. When two slots share an hour of the day the
/// first one gets the task, so no task shows up twice.
pub fn bucket_by_hour<'a, Tz: TimeZone>(
    calendar: &Calendar<Tz>,
    tasks: &'a [Task],
    day: NaiveDate,
    hours: &[DateTime<Tz>],
) -> Timeline<'a, Tz> {
    let mut buckets: Vec<HourBucket<'a, Tz>> = hours
        .iter()
        .map(|hour| HourBucket {
            hour: hour.clone(),
            tasks: Vec::new(),
        })
        .collect();

    for task in tasks {
        if calendar.day_of(&task.added_at) != day {
            continue;
        }
        let task_hour = calendar.hour_of(&task.added_at);
        if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.hour.hour() == task_hour) {
            bucket.tasks.push(task);
        }
    }

    Timeline { day, buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStart;
    use crate::model::{Category, TaskStore};
    use chrono::{Duration, FixedOffset, Utc};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, hour, minute, 0).unwrap()
    }

    fn calendar() -> Calendar<Utc> {
        Calendar::new(Utc, WeekStart::Sunday)
    }

    #[test]
    fn single_task_lands_in_its_hour() {
        let calendar = calendar();
        let day = date(2023, 1, 22);
        let mut store = TaskStore::new();
        store.add(Task::new("Fix bug", "", Category::Bug, utc(2023, 1, 22, 9, 15)));

        let hours = calendar.hours_of_day(day);
        let timeline = bucket_by_hour(&calendar, store.list(), day, &hours);

        assert_eq!(timeline.buckets().len(), 24);
        for (hour, tasks) in timeline.iter() {
            if hour.hour() == 9 {
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].name, "Fix bug");
                assert_eq!(tasks[0].category, Category::Bug);
            } else {
                assert!(tasks.is_empty(), "{} should be empty", hour);
            }
        }
        assert_eq!(timeline.task_count(), 1);
    }

    #[test]
    fn tasks_in_the_same_hour_keep_insertion_order() {
        let calendar = calendar();
        let day = date(2023, 1, 22);
        let mut store = TaskStore::new();
        store.add(Task::new("first", "", Category::General, utc(2023, 1, 22, 9, 15)));
        store.add(Task::new("second", "", Category::Idea, utc(2023, 1, 22, 9, 50)));

        let hours = calendar.hours_of_day(day);
        let timeline = bucket_by_hour(&calendar, store.list(), day, &hours);
        let nine = timeline.get(&hours[9]).unwrap();

        let names: Vec<&str> = nine.iter().map(|task| task.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn later_insert_of_earlier_minute_stays_second() {
        let calendar = calendar();
        let day = date(2023, 1, 22);
        let mut store = TaskStore::new();
        store.add(Task::new("added first", "", Category::General, utc(2023, 1, 22, 9, 50)));
        store.add(Task::new("added second", "", Category::General, utc(2023, 1, 22, 9, 5)));

        let hours = calendar.hours_of_day(day);
        let timeline = bucket_by_hour(&calendar, store.list(), day, &hours);
        assert_eq!(timeline.get(&hours[9]).unwrap()[0].name, "added first");
    }

    #[test]
    fn task_of_another_day_is_left_out() {
        let calendar = calendar();
        let day = date(2023, 1, 22);
        let mut store = TaskStore::new();
        store.add(Task::new("yesterday", "", Category::Bug, utc(2023, 1, 21, 9, 15)));

        let hours = calendar.hours_of_day(day);
        let timeline = bucket_by_hour(&calendar, store.list(), day, &hours);

        assert_eq!(timeline.task_count(), 0);
        assert!(timeline.buckets().iter().all(|bucket| bucket.is_empty()));
    }

    #[test]
    fn day_and_hour_follow_the_calendar_zone() {
        // 23:30 UTC on the 21st is 01:30 on the 22nd two hours east.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let calendar = Calendar::new(tz, WeekStart::Sunday);
        let day = date(2023, 1, 22);
        let tasks = vec![Task::new("night owl", "", Category::Coding, utc(2023, 1, 21, 23, 30))];

        let hours = calendar.hours_of_day(day);
        let timeline = bucket_by_hour(&calendar, &tasks, day, &hours);
        assert_eq!(timeline.get(&hours[1]).unwrap().len(), 1);
        assert_eq!(timeline.task_count(), 1);
    }

    #[test]
    fn duplicate_slots_do_not_double_count() {
        let calendar = calendar();
        let day = date(2023, 1, 22);
        let tasks = vec![Task::new("once", "", Category::General, utc(2023, 1, 22, 9, 15))];
        let nine = utc(2023, 1, 22, 9, 0);
        let hours = vec![nine, nine + Duration::days(1)];

        let timeline = bucket_by_hour(&calendar, &tasks, day, &hours);
        assert_eq!(timeline.buckets()[0].tasks.len(), 1);
        assert!(timeline.buckets()[1].is_empty());
    }

    #[test]
    fn missing_slot_drops_the_task() {
        let calendar = calendar();
        let day = date(2023, 1, 22);
        let tasks = vec![Task::new("x", "", Category::General, utc(2023, 1, 22, 9, 15))];
        let hours = vec![utc(2023, 1, 22, 8, 0)];

        let timeline = bucket_by_hour(&calendar, &tasks, day, &hours);
        assert_eq!(timeline.task_count(), 0);
        assert!(timeline.get(&utc(2023, 1, 22, 9, 0)).is_none());
    }

    fn any_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((0u32..3, 0u32..24, 0u32..60), 0..40).prop_map(|stamps| {
            stamps
                .into_iter()
                .map(|(day, hour, minute)| {
                    Task::new("t", "", Category::General, utc(2023, 1, 21 + day, hour, minute))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_buckets_only_hold_matching_tasks(tasks in any_tasks(), day_index in 0u32..3) {
            let calendar = calendar();
            let day = date(2023, 1, 21 + day_index);
            let hours = calendar.hours_of_day(day);
            let timeline = bucket_by_hour(&calendar, &tasks, day, &hours);

            for (hour, bucket) in timeline.iter() {
                for task in bucket {
                    prop_assert_eq!(calendar.day_of(&task.added_at), day);
                    prop_assert_eq!(calendar.hour_of(&task.added_at), hour.hour());
                }
            }

            let same_day = tasks.iter().filter(|task| calendar.day_of(&task.added_at) == day).count();
            prop_assert_eq!(timeline.task_count(), same_day);

            let mut seen = std::collections::HashSet::new();
            for (_, bucket) in timeline.iter() {
                for task in bucket {
                    prop_assert!(seen.insert(task.id));
                }
            }
        }

        #[test]
        fn prop_bucketing_is_repeatable(tasks in any_tasks()) {
            let calendar = calendar();
            let day = date(2023, 1, 22);
            let hours = calendar.hours_of_day(day);
            let before = tasks.clone();

            let first = bucket_by_hour(&calendar, &tasks, day, &hours);
            let second = bucket_by_hour(&calendar, &tasks, day, &hours);

            prop_assert_eq!(&tasks, &before);
            for (a, b) in first.iter().zip(second.iter()) {
                prop_assert_eq!(a.0, b.0);
                let a_ids: Vec<_> = a.1.iter().map(|task| task.id).collect();
                let b_ids: Vec<_> = b.1.iter().map(|task| task.id).collect();
                prop_assert_eq!(a_ids, b_ids);
            }
        }
    }
}
