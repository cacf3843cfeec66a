//! Date-keyed schedule collection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// The full schedule set, indexed by every date each schedule covers.
///
/// Serializes as a `{"YYYY-MM-DD": [Schedule, ...]}` map, the shape the
/// GET /schedules endpoint returns. The collection is rebuilt wholesale on
/// every load; there is no incremental patching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleCollection(BTreeMap<NaiveDate, Vec<Schedule>>);

impl ScheduleCollection {
    /// Build the collection by expanding each schedule onto every date in
    /// its `[start_date, end_date]` range. Within a day, schedules keep
    /// the order they were supplied in.
    pub fn from_schedules(schedules: impl IntoIterator<Item = Schedule>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<Schedule>> = BTreeMap::new();

        for schedule in schedules {
            for date in schedule.covered_dates() {
                by_date.entry(date).or_default().push(schedule.clone());
            }
        }

        ScheduleCollection(by_date)
    }

    /// Schedules occurring on `date`, in insertion order.
    pub fn on(&self, date: NaiveDate) -> &[Schedule] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates that have at least one schedule, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct schedules (a multi-day schedule counts once).
    pub fn schedule_count(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        for schedules in self.0.values() {
            for schedule in schedules {
                seen.insert(schedule.id);
            }
        }
        seen.len()
    }
}
