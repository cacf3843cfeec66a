pub mod add;
pub mod done;
pub mod edit;
pub mod rm;
pub mod show;

use chrono::{NaiveDate, NaiveTime};

use agenda_core::{Schedule, ScheduleCollection};

/// Locate the chip the user means: the first schedule under `date` with a
/// matching title and start time. The CLI analogue of clicking it.
pub fn find_chip<'a>(
    collection: &'a ScheduleCollection,
    date: NaiveDate,
    title: &str,
    start_time: NaiveTime,
) -> Option<&'a Schedule> {
    collection
        .on(date)
        .iter()
        .find(|s| s.title == title && s.start_time == start_time)
}
