//! Schedule types.
//!
//! A `Schedule` is a titled time interval with a completion flag. Dates
//! travel as `YYYY-MM-DD` and clock times as `HH:MM` on the wire; the
//! `hhmm` serde module handles the time format.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AgendaError, AgendaResult};

/// A titled time interval, optionally spanning multiple days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Stable surrogate identifier, minted when the schedule is stored.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub completed: bool,
}

impl Schedule {
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Schedule {
            id: Uuid::new_v4(),
            title: title.into(),
            start_date,
            end_date,
            start_time,
            end_time,
            completed: false,
        }
    }

    /// The legacy identity tuple used by the wire protocol for lookups.
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey {
            title: self.title.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
        }
    }

    /// Every calendar date this schedule covers, in order.
    /// Empty if `end_date` is before `start_date`.
    pub fn covered_dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    pub fn spans_multiple_days(&self) -> bool {
        self.start_date != self.end_date
    }

    /// Whether `date` falls within `[start_date, end_date]`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// The (title, start_date, end_date, start_time) tuple that the wire
/// protocol uses to locate a schedule for update and delete.
///
/// Duplicate tuples are possible; lookups resolve to the oldest match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleKey {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
}

impl std::fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' {}..{} {}",
            self.title,
            self.start_date,
            self.end_date,
            self.start_time.format("%H:%M")
        )
    }
}

/// The editor's five text fields, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftValues {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleDraft {
    /// Pre-fill for a fresh entry on `date`: both ends on that day,
    /// 09:00–17:00.
    pub fn for_date(date: NaiveDate) -> Self {
        ScheduleDraft {
            title: String::new(),
            start_date: date.format("%Y-%m-%d").to_string(),
            end_date: date.format("%Y-%m-%d").to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
        }
    }

    pub fn from_schedule(schedule: &Schedule) -> Self {
        ScheduleDraft {
            title: schedule.title.clone(),
            start_date: schedule.start_date.format("%Y-%m-%d").to_string(),
            end_date: schedule.end_date.format("%Y-%m-%d").to_string(),
            start_time: schedule.start_time.format("%H:%M").to_string(),
            end_time: schedule.end_time.format("%H:%M").to_string(),
        }
    }

    /// Check that all five fields are filled in and parseable.
    /// The title is trimmed before the emptiness check.
    pub fn validate(&self) -> AgendaResult<DraftValues> {
        let title = self.title.trim();

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        if self.start_date.is_empty() {
            missing.push("start date");
        }
        if self.end_date.is_empty() {
            missing.push("end date");
        }
        if self.start_time.is_empty() {
            missing.push("start time");
        }
        if self.end_time.is_empty() {
            missing.push("end time");
        }
        if !missing.is_empty() {
            return Err(AgendaError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(DraftValues {
            title: title.to_string(),
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
        })
    }
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> AgendaResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        AgendaError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", s))
    })
}

/// Parse `HH:MM`.
pub fn parse_time(s: &str) -> AgendaResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| {
        AgendaError::Validation(format!("invalid time '{}', expected HH:MM", s))
    })
}

/// Serde adapter for `HH:MM` clock times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn serializes_times_as_hhmm() {
        let schedule = Schedule::new(
            "Standup",
            date("2025-03-10"),
            date("2025-03-10"),
            time("09:00"),
            time("09:15"),
        );

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["start_date"], "2025-03-10");
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], "09:15");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn deserializes_wire_schedule_without_id() {
        let json = r#"{
            "title": "Standup",
            "start_date": "2025-03-10",
            "end_date": "2025-03-10",
            "start_time": "09:00",
            "end_time": "09:15",
            "completed": false
        }"#;

        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.title, "Standup");
        assert_eq!(schedule.start_time, time("09:00"));
    }

    #[test]
    fn covered_dates_spans_the_full_range() {
        let schedule = Schedule::new(
            "Offsite",
            date("2025-03-10"),
            date("2025-03-12"),
            time("09:00"),
            time("17:00"),
        );

        let covered: Vec<_> = schedule.covered_dates().collect();
        assert_eq!(
            covered,
            vec![date("2025-03-10"), date("2025-03-11"), date("2025-03-12")]
        );
        assert!(schedule.spans_multiple_days());
    }

    #[test]
    fn covered_dates_is_empty_for_inverted_range() {
        let schedule = Schedule::new(
            "Oops",
            date("2025-03-12"),
            date("2025-03-10"),
            time("09:00"),
            time("17:00"),
        );

        assert_eq!(schedule.covered_dates().count(), 0);
    }

    #[test]
    fn draft_validation_rejects_any_empty_field() {
        let mut draft = ScheduleDraft::for_date(date("2025-03-10"));
        assert!(matches!(
            draft.validate(),
            Err(AgendaError::Validation(_))
        ));

        draft.title = "  ".to_string(); // whitespace-only counts as empty
        assert!(matches!(draft.validate(), Err(AgendaError::Validation(_))));

        draft.title = "Standup".to_string();
        draft.end_time = String::new();
        assert!(matches!(draft.validate(), Err(AgendaError::Validation(_))));
    }

    #[test]
    fn draft_validation_parses_and_trims() {
        let mut draft = ScheduleDraft::for_date(date("2025-03-10"));
        draft.title = "  Standup ".to_string();

        let values = draft.validate().unwrap();
        assert_eq!(values.title, "Standup");
        assert_eq!(values.start_date, date("2025-03-10"));
        assert_eq!(values.start_time, time("09:00"));
        assert_eq!(values.end_time, time("17:00"));
    }

    #[test]
    fn draft_validation_rejects_malformed_values() {
        let mut draft = ScheduleDraft::for_date(date("2025-03-10"));
        draft.title = "Standup".to_string();
        draft.start_time = "9am".to_string();
        assert!(matches!(draft.validate(), Err(AgendaError::Validation(_))));
    }
}
