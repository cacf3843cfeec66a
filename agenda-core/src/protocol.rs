//! Wire types for the agenda REST surface.
//!
//! Field names are part of the protocol: update and delete locate their
//! target by the legacy (title, start_date, end_date, start_time) tuple
//! rather than by id.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::schedule::{DraftValues, ScheduleKey, hhmm};

/// POST /schedules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl From<DraftValues> for CreateScheduleRequest {
    fn from(values: DraftValues) -> Self {
        CreateScheduleRequest {
            title: values.title,
            start_date: values.start_date,
            end_date: values.end_date,
            start_time: values.start_time,
            end_time: values.end_time,
        }
    }
}

/// PUT /schedules — `old_*` fields locate the record, `new_*` replace its
/// values. The `completed` flag is preserved across an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub old_title: String,
    pub old_start_date: NaiveDate,
    pub old_end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub old_start_time: NaiveTime,
    pub new_title: String,
    pub new_start_date: NaiveDate,
    pub new_end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub new_start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub new_end_time: NaiveTime,
}

impl UpdateScheduleRequest {
    pub fn from_parts(old: ScheduleKey, new: DraftValues) -> Self {
        UpdateScheduleRequest {
            old_title: old.title,
            old_start_date: old.start_date,
            old_end_date: old.end_date,
            old_start_time: old.start_time,
            new_title: new.title,
            new_start_date: new.start_date,
            new_end_date: new.end_date,
            new_start_time: new.start_time,
            new_end_time: new.end_time,
        }
    }

    pub fn old_key(&self) -> ScheduleKey {
        ScheduleKey {
            title: self.old_title.clone(),
            start_date: self.old_start_date,
            end_date: self.old_end_date,
            start_time: self.old_start_time,
        }
    }
}

/// DELETE /schedules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteScheduleRequest {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
}

impl From<ScheduleKey> for DeleteScheduleRequest {
    fn from(key: ScheduleKey) -> Self {
        DeleteScheduleRequest {
            title: key.title,
            start_date: key.start_date,
            end_date: key.end_date,
            start_time: key.start_time,
        }
    }
}

impl DeleteScheduleRequest {
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey {
            title: self.title.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
        }
    }
}

/// POST /complete_schedule — `date` is the day cell the schedule was
/// clicked under, used to disambiguate among candidates sharing title and
/// start time. The server toggles `completed` on the oldest match whose
/// date range contains `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteScheduleRequest {
    pub date: NaiveDate,
    pub title: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
}

/// Body returned by successful mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        MutationResponse {
            success: true,
            message: None,
        }
    }
}
