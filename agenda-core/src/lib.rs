//! Core types for the agenda scheduler.
//!
//! This crate provides the pieces shared by agenda-server and the CLI:
//! - `Schedule` and the date-keyed `ScheduleCollection`
//! - month-grid math for calendar rendering
//! - wire protocol types for the REST surface
//! - the `ScheduleApi` trait connecting the controller to a backend

pub mod api;
pub mod collection;
pub mod error;
pub mod grid;
pub mod protocol;
pub mod schedule;

pub use api::ScheduleApi;
pub use collection::ScheduleCollection;
pub use error::{AgendaError, AgendaResult};
pub use grid::{MonthCursor, MonthGrid};
pub use schedule::{Schedule, ScheduleDraft, ScheduleKey};
