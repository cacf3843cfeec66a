//! The transport seam between the calendar controller and a backend.

use async_trait::async_trait;

use crate::collection::ScheduleCollection;
use crate::error::AgendaResult;
use crate::protocol::{
    CompleteScheduleRequest, CreateScheduleRequest, DeleteScheduleRequest, UpdateScheduleRequest,
};

/// Backend operations the calendar controller depends on.
///
/// The CLI implements this over HTTP against agenda-server; tests drive
/// the controller with an in-memory implementation.
#[async_trait]
pub trait ScheduleApi {
    /// Fetch the full collection, expanded across covered dates.
    async fn fetch_all(&self) -> AgendaResult<ScheduleCollection>;

    async fn create(&self, req: CreateScheduleRequest) -> AgendaResult<()>;

    /// Update the oldest schedule matching the request's old tuple.
    async fn update(&self, req: UpdateScheduleRequest) -> AgendaResult<()>;

    /// Delete the oldest schedule matching the tuple.
    /// Fails with `ScheduleNotFound` if nothing matches.
    async fn delete(&self, req: DeleteScheduleRequest) -> AgendaResult<()>;

    /// Toggle completion on the oldest candidate covering the given date.
    async fn complete(&self, req: CompleteScheduleRequest) -> AgendaResult<()>;
}
