//! Schedule CRUD and completion endpoints

use axum::{Json, Router, extract::State, routing::get, routing::post};
use tracing::info;

use agenda_core::protocol::{
    CompleteScheduleRequest, CreateScheduleRequest, DeleteScheduleRequest, MutationResponse,
    UpdateScheduleRequest,
};
use agenda_core::{AgendaError, ScheduleCollection};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/schedules",
            get(list_schedules)
                .post(create_schedule)
                .put(update_schedule)
                .delete(delete_schedule),
        )
        .route("/complete_schedule", post(complete_schedule))
}

/// GET /schedules - the full collection, keyed by every covered date
async fn list_schedules(
    State(state): State<AppState>,
) -> Result<Json<ScheduleCollection>, AppError> {
    let schedules = state.storage.list_all().await?;
    Ok(Json(ScheduleCollection::from_schedules(schedules)))
}

/// POST /schedules - create a new schedule
async fn create_schedule(
    State(state): State<AppState>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AgendaError::Validation("title must not be empty".into()).into());
    }

    let created = state.storage.insert(&req).await?;
    info!(id = %created.id, title = %created.title, "schedule created");

    Ok(Json(MutationResponse::ok()))
}

/// PUT /schedules - update the schedule located by the old tuple
async fn update_schedule(
    State(state): State<AppState>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    if req.new_title.trim().is_empty() {
        return Err(AgendaError::Validation("title must not be empty".into()).into());
    }

    let updated = state.storage.update(&req).await?;
    if !updated {
        return Err(AgendaError::ScheduleNotFound(req.old_key().to_string()).into());
    }

    info!(title = %req.new_title, "schedule updated");
    Ok(Json(MutationResponse::ok()))
}

/// DELETE /schedules - delete the schedule located by the tuple
async fn delete_schedule(
    State(state): State<AppState>,
    Json(req): Json<DeleteScheduleRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let key = req.key();
    let deleted = state.storage.delete(&key).await?;
    if !deleted {
        return Err(AgendaError::ScheduleNotFound(key.to_string()).into());
    }

    info!(title = %key.title, "schedule deleted");
    Ok(Json(MutationResponse::ok()))
}

/// POST /complete_schedule - toggle completion on the matching schedule
async fn complete_schedule(
    State(state): State<AppState>,
    Json(req): Json<CompleteScheduleRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let toggled = state.storage.toggle_completed(&req).await?;
    if !toggled {
        return Err(AgendaError::ScheduleNotFound(format!(
            "'{}' at {} covering {}",
            req.title,
            req.start_time.format("%H:%M"),
            req.date
        ))
        .into());
    }

    info!(title = %req.title, date = %req.date, "schedule completion toggled");
    Ok(Json(MutationResponse::ok()))
}

#[cfg(test)]
#[path = "../tests/routes_tests.rs"]
mod tests;
