use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use weekplan_calendar::{CreateEventInput, Event, EventPatch, WeeklyCalendarData};
use weekplan_shared::{ApiResponse, week};

use crate::{
    error::{AppError, ResultExt},
    routes::{ApiJson, ApiQuery, AppState},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyParams {
    pub week_start: Option<String>,
}

/// GET /api/calendar/weekly?weekStart=
#[tracing::instrument(skip_all, fields(week_start = ?params.week_start))]
pub async fn weekly(
    State(app): State<AppState>,
    ApiQuery(params): ApiQuery<WeeklyParams>,
) -> Result<Json<ApiResponse<WeeklyCalendarData>>, AppError> {
    let timezone = &app.config.calendar.timezone;

    let reference = match params.week_start.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => week::parse_reference(value, timezone)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid weekStart: {value}")))?,
        _ => week::now(timezone),
    };

    let data = app
        .query
        .weekly_calendar(reference, timezone)
        .await
        .or_fail("Failed to fetch calendar data")?;

    Ok(Json(ApiResponse::success(data, None::<String>)))
}

/// POST /api/calendar/events
#[tracing::instrument(skip_all, fields(day = ?input.day))]
pub async fn create(
    State(app): State<AppState>,
    ApiJson(input): ApiJson<CreateEventInput>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let event = app
        .command
        .create(input)
        .await
        .or_fail("Failed to create event")?;

    Ok(Json(ApiResponse::success(
        event,
        "Event created successfully".to_owned(),
    )))
}

/// PATCH /api/calendar/events/{id}
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update(
    State(app): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EventPatch>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    app.command
        .update(&id, patch)
        .await
        .or_fail("Failed to update event")?;

    Ok(Json(ApiResponse::empty("Event updated successfully")))
}

/// DELETE /api/calendar/events/{id}
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    app.command
        .delete(&id)
        .await
        .or_fail("Failed to delete event")?;

    Ok(Json(ApiResponse::empty("Event deleted successfully")))
}
