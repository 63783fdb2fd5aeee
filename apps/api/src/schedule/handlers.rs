//! Axum route handlers for plan generation and calendar export.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use tracing::info;

use crate::calendar::{export_filename, export_schedule};
use crate::errors::AppError;
use crate::schedule::enrich::enrich;
use crate::schedule::models::Schedule;
use crate::schedule::prompt_builder::{build_prompt, SYLLABUS_CHAR_BUDGET};
use crate::state::AppState;

pub const DEFAULT_DURATION_WEEKS: u32 = 10;
pub const MAX_DURATION_WEEKS: u32 = 52;

#[derive(Debug, Deserialize)]
pub struct GenerateScheduleRequest {
    #[serde(default)]
    pub syllabus: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// ISO date; today when absent or blank.
    #[serde(default)]
    pub start_date: Option<String>,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_WEEKS
}

#[derive(Debug, Deserialize)]
pub struct ExportCalendarRequest {
    pub schedule: Schedule,
}

/// POST /api/v1/schedules/generate
///
/// syllabus → prompt → provider → typed schedule → YouTube links.
pub async fn handle_generate_schedule(
    State(state): State<AppState>,
    payload: Result<Json<GenerateScheduleRequest>, JsonRejection>,
) -> Result<Json<Schedule>, AppError> {
    state.schedules.ensure_configured()?;
    let Json(request) = payload?;

    let syllabus = request.syllabus.trim();
    if syllabus.is_empty() {
        return Err(AppError::Validation(
            "Please provide syllabus content!".to_string(),
        ));
    }
    if !(1..=MAX_DURATION_WEEKS).contains(&request.duration) {
        return Err(AppError::Validation(format!(
            "duration must be between 1 and {MAX_DURATION_WEEKS} weeks"
        )));
    }
    let start_date = parse_start_date(request.start_date.as_deref(), Local::now().date_naive())?;

    info!(
        "Generating schedule for {} weeks starting {} (syllabus: {} chars)",
        request.duration,
        start_date,
        syllabus.chars().count()
    );

    let prompt = build_prompt(syllabus, request.duration, start_date);
    if prompt.syllabus_truncated {
        info!("Syllabus truncated to {SYLLABUS_CHAR_BUDGET} characters for the prompt");
    }

    let schedule = state
        .retry
        .run("Schedule generation", || {
            state.schedules.generate(&prompt, request.duration)
        })
        .await?;
    let schedule = enrich(schedule);

    info!("Generated schedule with {} study days", schedule.day_count());
    Ok(Json(schedule))
}

/// POST /api/v1/schedules/export
///
/// Returns the schedule as a downloadable `.ics` file named for today's date.
pub async fn handle_export_calendar(
    payload: Result<Json<ExportCalendarRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    calendar_attachment(&request.schedule, Local::now())
}

/// Filename carries the caller's local date; DTSTAMP is always UTC.
fn calendar_attachment<Tz: TimeZone>(
    schedule: &Schedule,
    now: DateTime<Tz>,
) -> Result<Response, AppError> {
    let body = export_schedule(schedule, now.with_timezone(&Utc))?;
    let filename = export_filename(now.date_naive());
    info!(
        "Exported {} calendar events ({} bytes) as {filename}",
        schedule.day_count(),
        body.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

fn parse_start_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            AppError::Validation(format!("start_date '{s}' must be an ISO date (YYYY-MM-DD)"))
        }),
    }
}
