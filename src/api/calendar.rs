use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::api::UidQuery;
use crate::config::Config;
use crate::core::analytics::{self, CalendarEvent};
use crate::model::attendance::AttendanceRecord;
use crate::model::timetable::LectureSlot;

#[derive(Serialize, ToSchema)]
pub struct CalendarResponse {
    pub events: Vec<CalendarEvent>,
}

/// Calendar view: every (working day, slot) pair with its status
#[utoipa::path(
    get,
    path = "/calendar",
    params(UidQuery),
    responses(
        (status = 200, description = "Calendar events", body = CalendarResponse),
        (status = 400, description = "Missing uid"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Analytics"
)]
pub async fn calendar_events(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<UidQuery>,
) -> actix_web::Result<impl Responder> {
    let Some(uid) = query.uid else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "UID is required"
        })));
    };

    let slots = sqlx::query_as::<_, LectureSlot>(
        "SELECT cid, cname, start_time, end_time FROM timetable ORDER BY start_time",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to load timetable");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT uid, date, name FROM attendance WHERE uid = ?",
    )
    .bind(uid)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, uid, "Failed to load attendance records");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let today = Utc::now().with_timezone(&config.tz_offset).date_naive();
    let events = analytics::calendar_events(&slots, &records, config.college_start, today);

    Ok(HttpResponse::Ok().json(CalendarResponse { events }))
}
