use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::api::UidQuery;
use crate::config::Config;
use crate::core::analytics::{self, LectureBreakdown};
use crate::model::attendance::AttendanceRecord;
use crate::model::timetable::LectureSlot;

#[derive(Serialize, ToSchema)]
pub struct LecturesResponse {
    pub lectures: Vec<LectureBreakdown>,
}

/// Per-lecture attendance breakdown
#[utoipa::path(
    get,
    path = "/lectures",
    params(UidQuery),
    responses(
        (status = 200, description = "Per-lecture analytics", body = LecturesResponse),
        (status = 400, description = "Missing uid"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Analytics"
)]
pub async fn lecture_analytics(
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
    let lectures = analytics::lecture_breakdown(&slots, &records, config.college_start, today);

    Ok(HttpResponse::Ok().json(LecturesResponse { lectures }))
}
