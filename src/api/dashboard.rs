use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde_json::json;
use sqlx::MySqlPool;

use crate::api::UidQuery;
use crate::config::Config;
use crate::core::analytics::{self, DashboardStats};
use crate::model::attendance::AttendanceRecord;

/// Dashboard summary for one student
#[utoipa::path(
    get,
    path = "/dashboard",
    params(UidQuery),
    responses(
        (status = 200, description = "Dashboard stats", body = DashboardStats),
        (status = 400, description = "Missing uid"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Analytics"
)]
pub async fn dashboard_stats(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<UidQuery>,
) -> actix_web::Result<impl Responder> {
    let Some(uid) = query.uid else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "UID is required"
        })));
    };

    let slot_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM timetable")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to count timetable slots");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT uid, date, name FROM attendance WHERE uid = ? ORDER BY date",
    )
    .bind(uid)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, uid, "Failed to load attendance records");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let today = Utc::now().with_timezone(&config.tz_offset).date_naive();
    let stats: DashboardStats =
        analytics::dashboard_stats(&records, slot_count as u32, config.college_start, today);

    Ok(HttpResponse::Ok().json(stats))
}
