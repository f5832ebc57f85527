use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::config::Config;
use crate::core::analytics;
use crate::core::resolver::{self, ScanOutcome};
use crate::model::attendance::AttendanceRecord;
use crate::model::student::Student;
use crate::notify::{Notification, Notifier};

#[derive(Deserialize, ToSchema)]
pub struct ScanReq {
    #[schema(example = "04A1B2C3")]
    pub card_id: Option<String>,

    /// RFC 3339; defaults to the current time when absent.
    #[schema(example = "2025-10-13T05:00:00Z", value_type = String, format = "date-time")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// RFID scan ingestion endpoint
#[utoipa::path(
    post,
    path = "/data",
    request_body = ScanReq,
    responses(
        (status = 200, description = "Scan resolved", body = Object, example = json!({
            "status": "marked",
            "message": "Attendance recorded for Ada",
            "lecture": "Databases",
            "date": "2025-10-13"
        })),
        (status = 400, description = "Missing card_id"),
        (status = 404, description = "Unknown card"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn ingest_scan(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    notifier: web::Data<Arc<dyn Notifier>>,
    payload: web::Json<ScanReq>,
) -> actix_web::Result<impl Responder> {
    let card_id = match payload.card_id.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": "card_id is required"
            })));
        }
    };

    let student = sqlx::query_as::<_, Student>(
        "SELECT uid, name, email, pass, rfid FROM student WHERE rfid = ?",
    )
    .bind(card_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, card_id, "Failed to look up card");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(student) = student else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })));
    };

    let scanned_at = payload.timestamp.unwrap_or_else(Utc::now);

    let outcome = resolver::mark_attendance(
        pool.get_ref(),
        config.college_start,
        config.tz_offset,
        student.uid,
        scanned_at,
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, uid = student.uid, "Scan resolution failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match outcome {
        ScanOutcome::Marked { date, lecture } => {
            let message = format!("Attendance recorded for {}", student.name);

            // Fire-and-forget: the scan response never waits on, or fails
            // with, the confirmation message.
            let pool = pool.get_ref().clone();
            let config = config.get_ref().clone();
            let notifier = notifier.get_ref().clone();
            let lecture_for_note = lecture.clone();
            let scanned_local = scanned_at.with_timezone(&config.tz_offset);
            actix_web::rt::spawn(async move {
                if let Err(e) = send_confirmation(
                    &pool,
                    &config,
                    notifier,
                    student,
                    date,
                    lecture_for_note,
                    scanned_local.format("%H:%M").to_string(),
                )
                .await
                {
                    tracing::warn!(error = %e, "Attendance notification failed");
                }
            });

            Ok(HttpResponse::Ok().json(json!({
                "status": "marked",
                "message": message,
                "lecture": lecture,
                "date": date
            })))
        }
        ScanOutcome::AlreadyMarked { date, lecture } => Ok(HttpResponse::Ok().json(json!({
            "status": "already-marked",
            "message": "Attendance already marked",
            "lecture": lecture,
            "date": date
        }))),
        ScanOutcome::NothingToMark => Ok(HttpResponse::Ok().json(json!({
            "status": "nothing-to-mark",
            "message": "No pending lectures to mark"
        }))),
    }
}

async fn send_confirmation(
    pool: &MySqlPool,
    config: &Config,
    notifier: Arc<dyn Notifier>,
    student: Student,
    date: chrono::NaiveDate,
    lecture: String,
    time: String,
) -> anyhow::Result<()> {
    let slot_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM timetable")
        .fetch_one(pool)
        .await
        .context("failed to count timetable slots")?;

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT uid, date, name FROM attendance WHERE uid = ? ORDER BY date",
    )
    .bind(student.uid)
    .fetch_all(pool)
    .await
    .context("failed to load attendance records")?;

    let today = Utc::now().with_timezone(&config.tz_offset).date_naive();
    let stats = analytics::dashboard_stats(
        &records,
        slot_count as u32,
        config.college_start,
        today,
    );

    notifier
        .notify(Notification {
            recipient: student.email,
            name: student.name,
            lecture,
            date,
            time,
            attendance_rate: stats.overall_attendance,
            streak: stats.current_streak,
        })
        .await
}
