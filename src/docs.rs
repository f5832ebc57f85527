use crate::api::calendar::CalendarResponse;
use crate::api::lectures::LecturesResponse;
use crate::api::login::{LoginReq, LoginResponse};
use crate::api::scan::ScanReq;
use crate::core::analytics::{CalendarEvent, DashboardStats, EventStatus, LectureBreakdown};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Student Attendance Tracker

This API powers an RFID-based **student attendance** system: card readers in
lecture halls post scans, and the dashboard web client reads analytics.

### 🔹 Key Features
- **Scan Ingestion**
  - Matches a scan to the active timetable slot, or backfills the oldest
    missed lecture for off-hours scans
- **Dashboard**
  - Overall percentage, monthly totals, streak, most-attended subject
- **Calendar**
  - Per-day, per-lecture attended / missed / upcoming statuses
- **Lectures**
  - Per-lecture attendance percentages

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::scan::ingest_scan,
        crate::api::login::login,
        crate::api::dashboard::dashboard_stats,
        crate::api::calendar::calendar_events,
        crate::api::lectures::lecture_analytics
    ),
    components(
        schemas(
            ScanReq,
            LoginReq,
            LoginResponse,
            DashboardStats,
            EventStatus,
            CalendarEvent,
            CalendarResponse,
            LectureBreakdown,
            LecturesResponse
        )
    ),
    tags(
        (name = "Attendance", description = "RFID scan ingestion"),
        (name = "Auth", description = "Login"),
        (name = "Analytics", description = "Read-only attendance analytics"),
    )
)]
pub struct ApiDoc;
