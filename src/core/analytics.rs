use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::calendar::{working_days, working_days_iter};
use crate::model::attendance::AttendanceRecord;
use crate::model::timetable::LectureSlot;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[schema(example = 25)]
    pub overall_attendance: u32,
    #[schema(example = 4)]
    pub total_lectures: u32,
    #[schema(example = 1)]
    pub attended_lectures: u32,
    #[schema(example = 3)]
    pub missed_lectures: i64,
    #[schema(example = 1)]
    pub this_month_lectures: u32,
    #[schema(example = 1)]
    pub current_streak: u32,
    #[schema(example = "Databases")]
    pub most_attended_subject: String,
    #[schema(example = 1)]
    pub most_attended_count: u32,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Attended,
    Missed,
    Upcoming,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[schema(example = "2-2025-10-13")]
    pub id: String,
    #[schema(example = "Databases")]
    pub title: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "10:00")]
    pub start_time: String,
    #[schema(example = "11:00")]
    pub end_time: String,
    pub status: EventStatus,
    pub cid: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LectureBreakdown {
    pub cid: u64,
    #[schema(example = "Databases")]
    pub name: String,
    pub attended: u32,
    pub total: u32,
    pub missed: i64,
    #[schema(example = 50)]
    pub percentage: u32,
    #[schema(example = "10:00")]
    pub start_time: String,
    #[schema(example = "11:00")]
    pub end_time: String,
}

/// Rounded whole-number percentage; 0 when the denominator is 0.
fn percent(attended: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (attended as f64 / total as f64 * 100.0).round() as u32
    }
}

fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// Consecutive attended days walking backward over `dates_desc` (distinct
/// attendance dates, newest first).
///
/// The literal deployed rule: dead if the newest date is more than 3 days
/// before today; a 1-day gap always chains; a 2-3 day gap chains only when
/// the earlier date is a Friday (weekend hop to Monday). Deliberately not
/// generalized to true business-day adjacency.
pub fn current_streak(dates_desc: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some(&newest) = dates_desc.first() else {
        return 0;
    };
    if (today - newest).num_days() > 3 {
        return 0;
    }

    let mut streak = 1;
    for pair in dates_desc.windows(2) {
        let (newer, older) = (pair[0], pair[1]);
        let gap = (newer - older).num_days();
        if gap == 1 || (gap <= 3 && older.weekday() == Weekday::Fri) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Dashboard summary over the user's full record set.
pub fn dashboard_stats(
    records: &[AttendanceRecord],
    slot_count: u32,
    college_start: NaiveDate,
    today: NaiveDate,
) -> DashboardStats {
    let total = working_days(college_start, today) * slot_count;
    let attended = records.len() as u32;

    let this_month = records
        .iter()
        .filter(|r| r.date.month() == today.month() && r.date.year() == today.year())
        .count() as u32;

    // First occurrence wins ties, matching query-order behavior.
    let mut by_name: Vec<(&str, u32)> = Vec::new();
    for r in records {
        match by_name.iter_mut().find(|(n, _)| *n == r.name) {
            Some((_, count)) => *count += 1,
            None => by_name.push((&r.name, 1)),
        }
    }
    let (most_subject, most_count) = by_name
        .iter()
        .fold(("N/A", 0), |best, &(n, c)| if c > best.1 { (n, c) } else { best });

    let mut dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse();

    DashboardStats {
        overall_attendance: percent(attended, total),
        total_lectures: total,
        attended_lectures: attended,
        missed_lectures: i64::from(total) - i64::from(attended),
        this_month_lectures: this_month,
        current_streak: current_streak(&dates, today),
        most_attended_subject: most_subject.to_string(),
        most_attended_count: most_count,
    }
}

/// One event per (working day, slot) from college start to two months past
/// today, ordered by date then slot start.
///
/// Days strictly before today are attended/missed; today and the future are
/// always `upcoming`, even for slots already credited today.
pub fn calendar_events(
    slots: &[LectureSlot],
    records: &[AttendanceRecord],
    college_start: NaiveDate,
    today: NaiveDate,
) -> Vec<CalendarEvent> {
    let horizon = today.checked_add_months(Months::new(2)).unwrap_or(today);
    let attended: HashSet<(NaiveDate, &str)> = records
        .iter()
        .map(|r| (r.date, r.name.as_str()))
        .collect();

    let mut events = Vec::new();
    for day in working_days_iter(college_start, horizon) {
        for slot in slots {
            let status = if day < today {
                if attended.contains(&(day, slot.cname.as_str())) {
                    EventStatus::Attended
                } else {
                    EventStatus::Missed
                }
            } else {
                EventStatus::Upcoming
            };

            events.push(CalendarEvent {
                id: format!("{}-{}", slot.cid, day),
                title: slot.cname.clone(),
                date: day,
                start_time: hour_label(slot.start_time),
                end_time: hour_label(slot.end_time),
                status,
                cid: slot.cid,
            });
        }
    }
    events
}

/// Per-lecture totals. Every slot occurs once per working day, so each one
/// shares the same denominator.
pub fn lecture_breakdown(
    slots: &[LectureSlot],
    records: &[AttendanceRecord],
    college_start: NaiveDate,
    today: NaiveDate,
) -> Vec<LectureBreakdown> {
    let total = working_days(college_start, today);

    slots
        .iter()
        .map(|slot| {
            let attended = records.iter().filter(|r| r.name == slot.cname).count() as u32;
            LectureBreakdown {
                cid: slot.cid,
                name: slot.cname.clone(),
                attended,
                total,
                missed: i64::from(total) - i64::from(attended),
                percentage: percent(attended, total),
                start_time: hour_label(slot.start_time),
                end_time: hour_label(slot.end_time),
            }
        })
        .collect()
}
