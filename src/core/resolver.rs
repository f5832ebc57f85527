use std::collections::HashSet;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use sqlx::MySqlPool;

use crate::core::calendar::working_days_iter;
use crate::model::timetable::LectureSlot;

/// Outcome of resolving one scan. The no-op variants are successes, not
/// errors; duplicate scans within a lecture window are expected traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Marked { date: NaiveDate, lecture: String },
    AlreadyMarked { date: NaiveDate, lecture: String },
    NothingToMark,
}

/// Decide which single (date, lecture) a scan credits.
///
/// `slots` must be ordered by start hour; `existing` is the user's full
/// record set as (date, lecture name) pairs.
///
/// A scan inside a slot's half-open [start, end) window credits that slot
/// today. Off-hours scans backfill the oldest missed (day, slot) pair since
/// `college_start`, date first, then start hour.
pub fn resolve(
    slots: &[LectureSlot],
    existing: &HashSet<(NaiveDate, String)>,
    local: DateTime<FixedOffset>,
    college_start: NaiveDate,
) -> ScanOutcome {
    let today = local.date_naive();
    let hour = local.hour();

    if let Some(slot) = slots
        .iter()
        .find(|s| s.start_time <= hour && hour < s.end_time)
    {
        return if existing.contains(&(today, slot.cname.clone())) {
            ScanOutcome::AlreadyMarked {
                date: today,
                lecture: slot.cname.clone(),
            }
        } else {
            ScanOutcome::Marked {
                date: today,
                lecture: slot.cname.clone(),
            }
        };
    }

    // Expected pairs minus existing records, walked oldest-first so the
    // earliest gap wins; slot order breaks ties within a day.
    for day in working_days_iter(college_start, today) {
        for slot in slots {
            if !existing.contains(&(day, slot.cname.clone())) {
                return ScanOutcome::Marked {
                    date: day,
                    lecture: slot.cname.clone(),
                };
            }
        }
    }

    ScanOutcome::NothingToMark
}

/// Load the timetable and the user's records, decide, and persist.
///
/// The read-then-insert check keeps the common duplicate-scan path quiet; a
/// racing scan can still slip past it, in which case the unique key on
/// (uid, date, name) rejects the insert and the outcome degrades to
/// `AlreadyMarked` rather than an error.
pub async fn mark_attendance(
    pool: &MySqlPool,
    college_start: NaiveDate,
    tz_offset: FixedOffset,
    uid: u64,
    scanned_at: DateTime<Utc>,
) -> anyhow::Result<ScanOutcome> {
    let slots = sqlx::query_as::<_, LectureSlot>(
        "SELECT cid, cname, start_time, end_time FROM timetable ORDER BY start_time",
    )
    .fetch_all(pool)
    .await
    .context("failed to load timetable")?;

    let existing: HashSet<(NaiveDate, String)> =
        sqlx::query_as::<_, (NaiveDate, String)>("SELECT date, name FROM attendance WHERE uid = ?")
            .bind(uid)
            .fetch_all(pool)
            .await
            .context("failed to load attendance records")?
            .into_iter()
            .collect();

    let outcome = resolve(
        &slots,
        &existing,
        scanned_at.with_timezone(&tz_offset),
        college_start,
    );

    if let ScanOutcome::Marked { date, lecture } = &outcome {
        let result = sqlx::query("INSERT INTO attendance (uid, date, name) VALUES (?, ?, ?)")
            .bind(uid)
            .bind(*date)
            .bind(lecture)
            .execute(pool)
            .await;

        if let Err(e) = result {
            if let sqlx::Error::Database(db_err) = &e {
                // Duplicate key: a concurrent scan won the race.
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(ScanOutcome::AlreadyMarked {
                        date: *date,
                        lecture: lecture.clone(),
                    });
                }
            }
            return Err(e).context("failed to insert attendance record");
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(cid: u64, cname: &str, start: u32, end: u32) -> LectureSlot {
        LectureSlot {
            cid,
            cname: cname.to_string(),
            start_time: start,
            end_time: end,
        }
    }

    fn timetable() -> Vec<LectureSlot> {
        vec![slot(1, "A", 9, 10), slot(2, "B", 10, 11)]
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // IST, matching the default deployment offset.
    fn local(y: i32, m: u32, day: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        use chrono::TimeZone;
        FixedOffset::east_opt(330 * 60)
            .unwrap()
            .with_ymd_and_hms(y, m, day, h, min, 0)
            .unwrap()
    }

    // Friday; Oct 11-12 are the weekend.
    fn college_start() -> NaiveDate {
        d(2025, 10, 10)
    }

    fn record(y: i32, m: u32, day: u32, name: &str) -> (NaiveDate, String) {
        (d(y, m, day), name.to_string())
    }

    #[test]
    fn in_window_scan_credits_todays_slot() {
        let outcome = resolve(
            &timetable(),
            &HashSet::new(),
            local(2025, 10, 13, 10, 30),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::Marked {
                date: d(2025, 10, 13),
                lecture: "B".to_string()
            }
        );
    }

    #[test]
    fn exact_start_hour_belongs_to_the_slot() {
        let outcome = resolve(
            &timetable(),
            &HashSet::new(),
            local(2025, 10, 13, 9, 0),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::Marked {
                date: d(2025, 10, 13),
                lecture: "A".to_string()
            }
        );
    }

    #[test]
    fn exact_end_hour_rolls_to_the_next_slot() {
        // 10:00 is the end of A and the start of B.
        let outcome = resolve(
            &timetable(),
            &HashSet::new(),
            local(2025, 10, 13, 10, 0),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::Marked {
                date: d(2025, 10, 13),
                lecture: "B".to_string()
            }
        );
    }

    #[test]
    fn end_of_last_slot_falls_back_to_backfill() {
        // 11:00 is past every slot; oldest missed pair is (college start, A).
        let outcome = resolve(
            &timetable(),
            &HashSet::new(),
            local(2025, 10, 13, 11, 0),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::Marked {
                date: d(2025, 10, 10),
                lecture: "A".to_string()
            }
        );
    }

    #[test]
    fn second_scan_in_same_window_is_already_marked() {
        let existing: HashSet<_> = [record(2025, 10, 13, "B")].into();
        let outcome = resolve(
            &timetable(),
            &existing,
            local(2025, 10, 13, 10, 30),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::AlreadyMarked {
                date: d(2025, 10, 13),
                lecture: "B".to_string()
            }
        );
    }

    #[test]
    fn off_hours_scan_backfills_oldest_missed_pair() {
        // Oct 11-12 are the weekend; Friday the 10th is the oldest gap.
        let outcome = resolve(
            &timetable(),
            &HashSet::new(),
            local(2025, 10, 13, 23, 0),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::Marked {
                date: d(2025, 10, 10),
                lecture: "A".to_string()
            }
        );
    }

    #[test]
    fn backfill_prefers_earlier_date_over_earlier_hour() {
        // (Oct 10, B) starts later in the day than (Oct 13, A) but is older.
        let existing: HashSet<_> = [record(2025, 10, 10, "A")].into();
        let outcome = resolve(
            &timetable(),
            &existing,
            local(2025, 10, 13, 23, 0),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::Marked {
                date: d(2025, 10, 10),
                lecture: "B".to_string()
            }
        );
    }

    #[test]
    fn backfill_breaks_same_day_ties_by_start_hour() {
        let outcome = resolve(
            &timetable(),
            &HashSet::new(),
            local(2025, 10, 10, 23, 0),
            college_start(),
        );
        assert_eq!(
            outcome,
            ScanOutcome::Marked {
                date: d(2025, 10, 10),
                lecture: "A".to_string()
            }
        );
    }

    #[test]
    fn fully_marked_history_is_nothing_to_mark() {
        let existing: HashSet<_> = [
            record(2025, 10, 10, "A"),
            record(2025, 10, 10, "B"),
            record(2025, 10, 13, "A"),
            record(2025, 10, 13, "B"),
        ]
        .into();
        let outcome = resolve(
            &timetable(),
            &existing,
            local(2025, 10, 13, 23, 0),
            college_start(),
        );
        assert_eq!(outcome, ScanOutcome::NothingToMark);
    }
}
