use chrono::{Datelike, NaiveDate, Weekday};

/// No lectures run on Saturday or Sunday. Fixed policy, not configurable.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Working days in [start, end], oldest first. Empty when end < start.
pub fn working_days_iter(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |d| *d <= end)
        .filter(|d| is_working_day(*d))
}

/// Inclusive Mon-Fri day count over [start, end]. Both bounds are plain
/// calendar dates, so partial days can never skew the count.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    working_days_iter(start, end).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekends_are_not_working_days() {
        assert!(is_working_day(d(2025, 10, 10))); // Friday
        assert!(!is_working_day(d(2025, 10, 11))); // Saturday
        assert!(!is_working_day(d(2025, 10, 12))); // Sunday
        assert!(is_working_day(d(2025, 10, 13))); // Monday
    }

    #[test]
    fn any_seven_day_window_has_five_working_days() {
        // 2025-10-06 is a Monday; slide the window across a full week.
        for offset in 0..7 {
            let start = d(2025, 10, 6 + offset);
            let end = start + chrono::Days::new(6);
            assert_eq!(working_days(start, end), 5, "window starting {start}");
        }
    }

    #[test]
    fn inclusive_bounds() {
        assert_eq!(working_days(d(2025, 10, 10), d(2025, 10, 10)), 1);
        assert_eq!(working_days(d(2025, 10, 10), d(2025, 10, 13)), 2);
    }

    #[test]
    fn inverted_range_counts_zero() {
        assert_eq!(working_days(d(2025, 10, 13), d(2025, 10, 10)), 0);
    }

    #[test]
    fn iterator_skips_weekend() {
        let days: Vec<_> = working_days_iter(d(2025, 10, 10), d(2025, 10, 14)).collect();
        assert_eq!(days, vec![d(2025, 10, 10), d(2025, 10, 13), d(2025, 10, 14)]);
    }
}
