use chrono::{Datelike, Duration, NaiveDate, Utc};

/// 日期所在月份的键, 形如 "2026-08"
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// 当前 UTC 日期所在月份的键
pub fn current_month_key() -> String {
    month_key(Utc::now().date_naive())
}

/// 日期所在月份的首末两天
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (year, month) = (date.year(), date.month());
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("First day of month");
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_first =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("First day of month");
    (first, next_first - Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_month_key_zero_pads() {
        assert_eq!(month_key(date(2026, 8, 6)), "2026-08");
        assert_eq!(month_key(date(2026, 12, 31)), "2026-12");
    }

    #[test]
    fn test_month_bounds_regular_month() {
        assert_eq!(
            month_bounds(date(2026, 8, 15)),
            (date(2026, 8, 1), date(2026, 8, 31))
        );
    }

    #[test]
    fn test_month_bounds_leap_february() {
        assert_eq!(
            month_bounds(date(2024, 2, 10)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(date(2026, 2, 10)),
            (date(2026, 2, 1), date(2026, 2, 28))
        );
    }

    #[test]
    fn test_month_bounds_december_rolls_into_next_year() {
        assert_eq!(
            month_bounds(date(2026, 12, 25)),
            (date(2026, 12, 1), date(2026, 12, 31))
        );
    }
}
