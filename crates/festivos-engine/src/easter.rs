//! Easter computation and the date arithmetic holiday rules are built on.
//!
//! All functions are pure and work on naive civil dates: no clock access, no
//! timezone. The only failure mode is leaving the range `chrono::NaiveDate`
//! can represent.
//!
//! # Functions
//!
//! - [`holy_week_start`] — Palm Sunday, the Sunday that opens Holy Week
//! - [`compute_easter_sunday`] — Gregorian Easter Sunday
//! - [`holy_week`] — Palm Sunday, Holy Thursday, Good Friday and Easter Sunday together
//! - [`add_days`] — Shift a date by a signed number of days
//! - [`next_monday_on_or_after`] — Observed-date shift used by "moves to Monday" rules

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::FestivosError;

/// Days from Palm Sunday to Easter Sunday.
const HOLY_WEEK_DAYS: i64 = 7;

// ── Congruence ──────────────────────────────────────────────────────────────

/// Days after March 15 on which Holy Week starts in `year`.
///
/// Gauss's congruence. The century terms `m` and `n` come out as 24 and 5
/// for 1900–2099; deriving them keeps every other Gregorian year correct.
fn palm_sunday_offset(year: i32) -> i32 {
    let k = year.div_euclid(100);
    let p = (13 + 8 * k).div_euclid(25);
    let q = k.div_euclid(4);
    let m = (15 - p + k - q).rem_euclid(30);
    let n = (4 + k - q).rem_euclid(7);

    let a = year.rem_euclid(19);
    let b = year.rem_euclid(4);
    let c = year.rem_euclid(7);
    let d = (19 * a + m).rem_euclid(30);
    let e = (2 * b + 4 * c + 6 * d + n).rem_euclid(7);

    // Easter can never fall after April 25.
    if (d == 29 && e == 6) || (d == 28 && e == 6 && (11 * m + 11).rem_euclid(30) < 19) {
        d + e - 7
    } else {
        d + e
    }
}

/// Compute the Sunday that opens Holy Week (Palm Sunday) for `year`.
///
/// The congruence gives `day = 15 + offset` counted from March 1; values past
/// 31 roll into April. The result always lies between March 15 and April 18.
///
/// # Errors
///
/// Returns [`FestivosError::DateOutOfRange`] if `year` cannot be represented
/// by `chrono::NaiveDate`.
///
/// # Examples
///
/// ```
/// use festivos_engine::easter::holy_week_start;
///
/// let palm_sunday = holy_week_start(2024).unwrap();
/// assert_eq!(palm_sunday.to_string(), "2024-03-24");
/// ```
pub fn holy_week_start(year: i32) -> Result<NaiveDate, FestivosError> {
    let mut day = 15 + palm_sunday_offset(year);
    let mut month = 3;
    if day > 31 {
        day -= 31;
        month = 4;
    }

    NaiveDate::from_ymd_opt(year, month, day as u32)
        .ok_or_else(|| FestivosError::DateOutOfRange(format!("year {year}")))
}

/// Compute Gregorian Easter Sunday for `year`.
///
/// Always a Sunday between March 22 and April 25 inclusive.
///
/// # Errors
///
/// Returns [`FestivosError::DateOutOfRange`] if `year` cannot be represented
/// by `chrono::NaiveDate`.
///
/// # Examples
///
/// ```
/// use festivos_engine::easter::compute_easter_sunday;
///
/// let easter = compute_easter_sunday(2024).unwrap();
/// assert_eq!(easter.to_string(), "2024-03-31");
/// ```
pub fn compute_easter_sunday(year: i32) -> Result<NaiveDate, FestivosError> {
    add_days(holy_week_start(year)?, HOLY_WEEK_DAYS)
}

// ── Holy Week ───────────────────────────────────────────────────────────────

/// The movable dates of Holy Week for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HolyWeek {
    pub palm_sunday: NaiveDate,
    pub holy_thursday: NaiveDate,
    pub good_friday: NaiveDate,
    pub easter_sunday: NaiveDate,
}

/// Compute the Holy Week dates for `year`.
///
/// # Errors
///
/// Returns [`FestivosError::DateOutOfRange`] if `year` cannot be represented.
pub fn holy_week(year: i32) -> Result<HolyWeek, FestivosError> {
    let palm_sunday = holy_week_start(year)?;
    Ok(HolyWeek {
        palm_sunday,
        holy_thursday: add_days(palm_sunday, 4)?,
        good_friday: add_days(palm_sunday, 5)?,
        easter_sunday: add_days(palm_sunday, HOLY_WEEK_DAYS)?,
    })
}

// ── Date arithmetic ─────────────────────────────────────────────────────────

/// Return the date `days` calendar days after `date` (`days` may be negative).
///
/// # Errors
///
/// Returns [`FestivosError::DateOutOfRange`] if the result cannot be represented.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, FestivosError> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| FestivosError::DateOutOfRange(format!("{date} {days:+} days")))
}

/// Days to move forward from `weekday` to reach a Monday.
///
/// Monday → 0, Tuesday → 6, Wednesday → 5, Thursday → 4, Friday → 3,
/// Saturday → 2, Sunday → 1.
fn days_until_monday(weekday: Weekday) -> i64 {
    (7 - weekday.num_days_from_monday() as i64) % 7
}

/// Return `date` if it is a Monday, otherwise the first Monday after it.
///
/// # Errors
///
/// Returns [`FestivosError::DateOutOfRange`] if the Monday cannot be represented.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use festivos_engine::easter::next_monday_on_or_after;
///
/// // Wednesday, October 12, 2022
/// let wednesday = NaiveDate::from_ymd_opt(2022, 10, 12).unwrap();
/// assert_eq!(next_monday_on_or_after(wednesday).unwrap().to_string(), "2022-10-17");
/// ```
pub fn next_monday_on_or_after(date: NaiveDate) -> Result<NaiveDate, FestivosError> {
    add_days(date, days_until_monday(date.weekday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── holy_week_start / compute_easter_sunday ─────────────────────────

    #[test]
    fn test_easter_2024() {
        assert_eq!(compute_easter_sunday(2024).unwrap(), date(2024, 3, 31));
    }

    #[test]
    fn test_holy_week_start_2024_is_palm_sunday() {
        assert_eq!(holy_week_start(2024).unwrap(), date(2024, 3, 24));
    }

    #[test]
    fn test_easter_known_years() {
        let known = [
            (2000, 4, 23),
            (2008, 3, 23),
            (2011, 4, 24),
            (2019, 4, 21),
            (2022, 4, 17),
            (2023, 4, 9),
            (2025, 4, 20),
            (2026, 4, 5),
            (2038, 4, 25),
        ];
        for (y, m, d) in known {
            assert_eq!(compute_easter_sunday(y).unwrap(), date(y, m, d), "year {y}");
        }
    }

    #[test]
    fn test_easter_april_26_exception() {
        // d = 29, e = 6: the raw congruence says April 26
        assert_eq!(compute_easter_sunday(1981).unwrap(), date(1981, 4, 19));
        assert_eq!(compute_easter_sunday(2076).unwrap(), date(2076, 4, 19));
    }

    #[test]
    fn test_easter_april_25_exception() {
        // d = 28, e = 6: the raw congruence says April 25
        assert_eq!(compute_easter_sunday(1954).unwrap(), date(1954, 4, 18));
        assert_eq!(compute_easter_sunday(2049).unwrap(), date(2049, 4, 18));
    }

    #[test]
    fn test_easter_outside_twentieth_and_twenty_first_centuries() {
        assert_eq!(compute_easter_sunday(1818).unwrap(), date(1818, 3, 22));
        assert_eq!(compute_easter_sunday(2285).unwrap(), date(2285, 3, 22));
        assert_eq!(compute_easter_sunday(1886).unwrap(), date(1886, 4, 25));
    }

    #[test]
    fn test_easter_unrepresentable_year() {
        let err = compute_easter_sunday(i32::MAX).unwrap_err();
        assert!(matches!(err, FestivosError::DateOutOfRange(_)));
    }

    // ── holy_week ───────────────────────────────────────────────────────

    #[test]
    fn test_holy_week_2024() {
        let week = holy_week(2024).unwrap();
        assert_eq!(week.palm_sunday, date(2024, 3, 24));
        assert_eq!(week.holy_thursday, date(2024, 3, 28));
        assert_eq!(week.good_friday, date(2024, 3, 29));
        assert_eq!(week.easter_sunday, date(2024, 3, 31));
    }

    #[test]
    fn test_holy_week_weekdays() {
        let week = holy_week(2031).unwrap();
        assert_eq!(week.palm_sunday.weekday(), Weekday::Sun);
        assert_eq!(week.holy_thursday.weekday(), Weekday::Thu);
        assert_eq!(week.good_friday.weekday(), Weekday::Fri);
        assert_eq!(week.easter_sunday.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_holy_week_serializes_iso_dates() {
        let json = serde_json::to_value(holy_week(2024).unwrap()).unwrap();
        assert_eq!(json["good_friday"], "2024-03-29");
    }

    // ── add_days ────────────────────────────────────────────────────────

    #[test]
    fn test_add_days_rolls_over_month() {
        assert_eq!(add_days(date(2024, 3, 24), 11).unwrap(), date(2024, 4, 4));
    }

    #[test]
    fn test_add_days_rolls_over_year_backwards() {
        assert_eq!(add_days(date(2025, 1, 2), -3).unwrap(), date(2024, 12, 30));
    }

    #[test]
    fn test_add_days_leap_day() {
        assert_eq!(add_days(date(2024, 2, 28), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(add_days(date(2023, 2, 28), 1).unwrap(), date(2023, 3, 1));
    }

    #[test]
    fn test_add_days_overflow() {
        assert!(add_days(NaiveDate::MAX, 1).is_err());
        assert!(add_days(date(2024, 1, 1), i64::MAX).is_err());
    }

    // ── next_monday_on_or_after ─────────────────────────────────────────

    #[test]
    fn test_next_monday_from_every_weekday() {
        // 2024-07-15 is a Monday
        let monday = date(2024, 7, 15);
        assert_eq!(next_monday_on_or_after(monday).unwrap(), monday);
        for offset in 1..7 {
            let start = add_days(monday, offset).unwrap();
            assert_eq!(
                next_monday_on_or_after(start).unwrap(),
                date(2024, 7, 22),
                "from {start}"
            );
        }
    }

    #[test]
    fn test_next_monday_from_sunday_is_next_day() {
        assert_eq!(
            next_monday_on_or_after(date(2024, 7, 21)).unwrap(),
            date(2024, 7, 22)
        );
    }

    #[test]
    fn test_next_monday_across_year_end() {
        // Thursday, December 31, 2026
        assert_eq!(
            next_monday_on_or_after(date(2026, 12, 31)).unwrap(),
            date(2027, 1, 4)
        );
    }
}
