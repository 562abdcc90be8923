use chrono::{Datelike, NaiveDate, Weekday};
use festivos_engine::{
    add_days, compute_easter_sunday, holy_week_start, next_monday_on_or_after, resolve,
    FixedHoliday, RuleGroup, RuleKind,
};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1583i32..=9999, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn fixed_group(code: i64, month: u32, day: u32, name: &str) -> RuleGroup {
    RuleGroup {
        code,
        label: None,
        kind: RuleKind::Fixed(vec![FixedHoliday {
            month,
            day,
            name: name.to_string(),
        }]),
    }
}

proptest! {
    #[test]
    fn easter_is_a_sunday_between_march_22_and_april_25(year in 1583i32..=9999) {
        let easter = compute_easter_sunday(year).unwrap();
        prop_assert_eq!(easter.weekday(), Weekday::Sun);
        prop_assert_eq!(easter.year(), year);
        let earliest = NaiveDate::from_ymd_opt(year, 3, 22).unwrap();
        let latest = NaiveDate::from_ymd_opt(year, 4, 25).unwrap();
        prop_assert!(easter >= earliest && easter <= latest, "{}", easter);
    }

    #[test]
    fn holy_week_starts_one_week_before_easter(year in 1583i32..=9999) {
        let start = holy_week_start(year).unwrap();
        prop_assert_eq!(add_days(start, 7).unwrap(), compute_easter_sunday(year).unwrap());
    }

    #[test]
    fn next_monday_is_idempotent(date in any_date()) {
        let once = next_monday_on_or_after(date).unwrap();
        prop_assert_eq!(next_monday_on_or_after(once).unwrap(), once);
    }

    #[test]
    fn next_monday_lands_on_monday_within_a_week(date in any_date()) {
        let monday = next_monday_on_or_after(date).unwrap();
        prop_assert_eq!(monday.weekday(), Weekday::Mon);
        let gap = (monday - date).num_days();
        prop_assert!((0..7).contains(&gap));
    }

    #[test]
    fn add_zero_days_is_identity(date in any_date()) {
        prop_assert_eq!(add_days(date, 0).unwrap(), date);
    }

    #[test]
    fn add_days_round_trips(date in any_date(), n in -100_000i64..100_000) {
        let there = add_days(date, n).unwrap();
        prop_assert_eq!(add_days(there, -n).unwrap(), date);
    }

    #[test]
    fn fixed_rule_matches_every_year(year in 1i32..=9999) {
        let groups = vec![fixed_group(1, 12, 25, "Navidad")];
        let christmas = NaiveDate::from_ymd_opt(year, 12, 25).unwrap();
        let result = resolve(christmas, &groups).unwrap();
        prop_assert!(result.is_holiday);
        prop_assert_eq!(result.holiday_name.as_deref(), Some("Navidad"));
    }

    #[test]
    fn earlier_group_wins(date in any_date()) {
        let groups = vec![
            fixed_group(1, date.month(), date.day(), "first"),
            fixed_group(1, date.month(), date.day(), "second"),
        ];
        let result = resolve(date, &groups).unwrap();
        prop_assert_eq!(result.holiday_name.as_deref(), Some("first"));
    }
}
