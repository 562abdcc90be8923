//! Holiday resolution: classify a date against an ordered list of rule groups.
//!
//! Groups are tried in the order given, entries in the order stored, and the
//! first match wins. Nothing is re-sorted.
//!
//! | Kind            | Matches against                                   | Observed date            |
//! |-----------------|---------------------------------------------------|--------------------------|
//! | `Fixed`         | literal month/day                                 | never                    |
//! | `FixedMovable`  | literal month/day                                 | next Monday, if moved    |
//! | `Easter`        | Holy Week start + `days_from_easter` + 7          | never                    |
//! | `EasterMovable` | next Monday on/after the `Easter` target          | never (match is shifted) |
//!
//! Stored Easter offsets count from Easter Sunday while the congruence anchors
//! on Palm Sunday, hence the extra seven days.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::easter::{add_days, holy_week_start, next_monday_on_or_after};
use crate::error::FestivosError;
use crate::rules::{EasterHoliday, FixedHoliday, Observance, RuleGroup, RuleKind};

/// Days between the Holy Week anchor and the date stored offsets count from.
const EASTER_OFFSET_BASE: i64 = 7;

/// Outcome of resolving one date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolutionResult {
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    /// Present only when the holiday is observed on a different day than the
    /// one asked about.
    pub observed_date: Option<NaiveDate>,
}

impl ResolutionResult {
    /// The "not a holiday" result.
    pub fn none() -> Self {
        Self::default()
    }

    fn holiday(name: &str, observed_date: Option<NaiveDate>) -> Self {
        Self {
            is_holiday: true,
            holiday_name: Some(name.to_string()),
            observed_date,
        }
    }
}

/// Resolve whether `date` is a holiday under `groups`.
///
/// # Errors
///
/// Returns [`FestivosError::DateOutOfRange`] if an Easter-relative target
/// cannot be represented (only possible at the edges of chrono's range).
/// "Not a holiday" is a successful [`ResolutionResult::none`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use festivos_engine::resolver::resolve;
/// use festivos_engine::rules::{FixedHoliday, RuleGroup, RuleKind};
///
/// let groups = vec![RuleGroup {
///     code: 1,
///     label: None,
///     kind: RuleKind::Fixed(vec![FixedHoliday {
///         month: 1,
///         day: 1,
///         name: "Año Nuevo".to_string(),
///     }]),
/// }];
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let result = resolve(date, &groups).unwrap();
/// assert!(result.is_holiday);
/// assert_eq!(result.holiday_name.as_deref(), Some("Año Nuevo"));
/// assert_eq!(result.observed_date, None);
/// ```
pub fn resolve(date: NaiveDate, groups: &[RuleGroup]) -> Result<ResolutionResult, FestivosError> {
    for group in groups {
        if let Some(result) = match_group(date, group)? {
            tracing::debug!(
                %date,
                code = group.code,
                name = result.holiday_name.as_deref().unwrap_or_default(),
                "holiday matched"
            );
            return Ok(result);
        }
    }

    tracing::debug!(%date, groups = groups.len(), "no holiday matched");
    Ok(ResolutionResult::none())
}

fn match_group(
    date: NaiveDate,
    group: &RuleGroup,
) -> Result<Option<ResolutionResult>, FestivosError> {
    match &group.kind {
        RuleKind::Fixed(holidays) => Ok(match_fixed(date, holidays)
            .map(|holiday| ResolutionResult::holiday(&holiday.name, None))),
        RuleKind::FixedMovable {
            observance,
            holidays,
        } => match match_fixed(date, holidays) {
            Some(holiday) => {
                let observed = observed_date(date, *observance)?;
                Ok(Some(ResolutionResult::holiday(&holiday.name, observed)))
            }
            None => Ok(None),
        },
        RuleKind::Easter(holidays) => {
            let anchor = holy_week_start(date.year())?;
            for holiday in holidays {
                if easter_target(anchor, holiday)? == date {
                    return Ok(Some(ResolutionResult::holiday(&holiday.name, None)));
                }
            }
            Ok(None)
        }
        RuleKind::EasterMovable(holidays) => {
            let anchor = holy_week_start(date.year())?;
            for holiday in holidays {
                if next_monday_on_or_after(easter_target(anchor, holiday)?)? == date {
                    return Ok(Some(ResolutionResult::holiday(&holiday.name, None)));
                }
            }
            Ok(None)
        }
        RuleKind::Unsupported => {
            tracing::debug!(code = group.code, "skipping rule group with unsupported code");
            Ok(None)
        }
    }
}

/// Fixed rules match on month/day alone, so they apply to every year.
fn match_fixed(date: NaiveDate, holidays: &[FixedHoliday]) -> Option<&FixedHoliday> {
    holidays
        .iter()
        .find(|h| h.month == date.month() && h.day == date.day())
}

/// The day a literal fixed-date holiday is observed, if it differs.
///
/// `literal` is the candidate date itself: a fixed rule only matches when the
/// month/day coincide.
fn observed_date(
    literal: NaiveDate,
    observance: Observance,
) -> Result<Option<NaiveDate>, FestivosError> {
    match observance {
        Observance::OnDate => Ok(None),
        Observance::NextMonday if literal.weekday() == Weekday::Mon => Ok(None),
        Observance::NextMonday => next_monday_on_or_after(literal).map(Some),
    }
}

fn easter_target(anchor: NaiveDate, holiday: &EasterHoliday) -> Result<NaiveDate, FestivosError> {
    let days = holiday
        .days_from_easter
        .checked_add(EASTER_OFFSET_BASE)
        .ok_or_else(|| {
            FestivosError::DateOutOfRange(format!(
                "'{}' offset {}",
                holiday.name, holiday.days_from_easter
            ))
        })?;
    add_days(anchor, days)
}
