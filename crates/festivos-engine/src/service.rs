//! Request-level operations: validate caller input, load a rule snapshot,
//! resolve.
//!
//! Input arrives as text (path segments, CLI arguments). Anything that is not
//! an integer or not a real calendar date is rejected here, before a store is
//! touched, so the resolver only ever sees valid dates.

use chrono::NaiveDate;

use crate::easter::{self, HolyWeek};
use crate::error::FestivosError;
use crate::resolver::{resolve, ResolutionResult};
use crate::rules::{parse_groups, RuleGroupRecord, CODE_EASTER};
use crate::store::RuleStore;

/// Years accepted by the Holy Week lookups.
const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// A resolved date check, keeping the caller's original text for messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCheck {
    pub year: String,
    pub month: String,
    pub day: String,
    pub date: NaiveDate,
    pub result: ResolutionResult,
}

/// Holiday lookups backed by a [`RuleStore`].
#[derive(Debug, Clone)]
pub struct HolidayService<S> {
    store: S,
    required_groups: Vec<i64>,
}

impl<S: RuleStore> HolidayService<S> {
    /// A service that requires the Easter-relative group to be present.
    pub fn new(store: S) -> Self {
        Self {
            store,
            required_groups: vec![CODE_EASTER],
        }
    }

    /// Also fail date checks with [`FestivosError::GroupNotFound`] when no group
    /// with `code` is stored.
    pub fn require_group(mut self, code: i64) -> Self {
        if !self.required_groups.contains(&code) {
            self.required_groups.push(code);
        }
        self
    }

    /// Drop every group requirement, including the default one.
    pub fn without_required_groups(mut self) -> Self {
        self.required_groups.clear();
        self
    }

    /// Check whether `year`-`month`-`day` is a holiday.
    ///
    /// Required groups are checked before any rule is matched, so a missing
    /// group fails the check even for a date an earlier group would match.
    ///
    /// # Errors
    ///
    /// - [`FestivosError::InvalidDate`] if the parts are not integers or do not
    ///   form a real date. The store is not read.
    /// - [`FestivosError::GroupNotFound`] if a required group is missing.
    /// - [`FestivosError::MalformedRule`] if a stored entry does not fit its group.
    /// - [`FestivosError::Store`] if the store cannot be read.
    pub fn check_date(
        &self,
        year: &str,
        month: &str,
        day: &str,
    ) -> Result<DateCheck, FestivosError> {
        let date = parse_candidate_date(year, month, day)?;

        let records = self.store.load_groups()?;
        for code in &self.required_groups {
            if !records.iter().any(|group| group.code() == Some(*code)) {
                tracing::warn!(code, "required rule group missing from store");
                return Err(FestivosError::GroupNotFound(*code));
            }
        }

        let groups = parse_groups(&records)?;
        let result = resolve(date, &groups)?;

        Ok(DateCheck {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
            date,
            result,
        })
    }

    /// The Sunday that opens Holy Week in `year`.
    ///
    /// # Errors
    ///
    /// Returns [`FestivosError::InvalidYear`] unless `year` is an integer in
    /// 1000–9999.
    pub fn holy_week_start(&self, year: &str) -> Result<NaiveDate, FestivosError> {
        easter::holy_week_start(parse_year(year)?)
    }

    /// All Holy Week dates in `year`.
    ///
    /// # Errors
    ///
    /// Same as [`HolidayService::holy_week_start`].
    pub fn holy_week(&self, year: &str) -> Result<HolyWeek, FestivosError> {
        easter::holy_week(parse_year(year)?)
    }

    /// The stored rule groups, unmodified.
    pub fn list_groups(&self) -> Result<Vec<RuleGroupRecord>, FestivosError> {
        self.store.load_groups()
    }
}

// ── Input validation ────────────────────────────────────────────────────────

/// Parse and validate a candidate date given as text.
///
/// The parts must be integers and must form a real calendar date: the date
/// built from them has to report the same year, month and day back.
///
/// # Errors
///
/// Returns [`FestivosError::InvalidDate`] otherwise.
///
/// # Examples
///
/// ```
/// use festivos_engine::service::parse_candidate_date;
///
/// assert!(parse_candidate_date("2025", "1", "1").is_ok());
/// assert!(parse_candidate_date("2025", "2", "30").is_err());
/// assert!(parse_candidate_date("2025", "abc", "1").is_err());
/// ```
pub fn parse_candidate_date(
    year: &str,
    month: &str,
    day: &str,
) -> Result<NaiveDate, FestivosError> {
    let invalid = || FestivosError::InvalidDate(format!("{year}-{month}-{day}"));

    let y: i32 = year.parse().map_err(|_| invalid())?;
    let m: u32 = month.parse().map_err(|_| invalid())?;
    let d: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
}

/// Parse a four-digit year.
///
/// # Errors
///
/// Returns [`FestivosError::InvalidYear`] unless `year` is an integer in 1000–9999.
pub fn parse_year(year: &str) -> Result<i32, FestivosError> {
    year.parse::<i32>()
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or_else(|| FestivosError::InvalidYear(format!("'{year}'")))
}
