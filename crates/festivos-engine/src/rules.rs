//! Holiday rule groups: the raw shape kept in the rule store and the typed
//! form the resolver works on.
//!
//! Raw records mirror the stored documents (`id`, `tipo`, `modoCalculo`,
//! `festivos`) and keep every other key, so a listing returns what was stored.
//! Only the group envelope is decoded up front; entries stay as JSON values
//! until [`RuleGroup::try_from`] turns a group with a known code into a closed
//! [`RuleKind`], checking that every entry carries exactly the fields its
//! group needs. Groups of any other kind pass through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FestivosError;

/// `modoCalculo` value of groups whose holidays move to the following Monday.
pub const MOVE_TO_NEXT_MONDAY: &str = "Se traslada la fecha al siguiente lunes";

/// Group code: fixed calendar date.
pub const CODE_FIXED: i64 = 1;
/// Group code: fixed calendar date, observed on the following Monday.
pub const CODE_FIXED_MOVABLE: i64 = 2;
/// Group code: offset from Easter Sunday.
pub const CODE_EASTER: i64 = 3;
/// Group code: offset from Easter Sunday, observed on the following Monday.
pub const CODE_EASTER_MOVABLE: i64 = 4;

// ── Raw records ─────────────────────────────────────────────────────────────

/// A rule group as stored.
///
/// No field is required to have a particular type here. Accessors such as
/// [`RuleGroupRecord::code`] return `None` when the stored value does not fit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleGroupRecord {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(rename = "tipo", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
    #[serde(
        rename = "modoCalculo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub calculation_mode: Option<Value>,
    #[serde(rename = "festivos", default, skip_serializing_if = "Value::is_null")]
    pub entries: Value,
    /// Keys this crate does not interpret (e.g. the store's `_id`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RuleGroupRecord {
    /// The group code, when `id` is an integer.
    pub fn code(&self) -> Option<i64> {
        self.id.as_i64()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_ref().and_then(Value::as_str)
    }

    pub fn calculation_mode(&self) -> Option<&str> {
        self.calculation_mode.as_ref().and_then(Value::as_str)
    }

    /// Stored entries. A missing `festivos` key reads as no entries.
    ///
    /// # Errors
    ///
    /// Returns [`FestivosError::MalformedRule`] if `festivos` is not an array.
    pub fn entry_values(&self) -> Result<&[Value], FestivosError> {
        match &self.entries {
            Value::Null => Ok(&[]),
            Value::Array(values) => Ok(values),
            other => Err(FestivosError::MalformedRule(format!(
                "group {}: 'festivos' must be an array, found {other}",
                self.id
            ))),
        }
    }
}

/// A single holiday entry of a fixed-date or Easter-relative group. Which
/// fields are present depends on the owning group's code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntryRecord {
    #[serde(rename = "dia", default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(rename = "mes", default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(
        rename = "diasPascua",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub days_from_easter: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl RuleEntryRecord {
    /// Decode one stored entry of group `code`.
    ///
    /// # Errors
    ///
    /// Returns [`FestivosError::MalformedRule`] if the entry has no `nombre`
    /// or a field of the wrong type.
    pub fn from_value(code: i64, value: &Value) -> Result<Self, FestivosError> {
        Self::deserialize(value)
            .map_err(|e| FestivosError::MalformedRule(format!("group {code}: {e} in {value}")))
    }
}

// ── Typed rules ─────────────────────────────────────────────────────────────

/// A holiday on a fixed month/day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHoliday {
    pub month: u32,
    pub day: u32,
    pub name: String,
}

/// A holiday a fixed number of days from Easter Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EasterHoliday {
    pub days_from_easter: i64,
    pub name: String,
}

/// How matched occurrences of a fixed-date group are observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Observance {
    /// Observed on the literal date.
    #[default]
    OnDate,
    /// Observed on the literal date if it is a Monday, else the next Monday.
    NextMonday,
}

impl Observance {
    /// Interpret a stored `modoCalculo` value.
    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode {
            Some(m) if m.trim() == MOVE_TO_NEXT_MONDAY => Observance::NextMonday,
            _ => Observance::OnDate,
        }
    }
}

/// The four rule strategies, each carrying only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Code 1.
    Fixed(Vec<FixedHoliday>),
    /// Code 2. Matches the literal date; reports the shifted observed date.
    FixedMovable {
        observance: Observance,
        holidays: Vec<FixedHoliday>,
    },
    /// Code 3.
    Easter(Vec<EasterHoliday>),
    /// Code 4. Matches only the date already moved to Monday.
    EasterMovable(Vec<EasterHoliday>),
    /// Any other code. Never matches.
    Unsupported,
}

/// A validated rule group, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup {
    pub code: i64,
    pub label: Option<String>,
    pub kind: RuleKind,
}

impl TryFrom<&RuleGroupRecord> for RuleGroup {
    type Error = FestivosError;

    fn try_from(record: &RuleGroupRecord) -> Result<Self, Self::Error> {
        let code = record.code().ok_or_else(|| {
            FestivosError::MalformedRule(format!("group id {} is not an integer", record.id))
        })?;
        let kind = match code {
            CODE_FIXED => RuleKind::Fixed(fixed_holidays(code, record)?),
            CODE_FIXED_MOVABLE => RuleKind::FixedMovable {
                observance: Observance::from_mode(record.calculation_mode()),
                holidays: fixed_holidays(code, record)?,
            },
            CODE_EASTER => RuleKind::Easter(easter_holidays(code, record)?),
            CODE_EASTER_MOVABLE => RuleKind::EasterMovable(easter_holidays(code, record)?),
            _ => RuleKind::Unsupported,
        };

        Ok(RuleGroup {
            code,
            label: record.label().map(str::to_string),
            kind,
        })
    }
}

impl TryFrom<RuleGroupRecord> for RuleGroup {
    type Error = FestivosError;

    fn try_from(record: RuleGroupRecord) -> Result<Self, Self::Error> {
        RuleGroup::try_from(&record)
    }
}

/// Build typed groups from a store snapshot, preserving order.
///
/// Records whose `id` is not an integer cannot name one of the known kinds
/// and are left out.
///
/// # Errors
///
/// Returns [`FestivosError::MalformedRule`] for the first entry that does not
/// fit its group.
pub fn parse_groups(records: &[RuleGroupRecord]) -> Result<Vec<RuleGroup>, FestivosError> {
    records
        .iter()
        .filter(|record| {
            let keep = record.code().is_some();
            if !keep {
                tracing::debug!(id = %record.id, "skipping rule group without an integer id");
            }
            keep
        })
        .map(RuleGroup::try_from)
        .collect()
}

// ── Entry validation ────────────────────────────────────────────────────────

fn fixed_holidays(
    code: i64,
    record: &RuleGroupRecord,
) -> Result<Vec<FixedHoliday>, FestivosError> {
    record
        .entry_values()?
        .iter()
        .map(|value| fixed_holiday(code, &RuleEntryRecord::from_value(code, value)?))
        .collect()
}

fn fixed_holiday(code: i64, entry: &RuleEntryRecord) -> Result<FixedHoliday, FestivosError> {
    let (day, month) = match (entry.day, entry.month) {
        (Some(day), Some(month)) => (day, month),
        _ => {
            return Err(FestivosError::MalformedRule(format!(
                "group {code}: '{}' needs both 'dia' and 'mes'",
                entry.name
            )));
        }
    };

    if entry.days_from_easter.is_some() {
        return Err(FestivosError::MalformedRule(format!(
            "group {code}: '{}' is a fixed date but has 'diasPascua'",
            entry.name
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(FestivosError::MalformedRule(format!(
            "group {code}: '{}' has month {month}",
            entry.name
        )));
    }
    if !(1..=31).contains(&day) {
        return Err(FestivosError::MalformedRule(format!(
            "group {code}: '{}' has day {day}",
            entry.name
        )));
    }

    Ok(FixedHoliday {
        month: month as u32,
        day: day as u32,
        name: entry.name.clone(),
    })
}

fn easter_holidays(
    code: i64,
    record: &RuleGroupRecord,
) -> Result<Vec<EasterHoliday>, FestivosError> {
    record
        .entry_values()?
        .iter()
        .map(|value| easter_holiday(code, &RuleEntryRecord::from_value(code, value)?))
        .collect()
}

fn easter_holiday(code: i64, entry: &RuleEntryRecord) -> Result<EasterHoliday, FestivosError> {
    let days_from_easter = entry.days_from_easter.ok_or_else(|| {
        FestivosError::MalformedRule(format!(
            "group {code}: '{}' needs 'diasPascua'",
            entry.name
        ))
    })?;

    if entry.day.is_some() || entry.month.is_some() {
        return Err(FestivosError::MalformedRule(format!(
            "group {code}: '{}' is Easter-relative but has 'dia'/'mes'",
            entry.name
        )));
    }

    Ok(EasterHoliday {
        days_from_easter,
        name: entry.name.clone(),
    })
}
