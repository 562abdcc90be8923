//! JSON wire shapes returned to callers.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FestivosError;
use crate::rules::RuleGroupRecord;
use crate::service::DateCheck;

/// Answer to "is this date a holiday?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCheckResponse {
    #[serde(rename = "Mensaje")]
    pub message: String,
    /// `YYYY-MM-DD`, only when the holiday is observed on another day.
    #[serde(rename = "NuevaFecha", skip_serializing_if = "Option::is_none")]
    pub observed_date: Option<String>,
}

impl From<&DateCheck> for DateCheckResponse {
    fn from(check: &DateCheck) -> Self {
        let (year, month, day) = (&check.year, &check.month, &check.day);
        match &check.result.holiday_name {
            Some(name) => DateCheckResponse {
                message: format!(
                    "¡La fecha {year}-{month}-{day} corresponde a un día festivo ({name})!"
                ),
                observed_date: check.result.observed_date.map(format_date),
            },
            None => DateCheckResponse {
                message: format!("La fecha {year}-{month}-{day} no corresponde a un día festivo."),
                observed_date: None,
            },
        }
    }
}

/// Start of Holy Week for a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolyWeekResponse {
    #[serde(rename = "inicioSemanaSanta")]
    pub start: String,
}

impl From<NaiveDate> for HolyWeekResponse {
    fn from(start: NaiveDate) -> Self {
        HolyWeekResponse {
            start: format_date(start),
        }
    }
}

/// The stored rule groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleGroupsResponse {
    #[serde(rename = "tiposFestivos")]
    pub groups: Vec<RuleGroupRecord>,
}

/// Error body. `message` carries detail for internal failures only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&FestivosError> for ErrorResponse {
    fn from(err: &FestivosError) -> Self {
        match err {
            FestivosError::InvalidDate(_) => ErrorResponse {
                error: "Fecha no válida".to_string(),
                message: None,
            },
            FestivosError::InvalidYear(_) => ErrorResponse {
                error: "Año no válido".to_string(),
                message: None,
            },
            FestivosError::GroupNotFound(code) => ErrorResponse {
                error: format!("No se encontraron festivos de tipo {code} en la base de datos"),
                message: None,
            },
            _ => ErrorResponse {
                error: "Error interno del servidor".to_string(),
                message: Some(err.to_string()),
            },
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
