//! Read-only access to holiday rule groups.
//!
//! The resolver never talks to a store itself. Callers load a snapshot through
//! a [`RuleStore`] and pass the groups in as a plain slice.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FestivosError;
use crate::rules::RuleGroupRecord;

/// The rule set shipped with the crate.
const BUILTIN_RULES: &str = include_str!("../data/festivos.json");

/// Source of rule-group records.
pub trait RuleStore: Send + Sync {
    /// Every stored group, in store order.
    fn load_groups(&self) -> Result<Vec<RuleGroupRecord>, FestivosError>;

    /// The first group with the given code, if any.
    fn find_group(&self, code: i64) -> Result<Option<RuleGroupRecord>, FestivosError> {
        Ok(self
            .load_groups()?
            .into_iter()
            .find(|group| group.code() == Some(code)))
    }
}

impl<T: RuleStore + ?Sized> RuleStore for Box<T> {
    fn load_groups(&self) -> Result<Vec<RuleGroupRecord>, FestivosError> {
        (**self).load_groups()
    }

    fn find_group(&self, code: i64) -> Result<Option<RuleGroupRecord>, FestivosError> {
        (**self).find_group(code)
    }
}

/// Decode a JSON array of rule-group documents.
///
/// # Errors
///
/// Returns [`FestivosError::Store`] if `json` is not an array of rule groups.
pub fn parse_records(json: &str) -> Result<Vec<RuleGroupRecord>, FestivosError> {
    serde_json::from_str(json)
        .map_err(|e| FestivosError::Store(format!("invalid rule document: {e}")))
}

// ── JSON file ───────────────────────────────────────────────────────────────

/// Rule groups read from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuleStore for JsonFileStore {
    fn load_groups(&self) -> Result<Vec<RuleGroupRecord>, FestivosError> {
        let json = fs::read_to_string(&self.path).map_err(|e| {
            FestivosError::Store(format!("cannot read '{}': {e}", self.path.display()))
        })?;
        let records = parse_records(&json)?;
        tracing::debug!(path = %self.path.display(), groups = records.len(), "loaded rule groups");
        Ok(records)
    }
}

// ── In memory ───────────────────────────────────────────────────────────────

/// Rule groups held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<RuleGroupRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<RuleGroupRecord>) -> Self {
        Self { records }
    }

    /// The bundled Colombian holiday rules.
    ///
    /// # Errors
    ///
    /// Returns [`FestivosError::Store`] if the bundled document does not decode.
    pub fn builtin() -> Result<Self, FestivosError> {
        parse_records(BUILTIN_RULES).map(Self::new)
    }
}

impl RuleStore for MemoryStore {
    fn load_groups(&self) -> Result<Vec<RuleGroupRecord>, FestivosError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_groups;
    use std::io::Write;

    #[test]
    fn test_builtin_rules_decode_and_validate() {
        let store = MemoryStore::builtin().unwrap();
        let records = store.load_groups().unwrap();
        let codes: Vec<Option<i64>> = records.iter().map(RuleGroupRecord::code).collect();
        assert_eq!(codes, vec![Some(1), Some(2), Some(3), Some(4)]);
        parse_groups(&records).unwrap();
    }

    #[test]
    fn test_find_group() {
        let store = MemoryStore::builtin().unwrap();
        let easter = store.find_group(3).unwrap().unwrap();
        assert_eq!(easter.entry_values().unwrap().len(), 3);
        assert!(store.find_group(5).unwrap().is_none());
    }

    #[test]
    fn test_json_file_store_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "festivos": [{{"dia": 25, "mes": 12, "nombre": "Navidad"}}]}}]"#
        )
        .unwrap();

        let store = JsonFileStore::new(file.path());
        assert_eq!(store.path(), file.path());
        let records = store.load_groups().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entries[0]["nombre"], "Navidad");
    }

    #[test]
    fn test_unknown_group_kinds_decode_and_resolve() {
        let records = parse_records(
            r#"[
                {"id": 1, "festivos": [{"dia": 1, "mes": 1, "nombre": "Año Nuevo"}]},
                {"id": 3, "festivos": [{"diasPascua": -3, "nombre": "Jueves Santo"}]},
                {"id": 5, "festivos": [{"semana": 3, "diaSemana": 1, "mes": 1, "titulo": "X"}]},
                {"id": "extra", "festivos": "por definir"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 4);

        let groups = parse_groups(&records).unwrap();
        let codes: Vec<i64> = groups.iter().map(|g| g.code).collect();
        assert_eq!(codes, vec![1, 3, 5]);

        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let result = crate::resolver::resolve(date, &groups).unwrap();
        assert_eq!(result.holiday_name.as_deref(), Some("Año Nuevo"));
    }

    #[test]
    fn test_json_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        let err = store.load_groups().unwrap_err();
        assert!(matches!(err, FestivosError::Store(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        assert!(matches!(
            parse_records(r#"{"id": 1}"#),
            Err(FestivosError::Store(_))
        ));
    }
}
