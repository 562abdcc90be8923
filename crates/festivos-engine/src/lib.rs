//! # festivos-engine
//!
//! Deterministic holiday resolution.
//!
//! Given a date and an ordered set of holiday rule groups, the engine answers
//! whether the date is a holiday, under which name, and on which day it is
//! observed when the rule moves it to the following Monday. Easter-relative
//! rules are computed from a congruence, with no tables.
//!
//! ## Modules
//!
//! - [`easter`] — Holy Week start, Easter Sunday, day arithmetic, next-Monday shift
//! - [`rules`] — Stored rule-group records and their typed form
//! - [`resolver`] — First-match resolution of a date against rule groups
//! - [`store`] — Read-only rule stores (JSON file, in memory, built-in rules)
//! - [`service`] — Input validation + store snapshot + resolution
//! - [`response`] — JSON wire shapes
//! - [`error`] — Error types

pub mod easter;
pub mod error;
pub mod resolver;
pub mod response;
pub mod rules;
pub mod service;
pub mod store;

pub use easter::{
    add_days, compute_easter_sunday, holy_week, holy_week_start, next_monday_on_or_after,
    HolyWeek,
};
pub use error::FestivosError;
pub use resolver::{resolve, ResolutionResult};
pub use response::{DateCheckResponse, ErrorResponse, HolyWeekResponse, RuleGroupsResponse};
pub use rules::{
    parse_groups, EasterHoliday, FixedHoliday, Observance, RuleEntryRecord, RuleGroup,
    RuleGroupRecord, RuleKind,
};
pub use service::{parse_candidate_date, parse_year, DateCheck, HolidayService};
pub use store::{JsonFileStore, MemoryStore, RuleStore};
