//! Query-string validation for the historical price endpoint.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

static DATE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(DATE_PATTERN).ok());

fn is_iso_date_shaped(value: &str) -> bool {
    DATE_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Raw query parameters as received.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct HistoricalQuery {
    pub symbol: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query parameters after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalParams {
    /// Trimmed and upper-cased.
    pub symbol: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// One rejected query parameter, shaped like a FastAPI validation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<&'static str>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    /// The query string as a whole could not be read, e.g. a parameter
    /// given more than once.
    pub fn unreadable_query(msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["query"],
            msg: msg.into(),
            kind: "query_parse",
        }
    }

    fn missing(field: &'static str) -> Self {
        Self {
            loc: vec!["query", field],
            msg: String::from("Field required"),
            kind: "missing",
        }
    }

    fn too_short(field: &'static str) -> Self {
        Self {
            loc: vec!["query", field],
            msg: String::from("String should have at least 1 character"),
            kind: "string_too_short",
        }
    }

    fn pattern_mismatch(field: &'static str) -> Self {
        Self {
            loc: vec!["query", field],
            msg: format!("String should match pattern '{DATE_PATTERN}'"),
            kind: "string_pattern_mismatch",
        }
    }
}

impl HistoricalQuery {
    /// Check every parameter and report all failures at once.
    pub fn validate(self) -> Result<HistoricalParams, Vec<FieldError>> {
        let mut errors = Vec::new();

        let symbol = match self.symbol.as_deref().map(str::trim) {
            None => {
                errors.push(FieldError::missing("symbol"));
                String::new()
            }
            Some("") => {
                errors.push(FieldError::too_short("symbol"));
                String::new()
            }
            Some(symbol) => symbol.to_uppercase(),
        };

        for (field, value) in [("start_date", &self.start_date), ("end_date", &self.end_date)] {
            if let Some(value) = value {
                if !is_iso_date_shaped(value) {
                    errors.push(FieldError::pattern_mismatch(field));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(HistoricalParams {
            symbol,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}
