use std::fmt::{Display, Formatter};

use time::{Date, Duration, OffsetDateTime};

use super::date::{format_iso_date, parse_iso_date};
use crate::ValidationError;

/// Look-back applied when no start date is supplied.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;

/// Closed calendar-date range `[start, end]` for a historical query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Resolve optional ISO date strings against the current UTC date.
    pub fn resolve(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        Self::resolve_at(start, end, OffsetDateTime::now_utc().date())
    }

    /// Resolve optional ISO date strings against an explicit `today`.
    ///
    /// Missing `end` becomes `today`; missing `start` becomes
    /// `today - 365 days`, independent of any supplied `end`.
    pub fn resolve_at(
        start: Option<&str>,
        end: Option<&str>,
        today: Date,
    ) -> Result<Self, ValidationError> {
        let end = end.map(parse_iso_date).transpose()?.unwrap_or(today);
        let start = match start.map(parse_iso_date).transpose()? {
            Some(start) => start,
            None => today
                .checked_sub(Duration::days(DEFAULT_LOOKBACK_DAYS))
                .unwrap_or(Date::MIN),
        };

        Ok(Self { start, end })
    }

    /// True when `start` falls after `end`, so no date can match.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn start_iso(&self) -> String {
        format_iso_date(self.start)
    }

    pub fn end_iso(&self) -> String {
        format_iso_date(self.end)
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start_iso(), self.end_iso())
    }
}
