use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::{json, Map, Value};
use time::Date;

use super::date::{date_from_unix_seconds, format_iso_date, iso_date, parse_date_text};
use crate::ValidationError;

/// Canonical bar field names, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BarField {
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl BarField {
    pub const ALL: [Self; 6] = [
        Self::Date,
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
        Self::Volume,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }
}

impl Display for BarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trading-day OHLCV observation.
///
/// Prices are checked for presence and finiteness only. Consistency between
/// them (high >= low and so on) is the provider's business and is passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalBar {
    #[serde(with = "iso_date")]
    date: Date,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
}

impl HistoricalBar {
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_finite("open", open)?;
        validate_finite("high", high)?;
        validate_finite("low", low)?;
        validate_finite("close", close)?;
        if let Some(volume) = volume {
            validate_finite("volume", volume)?;
            if volume < 0.0 {
                return Err(ValidationError::NegativeValue { field: "volume" });
            }
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Build a bar from loosely-typed cells keyed by canonical field.
    ///
    /// Numbers may arrive as JSON numbers or numeric strings. A null or
    /// absent volume is treated as "not reported".
    pub fn from_values(values: &BTreeMap<BarField, Value>) -> Result<Self, ValidationError> {
        let date = match values.get(&BarField::Date) {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField { field: "date" })
            }
            Some(value) => date_value(value)?,
        };

        Self::new(
            date,
            required_number(values, BarField::Open)?,
            required_number(values, BarField::High)?,
            required_number(values, BarField::Low)?,
            required_number(values, BarField::Close)?,
            optional_number(values, BarField::Volume)?,
        )
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn open(&self) -> f64 {
        self.open
    }

    pub const fn high(&self) -> f64 {
        self.high
    }

    pub const fn low(&self) -> f64 {
        self.low
    }

    pub const fn close(&self) -> f64 {
        self.close
    }

    pub const fn volume(&self) -> Option<f64> {
        self.volume
    }

    /// Plain key/value view with the date rendered as `YYYY-MM-DD`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(BarField::ALL.len());
        for field in BarField::ALL {
            map.insert(field.as_str().to_owned(), self.value_of(field));
        }
        map
    }

    /// Cell value for a canonical field.
    pub fn value_of(&self, field: BarField) -> Value {
        match field {
            BarField::Date => Value::String(format_iso_date(self.date)),
            BarField::Open => json!(self.open),
            BarField::High => json!(self.high),
            BarField::Low => json!(self.low),
            BarField::Close => json!(self.close),
            BarField::Volume => self.volume.map_or(Value::Null, |volume| json!(volume)),
        }
    }
}

fn date_value(value: &Value) -> Result<Date, ValidationError> {
    match value {
        Value::String(text) => parse_date_text(text),
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| ValidationError::InvalidDate {
                value: number.to_string(),
            })
            .and_then(date_from_unix_seconds),
        other => Err(ValidationError::InvalidDate {
            value: other.to_string(),
        }),
    }
}

fn required_number(
    values: &BTreeMap<BarField, Value>,
    field: BarField,
) -> Result<f64, ValidationError> {
    optional_number(values, field)?.ok_or(ValidationError::MissingField {
        field: field.as_str(),
    })
}

fn optional_number(
    values: &BTreeMap<BarField, Value>,
    field: BarField,
) -> Result<Option<f64>, ValidationError> {
    let name = field.as_str();
    match values.get(&field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| ValidationError::NonNumericValue {
                field: name,
                value: number.to_string(),
            }),
        Some(Value::String(text)) => text.trim().parse::<f64>().map(Some).map_err(|_| {
            ValidationError::NonNumericValue {
                field: name,
                value: text.clone(),
            }
        }),
        Some(other) => Err(ValidationError::NonNumericValue {
            field: name,
            value: other.to_string(),
        }),
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;

    fn cells(entries: &[(BarField, Value)]) -> BTreeMap<BarField, Value> {
        entries.iter().cloned().collect()
    }

    fn jan(day: u8) -> Date {
        Date::from_calendar_date(2024, Month::January, day).expect("valid date")
    }

    #[test]
    fn builds_bar_from_cells() {
        let bar = HistoricalBar::from_values(&cells(&[
            (BarField::Date, json!("2024-01-02")),
            (BarField::Open, json!(187.15)),
            (BarField::High, json!("188.44")),
            (BarField::Low, json!(183.89)),
            (BarField::Close, json!(185.64)),
            (BarField::Volume, json!(82_488_700)),
        ]))
        .expect("bar should build");

        assert_eq!(bar.date(), jan(2));
        assert_eq!(bar.high(), 188.44);
        assert_eq!(bar.volume(), Some(82_488_700.0));
    }

    #[test]
    fn volume_is_optional() {
        let bar = HistoricalBar::from_values(&cells(&[
            (BarField::Date, json!("2024-01-02")),
            (BarField::Open, json!(1.0)),
            (BarField::High, json!(1.0)),
            (BarField::Low, json!(1.0)),
            (BarField::Close, json!(1.0)),
            (BarField::Volume, Value::Null),
        ]))
        .expect("bar should build");

        assert_eq!(bar.volume(), None);
        assert_eq!(bar.to_map()["volume"], Value::Null);
    }

    #[test]
    fn missing_price_is_rejected() {
        let err = HistoricalBar::from_values(&cells(&[
            (BarField::Date, json!("2024-01-02")),
            (BarField::Open, json!(1.0)),
            (BarField::High, json!(1.0)),
            (BarField::Close, json!(1.0)),
        ]))
        .expect_err("must fail");

        assert_eq!(err, ValidationError::MissingField { field: "low" });
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let err = HistoricalBar::from_values(&cells(&[
            (BarField::Date, json!("2024-01-02")),
            (BarField::Open, json!("n/a")),
            (BarField::High, json!(1.0)),
            (BarField::Low, json!(1.0)),
            (BarField::Close, json!(1.0)),
        ]))
        .expect_err("must fail");

        assert!(matches!(err, ValidationError::NonNumericValue { field: "open", .. }));
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let err = HistoricalBar::from_values(&cells(&[
            (BarField::Date, json!("yesterday")),
            (BarField::Open, json!(1.0)),
            (BarField::High, json!(1.0)),
            (BarField::Low, json!(1.0)),
            (BarField::Close, json!(1.0)),
        ]))
        .expect_err("must fail");

        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn inconsistent_prices_pass_through() {
        // high below low and close above high
        let bar = HistoricalBar::new(jan(3), 10.0, 9.0, 11.0, 12.0, Some(5.0))
            .expect("price consistency is not enforced");
        assert_eq!(bar.low(), 11.0);
    }

    #[test]
    fn rejects_negative_volume_and_nan() {
        assert_eq!(
            HistoricalBar::new(jan(3), 1.0, 1.0, 1.0, 1.0, Some(-1.0)).expect_err("must fail"),
            ValidationError::NegativeValue { field: "volume" }
        );
        assert_eq!(
            HistoricalBar::new(jan(3), f64::NAN, 1.0, 1.0, 1.0, None).expect_err("must fail"),
            ValidationError::NonFiniteValue { field: "open" }
        );
    }

    #[test]
    fn serializes_date_as_iso_string() {
        let bar = HistoricalBar::new(jan(5), 1.5, 2.0, 1.0, 1.75, None).expect("valid");
        let value = serde_json::to_value(&bar).expect("serializes");
        assert_eq!(value["date"], "2024-01-05");
        assert_eq!(Value::Object(bar.to_map()), value);
    }
}
