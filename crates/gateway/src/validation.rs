//! Input checks shared by the REST procedures.
//!
//! A [`Validator`] collects every problem in a payload and reports them
//! together as one `400 Bad Request`.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GatewayError, GatewayResult};

pub const NAME_MAX: usize = 200;
pub const TEXT_MAX: usize = 5000;
pub const SHORT_MAX: usize = 50;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blank and at most `max` characters.
    pub fn required(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{field} is required"));
        } else {
            self.max_len(field, value, max);
        }
        self
    }

    /// Like [`required`](Self::required) but only when the value is present.
    pub fn optional(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value {
            self.required(field, value, max);
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors.push(format!("{field} must be at most {max} characters"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            if !is_valid_email(value) {
                self.errors.push(format!("{field} must be a valid email address"));
            }
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value < 0.0 {
            self.errors.push(format!("{field} must not be negative"));
        }
        self
    }

    pub fn non_negative_opt(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        if let Some(value) = value {
            self.non_negative(field, value);
        }
        self
    }

    pub fn count(&mut self, field: &str, value: Option<i64>) -> &mut Self {
        if matches!(value, Some(v) if v < 0) {
            self.errors.push(format!("{field} must not be negative"));
        }
        self
    }

    pub fn date(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            if parse_date(value).is_none() {
                self.errors.push(format!("{field} must be a date (YYYY-MM-DD)"));
            }
        }
        self
    }

    /// Both dates must parse and `end` must not precede `start`.
    pub fn date_range(
        &mut self,
        start_field: &str,
        start: Option<&str>,
        end_field: &str,
        end: Option<&str>,
    ) -> &mut Self {
        self.date(start_field, start).date(end_field, end);
        if let (Some(start), Some(end)) = (start.and_then(parse_date), end.and_then(parse_date)) {
            if end < start {
                self.errors.push(format!("{end_field} must not be before {start_field}"));
            }
        }
        self
    }

    pub fn finish(&mut self) -> GatewayResult<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(GatewayError::InvalidRequest(self.errors.join("; ")))
    }
}
