//! Reporting period for one pipeline run.
//!
//! The generation API is queried for a single month (`start == end`), and the
//! capacity-factor denominator needs the length of that month in hours. The
//! day count defaults to the calendar length of the month and may be pinned
//! explicitly for partial or non-standard reporting windows.

use crate::error::{GencfError, GencfResult};
use crate::units::Hours;
use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HOURS_PER_DAY: f64 = 24.0;

/// A monthly reporting window, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    year: i32,
    month: u32,
    days: u32,
}

impl ReportingPeriod {
    /// Build a period covering the whole calendar month.
    pub fn new(year: i32, month: u32) -> GencfResult<Self> {
        let days = days_in_month(year, month).ok_or_else(|| {
            GencfError::Config(format!("invalid reporting month {year:04}-{month:02}"))
        })?;
        Ok(Self { year, month, days })
    }

    /// Pin the number of days counted in the capacity-factor denominator.
    pub fn with_days(mut self, days: u32) -> GencfResult<Self> {
        if days == 0 {
            return Err(GencfError::Config(
                "reporting period must span at least one day".into(),
            ));
        }
        self.days = days;
        Ok(self)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Length of the window in hours (`days × 24`).
    pub fn hours(&self) -> Hours {
        Hours(self.days as f64 * HOURS_PER_DAY)
    }

    /// Value used for the API `start`/`end` query parameters.
    pub fn api_value(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Human-readable month, e.g. "February 2025".
    pub fn label(&self) -> String {
        match u8::try_from(self.month).ok().and_then(|m| Month::try_from(m).ok()) {
            Some(month) => format!("{} {}", month.name(), self.year),
            None => self.api_value(),
        }
    }
}

impl Default for ReportingPeriod {
    fn default() -> Self {
        Self {
            year: 2025,
            month: 2,
            days: 28,
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_value())
    }
}

impl FromStr for ReportingPeriod {
    type Err = GencfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| GencfError::Config(format!("expected YYYY-MM, got '{s}'")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| GencfError::Config(format!("invalid year in '{s}'")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| GencfError::Config(format!("invalid month in '{s}'")))?;
        Self::new(year, month)
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}
