//! 民國 (Republic of China) calendar dates
//!
//! The year is counted from 1912 = year 1. Dates on the form are always
//! written as `YYY/MM/DD` with zero-padded month and day.

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

/// The last Gregorian year before 民國 1
pub const EPOCH_YEAR: i32 = 1911;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    #[error("Year {0} is not after the 民國 epoch (1911)")]
    BeforeEpoch(i32),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RocDate {
    year: u32,
    month: u32,
    day: u32,
}

impl RocDate {
    /// Convert a Gregorian date. Years up to and including 1911 have no
    /// 民國 representation and are rejected.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, DateError> {
        let gregorian_year = date.year();
        if gregorian_year <= EPOCH_YEAR {
            return Err(DateError::BeforeEpoch(gregorian_year));
        }

        Ok(Self {
            year: (gregorian_year - EPOCH_YEAR) as u32,
            month: date.month(),
            day: date.day(),
        })
    }

    /// Parse the `YYYY-MM-DD` value of an HTML date input
    pub fn parse_iso(value: &str) -> Result<Self, DateError> {
        let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| DateError::Invalid(value.to_string()))?;
        Self::from_gregorian(date)
    }

    /// Today in the local timezone
    pub fn today() -> Result<Self, DateError> {
        Self::from_gregorian(Local::now().date_naive())
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// `YYYMMDD`, used in file names where `/` is not allowed
    pub fn compact(&self) -> String {
        format!("{}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl std::fmt::Display for RocDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}
