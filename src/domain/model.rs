use crate::core::date_math;
use crate::utils::error::{EstimatorError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day with no time-of-day and no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| EstimatorError::InvalidFormat {
                input: format!("{:04}-{:02}-{:02}", year, month, day),
                reason: "no such calendar day".to_string(),
            })
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        date_math::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = EstimatorError;

    fn try_from(value: String) -> Result<Self> {
        date_math::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

/// Embryo age at transfer; decides how far the due date sits from the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferProtocol {
    #[default]
    Day3,
    Day5,
}

impl TransferProtocol {
    pub fn due_offset_days(self) -> i64 {
        match self {
            Self::Day3 => 263,
            Self::Day5 => 261,
        }
    }

    /// 與原表單一致: 只有 "5" 代表第五天胚胎，其餘皆視為第三天
    pub fn from_selector(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "5" | "day5" => Self::Day5,
            _ => Self::Day3,
        }
    }
}

impl fmt::Display for TransferProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day3 => write!(f, "day3"),
            Self::Day5 => write!(f, "day5"),
        }
    }
}

/// Gestational age measured at an ultrasound scan.
///
/// Deserialization goes through the same range check as [`UltrasoundMeasurement::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUltrasound")]
pub struct UltrasoundMeasurement {
    pub scan_date: CalendarDate,
    pub weeks: u32,
    pub days: u32,
}

#[derive(Deserialize)]
struct RawUltrasound {
    scan_date: CalendarDate,
    weeks: u32,
    days: u32,
}

impl TryFrom<RawUltrasound> for UltrasoundMeasurement {
    type Error = EstimatorError;

    fn try_from(raw: RawUltrasound) -> Result<Self> {
        Self::new(raw.scan_date, raw.weeks, raw.days)
    }
}

impl UltrasoundMeasurement {
    pub fn new(scan_date: CalendarDate, weeks: u32, days: u32) -> Result<Self> {
        let measurement = Self {
            scan_date,
            weeks,
            days,
        };
        measurement.validate()?;
        Ok(measurement)
    }

    /// 欄位是公開的，使用前要再檢查一次
    pub fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_range("ultrasound.days", self.days, 0, 6)
    }

    pub fn ga_days(&self) -> i64 {
        i64::from(self.weeks) * 7 + i64::from(self.days)
    }

    pub fn ga_weeks_fraction(&self) -> f64 {
        f64::from(self.weeks) + f64::from(self.days) / 7.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EstimationInput {
    Ivf {
        transfer_date: Option<CalendarDate>,
        protocol: TransferProtocol,
    },
    Natural {
        lmp: Option<CalendarDate>,
        ultrasound: Option<UltrasoundMeasurement>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub due_date: CalendarDate,
    /// LMP, or the date standing in for it (transfer date, ultrasound-derived LMP).
    pub reference_start_date: CalendarDate,
    pub redated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trimester {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
}

impl Trimester {
    pub fn from_weeks(weeks: u32) -> Self {
        match weeks {
            0..=12 => Self::First,
            13..=27 => Self::Second,
            _ => Self::Third,
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestationalAge {
    pub weeks: u32,
    pub days: u32,
    pub trimester: Trimester,
}

/// What the caller renders: the estimate plus the age as of "today", if meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub result: EstimationResult,
    pub gestational_age: Option<GestationalAge>,
}
