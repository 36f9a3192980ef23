use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// The coarse category of health metric a query is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Step count.
    Steps,
    /// Heart rate in beats per minute.
    HeartRate,
    /// Sleep sessions.
    Sleep,
    /// Active energy burned, in kilocalories.
    ActiveEnergy,
    /// Nothing recognisable; answered with help text.
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Steps => "steps",
            Intent::HeartRate => "heart_rate",
            Intent::Sleep => "sleep",
            Intent::ActiveEnergy => "active_energy",
            Intent::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// First day of the calendar week.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO-8601 weeks.
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// Number of days between `weekday` and the start of its week.
    pub fn days_since_start(&self, weekday: chrono::Weekday) -> i64 {
        match self {
            WeekStart::Monday => weekday.num_days_from_monday() as i64,
            WeekStart::Sunday => weekday.num_days_from_sunday() as i64,
        }
    }
}

impl FromStr for WeekStart {
    type Err = crate::error::VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(crate::error::VitalsError::Config(format!(
                "unknown week start: {other}"
            ))),
        }
    }
}

/// Kind of a recorded sleep stage interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepStageKind {
    #[serde(rename = "asleep")]
    Asleep,
    #[serde(rename = "inBed")]
    InBed,
    #[serde(rename = "awake")]
    Awake,
    #[serde(rename = "asleepCore")]
    AsleepCore,
    #[serde(rename = "asleepDeep")]
    AsleepDeep,
    #[serde(rename = "asleepREM")]
    AsleepRem,
    #[serde(rename = "unknown", other)]
    Unknown,
}

// =============================================================================
// DateRange
// =============================================================================

/// Half-open interval `[start, end)` used to scope a data query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `instant` falls inside the range. The end is exclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

// =============================================================================
// Metric records
// =============================================================================

/// A single heart rate reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// Beats per minute.
    pub value: f64,
    pub at: DateTime<Utc>,
}

/// Heart rate readings over a range, with their mean.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateData {
    /// Mean of `samples`; `None` iff `samples` is empty.
    pub average: Option<f64>,
    pub samples: Vec<HeartRateSample>,
}

impl HeartRateData {
    /// Build from raw readings, computing the average.
    pub fn from_samples(samples: Vec<HeartRateSample>) -> Self {
        let average = if samples.is_empty() {
            None
        } else {
            Some(samples.iter().map(|s| s.value).sum::<f64>() / samples.len() as f64)
        };
        Self { average, samples }
    }
}

/// One typed interval inside a sleep session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepStage {
    pub kind: SleepStageKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A contiguous run of sleep stages with no gap exceeding one hour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SleepSession {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Duration,
    pub stages: Vec<SleepStage>,
}

impl SleepSession {
    /// Open a session from its first stage.
    pub fn from_stage(stage: SleepStage) -> Self {
        Self {
            start: stage.start,
            end: stage.end,
            duration: stage.end - stage.start,
            stages: vec![stage],
        }
    }

    /// Append a stage, extending the session end if the stage ends later.
    pub fn absorb(&mut self, stage: SleepStage) {
        if stage.end > self.end {
            self.end = stage.end;
        }
        self.duration = self.end - self.start;
        self.stages.push(stage);
    }
}

/// The value(s) fetched from the health store for one intent.
#[derive(Clone, Debug, PartialEq)]
pub enum MetricResult {
    Steps(u64),
    HeartRate(HeartRateData),
    Sleep(Vec<SleepSession>),
    /// Kilocalories summed over the range.
    ActiveEnergy(f64),
}

impl MetricResult {
    /// The intent this result answers.
    pub fn intent(&self) -> Intent {
        match self {
            MetricResult::Steps(_) => Intent::Steps,
            MetricResult::HeartRate(_) => Intent::HeartRate,
            MetricResult::Sleep(_) => Intent::Sleep,
            MetricResult::ActiveEnergy(_) => Intent::ActiveEnergy,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
