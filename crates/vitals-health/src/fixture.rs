//! Health store backed by a JSON file of recorded samples.
//!
//! Used by the CLI and by integration-style tests in place of a platform
//! health database. Sample selection is strict-start: a sample belongs to a
//! range when its start instant lies inside it.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitals_core::types::{DateRange, HeartRateData, HeartRateSample, SleepSession, SleepStage};

use crate::error::HealthStoreError;
use crate::sleep::group_sleep_sessions;
use crate::HealthStore;

/// A step count recorded over an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSample {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub count: u64,
}

/// Active energy burned over an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kcal: f64,
}

/// On-disk document of raw samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthFixture {
    /// When false, every query fails with an authorization error.
    #[serde(default = "default_authorized")]
    pub authorized: bool,
    #[serde(default)]
    pub steps: Vec<StepSample>,
    #[serde(default)]
    pub heart_rate: Vec<HeartRateSample>,
    #[serde(default)]
    pub sleep: Vec<SleepStage>,
    #[serde(default)]
    pub active_energy: Vec<EnergySample>,
}

fn default_authorized() -> bool {
    true
}

impl Default for HealthFixture {
    fn default() -> Self {
        Self {
            authorized: true,
            steps: Vec::new(),
            heart_rate: Vec::new(),
            sleep: Vec::new(),
            active_energy: Vec::new(),
        }
    }
}

/// [`HealthStore`] answering queries from a [`HealthFixture`].
#[derive(Debug, Clone)]
pub struct FixtureHealthStore {
    fixture: HealthFixture,
}

impl FixtureHealthStore {
    pub fn new(fixture: HealthFixture) -> Self {
        Self { fixture }
    }

    /// Read and parse a fixture file.
    pub fn load(path: &Path) -> Result<Self, HealthStoreError> {
        let content = std::fs::read_to_string(path)?;
        let fixture: HealthFixture = serde_json::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            steps = fixture.steps.len(),
            heart_rate = fixture.heart_rate.len(),
            sleep = fixture.sleep.len(),
            active_energy = fixture.active_energy.len(),
            "Health fixture loaded"
        );
        Ok(Self::new(fixture))
    }

    fn check_authorized(&self, what: &str) -> Result<(), HealthStoreError> {
        if self.fixture.authorized {
            Ok(())
        } else {
            Err(HealthStoreError::Authorization(format!(
                "read access to {} was not granted",
                what
            )))
        }
    }
}

#[async_trait]
impl HealthStore for FixtureHealthStore {
    async fn steps(&self, range: &DateRange) -> Result<u64, HealthStoreError> {
        self.check_authorized("step count")?;
        Ok(self
            .fixture
            .steps
            .iter()
            .filter(|s| range.contains(s.start))
            .map(|s| s.count)
            .sum())
    }

    async fn heart_rate(&self, range: &DateRange) -> Result<HeartRateData, HealthStoreError> {
        self.check_authorized("heart rate")?;
        let samples: Vec<HeartRateSample> = self
            .fixture
            .heart_rate
            .iter()
            .filter(|s| range.contains(s.at))
            .cloned()
            .collect();
        Ok(HeartRateData::from_samples(samples))
    }

    async fn sleep(&self, range: &DateRange) -> Result<Vec<SleepSession>, HealthStoreError> {
        self.check_authorized("sleep analysis")?;
        let stages: Vec<SleepStage> = self
            .fixture
            .sleep
            .iter()
            .filter(|s| range.contains(s.start))
            .cloned()
            .collect();
        Ok(group_sleep_sessions(stages))
    }

    async fn active_energy(&self, range: &DateRange) -> Result<f64, HealthStoreError> {
        self.check_authorized("active energy")?;
        Ok(self
            .fixture
            .active_energy
            .iter()
            .filter(|s| range.contains(s.start))
            .map(|s| s.kcal)
            .sum())
    }
}
