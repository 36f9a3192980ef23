//! Vitals health crate - the health data store collaborator.
//!
//! Provides the HealthStore trait the assistant fetches metrics through, a
//! MockHealthStore spy for tests, a FixtureHealthStore that answers from a
//! JSON file of recorded samples, and the grouping of raw sleep stages into
//! sessions.

pub mod error;
pub mod fixture;
pub mod sleep;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use vitals_core::types::{DateRange, HeartRateData, Intent, MetricResult, SleepSession};

pub use error::HealthStoreError;
pub use fixture::{EnergySample, FixtureHealthStore, HealthFixture, StepSample};
pub use sleep::{group_sleep_sessions, SESSION_GAP_SECS};

/// Source of health metrics over a date range.
///
/// Implementations wrap a platform health database. The trait is object
/// safe so the assistant can hold any store behind `Arc<dyn HealthStore>`.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Total step count.
    async fn steps(&self, range: &DateRange) -> Result<u64, HealthStoreError>;

    /// Heart rate readings and their average.
    async fn heart_rate(&self, range: &DateRange) -> Result<HeartRateData, HealthStoreError>;

    /// Sleep sessions in chronological order.
    async fn sleep(&self, range: &DateRange) -> Result<Vec<SleepSession>, HealthStoreError>;

    /// Cumulative active energy in kilocalories.
    async fn active_energy(&self, range: &DateRange) -> Result<f64, HealthStoreError>;

    /// Fetch the metric matching `intent`.
    ///
    /// `Intent::Unknown` has no metric and fails with
    /// [`HealthStoreError::Unknown`].
    async fn fetch(
        &self,
        intent: Intent,
        range: &DateRange,
    ) -> Result<MetricResult, HealthStoreError> {
        match intent {
            Intent::Steps => self.steps(range).await.map(MetricResult::Steps),
            Intent::HeartRate => self.heart_rate(range).await.map(MetricResult::HeartRate),
            Intent::Sleep => self.sleep(range).await.map(MetricResult::Sleep),
            Intent::ActiveEnergy => self
                .active_energy(range)
                .await
                .map(MetricResult::ActiveEnergy),
            Intent::Unknown => Err(HealthStoreError::Unknown(
                "no metric for an unknown intent".to_string(),
            )),
        }
    }
}

/// Mock health store for testing.
///
/// Returns fixed values, or a fixed error from every call, and counts the
/// calls it receives.
#[derive(Debug, Default)]
pub struct MockHealthStore {
    steps: u64,
    heart_rate: HeartRateData,
    sleep: Vec<SleepSession>,
    active_energy: f64,
    failure: Option<HealthStoreError>,
    calls: AtomicUsize,
}

impl MockHealthStore {
    /// Create a mock with zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_heart_rate(mut self, data: HeartRateData) -> Self {
        self.heart_rate = data;
        self
    }

    pub fn with_sleep(mut self, sessions: Vec<SleepSession>) -> Self {
        self.sleep = sessions;
        self
    }

    pub fn with_active_energy(mut self, kcal: f64) -> Self {
        self.active_energy = kcal;
        self
    }

    /// Make every call fail with `err`.
    pub fn failing_with(mut self, err: HealthStoreError) -> Self {
        self.failure = Some(err);
        self
    }

    /// Number of store calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record<T>(&self, value: T) -> Result<T, HealthStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl HealthStore for MockHealthStore {
    async fn steps(&self, _range: &DateRange) -> Result<u64, HealthStoreError> {
        self.record(self.steps)
    }

    async fn heart_rate(&self, _range: &DateRange) -> Result<HeartRateData, HealthStoreError> {
        self.record(self.heart_rate.clone())
    }

    async fn sleep(&self, _range: &DateRange) -> Result<Vec<SleepSession>, HealthStoreError> {
        self.record(self.sleep.clone())
    }

    async fn active_energy(&self, _range: &DateRange) -> Result<f64, HealthStoreError> {
        self.record(self.active_energy)
    }
}
