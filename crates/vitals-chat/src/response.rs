//! Response composition for health queries.
//!
//! Turns fetched metric values into conversational sentences with a short
//! contextual remark, without requiring an LLM.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use vitals_core::types::{HeartRateData, Intent, MetricResult, SleepSession};
use vitals_health::HealthStoreError;

/// Daily step goal the step commentary refers to.
pub const STEP_GOAL: u64 = 10_000;
/// Step count from which the remaining distance to the goal is reported.
pub const STEP_NEAR_GOAL: u64 = 8_000;

/// Reply when the store refuses access.
pub const AUTHORIZATION_MESSAGE: &str = "I need access to your health data to answer that \
question. Please go to Settings > Privacy & Security > Health and enable access for this app.";

/// Reply for any other store failure.
pub const TROUBLE_MESSAGE: &str = "I had trouble accessing your health data. Make sure health \
data permissions are granted and that you have health data available for that time period.";

const SPECIFIC_REPLY: &str = "I'd love to help! Could you be more specific? For example:\n\
• 'How many steps today?'\n\
• 'What's my heart rate?'\n\
• 'How did I sleep?'\n\
\n\
Or type 'help' to see all the things I can help with!";

const NOT_UNDERSTOOD_REPLY: &str = "I'm not sure I understood that. I'm great at answering \
questions about your health data! Try asking:\n\
\n\
• 'How many steps today?'\n\
• 'What's my heart rate?'\n\
• 'How did I sleep?'\n\
• 'How many calories did I burn?'\n\
\n\
Or type 'help' for more options!";

/// Short date and time, e.g. `10/14/26, 11:30 PM`.
const SHORT_DATETIME: &str = "%-m/%-d/%y, %-I:%M %p";

// =============================================================================
// ResponseComposer
// =============================================================================

/// Renders metric values as natural-language answers.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    /// `strftime` pattern for sleep session boundaries.
    pub datetime_format: String,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self {
            datetime_format: SHORT_DATETIME.to_string(),
        }
    }
}

impl ResponseComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose the answer for `intent` from its fetched metric.
    ///
    /// Timestamps are rendered in `tz`. A metric that does not belong to
    /// `intent` yields the generic trouble message.
    pub fn compose<Tz>(&self, intent: Intent, metric: &MetricResult, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if intent == Intent::Unknown {
            return NOT_UNDERSTOOD_REPLY.to_string();
        }
        if metric.intent() != intent {
            tracing::warn!(
                intent = %intent,
                metric = %metric.intent(),
                "Metric does not match query intent"
            );
            return TROUBLE_MESSAGE.to_string();
        }

        match metric {
            MetricResult::Steps(count) => self.steps_answer(*count),
            MetricResult::HeartRate(data) => self.heart_rate_answer(data),
            MetricResult::Sleep(sessions) => self.sleep_answer(sessions, tz),
            MetricResult::ActiveEnergy(kcal) => self.active_energy_answer(*kcal),
        }
    }

    /// Reply for a message no intent rule recognised.
    pub fn clarification(&self, text: &str) -> String {
        let q = text.trim().to_lowercase();
        if q.contains("what") || q.contains("tell me") || q.contains("show me") {
            SPECIFIC_REPLY.to_string()
        } else {
            NOT_UNDERSTOOD_REPLY.to_string()
        }
    }

    /// Intent-specific reply when the range holds no data.
    pub fn no_data_message(&self, intent: Intent) -> String {
        match intent {
            Intent::Steps => "I don't have step data for that period. Make sure your phone or \
                watch is counting your steps."
                .to_string(),
            Intent::HeartRate => "I don't have heart rate data for that period. Make sure your \
                watch is recording your heart rate."
                .to_string(),
            Intent::Sleep => "I don't have sleep data for that period. Make sure your watch is \
                tracking your sleep."
                .to_string(),
            Intent::ActiveEnergy => "I don't have active calorie data for that period. Make sure \
                your phone or watch is recording your activity."
                .to_string(),
            Intent::Unknown => NOT_UNDERSTOOD_REPLY.to_string(),
        }
    }

    /// Reply for a failed store query.
    pub fn error_message(&self, intent: Intent, err: &HealthStoreError) -> String {
        match err {
            HealthStoreError::Authorization(_) => AUTHORIZATION_MESSAGE.to_string(),
            HealthStoreError::NoData => self.no_data_message(intent),
            HealthStoreError::Unknown(_) => TROUBLE_MESSAGE.to_string(),
        }
    }

    // -- Private helpers --

    fn steps_answer(&self, count: u64) -> String {
        format!("You've taken {} steps. {}", count, steps_context(count))
    }

    fn heart_rate_answer(&self, data: &HeartRateData) -> String {
        match data.average {
            Some(avg) => format!(
                "Your average heart rate is {} bpm. {}",
                avg.round() as i64,
                heart_rate_context(avg)
            ),
            None => self.no_data_message(Intent::HeartRate),
        }
    }

    fn active_energy_answer(&self, kcal: f64) -> String {
        format!(
            "You've burned {} active calories. {}",
            kcal.round() as i64,
            calories_context(kcal)
        )
    }

    fn sleep_answer<Tz>(&self, sessions: &[SleepSession], tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if sessions.is_empty() {
            return self.no_data_message(Intent::Sleep);
        }

        let mut ordered: Vec<&SleepSession> = sessions.iter().collect();
        ordered.sort_by_key(|s| s.start);

        let mut lines = vec!["Here's your sleep data:".to_string(), String::new()];
        for (i, session) in ordered.iter().enumerate() {
            let secs = session.duration.num_seconds().max(0);
            lines.push(format!(
                "Night {}: {}h {}m of sleep from {} to {}.",
                i + 1,
                secs / 3600,
                (secs % 3600) / 60,
                self.format_instant(session.start, tz),
                self.format_instant(session.end, tz),
            ));
        }
        lines.join("\n")
    }

    fn format_instant<Tz>(&self, instant: DateTime<Utc>, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        instant
            .with_timezone(tz)
            .format(&self.datetime_format)
            .to_string()
    }
}

// =============================================================================
// Context remarks
// =============================================================================

fn steps_context(count: u64) -> String {
    if count >= STEP_GOAL {
        "Great job hitting your 10,000 step goal! 🎉".to_string()
    } else if count >= STEP_NEAR_GOAL {
        format!(
            "You're doing well! Just {} more steps to reach your goal.",
            STEP_GOAL - count
        )
    } else {
        "Keep moving! Try to reach 10,000 steps today.".to_string()
    }
}

fn heart_rate_context(bpm: f64) -> &'static str {
    if bpm < 60.0 {
        "Your heart rate is on the lower side, which is normal for well-trained athletes."
    } else if bpm > 100.0 {
        "Your heart rate is elevated. This could be from exercise or stress."
    } else {
        "Your heart rate is in a healthy range."
    }
}

fn calories_context(kcal: f64) -> &'static str {
    if kcal >= 500.0 {
        "Excellent activity level today! 💪"
    } else if kcal >= 300.0 {
        "Good activity! Keep it up."
    } else {
        "Try to get more movement in today."
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};
    use vitals_core::types::{HeartRateSample, SleepStage, SleepStageKind};

    fn composer() -> ResponseComposer {
        ResponseComposer::new()
    }

    fn compose(intent: Intent, metric: MetricResult) -> String {
        composer().compose(intent, &metric, &Utc)
    }

    fn session(start: DateTime<Utc>, minutes: i64) -> SleepSession {
        SleepSession::from_stage(SleepStage {
            kind: SleepStageKind::Asleep,
            start,
            end: start + Duration::minutes(minutes),
        })
    }

    // ---- Steps ----

    #[test]
    fn test_steps_goal_reached() {
        let answer = compose(Intent::Steps, MetricResult::Steps(10000));
        assert_eq!(
            answer,
            "You've taken 10000 steps. Great job hitting your 10,000 step goal! 🎉"
        );
    }

    #[test]
    fn test_steps_near_goal_reports_remaining() {
        let answer = compose(Intent::Steps, MetricResult::Steps(8500));
        assert!(answer.starts_with("You've taken 8500 steps. "));
        assert!(answer.contains("Just 1500 more steps"));
    }

    #[test]
    fn test_steps_near_goal_boundaries() {
        assert!(compose(Intent::Steps, MetricResult::Steps(8000)).contains("Just 2000 more"));
        assert!(compose(Intent::Steps, MetricResult::Steps(9999)).contains("Just 1 more"));
        assert!(compose(Intent::Steps, MetricResult::Steps(7999)).contains("Keep moving!"));
    }

    #[test]
    fn test_steps_zero() {
        let answer = compose(Intent::Steps, MetricResult::Steps(0));
        assert_eq!(
            answer,
            "You've taken 0 steps. Keep moving! Try to reach 10,000 steps today."
        );
    }

    // ---- Heart rate ----

    fn heart(avg: f64) -> MetricResult {
        MetricResult::HeartRate(HeartRateData::from_samples(vec![HeartRateSample {
            value: avg,
            at: Utc::now(),
        }]))
    }

    #[test]
    fn test_heart_rate_healthy_range() {
        let answer = compose(Intent::HeartRate, heart(72.4));
        assert_eq!(
            answer,
            "Your average heart rate is 72 bpm. Your heart rate is in a healthy range."
        );
    }

    #[test]
    fn test_heart_rate_rounds_average() {
        assert!(compose(Intent::HeartRate, heart(72.6)).contains("73 bpm"));
    }

    #[test]
    fn test_heart_rate_low_and_elevated() {
        assert!(compose(Intent::HeartRate, heart(52.0)).contains("lower side"));
        assert!(compose(Intent::HeartRate, heart(104.0)).contains("elevated"));
        assert!(compose(Intent::HeartRate, heart(60.0)).contains("healthy range"));
        assert!(compose(Intent::HeartRate, heart(100.0)).contains("healthy range"));
    }

    #[test]
    fn test_heart_rate_without_samples_has_no_number() {
        let answer = compose(
            Intent::HeartRate,
            MetricResult::HeartRate(HeartRateData {
                average: None,
                samples: vec![],
            }),
        );
        assert!(answer.contains("don't have heart rate data"));
        assert!(!answer.contains("bpm"));
        assert!(!answer.chars().any(|c| c.is_ascii_digit()));
    }

    // ---- Active energy ----

    #[test]
    fn test_active_energy_buckets() {
        let answer = compose(Intent::ActiveEnergy, MetricResult::ActiveEnergy(512.7));
        assert_eq!(
            answer,
            "You've burned 513 active calories. Excellent activity level today! 💪"
        );
        let good = compose(Intent::ActiveEnergy, MetricResult::ActiveEnergy(300.0));
        assert!(good.contains("Good activity"));
        let low = compose(Intent::ActiveEnergy, MetricResult::ActiveEnergy(299.9));
        assert!(low.starts_with("You've burned 300 active calories."));
        assert!(low.contains("more movement"));
    }

    // ---- Sleep ----

    #[test]
    fn test_sleep_no_sessions() {
        let answer = compose(Intent::Sleep, MetricResult::Sleep(vec![]));
        assert!(answer.contains("don't have sleep data"));
    }

    #[test]
    fn test_sleep_lines_in_chronological_order() {
        let first = Utc.with_ymd_and_hms(2026, 10, 12, 23, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 10, 13, 22, 45, 0).unwrap();
        let answer = compose(
            Intent::Sleep,
            MetricResult::Sleep(vec![session(second, 400), session(first, 455)]),
        );
        let lines: Vec<&str> = answer.lines().collect();
        assert_eq!(lines[0], "Here's your sleep data:");
        assert_eq!(
            lines[2],
            "Night 1: 7h 35m of sleep from 10/12/26, 11:00 PM to 10/13/26, 6:35 AM."
        );
        assert_eq!(
            lines[3],
            "Night 2: 6h 40m of sleep from 10/13/26, 10:45 PM to 10/14/26, 5:25 AM."
        );
    }

    #[test]
    fn test_sleep_duration_truncates_seconds() {
        let start = Utc.with_ymd_and_hms(2026, 10, 13, 23, 0, 0).unwrap();
        let mut s = session(start, 0);
        s.end = start + Duration::seconds(3 * 3600 + 59 * 60 + 59);
        s.duration = s.end - s.start;
        let answer = compose(Intent::Sleep, MetricResult::Sleep(vec![s]));
        assert!(answer.contains("Night 1: 3h 59m of sleep"));
    }

    #[test]
    fn test_sleep_times_rendered_in_caller_zone() {
        let start = Utc.with_ymd_and_hms(2026, 10, 14, 6, 0, 0).unwrap();
        let tz = FixedOffset::west_opt(7 * 3600).unwrap();
        let answer = composer().compose(
            Intent::Sleep,
            &MetricResult::Sleep(vec![session(start, 60)]),
            &tz,
        );
        assert!(answer.contains("from 10/13/26, 11:00 PM to 10/14/26, 12:00 AM."));
    }

    // ---- Unknown / mismatch ----

    #[test]
    fn test_unknown_intent_is_help_text() {
        let answer = compose(Intent::Unknown, MetricResult::Steps(1234));
        assert!(answer.contains("How many steps today?"));
        assert!(answer.contains("heart rate"));
        assert!(answer.contains("sleep"));
        assert!(answer.contains("calories"));
        assert!(!answer.contains("1234"));
    }

    #[test]
    fn test_mismatched_metric_is_trouble_message() {
        let answer = compose(Intent::Sleep, MetricResult::Steps(5));
        assert_eq!(answer, TROUBLE_MESSAGE);
    }

    // ---- Clarification ----

    #[test]
    fn test_clarification_variants() {
        assert_eq!(composer().clarification("what is this"), SPECIFIC_REPLY);
        assert_eq!(composer().clarification("Tell me something"), SPECIFIC_REPLY);
        assert_eq!(composer().clarification("show me stuff"), SPECIFIC_REPLY);
        assert_eq!(composer().clarification("blorp"), NOT_UNDERSTOOD_REPLY);
    }

    #[test]
    fn test_specific_reply_has_three_examples() {
        for example in ["How many steps today?", "What's my heart rate?", "How did I sleep?"] {
            assert!(SPECIFIC_REPLY.contains(example));
        }
        assert!(!SPECIFIC_REPLY.contains("calories"));
        assert!(NOT_UNDERSTOOD_REPLY.contains("How many calories did I burn?"));
    }

    // ---- Errors ----

    #[test]
    fn test_error_messages() {
        let c = composer();
        assert_eq!(
            c.error_message(Intent::Steps, &HealthStoreError::Authorization("x".into())),
            AUTHORIZATION_MESSAGE
        );
        assert_eq!(
            c.error_message(Intent::Steps, &HealthStoreError::Unknown("x".into())),
            TROUBLE_MESSAGE
        );
        assert_eq!(
            c.error_message(Intent::Sleep, &HealthStoreError::NoData),
            c.no_data_message(Intent::Sleep)
        );
    }

    #[test]
    fn test_no_data_messages_are_intent_specific() {
        let c = composer();
        assert!(c.no_data_message(Intent::Steps).contains("step data"));
        assert!(c.no_data_message(Intent::HeartRate).contains("heart rate data"));
        assert!(c.no_data_message(Intent::Sleep).contains("sleep data"));
        assert!(c.no_data_message(Intent::ActiveEnergy).contains("calorie data"));
    }
}
