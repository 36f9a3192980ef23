//! Health assistant: central coordinator wiring interpreter, store, and composer.
//!
//! Answers one message per call. No state is carried between calls.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use vitals_core::config::VitalsConfig;
use vitals_core::types::{Intent, WeekStart};
use vitals_health::HealthStore;

use crate::parser::QueryInterpreter;
use crate::response::ResponseComposer;
use crate::small_talk::small_talk;

/// Settings the assistant needs from the application config.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssistantConfig {
    pub week_start: WeekStart,
}

impl From<&VitalsConfig> for AssistantConfig {
    fn from(config: &VitalsConfig) -> Self {
        Self {
            week_start: config.calendar.week_start,
        }
    }
}

/// Answers natural-language health questions from a [`HealthStore`].
pub struct HealthAssistant {
    interpreter: QueryInterpreter,
    composer: ResponseComposer,
    store: Arc<dyn HealthStore>,
}

impl HealthAssistant {
    /// Create an assistant over `store`.
    pub fn new(store: Arc<dyn HealthStore>, config: &AssistantConfig) -> Self {
        Self {
            interpreter: QueryInterpreter::new(config.week_start),
            composer: ResponseComposer::new(),
            store,
        }
    }

    /// Answer a user message relative to `now`.
    ///
    /// Always returns displayable text. Small talk and unrecognised
    /// messages never reach the store; everything else makes exactly one
    /// store call.
    pub async fn answer<Tz>(&self, text: &str, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if let Some(reply) = small_talk(text) {
            tracing::debug!("Answered without health data");
            return reply.to_string();
        }

        let (intent, range) = self.interpreter.interpret(text, now);
        tracing::debug!(
            intent = %intent,
            start = %range.start,
            end = %range.end,
            "Query interpreted"
        );

        if intent == Intent::Unknown {
            return self.composer.clarification(text);
        }

        let tz = now.timezone();
        match self.store.fetch(intent, &range).await {
            Ok(metric) => self.composer.compose(intent, &metric, &tz),
            Err(e) => {
                tracing::warn!(error = %e, intent = %intent, "Health data fetch failed");
                self.composer.error_message(intent, &e)
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
