//! Conversational interface for Vitals.
//!
//! Provides small talk handling, natural-language query interpretation,
//! and response composition over a health data store.

pub mod orchestrator;
pub mod parser;
pub mod response;
pub mod small_talk;

pub use orchestrator::{AssistantConfig, HealthAssistant};
pub use parser::{classify_intent, DatePhrase, IntentRule, QueryInterpreter, INTENT_RULES};
pub use response::ResponseComposer;
pub use small_talk::small_talk;
