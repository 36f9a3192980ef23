//! Conversational replies that need no health data.
//!
//! Checked before intent classification. A reply here means the store is
//! never queried for the message.

use crate::parser::normalize;

/// Reply to an empty message.
pub const EMPTY_REPLY: &str = "I'm here to help! Ask me about your health data.";

/// Reply to a bare greeting.
pub const GREETING_REPLY: &str = "Hello! I'm your health assistant. I can help you understand \
your health data. Try asking about your steps, heart rate, sleep, or calories burned.";

/// Reply to any message mentioning "help".
pub const HELP_REPLY: &str = "I can help you with:\n\
• Steps: \"How many steps today?\"\n\
• Heart rate: \"What's my heart rate?\"\n\
• Sleep: \"How did I sleep?\"\n\
• Calories: \"How many calories did I burn?\"\n\
\n\
Just ask me in natural language! If you haven't granted access to your health data yet, \
I'll help you do that.";

const GREETINGS: &[&str] = &["hello", "hi", "hey"];

/// Fixed reply for empty input, exact greetings, and help requests.
pub fn small_talk(text: &str) -> Option<&'static str> {
    let q = normalize(text);
    if q.is_empty() {
        Some(EMPTY_REPLY)
    } else if GREETINGS.contains(&q.as_str()) {
        Some(GREETING_REPLY)
    } else if q.contains("help") {
        Some(HELP_REPLY)
    } else {
        None
    }
}
