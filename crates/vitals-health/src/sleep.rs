//! Grouping of raw sleep stage intervals into sessions.

use chrono::Duration;

use vitals_core::types::{SleepSession, SleepStage};

/// Gap, in seconds, after which the next stage starts a new session.
pub const SESSION_GAP_SECS: i64 = 3600;

/// Group stage intervals into chronologically ordered sessions.
///
/// Stages are sorted by start. A stage that begins more than
/// [`SESSION_GAP_SECS`] after the running session's end opens a new session;
/// otherwise it joins the running one.
pub fn group_sleep_sessions(mut stages: Vec<SleepStage>) -> Vec<SleepSession> {
    stages.sort_by_key(|s| s.start);

    let gap = Duration::seconds(SESSION_GAP_SECS);
    let mut sessions: Vec<SleepSession> = Vec::new();
    for stage in stages {
        match sessions.last_mut() {
            Some(current) if stage.start - current.end <= gap => current.absorb(stage),
            _ => sessions.push(SleepSession::from_stage(stage)),
        }
    }
    sessions
}
