//! Natural-language query interpreter.
//!
//! Classifies the health metric a message asks about and resolves the date
//! range it refers to. Both steps are pure functions of the text and the
//! supplied `now`; nothing reads the system clock or locale.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

use vitals_core::types::{DateRange, Intent, WeekStart};

// =============================================================================
// Intent rules
// =============================================================================

/// One entry of the ordered intent table.
pub struct IntentRule {
    /// Intent assigned when the rule matches.
    pub intent: Intent,
    /// Human-readable summary of the keywords.
    pub description: &'static str,
    predicate: fn(&str) -> bool,
}

impl IntentRule {
    /// Test the rule against lower-cased, trimmed text.
    pub fn matches(&self, normalized: &str) -> bool {
        (self.predicate)(normalized)
    }
}

/// Intent rules in priority order. The first match wins.
///
/// The keyword sets overlap on purpose: "heart" beats "active" because the
/// heart rate rule is evaluated before the active energy rule.
pub static INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Steps,
        description: "step | walk | distance | how+active | much+move",
        predicate: is_steps_query,
    },
    IntentRule {
        intent: Intent::HeartRate,
        description: "heart | bpm | pulse | heartbeat | cardiac",
        predicate: is_heart_rate_query,
    },
    IntentRule {
        intent: Intent::Sleep,
        description: "sleep | rest | bedtime | nap",
        predicate: is_sleep_query,
    },
    IntentRule {
        intent: Intent::ActiveEnergy,
        description: "calorie | energy without heart | burn | active without step",
        predicate: is_active_energy_query,
    },
];

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn is_steps_query(q: &str) -> bool {
    contains_any(q, &["step", "walk", "distance"])
        || (q.contains("how") && q.contains("active"))
        || (q.contains("much") && q.contains("move"))
}

fn is_heart_rate_query(q: &str) -> bool {
    contains_any(q, &["heart", "bpm", "pulse", "heartbeat", "cardiac"])
}

fn is_sleep_query(q: &str) -> bool {
    contains_any(q, &["sleep", "rest", "bedtime", "nap"])
}

fn is_active_energy_query(q: &str) -> bool {
    q.contains("calorie")
        || (q.contains("energy") && !q.contains("heart"))
        || q.contains("burn")
        || (q.contains("active") && !q.contains("step"))
}

/// Lower-case and trim raw user text.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

// =============================================================================
// Date phrases
// =============================================================================

/// Relative date expression recognised in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePhrase {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    /// No phrase found: midnight today through now.
    SoFarToday,
}

impl DatePhrase {
    /// Detect the phrase in lower-cased text. Checks run in a fixed order.
    pub fn detect(q: &str) -> Self {
        if q.contains("today") {
            DatePhrase::Today
        } else if q.contains("yesterday") {
            DatePhrase::Yesterday
        } else if q.contains("this week") || (q.contains("week") && !q.contains("last")) {
            DatePhrase::ThisWeek
        } else if q.contains("last week") {
            DatePhrase::LastWeek
        } else if q.contains("this month") || (q.contains("month") && !q.contains("last")) {
            DatePhrase::ThisMonth
        } else if q.contains("last month") {
            DatePhrase::LastMonth
        } else {
            DatePhrase::SoFarToday
        }
    }
}

// =============================================================================
// QueryInterpreter
// =============================================================================

/// Rule-based interpreter mapping a message to `(Intent, DateRange)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryInterpreter {
    /// Calendar policy for week boundaries.
    pub week_start: WeekStart,
}

impl QueryInterpreter {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    /// Classify intent and resolve the date range of `text` relative to `now`.
    pub fn interpret<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> (Intent, DateRange) {
        let normalized = normalize(text);
        (
            classify_normalized(&normalized),
            self.range_for(DatePhrase::detect(&normalized), now),
        )
    }

    /// Resolve only the date range of `text`.
    pub fn resolve_date_range<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> DateRange {
        self.range_for(DatePhrase::detect(&normalize(text)), now)
    }

    /// Concrete range for a phrase. Day boundaries are local midnights in
    /// `now`'s own time zone.
    pub fn range_for<Tz: TimeZone>(&self, phrase: DatePhrase, now: &DateTime<Tz>) -> DateRange {
        let tz = now.timezone();
        let today = now.date_naive();
        let now_utc = now.with_timezone(&Utc);

        match phrase {
            DatePhrase::Today => DateRange::new(
                start_of_day(&tz, today),
                start_of_day(&tz, today + Duration::days(1)),
            ),
            DatePhrase::Yesterday => DateRange::new(
                start_of_day(&tz, today - Duration::days(1)),
                start_of_day(&tz, today),
            ),
            DatePhrase::ThisWeek => {
                DateRange::new(start_of_day(&tz, self.week_start_date(today)), now_utc)
            }
            DatePhrase::LastWeek => {
                let start = self.week_start_date(today - Duration::days(7));
                DateRange::new(
                    start_of_day(&tz, start),
                    start_of_day(&tz, start + Duration::days(7)),
                )
            }
            DatePhrase::ThisMonth => {
                DateRange::new(start_of_day(&tz, first_of_month(today)), now_utc)
            }
            DatePhrase::LastMonth => {
                let this_month = first_of_month(today);
                let last_month = this_month
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(this_month);
                DateRange::new(start_of_day(&tz, last_month), start_of_day(&tz, this_month))
            }
            DatePhrase::SoFarToday => DateRange::new(start_of_day(&tz, today), now_utc),
        }
    }

    fn week_start_date(&self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(self.week_start.days_since_start(date.weekday()))
    }
}

/// Classify the intent of raw user text.
pub fn classify_intent(text: &str) -> Intent {
    classify_normalized(&normalize(text))
}

fn classify_normalized(normalized: &str) -> Intent {
    INTENT_RULES
        .iter()
        .find(|rule| rule.matches(normalized))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Unknown)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First valid local instant of `date` in `tz`, as UTC.
///
/// Midnight itself when it exists; otherwise the earliest whole hour after a
/// DST gap.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    for hour in 0..24 {
        let Some(local) = date.and_hms_opt(hour, 0, 0) else {
            continue;
        };
        if let Some(instant) = tz.from_local_datetime(&local).earliest() {
            return instant.with_timezone(&Utc);
        }
    }
    date.and_time(NaiveTime::MIN).and_utc()
}

// =============================================================================
// Tests
// =============================================================================
