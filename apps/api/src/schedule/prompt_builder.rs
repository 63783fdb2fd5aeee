//! Prompt Builder — turns raw syllabus text into the system/user message pair.

use chrono::NaiveDate;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::schedule::prompts::{SCHEDULE_SYSTEM_TEMPLATE, SCHEDULE_USER_TEMPLATE};

/// Syllabus characters embedded in the prompt. Keeps requests inside provider limits.
pub const SYLLABUS_CHAR_BUDGET: usize = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePrompt {
    pub system: String,
    pub user: String,
    /// True when the syllabus was cut to `SYLLABUS_CHAR_BUDGET`.
    pub syllabus_truncated: bool,
}

/// Builds the deterministic prompt pair for one generation request.
pub fn build_prompt(
    syllabus_text: &str,
    duration_weeks: u32,
    start_date: NaiveDate,
) -> SchedulePrompt {
    let (syllabus, syllabus_truncated) = truncate_chars(syllabus_text, SYLLABUS_CHAR_BUDGET);

    let system = SCHEDULE_SYSTEM_TEMPLATE.replace("{json_only}", JSON_ONLY_SYSTEM);
    // Syllabus goes in last so its text is never scanned for placeholders.
    let user = SCHEDULE_USER_TEMPLATE
        .replace("{duration}", &duration_weeks.to_string())
        .replace("{start_date}", &start_date.format("%Y-%m-%d").to_string())
        .replace("{syllabus}", syllabus);

    SchedulePrompt {
        system,
        user,
        syllabus_truncated,
    }
}

/// Longest prefix of at most `max_chars` characters, cut on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}
