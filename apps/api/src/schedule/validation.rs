//! Structural checks on a decoded schedule.
//!
//! Two tiers:
//! - hard violations (bad quiz answer index, zero or duplicate week numbers)
//!   reject the whole schedule
//! - soft findings are returned as warnings and logged by the caller

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::schedule::models::{Schedule, StudyDay};

pub const EXPECTED_QUIZ_OPTIONS: usize = 4;

/// Soft finding: the schedule is usable but deviates from what was asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleWarning {
    WeekCountMismatch { expected: u32, actual: usize },
    NonContiguousWeek { position: usize, week_number: u32 },
    UnparsableDate { week: u32, date: String },
    WeekendDate { week: u32, date: NaiveDate },
    DayNameMismatch { week: u32, date: NaiveDate, declared: StudyDay },
    DatesNotIncreasing { week: u32, date: NaiveDate },
    OptionCount { week: u32, topic: String, count: usize },
    NonPositiveHours { week: u32, topic: String },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeekCountMismatch { expected, actual } => {
                write!(f, "requested {expected} weeks, provider returned {actual}")
            }
            Self::NonContiguousWeek {
                position,
                week_number,
            } => write!(f, "week at position {position} is numbered {week_number}"),
            Self::UnparsableDate { week, date } => {
                write!(f, "week {week}: date '{date}' is not YYYY-MM-DD")
            }
            Self::WeekendDate { week, date } => write!(f, "week {week}: {date} falls on a weekend"),
            Self::DayNameMismatch {
                week,
                date,
                declared,
            } => write!(f, "week {week}: {date} is not a {declared:?}"),
            Self::DatesNotIncreasing { week, date } => {
                write!(f, "week {week}: {date} does not follow the previous day")
            }
            Self::OptionCount { week, topic, count } => {
                write!(f, "week {week} '{topic}': quiz question has {count} options")
            }
            Self::NonPositiveHours { week, topic } => {
                write!(f, "week {week} '{topic}': estimated_hours is not positive")
            }
        }
    }
}

/// Hard violation: the schedule cannot be served.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureViolation {
    AnswerOutOfRange {
        week: u32,
        topic: String,
        correct: usize,
        options: usize,
    },
    ZeroWeekNumber,
    DuplicateWeek(u32),
}

impl fmt::Display for StructureViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnswerOutOfRange {
                week,
                topic,
                correct,
                options,
            } => write!(
                f,
                "week {week} '{topic}': correct answer index {correct} out of range for {options} options"
            ),
            Self::ZeroWeekNumber => write!(f, "week_number must start at 1"),
            Self::DuplicateWeek(n) => write!(f, "week_number {n} appears more than once"),
        }
    }
}

/// Checks a decoded schedule against the expected plan shape.
pub fn check_schedule(
    schedule: &Schedule,
    expected_weeks: u32,
) -> Result<Vec<ScheduleWarning>, StructureViolation> {
    let mut warnings = Vec::new();
    let mut seen_weeks = HashSet::new();

    if schedule.weeks.len() != expected_weeks as usize {
        warnings.push(ScheduleWarning::WeekCountMismatch {
            expected: expected_weeks,
            actual: schedule.weeks.len(),
        });
    }

    for (position, week) in schedule.weeks.iter().enumerate() {
        if week.week_number == 0 {
            return Err(StructureViolation::ZeroWeekNumber);
        }
        if !seen_weeks.insert(week.week_number) {
            return Err(StructureViolation::DuplicateWeek(week.week_number));
        }
        if week.week_number as usize != position + 1 {
            warnings.push(ScheduleWarning::NonContiguousWeek {
                position: position + 1,
                week_number: week.week_number,
            });
        }

        let mut previous: Option<NaiveDate> = None;
        for day in &week.days {
            for quiz in &day.quiz_questions {
                if quiz.correct >= quiz.options.len() {
                    return Err(StructureViolation::AnswerOutOfRange {
                        week: week.week_number,
                        topic: day.topic.clone(),
                        correct: quiz.correct,
                        options: quiz.options.len(),
                    });
                }
                if quiz.options.len() != EXPECTED_QUIZ_OPTIONS {
                    warnings.push(ScheduleWarning::OptionCount {
                        week: week.week_number,
                        topic: day.topic.clone(),
                        count: quiz.options.len(),
                    });
                }
            }

            if matches!(day.estimated_hours, Some(h) if h <= 0.0) {
                warnings.push(ScheduleWarning::NonPositiveHours {
                    week: week.week_number,
                    topic: day.topic.clone(),
                });
            }

            let Ok(date) = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") else {
                warnings.push(ScheduleWarning::UnparsableDate {
                    week: week.week_number,
                    date: day.date.clone(),
                });
                continue;
            };

            if StudyDay::from_weekday(date.weekday()).is_none() {
                warnings.push(ScheduleWarning::WeekendDate {
                    week: week.week_number,
                    date,
                });
            } else if date.weekday() != day.day.weekday() {
                warnings.push(ScheduleWarning::DayNameMismatch {
                    week: week.week_number,
                    date,
                    declared: day.day,
                });
            }

            if previous.is_some_and(|p| date <= p) {
                warnings.push(ScheduleWarning::DatesNotIncreasing {
                    week: week.week_number,
                    date,
                });
            }
            previous = Some(date);
        }
    }

    Ok(warnings)
}
