//! Typed study schedule, decoded directly from provider output.
//!
//! Required fields (`week_number`, `day`, `date`, `topic`, quiz `question`,
//! `options`, `correct`) must be present or decoding fails. Lists default to
//! empty when absent.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub summary: String,
}

impl Schedule {
    /// All days in encounter order: week order, then day order.
    pub fn days(&self) -> impl Iterator<Item = (&Week, &Day)> {
        self.weeks
            .iter()
            .flat_map(|week| week.days.iter().map(move |day| (week, day)))
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub week_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub days: Vec<Day>,
}

/// One weekday of study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub day: StudyDay,
    /// ISO `YYYY-MM-DD`. Kept as text: export decides whether it parses.
    pub date: String,
    pub topic: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub subtopics: Vec<String>,
    #[serde(default)]
    pub youtube_searches: Vec<String>,
    /// Derived by the link enricher; anything the provider sends here is dropped.
    #[serde(default, skip_deserializing)]
    pub youtube_links: Vec<ResourceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub term: String,
    pub url: String,
}

/// Study days run Monday through Friday; weekend names fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyDay {
    #[serde(alias = "monday", alias = "MONDAY")]
    Monday,
    #[serde(alias = "tuesday", alias = "TUESDAY")]
    Tuesday,
    #[serde(alias = "wednesday", alias = "WEDNESDAY")]
    Wednesday,
    #[serde(alias = "thursday", alias = "THURSDAY")]
    Thursday,
    #[serde(alias = "friday", alias = "FRIDAY")]
    Friday,
}

impl StudyDay {
    pub fn weekday(self) -> Weekday {
        match self {
            StudyDay::Monday => Weekday::Mon,
            StudyDay::Tuesday => Weekday::Tue,
            StudyDay::Wednesday => Weekday::Wed,
            StudyDay::Thursday => Weekday::Thu,
            StudyDay::Friday => Weekday::Fri,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(StudyDay::Monday),
            Weekday::Tue => Some(StudyDay::Tuesday),
            Weekday::Wed => Some(StudyDay::Wednesday),
            Weekday::Thu => Some(StudyDay::Thursday),
            Weekday::Fri => Some(StudyDay::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDER_JSON: &str = r#"{
        "weeks": [
            {
                "week_number": 1,
                "title": "Foundations",
                "overview": "Getting started with algebra",
                "days": [
                    {
                        "day": "Monday",
                        "date": "2024-01-01",
                        "topic": "Variables",
                        "objectives": ["Define a variable", "Evaluate expressions"],
                        "subtopics": ["Constants"],
                        "youtube_searches": ["algebra variables"],
                        "estimated_hours": 2.5,
                        "quiz_questions": [
                            {
                                "question": "What is x in x + 1 = 2?",
                                "options": ["0", "1", "2", "3"],
                                "correct": 1,
                                "explanation": "Subtract 1 from both sides"
                            }
                        ]
                    }
                ]
            }
        ],
        "summary": "Intro to Algebra"
    }"#;

    #[test]
    fn test_provider_json_deserializes() {
        let schedule: Schedule = serde_json::from_str(PROVIDER_JSON).unwrap();
        assert_eq!(schedule.weeks.len(), 1);
        assert_eq!(schedule.summary, "Intro to Algebra");

        let day = &schedule.weeks[0].days[0];
        assert_eq!(day.day, StudyDay::Monday);
        assert_eq!(day.date, "2024-01-01");
        assert_eq!(day.objectives.len(), 2);
        assert_eq!(day.estimated_hours, Some(2.5));
        assert_eq!(day.quiz_questions[0].correct, 1);
        assert!(day.youtube_links.is_empty());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let json = r#"{"weeks": [{"week_number": 1, "days": [
            {"day": "Tuesday", "date": "2024-01-02", "topic": "Graphs"}
        ]}]}"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        let day = &schedule.weeks[0].days[0];
        assert!(day.objectives.is_empty());
        assert!(day.youtube_searches.is_empty());
        assert!(day.quiz_questions.is_empty());
        assert!(day.estimated_hours.is_none());
        assert!(schedule.summary.is_empty());
    }

    #[test]
    fn test_empty_object_is_an_empty_schedule() {
        let schedule: Schedule = serde_json::from_str("{}").unwrap();
        assert!(schedule.weeks.is_empty());
    }

    #[test]
    fn test_missing_required_topic_fails() {
        let json = r#"{"weeks": [{"week_number": 1, "days": [
            {"day": "Monday", "date": "2024-01-01"}
        ]}]}"#;
        assert!(serde_json::from_str::<Schedule>(json).is_err());
    }

    #[test]
    fn test_correct_must_be_an_integer() {
        let json = r#"{"question": "Q?", "options": ["a", "b", "c", "d"], "correct": "B"}"#;
        assert!(serde_json::from_str::<QuizQuestion>(json).is_err());
    }

    #[test]
    fn test_weekend_day_is_rejected() {
        assert!(serde_json::from_str::<StudyDay>(r#""Saturday""#).is_err());
        assert_eq!(
            serde_json::from_str::<StudyDay>(r#""friday""#).unwrap(),
            StudyDay::Friday
        );
    }

    #[test]
    fn test_provider_supplied_links_are_ignored() {
        let json = r#"{"day": "Monday", "date": "2024-01-01", "topic": "T",
            "youtube_searches": ["a"],
            "youtube_links": [{"term": "spoofed", "url": "https://example.com"}]}"#;
        let day: Day = serde_json::from_str(json).unwrap();
        assert!(day.youtube_links.is_empty());
    }

    #[test]
    fn test_days_iterates_in_encounter_order() {
        let schedule =
            fixtures::weekday_schedule(2, chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let dates: Vec<&str> = schedule.days().map(|(_, d)| d.date.as_str()).collect();
        assert_eq!(schedule.day_count(), 10);
        assert_eq!(dates.first(), Some(&"2024-01-01"));
        assert_eq!(dates.last(), Some(&"2024-01-12"));
    }
}
