//! Calendar Exporter — one all-day event per study day.

use bytes::Bytes;
use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use crate::calendar::ics::IcsWriter;
use crate::errors::AppError;
use crate::schedule::models::{Day, Schedule, Week};

pub const PRODID: &str = "-//Study Planner//Schedule Export//EN";
/// Used in the description when a day carries no estimate.
const DEFAULT_HOURS: f64 = 2.0;

/// Serializes `schedule` as an iCalendar document stamped with `generated_at`.
///
/// Events follow encounter order (week, then day). Fails with
/// `Serialization` when the schedule has no days or any date does not parse.
pub fn export_schedule(
    schedule: &Schedule,
    generated_at: DateTime<Utc>,
) -> Result<Bytes, AppError> {
    if schedule.day_count() == 0 {
        return Err(AppError::Serialization(
            "schedule has no study days to export".to_string(),
        ));
    }

    let mut w = IcsWriter::new();
    w.begin("VCALENDAR")
        .raw("VERSION", "2.0")
        .text("PRODID", PRODID)
        .raw("CALSCALE", "GREGORIAN")
        .raw("METHOD", "PUBLISH");
    if !schedule.summary.trim().is_empty() {
        w.text("X-WR-CALNAME", schedule.summary.trim());
    }

    for (week, day) in schedule.days() {
        let start = parse_day_date(week, day)?;
        let end = start.checked_add_days(Days::new(1)).ok_or_else(|| {
            AppError::Serialization(format!("date {start} has no following day"))
        })?;

        w.begin("VEVENT")
            .raw("UID", &event_uid(week, day))
            .utc_datetime("DTSTAMP", generated_at)
            .date("DTSTART", start)
            .date("DTEND", end)
            .text("SUMMARY", &day.topic)
            .text("DESCRIPTION", &describe(day))
            .raw("TRANSP", "TRANSPARENT")
            .end("VEVENT");
    }

    w.end("VCALENDAR");
    Ok(Bytes::from(w.finish()))
}

/// Download name for an export produced on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("study_schedule_{}.ics", date.format("%Y%m%d"))
}

fn parse_day_date(week: &Week, day: &Day) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(day.date.trim(), "%Y-%m-%d").map_err(|e| {
        AppError::Serialization(format!(
            "week {} '{}': date '{}' is not a valid YYYY-MM-DD date ({e})",
            week.week_number, day.topic, day.date
        ))
    })
}

fn describe(day: &Day) -> String {
    format!(
        "Objectives: {}\nEstimated: {} hours",
        day.objectives.join(", "),
        day.estimated_hours.unwrap_or(DEFAULT_HOURS)
    )
}

/// Stable per-event UID so re-imports update instead of duplicating.
fn event_uid(week: &Week, day: &Day) -> String {
    let key = format!("{}|{:?}|{}|{}", week.week_number, day.day, day.date, day.topic);
    format!(
        "{}@study-planner",
        Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::calendar::ics::parse;
    use crate::schedule::models::fixtures::weekday_schedule;

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
    }

    fn export(schedule: &Schedule) -> String {
        let bytes = export_schedule(schedule, stamp()).unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_one_event_per_day_with_exclusive_end() {
        let schedule = weekday_schedule(2, jan_first());
        let doc = export(&schedule);

        let starts = parse::raw_values(&doc, "DTSTART");
        let ends = parse::raw_values(&doc, "DTEND");
        assert_eq!(starts.len(), 10);
        assert_eq!(ends.len(), 10);

        for ((_, day), (start, end)) in schedule.days().zip(starts.iter().zip(&ends)) {
            let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").unwrap();
            assert_eq!(start, &date.format("%Y%m%d").to_string());
            assert_eq!(end, &(date + chrono::Duration::days(1)).format("%Y%m%d").to_string());
        }
        // Friday's event ends on Saturday.
        assert_eq!(ends[4], "20240106");
    }

    #[test]
    fn test_wrapper_and_event_fields() {
        let doc = export(&weekday_schedule(1, jan_first()));
        assert!(doc.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(doc.ends_with("END:VCALENDAR\r\n"));
        assert!(doc.contains("DTSTART;VALUE=DATE:20240101\r\n"));
        assert!(doc.contains("DTSTAMP:20240115T093000Z\r\n"));
        assert_eq!(parse::text_values(&doc, "X-WR-CALNAME"), vec!["Algebra fundamentals"]);
        assert_eq!(parse::text_values(&doc, "SUMMARY")[0], "Week 1 topic 0");
        assert_eq!(
            parse::text_values(&doc, "DESCRIPTION")[0],
            "Objectives: Understand the basics\nEstimated: 2.5 hours"
        );
    }

    #[test]
    fn test_reserved_characters_round_trip() {
        let mut schedule = weekday_schedule(1, jan_first());
        let topic = "Sets, relations; and C:\\paths\nPart 2";
        let objectives = vec![
            "Union; intersection".to_string(),
            "Prove A, B \\ C".to_string(),
        ];
        schedule.weeks[0].days[0].topic = topic.to_string();
        schedule.weeks[0].days[0].objectives = objectives.clone();

        let doc = export(&schedule);
        assert!(doc.contains("SUMMARY:Sets\\, relations\\; and C:\\\\paths\\nPart 2"));
        assert_eq!(parse::text_values(&doc, "SUMMARY")[0], topic);
        assert_eq!(
            parse::text_values(&doc, "DESCRIPTION")[0],
            format!("Objectives: {}\nEstimated: 2.5 hours", objectives.join(", "))
        );
    }

    #[test]
    fn test_missing_hours_uses_default() {
        let mut schedule = weekday_schedule(1, jan_first());
        schedule.weeks[0].days[0].estimated_hours = None;
        let doc = export(&schedule);
        assert!(parse::text_values(&doc, "DESCRIPTION")[0].ends_with("Estimated: 2 hours"));
    }

    #[test]
    fn test_unparsable_date_is_serialization_error() {
        let mut schedule = weekday_schedule(1, jan_first());
        schedule.weeks[0].days[3].date = "2024-13-40".to_string();
        let err = export_schedule(&schedule, stamp()).unwrap_err();
        assert!(matches!(err, AppError::Serialization(msg) if msg.contains("2024-13-40")));
    }

    #[test]
    fn test_empty_schedule_cannot_be_exported() {
        let err = export_schedule(&Schedule::default(), stamp()).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_uids_are_stable_and_distinct() {
        let schedule = weekday_schedule(2, jan_first());
        let first = parse::raw_values(&export(&schedule), "UID");
        let second = parse::raw_values(&export(&schedule), "UID");
        assert_eq!(first, second);

        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_export_filename_uses_date() {
        assert_eq!(export_filename(jan_first()), "study_schedule_20240101.ics");
    }
}
