// Calendar export: iCalendar (RFC 5545) serialization of a generated schedule.
// Pure; persisting or serving the bytes is the caller's job.

pub mod exporter;
pub mod ics;

pub use exporter::{export_filename, export_schedule};
