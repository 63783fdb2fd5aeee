//! Minimal RFC 5545 writer.
//!
//! Every content line goes through `line()`, which folds at 75 octets and
//! terminates with CRLF. Free text goes through `text()`, which escapes
//! backslash, semicolon, comma and newlines. Nothing else writes to the buffer.

use chrono::{DateTime, NaiveDate, Utc};

const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Default)]
pub struct IcsWriter {
    buf: String,
}

impl IcsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, component: &str) -> &mut Self {
        self.line(&format!("BEGIN:{component}"))
    }

    pub fn end(&mut self, component: &str) -> &mut Self {
        self.line(&format!("END:{component}"))
    }

    /// Property whose value is already valid iCalendar syntax (no escaping).
    pub fn raw(&mut self, name: &str, value: &str) -> &mut Self {
        self.line(&format!("{name}:{value}"))
    }

    /// TEXT-valued property; the value is escaped.
    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.line(&format!("{name}:{}", escape_text(value)))
    }

    /// DATE-valued property, e.g. `DTSTART;VALUE=DATE:20240101`.
    pub fn date(&mut self, name: &str, date: NaiveDate) -> &mut Self {
        self.line(&format!("{name};VALUE=DATE:{}", date.format("%Y%m%d")))
    }

    /// UTC DATE-TIME property, e.g. `DTSTAMP:20240101T120000Z`.
    pub fn utc_datetime(&mut self, name: &str, at: DateTime<Utc>) -> &mut Self {
        self.line(&format!("{name}:{}", at.format("%Y%m%dT%H%M%SZ")))
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn line(&mut self, content: &str) -> &mut Self {
        fold_into(&mut self.buf, content);
        self
    }
}

/// Escapes a TEXT value (RFC 5545 §3.3.11).
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                // CRLF and lone CR both become one escaped newline
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            _ => out.push(c),
        }
    }
    out
}

/// Appends `content` as one logical line, folded so no physical line exceeds
/// 75 octets. Continuation lines start with a single space. Never splits a
/// UTF-8 sequence.
fn fold_into(buf: &mut String, content: &str) {
    let mut used = 0;
    for c in content.chars() {
        let len = c.len_utf8();
        if used + len > MAX_LINE_OCTETS {
            buf.push_str("\r\n ");
            used = 1;
        }
        buf.push(c);
        used += len;
    }
    buf.push_str("\r\n");
}
