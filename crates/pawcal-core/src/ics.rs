//! Calendar export serializer.
//!
//! Renders one care event as a self-contained VCALENDAR text block holding
//! a single all-day VEVENT and a display VALARM. The output is a plain
//! UTF-8 string (MIME `text/calendar`); writing it anywhere is the
//! caller's job.

use chrono::{DateTime, Days, NaiveDate, Utc};

/// Alarm lead time used when the caller supplies none.
pub const DEFAULT_LEAD_DAYS: u32 = 7;

/// Escape the four ICS-reserved characters. Backslash is substituted
/// first so later replacements cannot double-escape.
pub fn escape_text(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Derive the export filename from title and date, with filesystem-reserved
/// characters replaced by underscores.
pub fn export_filename(title: &str, date: NaiveDate) -> String {
    format!("{title} ({date}).ics")
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

fn date_value(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn utc_stamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

/// One exportable reminder: an all-day event plus a display alarm firing
/// `lead_days` days before the start.
#[derive(Debug, Clone)]
pub struct IcsReminder {
    pub title: String,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub lead_days: Option<u32>,
    /// Caller-supplied, globally unique per exported file.
    pub uid: String,
}

impl IcsReminder {
    /// Render with the generation timestamp taken at call time.
    pub fn render(&self) -> String {
        self.render_at(Utc::now())
    }

    /// Render with an explicit generation timestamp.
    ///
    /// Lines are joined with CR+LF regardless of host platform. The event
    /// spans the half-open range [date, date + 1) per the all-day
    /// convention.
    pub fn render_at(&self, now: DateTime<Utc>) -> String {
        let end = self.date.checked_add_days(Days::new(1)).unwrap_or(self.date);

        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//Pawcal//EN".to_string(),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", escape_text(&self.uid)),
            format!("DTSTAMP:{}", utc_stamp(now)),
            format!("SUMMARY:{}", escape_text(&self.title)),
            format!("DTSTART;VALUE=DATE:{}", date_value(self.date)),
            format!("DTEND;VALUE=DATE:{}", date_value(end)),
        ];

        if let Some(note) = self.note.as_deref() {
            let note = note.trim();
            if !note.is_empty() {
                lines.push(format!("DESCRIPTION:{}", escape_text(note)));
            }
        }

        let lead = self.lead_days.unwrap_or(DEFAULT_LEAD_DAYS);
        lines.push("BEGIN:VALARM".to_string());
        lines.push(format!("TRIGGER:-P{lead}D"));
        lines.push("ACTION:DISPLAY".to_string());
        lines.push(format!(
            "DESCRIPTION:{}",
            escape_text(&format!("Reminder: {}", self.title))
        ));
        lines.push("END:VALARM".to_string());
        lines.push("END:VEVENT".to_string());
        lines.push("END:VCALENDAR".to_string());

        lines.join("\r\n")
    }
}
