//! ICS export command: render one event and write the file.

use std::path::PathBuf;

use pawcal_core::ics::{export_filename, IcsReminder};
use pawcal_core::store::{EventDb, Settings};

pub fn run(
    id: &str,
    dir: Option<String>,
    lead_days: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = EventDb::open()?;
    let event = db.get(id)?.ok_or(format!("Event not found: {id}"))?;
    let settings = Settings::load_or_default();

    let reminder = IcsReminder {
        title: event.title(),
        date: event.date,
        note: event.note.clone(),
        lead_days: lead_days.or(Some(settings.default_reminder_days)),
        uid: format!("{}@pawcal.local", event.id),
    };

    let dir = dir
        .or(settings.export_dir)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(export_filename(&event.title(), event.date));
    std::fs::write(&path, reminder.render())?;
    println!("Exported: {}", path.display());
    Ok(())
}
