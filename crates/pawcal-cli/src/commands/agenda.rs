//! Month-grouped agenda view.

use chrono::Local;
use pawcal_core::agenda::{filter_events, group_by_month, Tab};
use pawcal_core::status::status_of;
use pawcal_core::store::{EventDb, Settings};

pub fn run(tab: &str, pet: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let tab: Tab = tab.parse()?;
    let pet = pet.map(super::event::parse_single_pet).transpose()?;

    let db = EventDb::open()?;
    let settings = Settings::load_or_default();
    let today = Local::now().date_naive();
    let events = filter_events(&db.list()?, tab, pet, today);

    if events.is_empty() {
        println!("{}", empty_text(tab));
        return Ok(());
    }

    for group in group_by_month(&events) {
        println!("{}", group.header);
        for event in &group.events {
            let status = status_of(event, today, settings.default_reminder_days);
            println!("  {}  {}  [{}]", event.date, event.title(), status.badge());
            println!("      id: {}", event.id);
            if !event.repeat.label().is_empty() {
                println!("      repeat: {}", event.repeat.label());
            }
            if let Some(note) = event.note.as_deref() {
                println!("      note: {note}");
            }
            if tab == Tab::History {
                if let Some(done_at) = event.done_at {
                    println!("      done: {}", done_at.format("%Y-%m-%d %H:%M UTC"));
                }
            }
        }
    }
    Ok(())
}

fn empty_text(tab: Tab) -> &'static str {
    match tab {
        Tab::Upcoming => "No upcoming events. Add one with `event add`.",
        Tab::Overdue => "Nothing overdue.",
        Tab::History => "History is empty.",
    }
}
