//! Care event commands for CLI.

use chrono::Local;
use clap::Subcommand;
use pawcal_core::agenda::{filter_events, Tab};
use pawcal_core::event::{CareEvent, EventType, Pet, RepeatRule};
use pawcal_core::store::EventDb;

use super::parse_date;

#[derive(Subcommand)]
pub enum EventAction {
    /// Add a new care event ("both" adds one event per dog)
    Add {
        /// Pet code: bonny, nola or both
        #[arg(long)]
        pet: String,
        /// Event type code (see `event types`)
        #[arg(long = "type")]
        event_type: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Repeat rule: none, yearly, monthly, quarterly, six-weeks,
        /// every-3-days or twice-weekly
        #[arg(long, default_value = "none")]
        repeat: String,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },
    /// List events as JSON
    List {
        /// Filter by pet code (bonny or nola)
        #[arg(long)]
        pet: Option<String>,
        /// Restrict to a tab: upcoming, overdue or history
        #[arg(long)]
        tab: Option<String>,
    },
    /// Get event details
    Get {
        /// Event ID
        id: String,
    },
    /// Edit an event
    Edit {
        /// Event ID
        id: String,
        /// New pet code (bonny or nola)
        #[arg(long)]
        pet: Option<String>,
        /// New event type code
        #[arg(long = "type")]
        event_type: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New repeat rule
        #[arg(long)]
        repeat: Option<String>,
        /// New note (empty string clears it)
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
    /// Mark an event done (repeating events spawn their next occurrence)
    Done {
        /// Event ID
        id: String,
    },
    /// Clear the done mark
    Undo {
        /// Event ID
        id: String,
    },
    /// Move an event to a new due date
    Move {
        /// Event ID
        id: String,
        /// New due date (YYYY-MM-DD)
        date: String,
    },
    /// List known event type codes
    Types,
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EventAction::Add {
            pet,
            event_type,
            date,
            repeat,
            note,
        } => {
            let pet: Pet = pet.parse()?;
            let event_type: EventType = event_type.parse()?;
            let date = parse_date(&date)?;
            let repeat: RepeatRule = repeat.parse()?;

            let db = EventDb::open()?;
            let mut created = Vec::new();
            for target in pet.expand() {
                let event = CareEvent::new(target, event_type, date, repeat, note.clone());
                db.insert(&event)?;
                created.push(event);
            }
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        EventAction::List { pet, tab } => {
            let db = EventDb::open()?;
            let mut events = db.list()?;
            if let Some(pet) = pet {
                let pet = parse_single_pet(&pet)?;
                events.retain(|e| e.pet == pet);
            }
            if let Some(tab) = tab {
                let tab: Tab = tab.parse()?;
                let today = Local::now().date_naive();
                events = filter_events(&events, tab, None, today);
            }
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventAction::Get { id } => match EventDb::open()?.get(&id)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("Event not found: {id}"),
        },
        EventAction::Edit {
            id,
            pet,
            event_type,
            date,
            repeat,
            note,
        } => {
            let db = EventDb::open()?;
            let mut event = db.get(&id)?.ok_or(format!("Event not found: {id}"))?;

            if let Some(p) = pet {
                event.pet = parse_single_pet(&p)?;
            }
            if let Some(t) = event_type {
                event.event_type = t.parse()?;
            }
            if let Some(d) = date {
                event.date = parse_date(&d)?;
            }
            if let Some(r) = repeat {
                event.repeat = r.parse()?;
            }
            if let Some(n) = note {
                event.note = if n.is_empty() { None } else { Some(n) };
            }

            db.update(&event)?;
            println!("Event updated:");
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::Delete { id } => {
            EventDb::open()?.delete(&id)?;
            println!("Event deleted: {id}");
        }
        EventAction::Done { id } => {
            let mut db = EventDb::open()?;
            let outcome = db.complete(&id)?;
            println!("Event done: {id}");
            if let Some(ref next) = outcome.follow_up {
                println!("Next occurrence scheduled:");
                println!("{}", serde_json::to_string_pretty(next)?);
            }
        }
        EventAction::Undo { id } => {
            let event = EventDb::open()?.undo(&id)?;
            println!("Done mark cleared:");
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::Move { id, date } => {
            let date = parse_date(&date)?;
            let event = EventDb::open()?.reschedule(&id, date)?;
            println!("Event moved:");
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::Types => {
            for event_type in EventType::ALL {
                println!("{:<18} {}", event_type.code(), event_type.label());
            }
        }
    }
    Ok(())
}

/// An event (or filter) addresses exactly one pet; `both` is only a
/// fan-out marker for `event add`.
pub(crate) fn parse_single_pet(code: &str) -> Result<Pet, Box<dyn std::error::Error>> {
    let pet: Pet = code.parse()?;
    if pet == Pet::Both {
        return Err("expected a single pet (bonny or nola)".into());
    }
    Ok(pet)
}
