//! Integration tests for the full event lifecycle.
//!
//! Drives a file-backed store through the add, classify, complete,
//! follow-up, undo and export flow.

use chrono::{NaiveDate, Utc};
use pawcal_core::{
    filter_events, status_of, CareEvent, DatabaseError, EventDb, EventStatus, EventType,
    IcsReminder, Pet, RepeatRule, Tab,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open_db(dir: &tempfile::TempDir) -> EventDb {
    EventDb::open_at(&dir.path().join("pawcal.db")).unwrap()
}

#[test]
fn add_classify_complete_undo() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = open_db(&dir);
    let today = date(2025, 3, 1);

    let vaccination = CareEvent::new(
        Pet::Bonny,
        EventType::Vaccination,
        date(2025, 3, 3),
        RepeatRule::Yearly,
        Some("rabies booster".into()),
    );
    let overdue_bath = CareEvent::new(
        Pet::Nola,
        EventType::Bath,
        date(2025, 2, 20),
        RepeatRule::None,
        None,
    );
    db.insert(&vaccination).unwrap();
    db.insert(&overdue_bath).unwrap();

    // Classification against a fixed reference day.
    assert_eq!(status_of(&vaccination, today, 7), EventStatus::DueSoon);
    assert_eq!(status_of(&overdue_bath, today, 7), EventStatus::Overdue);

    let events = db.list().unwrap();
    assert_eq!(
        filter_events(&events, Tab::Upcoming, None, today).len(),
        1
    );
    assert_eq!(filter_events(&events, Tab::Overdue, None, today).len(), 1);
    assert!(filter_events(&events, Tab::History, None, today).is_empty());

    // Completing the yearly vaccination spawns next year's event.
    let outcome = db.complete(&vaccination.id).unwrap();
    let next = outcome.follow_up.unwrap();
    assert_eq!(next.date, date(2026, 3, 3));
    assert_eq!(next.repeat, RepeatRule::Yearly);
    assert_eq!(next.note.as_deref(), Some("rabies booster"));

    let events = db.list().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(filter_events(&events, Tab::History, None, today).len(), 1);

    // Undo clears the mark but the spawned event stays.
    db.undo(&vaccination.id).unwrap();
    let events = db.list().unwrap();
    assert_eq!(events.len(), 3);
    assert!(filter_events(&events, Tab::History, None, today).is_empty());
}

#[test]
fn reopening_the_store_preserves_events() {
    let dir = tempfile::tempdir().unwrap();
    let event = CareEvent::new(
        Pet::Nola,
        EventType::OrderFood,
        date(2025, 5, 1),
        RepeatRule::SixWeeks,
        None,
    );

    {
        let db = open_db(&dir);
        db.insert(&event).unwrap();
    }

    let db = open_db(&dir);
    let loaded = db.get(&event.id).unwrap().unwrap();
    assert_eq!(loaded.pet, Pet::Nola);
    assert_eq!(loaded.event_type, EventType::OrderFood);
    assert_eq!(loaded.repeat, RepeatRule::SixWeeks);
    assert_eq!(loaded.date, date(2025, 5, 1));
}

#[test]
fn completed_event_round_trips_done_at() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = open_db(&dir);
    let event = CareEvent::new(
        Pet::Bonny,
        EventType::NailTrim,
        date(2025, 4, 1),
        RepeatRule::None,
        None,
    );
    db.insert(&event).unwrap();

    let before = Utc::now();
    let outcome = db.complete(&event.id).unwrap();
    let done_at = outcome.completed.done_at.unwrap();
    assert!(done_at >= before);

    let loaded = db.get(&event.id).unwrap().unwrap();
    assert_eq!(loaded.done_at.map(|t| t.timestamp()), Some(done_at.timestamp()));
}

#[test]
fn export_renders_the_stored_event() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let event = CareEvent::new(
        Pet::Bonny,
        EventType::Vaccination,
        date(2025, 6, 15),
        RepeatRule::Yearly,
        Some("bring the passport, arrive early".into()),
    );
    db.insert(&event).unwrap();

    let loaded = db.get(&event.id).unwrap().unwrap();
    let reminder = IcsReminder {
        title: loaded.title(),
        date: loaded.date,
        note: loaded.note.clone(),
        lead_days: None,
        uid: format!("{}@pawcal.local", loaded.id),
    };
    let out = reminder.render();

    assert!(out.contains(&format!("UID:{}@pawcal.local", event.id)));
    assert!(out.contains("SUMMARY:Bonny — Vaccination"));
    assert!(out.contains("DTSTART;VALUE=DATE:20250615"));
    assert!(out.contains("DTEND;VALUE=DATE:20250616"));
    assert!(out.contains("DESCRIPTION:bring the passport\\, arrive early"));
    assert!(out.contains("TRIGGER:-P7D"));
}

#[test]
fn missing_ids_surface_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = open_db(&dir);

    assert!(matches!(
        db.complete("missing"),
        Err(DatabaseError::EventNotFound(_))
    ));
    assert!(matches!(
        db.reschedule("missing", date(2025, 1, 1)),
        Err(DatabaseError::EventNotFound(_))
    ));
    assert!(matches!(
        db.delete("missing"),
        Err(DatabaseError::EventNotFound(_))
    ));
}
