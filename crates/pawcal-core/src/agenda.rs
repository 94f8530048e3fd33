//! Agenda classification: tabs, pet filter and month grouping.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::event::{CareEvent, Pet};
use crate::status::days_until;

/// Agenda tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Upcoming,
    Overdue,
    History,
}

impl FromStr for Tab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Tab::Upcoming),
            "overdue" => Ok(Tab::Overdue),
            "history" => Ok(Tab::History),
            other => Err(ValidationError::UnknownTab(other.to_string())),
        }
    }
}

/// Filter and order events for one tab.
///
/// Upcoming: open events due today or later, soonest first. Overdue: open
/// events past due, oldest first. History: completed events, most recently
/// completed first.
pub fn filter_events(
    events: &[CareEvent],
    tab: Tab,
    pet: Option<Pet>,
    today: NaiveDate,
) -> Vec<CareEvent> {
    let mut out: Vec<CareEvent> = events
        .iter()
        .filter(|e| pet.map_or(true, |p| e.pet == p))
        .cloned()
        .collect();

    match tab {
        Tab::Upcoming => {
            out.retain(|e| !e.is_done() && days_until(today, e.date) >= 0);
            out.sort_by_key(|e| e.date);
        }
        Tab::Overdue => {
            out.retain(|e| !e.is_done() && days_until(today, e.date) < 0);
            out.sort_by_key(|e| e.date);
        }
        Tab::History => {
            out.retain(|e| e.is_done());
            out.sort_by(|a, b| b.done_at.cmp(&a.done_at));
        }
    }
    out
}

/// One month header and its events, in the order they were given.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup {
    pub header: String,
    pub events: Vec<CareEvent>,
}

/// Group consecutive events by calendar month of their due date.
pub fn group_by_month(events: &[CareEvent]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    let mut current: Option<(i32, u32)> = None;

    for event in events {
        let key = (event.date.year(), event.date.month());
        if current != Some(key) {
            current = Some(key);
            groups.push(MonthGroup {
                header: event.date.format("%B %Y").to_string(),
                events: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.events.push(event.clone());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, RepeatRule};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(pet: Pet, d: NaiveDate) -> CareEvent {
        CareEvent::new(pet, EventType::Bath, d, RepeatRule::None, None)
    }

    fn done_event(pet: Pet, d: NaiveDate, done_offset_secs: i64) -> CareEvent {
        let mut e = event(pet, d);
        e.done_at = Some(Utc::now() + chrono::Duration::seconds(done_offset_secs));
        e
    }

    #[test]
    fn upcoming_keeps_open_future_events_sorted() {
        let today = date(2025, 5, 10);
        let events = vec![
            event(Pet::Bonny, date(2025, 6, 1)),
            event(Pet::Nola, date(2025, 5, 10)),
            event(Pet::Bonny, date(2025, 5, 1)),
            done_event(Pet::Bonny, date(2025, 5, 20), 0),
        ];
        let upcoming = filter_events(&events, Tab::Upcoming, None, today);
        let dates: Vec<NaiveDate> = upcoming.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2025, 5, 10), date(2025, 6, 1)]);
    }

    #[test]
    fn overdue_keeps_open_past_events() {
        let today = date(2025, 5, 10);
        let events = vec![
            event(Pet::Bonny, date(2025, 5, 9)),
            event(Pet::Nola, date(2025, 5, 10)),
            done_event(Pet::Bonny, date(2025, 4, 1), 0),
        ];
        let overdue = filter_events(&events, Tab::Overdue, None, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].date, date(2025, 5, 9));
    }

    #[test]
    fn history_sorts_by_completion_desc() {
        let today = date(2025, 5, 10);
        let older = done_event(Pet::Bonny, date(2025, 4, 1), -100);
        let newer = done_event(Pet::Nola, date(2025, 3, 1), 0);
        let events = vec![older.clone(), newer.clone(), event(Pet::Bonny, date(2025, 5, 1))];
        let history = filter_events(&events, Tab::History, None, today);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, newer.id);
        assert_eq!(history[1].id, older.id);
    }

    #[test]
    fn pet_filter_applies() {
        let today = date(2025, 5, 10);
        let events = vec![
            event(Pet::Bonny, date(2025, 5, 12)),
            event(Pet::Nola, date(2025, 5, 13)),
        ];
        let only_nola = filter_events(&events, Tab::Upcoming, Some(Pet::Nola), today);
        assert_eq!(only_nola.len(), 1);
        assert_eq!(only_nola[0].pet, Pet::Nola);
    }

    #[test]
    fn month_grouping_splits_on_month_change() {
        let events = vec![
            event(Pet::Bonny, date(2025, 5, 12)),
            event(Pet::Nola, date(2025, 5, 30)),
            event(Pet::Bonny, date(2025, 6, 2)),
        ];
        let groups = group_by_month(&events);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].header, "May 2025");
        assert_eq!(groups[0].events.len(), 2);
        assert_eq!(groups[1].header, "June 2025");
        assert_eq!(groups[1].events.len(), 1);
    }
}
