//! Due-status classification for care events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::CareEvent;

/// Display status of an event relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Done,
    Overdue,
    DueSoon,
    Scheduled,
}

impl EventStatus {
    pub fn badge(&self) -> &'static str {
        match self {
            EventStatus::Done => "done",
            EventStatus::Overdue => "overdue",
            EventStatus::DueSoon => "due soon",
            EventStatus::Scheduled => "scheduled",
        }
    }
}

/// Whole civil days from `today` until `date`; negative once past.
///
/// Both sides are date-only values, so same-day events can never
/// misclassify on hour-of-day skew and no DST rounding is needed.
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Classify an event. Completion wins before any due-date math; a
/// completed event's date is never reinterpreted.
pub fn status_of(event: &CareEvent, today: NaiveDate, due_soon_threshold_days: u32) -> EventStatus {
    if event.is_done() {
        return EventStatus::Done;
    }
    let delta = days_until(today, event.date);
    if delta < 0 {
        EventStatus::Overdue
    } else if delta <= i64::from(due_soon_threshold_days) {
        EventStatus::DueSoon
    } else {
        EventStatus::Scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, Pet, RepeatRule};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_on(d: NaiveDate) -> CareEvent {
        CareEvent::new(Pet::Bonny, EventType::Bath, d, RepeatRule::None, None)
    }

    #[test]
    fn yesterday_is_overdue() {
        let today = date(2025, 1, 10);
        let event = event_on(date(2025, 1, 9));
        assert_eq!(status_of(&event, today, 7), EventStatus::Overdue);
    }

    #[test]
    fn same_day_is_due_soon() {
        let today = date(2025, 1, 10);
        let event = event_on(date(2025, 1, 10));
        assert_eq!(status_of(&event, today, 7), EventStatus::DueSoon);
    }

    #[test]
    fn threshold_day_is_due_soon() {
        let today = date(2025, 1, 10);
        let event = event_on(date(2025, 1, 17));
        assert_eq!(status_of(&event, today, 7), EventStatus::DueSoon);
    }

    #[test]
    fn beyond_threshold_is_scheduled() {
        let today = date(2025, 1, 10);
        let event = event_on(date(2025, 1, 20));
        assert_eq!(status_of(&event, today, 7), EventStatus::Scheduled);
    }

    #[test]
    fn done_wins_regardless_of_date() {
        let today = date(2025, 1, 10);
        let mut overdue = event_on(date(2020, 1, 1));
        overdue.done_at = Some(Utc::now());
        assert_eq!(status_of(&overdue, today, 7), EventStatus::Done);

        let mut future = event_on(date(2030, 1, 1));
        future.done_at = Some(Utc::now());
        assert_eq!(status_of(&future, today, 7), EventStatus::Done);
    }

    #[test]
    fn days_until_is_signed() {
        assert_eq!(days_until(date(2025, 1, 10), date(2025, 1, 9)), -1);
        assert_eq!(days_until(date(2025, 1, 10), date(2025, 1, 10)), 0);
        assert_eq!(days_until(date(2025, 1, 10), date(2025, 1, 20)), 10);
    }
}
