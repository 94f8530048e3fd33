//! Domain model: pets, care event types, repeat rules and the event record.
//!
//! Pets and event types are closed enumerations with short codes for the
//! CLI/storage boundary and display labels for the agenda view. Unknown
//! codes are rejected at parse time rather than producing blank output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// A care subject. `Both` is a fan-out marker used when adding an event
/// for the whole household; stored events always name a single pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pet {
    Bonny,
    Nola,
    Both,
}

impl Pet {
    pub fn code(&self) -> &'static str {
        match self {
            Pet::Bonny => "bonny",
            Pet::Nola => "nola",
            Pet::Both => "both",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pet::Bonny => "Bonny",
            Pet::Nola => "Nola",
            Pet::Both => "Bonny + Nola",
        }
    }

    /// The concrete pets an event addition targets.
    pub fn expand(&self) -> Vec<Pet> {
        match self {
            Pet::Both => vec![Pet::Bonny, Pet::Nola],
            single => vec![*single],
        }
    }
}

impl FromStr for Pet {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bonny" => Ok(Pet::Bonny),
            "nola" => Ok(Pet::Nola),
            "both" => Ok(Pet::Both),
            other => Err(ValidationError::UnknownPet(other.to_string())),
        }
    }
}

/// Type of care event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Vaccination,
    OrderFleaCollar,
    Deworming,
    Bath,
    OrderFood,
    OrderDeworming,
    OrderWormTest,
    WormTest,
    MedkitCheck,
    OrderMedkit,
    OrderPawBalm,
    OrderNoseBalm,
    ApplyPawBalm,
    ApplyNoseBalm,
    BloodTest,
    NailTrim,
}

impl EventType {
    /// Every known event type, in display order.
    pub const ALL: [EventType; 16] = [
        EventType::Vaccination,
        EventType::OrderFleaCollar,
        EventType::Deworming,
        EventType::Bath,
        EventType::OrderFood,
        EventType::OrderDeworming,
        EventType::OrderWormTest,
        EventType::WormTest,
        EventType::MedkitCheck,
        EventType::OrderMedkit,
        EventType::OrderPawBalm,
        EventType::OrderNoseBalm,
        EventType::ApplyPawBalm,
        EventType::ApplyNoseBalm,
        EventType::BloodTest,
        EventType::NailTrim,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EventType::Vaccination => "vaccination",
            EventType::OrderFleaCollar => "order_flea_collar",
            EventType::Deworming => "deworming",
            EventType::Bath => "bath",
            EventType::OrderFood => "order_food",
            EventType::OrderDeworming => "order_deworming",
            EventType::OrderWormTest => "order_worm_test",
            EventType::WormTest => "worm_test",
            EventType::MedkitCheck => "medkit_check",
            EventType::OrderMedkit => "order_medkit",
            EventType::OrderPawBalm => "order_paw_balm",
            EventType::OrderNoseBalm => "order_nose_balm",
            EventType::ApplyPawBalm => "apply_paw_balm",
            EventType::ApplyNoseBalm => "apply_nose_balm",
            EventType::BloodTest => "blood_test",
            EventType::NailTrim => "nail_trim",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::Vaccination => "Vaccination",
            EventType::OrderFleaCollar => "Order flea collar",
            EventType::Deworming => "Deworming",
            EventType::Bath => "Bath",
            EventType::OrderFood => "Order food",
            EventType::OrderDeworming => "Order deworming",
            EventType::OrderWormTest => "Order worm test",
            EventType::WormTest => "Worm test",
            EventType::MedkitCheck => "First-aid kit check",
            EventType::OrderMedkit => "Order first-aid supplies",
            EventType::OrderPawBalm => "Order paw balm",
            EventType::OrderNoseBalm => "Order nose balm",
            EventType::ApplyPawBalm => "Apply paw balm",
            EventType::ApplyNoseBalm => "Apply nose balm",
            EventType::BloodTest => "Blood test",
            EventType::NailTrim => "Nail check and trim",
        }
    }
}

impl FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .iter()
            .find(|t| t.code() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownEventType(s.to_string()))
    }
}

/// Recurrence rule for a care event. Exactly one rule per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatRule {
    None,
    Yearly,
    Monthly,
    Quarterly,
    SixWeeks,
    #[serde(rename = "every-3-days")]
    EveryThreeDays,
    TwiceWeekly,
}

impl RepeatRule {
    pub fn code(&self) -> &'static str {
        match self {
            RepeatRule::None => "none",
            RepeatRule::Yearly => "yearly",
            RepeatRule::Monthly => "monthly",
            RepeatRule::Quarterly => "quarterly",
            RepeatRule::SixWeeks => "six-weeks",
            RepeatRule::EveryThreeDays => "every-3-days",
            RepeatRule::TwiceWeekly => "twice-weekly",
        }
    }

    /// Agenda display label; empty for one-off events.
    pub fn label(&self) -> &'static str {
        match self {
            RepeatRule::None => "",
            RepeatRule::Yearly => "yearly",
            RepeatRule::Monthly => "monthly",
            RepeatRule::Quarterly => "quarterly",
            RepeatRule::SixWeeks => "every 6 weeks",
            RepeatRule::EveryThreeDays => "every 3 days",
            RepeatRule::TwiceWeekly => "twice a week",
        }
    }
}

impl FromStr for RepeatRule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RepeatRule::None),
            "yearly" => Ok(RepeatRule::Yearly),
            "monthly" => Ok(RepeatRule::Monthly),
            "quarterly" => Ok(RepeatRule::Quarterly),
            "six-weeks" => Ok(RepeatRule::SixWeeks),
            "every-3-days" => Ok(RepeatRule::EveryThreeDays),
            "twice-weekly" => Ok(RepeatRule::TwiceWeekly),
            other => Err(ValidationError::UnknownRepeatRule(other.to_string())),
        }
    }
}

/// One care event for one pet.
///
/// The engine never mutates a record; it computes derived values (status,
/// next date, export text) from records handed to it. `date` is a civil
/// date interpreted in the local timezone only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareEvent {
    pub id: String,
    pub pet: Pet,
    pub event_type: EventType,
    pub date: NaiveDate,
    pub repeat: RepeatRule,
    #[serde(default)]
    pub note: Option<String>,
    pub done_at: Option<DateTime<Utc>>,
}

impl CareEvent {
    pub fn new(
        pet: Pet,
        event_type: EventType,
        date: NaiveDate,
        repeat: RepeatRule,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pet,
            event_type,
            date,
            repeat,
            note,
            done_at: None,
        }
    }

    /// Completion is determined before any due-date math.
    pub fn is_done(&self) -> bool {
        self.done_at.is_some()
    }

    /// Display title, also used as the export SUMMARY.
    pub fn title(&self) -> String {
        format!("{} — {}", self.pet.label(), self.event_type.label())
    }
}
