//! # Pawcal Core Library
//!
//! This library provides the core business logic for Pawcal, a local-only
//! pet-care reminder tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary; any GUI would be a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Recurrence & Status Engine**: pure date arithmetic that computes the
//!   next occurrence of a repeating care event and classifies events by due
//!   status relative to a reference day
//! - **Agenda**: tab classification (upcoming / overdue / history) and
//!   month grouping for display
//! - **ICS Export**: renders a single event as an all-day VCALENDAR block
//!   with a display alarm
//! - **Storage**: SQLite-based event storage and TOML-based settings
//!
//! ## Key Components
//!
//! - [`CareEvent`]: One care event for one pet
//! - [`next_occurrence`]: Recurrence rule arithmetic
//! - [`EventDb`]: Event persistence and the completion side effect
//! - [`IcsReminder`]: Calendar export serializer
//! - [`Settings`]: Application settings management

pub mod agenda;
pub mod error;
pub mod event;
pub mod ics;
pub mod recurrence;
pub mod status;
pub mod store;

pub use agenda::{filter_events, group_by_month, MonthGroup, Tab};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use event::{CareEvent, EventType, Pet, RepeatRule};
pub use ics::{export_filename, IcsReminder};
pub use recurrence::next_occurrence;
pub use status::{status_of, EventStatus};
pub use store::{CompletionOutcome, EventDb, Settings};
