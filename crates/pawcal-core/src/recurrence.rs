//! Recurrence arithmetic over civil dates.
//!
//! All functions are total over well-typed input; the only `None` outcomes
//! are `RepeatRule::None` (no follow-up) and chrono's representable-range
//! edge, which no real schedule reaches.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::event::RepeatRule;

/// Next civil date for a rule, or `None` when the rule is `none`.
///
/// Month-based rules clamp to the target month's last day (Jan 31 + 1
/// month is Feb 28/29, never Mar 2). Yearly keeps month/day with plain
/// rollover: Feb 29 lands on Mar 1 in non-leap years.
pub fn next_occurrence(date: NaiveDate, rule: RepeatRule) -> Option<NaiveDate> {
    match rule {
        RepeatRule::None => None,
        RepeatRule::Yearly => add_one_year(date),
        RepeatRule::Monthly => date.checked_add_months(Months::new(1)),
        RepeatRule::Quarterly => date.checked_add_months(Months::new(3)),
        RepeatRule::SixWeeks => date.checked_add_days(Days::new(42)),
        RepeatRule::EveryThreeDays => date.checked_add_days(Days::new(3)),
        RepeatRule::TwiceWeekly => {
            date.checked_add_days(Days::new(twice_weekly_step(date.weekday())))
        }
    }
}

fn add_one_year(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year() + 1;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        // Only Feb 29 has no same-month/day successor; roll into Mar 1.
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

// Approximate Mon/Thu rhythm, not a precise two-per-week schedule:
// early-week dates jump 3 days, late-week dates jump 4.
fn twice_weekly_step(weekday: Weekday) -> u64 {
    match weekday {
        Weekday::Sun | Weekday::Mon | Weekday::Tue | Weekday::Wed => 3,
        Weekday::Thu | Weekday::Fri | Weekday::Sat => 4,
    }
}
