use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::obligation::{Obligation, RecurringFrequency};

/// Decides whether a recurring obligation falls due on the given local
/// calendar date.
///
/// Pure and memoryless: the predicate is re-evaluated on every processing
/// pass, so an obligation that matches fires on each pass run while the
/// calendar still matches. Months shorter than a monthly/yearly target day
/// never match that month; there is no end-of-month clamping.
pub fn is_due(obligation: &Obligation, today: NaiveDate) -> bool {
    match obligation.frequency() {
        Some(RecurringFrequency::Weekly) => obligation
            .recurring_day
            .as_deref()
            .is_some_and(|day| day.trim().eq_ignore_ascii_case(weekday_name(today.weekday()))),
        Some(RecurringFrequency::Monthly) => {
            obligation.recurring_day_of_month() == Some(today.day())
        }
        Some(RecurringFrequency::Yearly) => {
            obligation.recurring_day_of_month() == Some(today.day())
                && obligation.recurring_month() == Some(today.month())
        }
        None => false,
    }
}

/// Lowercase full English weekday name, the spelling the mobile forms store.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
