use crate::clock::TimeOfDay;
use crate::types::AvailabilityWindow;
use chrono::{Datelike, NaiveDate};

/// Every bookable start time within the window, one per hour boundary in
/// `[start_time, end_time)`, strictly increasing. A window whose start is
/// not before its end yields no slots; callers treat that as a tutor who
/// is currently unbookable.
pub fn generate_slots(window: &AvailabilityWindow) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();
    let mut current = window.start_time;
    while current < window.end_time {
        slots.push(current);
        current = current.next();
    }
    slots
}

/// Weekday filter, orthogonal to the hourly slots.
pub fn day_offerable(window: &AvailabilityWindow, date: NaiveDate) -> bool {
    window.allowed_days.contains(&date.weekday().into())
}
