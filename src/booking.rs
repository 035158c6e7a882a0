use crate::clock::TimeOfDay;
use crate::error::Error;
use crate::slots::{day_offerable, generate_slots};
use crate::types::{AvailabilityWindow, Session, SessionStatus};
use chrono::{NaiveDate, NaiveDateTime};

/// A booking attempt before it becomes a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
}

impl Candidate {
    fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time.as_naive_time())
    }
}

/// Decides whether a candidate booking is acceptable against the tutor's
/// availability window and current sessions. Checks run in a fixed order
/// and the first failure wins. This is a pure decision over the data the
/// caller already fetched; the store re-applies the conflict check under
/// its lock before committing, since the fetched session set may be stale.
pub fn validate(
    candidate: &Candidate,
    window: &AvailabilityWindow,
    existing: &[Session],
    now: NaiveDateTime,
) -> Result<(), Error> {
    if !day_offerable(window, candidate.date) {
        return Err(Error::DayNotAllowed);
    }
    if !generate_slots(window).contains(&candidate.start_time) {
        return Err(Error::SlotNotOffered);
    }
    if candidate.datetime() < now {
        return Err(Error::PastSlot);
    }
    let taken = existing.iter().any(|session| {
        session.status == SessionStatus::Scheduled
            && session.date == candidate.date
            && session.start_time == candidate.start_time
    });
    if taken {
        return Err(Error::SlotTaken);
    }
    Ok(())
}
