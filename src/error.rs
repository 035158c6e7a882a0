use serde::Serialize;
use thiserror::Error;

/// Every rejection the engine can produce. None of these is fatal to the
/// process; they are ordinary outcomes surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Error {
    #[error("invalid time format: {0:?}")]
    InvalidTimeFormat(String),
    #[error("requested day is outside the tutor's available days")]
    DayNotAllowed,
    #[error("requested start time is not one of the tutor's slots")]
    SlotNotOffered,
    #[error("requested slot is in the past")]
    PastSlot,
    #[error("requested slot is already booked")]
    SlotTaken,
    #[error("session is not eligible for a review")]
    NotEligible,
    #[error("review is incomplete")]
    IncompleteReview,
    #[error("no such teacher or session")]
    NotFound,
}
