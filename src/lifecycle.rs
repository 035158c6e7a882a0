use crate::error::Error;
use crate::types::{Session, SessionStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a student submits against a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub stars: u8,
    pub text: String,
    pub student_name: String,
}

/// "Completed" is never stored; it is derived from a scheduled session
/// whose date has passed. Every call site shares this one definition of
/// the boundary so that `date == today` is uniformly not yet completed.
pub fn is_completed(session: &Session, today: NaiveDate) -> bool {
    session.status == SessionStatus::Scheduled && session.date < today
}

/// A session may receive exactly one review, once it has completed.
pub fn can_review(session: &Session, today: NaiveDate) -> bool {
    is_completed(session, today) && !session.is_reviewed
}

/// The gate the store consults before persisting a review. Eligibility is
/// checked before completeness, so an ineligible session reports
/// `NotEligible` even when the submission itself is also malformed.
pub fn check_review(
    session: &Session,
    submission: &ReviewSubmission,
    today: NaiveDate,
) -> Result<(), Error> {
    if !can_review(session, today) {
        return Err(Error::NotEligible);
    }
    if !(1..=5).contains(&submission.stars)
        || submission.text.trim().is_empty()
        || session.title.trim().is_empty()
    {
        return Err(Error::IncompleteReview);
    }
    Ok(())
}
