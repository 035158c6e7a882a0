use crate::clock::TimeOfDay;
use crate::error::Error;
use crate::lifecycle::ReviewSubmission;
use crate::types::{AvailabilityWindow, Review, Session, TutorProfile};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Fields a student supplies when booking a slot.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub teacher_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub title: String,
}

/// New placement for an existing session. The title travels with the
/// reschedule, matching the session-edit form.
#[derive(Debug, Clone)]
pub struct Reschedule {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub title: String,
}

/// Storage seam for the scheduling engine. Implementations own the
/// atomicity the engine's pure checks cannot provide: the conflict check
/// on a booking slot and the check on a session's review flag must each
/// happen inside the same critical section as the write they guard.
///
/// `now` and `today` are passed in rather than read from the ambient
/// clock so that decisions stay reproducible under test.
pub trait SchedulingBackend: Clone + Send + Sync + 'static {
    fn tutor(&self, teacher_id: Uuid) -> Result<TutorProfile, Error>;
    fn set_availability(&self, teacher_id: Uuid, name: String, availability: AvailabilityWindow);

    fn session(&self, session_id: Uuid) -> Result<Session, Error>;
    /// Active sessions of a teacher, ordered by date then start time.
    fn teacher_sessions(&self, teacher_id: Uuid) -> Vec<Session>;
    /// Active sessions of a student, ordered by date then start time.
    fn student_sessions(&self, student_id: Uuid) -> Vec<Session>;

    fn create_session(&self, new: NewSession, now: NaiveDateTime) -> Result<Session, Error>;
    fn reschedule_session(
        &self,
        session_id: Uuid,
        change: Reschedule,
        now: NaiveDateTime,
    ) -> Result<Session, Error>;
    /// Idempotent: cancelling an already-cancelled session is a no-op.
    fn cancel_session(&self, session_id: Uuid) -> Result<(), Error>;

    fn submit_review(
        &self,
        session_id: Uuid,
        submission: ReviewSubmission,
        today: NaiveDate,
    ) -> Result<Review, Error>;
    /// Ordered by creation time; empty when the teacher has none.
    fn teacher_reviews(&self, teacher_id: Uuid) -> Vec<Review>;
}
