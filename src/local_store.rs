use crate::backend::{NewSession, Reschedule, SchedulingBackend};
use crate::booking::{validate, Candidate};
use crate::error::Error;
use crate::lifecycle::{check_review, ReviewSubmission};
use crate::types::{
    AvailabilityWindow, Review, Session, SessionStatus, TutorProfile, Weekday,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    tutors: HashMap<Uuid, TutorProfile>,
    sessions: HashMap<Uuid, Session>,
    reviews: Vec<Review>,
}

/// In-memory store. One mutex over all state, so every check-then-write
/// (slot conflict, review flag) commits as a single unit.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Arc<Mutex<Inner>>,
}

impl LocalStore {
    pub fn insert_example_tutor(&self) -> Uuid {
        let id = Uuid::new_v4();
        let availability = AvailabilityWindow {
            allowed_days: [
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ]
            .into_iter()
            .collect(),
            start_time: "8 AM".parse().expect("static label"),
            end_time: "8 PM".parse().expect("static label"),
        };
        self.set_availability(id, "Example Tutor".into(), availability);
        info!(%id, "inserted example tutor");
        id
    }

    fn sessions_where(&self, keep: impl Fn(&Session) -> bool) -> Vec<Session> {
        let inner = self.inner.lock().unwrap();
        let mut sessions: Vec<Session> = inner
            .sessions
            .values()
            .filter(|session| keep(session))
            .cloned()
            .collect();
        sessions.sort_by_key(|session| (session.date, session.start_time));
        sessions
    }
}

fn teacher_sessions_of(inner: &Inner, teacher_id: Uuid) -> Vec<Session> {
    inner
        .sessions
        .values()
        .filter(|session| session.teacher_id == teacher_id)
        .cloned()
        .collect()
}

impl SchedulingBackend for LocalStore {
    fn tutor(&self, teacher_id: Uuid) -> Result<TutorProfile, Error> {
        let inner = self.inner.lock().unwrap();
        inner.tutors.get(&teacher_id).cloned().ok_or(Error::NotFound)
    }

    fn set_availability(&self, teacher_id: Uuid, name: String, availability: AvailabilityWindow) {
        let mut inner = self.inner.lock().unwrap();
        inner.tutors.insert(
            teacher_id,
            TutorProfile {
                id: teacher_id,
                name,
                availability,
            },
        );
    }

    fn session(&self, session_id: Uuid) -> Result<Session, Error> {
        let inner = self.inner.lock().unwrap();
        inner.sessions.get(&session_id).cloned().ok_or(Error::NotFound)
    }

    fn teacher_sessions(&self, teacher_id: Uuid) -> Vec<Session> {
        self.sessions_where(|session| {
            session.teacher_id == teacher_id && session.status == SessionStatus::Scheduled
        })
    }

    fn student_sessions(&self, student_id: Uuid) -> Vec<Session> {
        self.sessions_where(|session| {
            session.student_id == student_id && session.status == SessionStatus::Scheduled
        })
    }

    fn create_session(&self, new: NewSession, now: NaiveDateTime) -> Result<Session, Error> {
        let mut inner = self.inner.lock().unwrap();
        let tutor = inner.tutors.get(&new.teacher_id).ok_or(Error::NotFound)?;

        let candidate = Candidate {
            date: new.date,
            start_time: new.start_time,
        };
        let existing = teacher_sessions_of(&inner, new.teacher_id);
        validate(&candidate, &tutor.availability, &existing, now)?;

        let session = Session {
            id: Uuid::new_v4(),
            teacher_id: new.teacher_id,
            student_id: new.student_id,
            date: new.date,
            start_time: new.start_time,
            end_time: new.start_time.next(),
            title: new.title,
            status: SessionStatus::Scheduled,
            is_reviewed: false,
        };
        inner.sessions.insert(session.id, session.clone());
        info!(session_id = %session.id, teacher_id = %session.teacher_id, "session booked");
        Ok(session)
    }

    fn reschedule_session(
        &self,
        session_id: Uuid,
        change: Reschedule,
        now: NaiveDateTime,
    ) -> Result<Session, Error> {
        let mut inner = self.inner.lock().unwrap();
        let current = inner.sessions.get(&session_id).ok_or(Error::NotFound)?.clone();
        // A cancelled session is gone from the active set.
        if current.status == SessionStatus::Cancelled {
            return Err(Error::NotFound);
        }
        // A completed session can no longer be moved.
        if current.date < now.date() {
            return Err(Error::PastSlot);
        }

        let tutor = inner.tutors.get(&current.teacher_id).ok_or(Error::NotFound)?;
        let candidate = Candidate {
            date: change.date,
            start_time: change.start_time,
        };
        let others: Vec<Session> = teacher_sessions_of(&inner, current.teacher_id)
            .into_iter()
            .filter(|session| session.id != session_id)
            .collect();
        validate(&candidate, &tutor.availability, &others, now)?;

        let session = inner.sessions.get_mut(&session_id).expect("checked above");
        session.date = change.date;
        session.start_time = change.start_time;
        session.end_time = change.start_time.next();
        session.title = change.title;
        info!(%session_id, "session rescheduled");
        Ok(session.clone())
    }

    fn cancel_session(&self, session_id: Uuid) -> Result<(), Error> {
        let mut inner = self.inner.lock().unwrap();
        let session = inner.sessions.get_mut(&session_id).ok_or(Error::NotFound)?;
        if session.status != SessionStatus::Cancelled {
            session.status = SessionStatus::Cancelled;
            info!(%session_id, "session cancelled");
        }
        Ok(())
    }

    fn submit_review(
        &self,
        session_id: Uuid,
        submission: ReviewSubmission,
        today: NaiveDate,
    ) -> Result<Review, Error> {
        let mut inner = self.inner.lock().unwrap();
        let session = inner.sessions.get(&session_id).ok_or(Error::NotFound)?.clone();
        check_review(&session, &submission, today)?;
        let teacher_name = inner
            .tutors
            .get(&session.teacher_id)
            .map(|tutor| tutor.name.clone())
            .unwrap_or_default();

        let review = Review {
            session_id,
            teacher_id: session.teacher_id,
            student_id: session.student_id,
            stars: submission.stars,
            text: submission.text,
            student_name: submission.student_name,
            teacher_name,
            session_title: session.title.clone(),
            created_at: Utc::now(),
        };
        inner.reviews.push(review.clone());
        inner
            .sessions
            .get_mut(&session_id)
            .expect("checked above")
            .is_reviewed = true;
        info!(%session_id, "review recorded");
        Ok(review)
    }

    fn teacher_reviews(&self, teacher_id: Uuid) -> Vec<Review> {
        let inner = self.inner.lock().unwrap();
        let mut reviews: Vec<Review> = inner
            .reviews
            .iter()
            .filter(|review| review.teacher_id == teacher_id)
            .cloned()
            .collect();
        reviews.sort_by_key(|review| review.created_at);
        reviews
    }
}
