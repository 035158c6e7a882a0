use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::backend::{NewSession, Reschedule, SchedulingBackend};
use crate::error::Error;
use crate::lifecycle::ReviewSubmission;
use crate::types::{
    AvailabilityWindow, Review, Session, SessionStatus, TutorProfile, Weekday,
};

pub struct MockSchedulingBackendInner {
    pub success: AtomicBool,
    pub calls_to_tutor: AtomicU64,
    pub calls_to_set_availability: AtomicU64,
    pub calls_to_session: AtomicU64,
    pub calls_to_teacher_sessions: AtomicU64,
    pub calls_to_student_sessions: AtomicU64,
    pub calls_to_create_session: AtomicU64,
    pub calls_to_reschedule_session: AtomicU64,
    pub calls_to_cancel_session: AtomicU64,
    pub calls_to_submit_review: AtomicU64,
    pub calls_to_teacher_reviews: AtomicU64,
    pub tutor: Mutex<Option<TutorProfile>>,
    pub session: Mutex<Option<Session>>,
}

#[derive(Clone)]
pub struct MockSchedulingBackend(pub Arc<MockSchedulingBackendInner>);

impl MockSchedulingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockSchedulingBackendInner {
            success: AtomicBool::new(true),
            calls_to_tutor: AtomicU64::default(),
            calls_to_set_availability: AtomicU64::default(),
            calls_to_session: AtomicU64::default(),
            calls_to_teacher_sessions: AtomicU64::default(),
            calls_to_student_sessions: AtomicU64::default(),
            calls_to_create_session: AtomicU64::default(),
            calls_to_reschedule_session: AtomicU64::default(),
            calls_to_cancel_session: AtomicU64::default(),
            calls_to_submit_review: AtomicU64::default(),
            calls_to_teacher_reviews: AtomicU64::default(),
            tutor: Mutex::default(),
            session: Mutex::default(),
        }))
    }

    fn result(&self, rejection: Error) -> Result<(), Error> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(rejection),
        }
    }
}

pub fn example_window() -> AvailabilityWindow {
    AvailabilityWindow {
        allowed_days: [Weekday::Monday, Weekday::Friday].into_iter().collect(),
        start_time: "8 AM".parse().unwrap(),
        end_time: "11 AM".parse().unwrap(),
    }
}

pub fn example_session(teacher_id: Uuid, student_id: Uuid) -> Session {
    let start_time: crate::clock::TimeOfDay = "9 AM".parse().unwrap();
    Session {
        id: Uuid::new_v4(),
        teacher_id,
        student_id,
        date: "2025-03-10".parse().unwrap(),
        start_time,
        end_time: start_time.next(),
        title: "Algebra".into(),
        status: SessionStatus::Scheduled,
        is_reviewed: false,
    }
}

fn example_review(session: &Session, submission: ReviewSubmission) -> Review {
    Review {
        session_id: session.id,
        teacher_id: session.teacher_id,
        student_id: session.student_id,
        stars: submission.stars,
        text: submission.text,
        student_name: submission.student_name,
        teacher_name: "Ada".into(),
        session_title: session.title.clone(),
        created_at: chrono::Utc::now(),
    }
}

impl SchedulingBackend for MockSchedulingBackend {
    fn tutor(&self, _teacher_id: Uuid) -> Result<TutorProfile, Error> {
        self.0.calls_to_tutor.fetch_add(1, Ordering::SeqCst);
        self.0.tutor.lock().unwrap().clone().ok_or(Error::NotFound)
    }

    fn set_availability(&self, teacher_id: Uuid, name: String, availability: AvailabilityWindow) {
        self.0
            .calls_to_set_availability
            .fetch_add(1, Ordering::SeqCst);
        *self.0.tutor.lock().unwrap() = Some(TutorProfile {
            id: teacher_id,
            name,
            availability,
        });
    }

    fn session(&self, _session_id: Uuid) -> Result<Session, Error> {
        self.0.calls_to_session.fetch_add(1, Ordering::SeqCst);
        self.0.session.lock().unwrap().clone().ok_or(Error::NotFound)
    }

    fn teacher_sessions(&self, _teacher_id: Uuid) -> Vec<Session> {
        self.0
            .calls_to_teacher_sessions
            .fetch_add(1, Ordering::SeqCst);
        self.0.session.lock().unwrap().clone().into_iter().collect()
    }

    fn student_sessions(&self, _student_id: Uuid) -> Vec<Session> {
        self.0
            .calls_to_student_sessions
            .fetch_add(1, Ordering::SeqCst);
        self.0.session.lock().unwrap().clone().into_iter().collect()
    }

    fn create_session(&self, new: NewSession, _now: NaiveDateTime) -> Result<Session, Error> {
        self.0
            .calls_to_create_session
            .fetch_add(1, Ordering::SeqCst);
        self.result(Error::SlotTaken)?;
        let mut session = example_session(new.teacher_id, new.student_id);
        session.date = new.date;
        session.start_time = new.start_time;
        session.end_time = new.start_time.next();
        session.title = new.title;
        Ok(session)
    }

    fn reschedule_session(
        &self,
        session_id: Uuid,
        change: Reschedule,
        _now: NaiveDateTime,
    ) -> Result<Session, Error> {
        self.0
            .calls_to_reschedule_session
            .fetch_add(1, Ordering::SeqCst);
        self.result(Error::SlotTaken)?;
        let mut session = self
            .0
            .session
            .lock()
            .unwrap()
            .clone()
            .ok_or(Error::NotFound)?;
        session.id = session_id;
        session.date = change.date;
        session.start_time = change.start_time;
        session.end_time = change.start_time.next();
        session.title = change.title;
        Ok(session)
    }

    fn cancel_session(&self, _session_id: Uuid) -> Result<(), Error> {
        self.0
            .calls_to_cancel_session
            .fetch_add(1, Ordering::SeqCst);
        self.result(Error::NotFound)
    }

    fn submit_review(
        &self,
        _session_id: Uuid,
        submission: ReviewSubmission,
        _today: NaiveDate,
    ) -> Result<Review, Error> {
        self.0.calls_to_submit_review.fetch_add(1, Ordering::SeqCst);
        self.result(Error::NotEligible)?;
        let session = self
            .0
            .session
            .lock()
            .unwrap()
            .clone()
            .ok_or(Error::NotFound)?;
        Ok(example_review(&session, submission))
    }

    fn teacher_reviews(&self, _teacher_id: Uuid) -> Vec<Review> {
        self.0
            .calls_to_teacher_reviews
            .fetch_add(1, Ordering::SeqCst);
        Vec::new()
    }
}
