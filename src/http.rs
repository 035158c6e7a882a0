use crate::backend::{NewSession, Reschedule, SchedulingBackend};
use crate::clock::TimeOfDay;
use crate::configuration::Configuration;
use crate::error::Error;
use crate::lifecycle::ReviewSubmission;
use crate::types::{AvailabilityWindow, Session};
use crate::AppState;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

/// Opaque caller identity supplied by the external identity collaborator.
/// The engine trusts it and never authenticates.
#[derive(Debug, Clone, Copy)]
struct CallerId(Uuid);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityUpdate {
    name: String,
    availability: AvailabilityWindow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateSessionRequest {
    teacher_id: Uuid,
    date: NaiveDate,
    start_time: TimeOfDay,
    title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RescheduleRequest {
    date: NaiveDate,
    start_time: TimeOfDay,
    title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReviewRequest {
    stars: u8,
    text: String,
    student_name: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidTimeFormat(_) => StatusCode::BAD_REQUEST,
            Error::SlotTaken | Error::NotEligible => StatusCode::CONFLICT,
            Error::DayNotAllowed
            | Error::SlotNotOffered
            | Error::PastSlot
            | Error::IncompleteReview => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}

pub async fn start_server<T: SchedulingBackend, C: Configuration>(state: AppState<T>, config: C) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/tutors/:teacher_id/availability", get(get_availability))
        .route("/tutors/:teacher_id/sessions", get(get_teacher_sessions))
        .route("/tutors/:teacher_id/reviews", get(get_teacher_reviews))
        .route("/students/:student_id/sessions", get(get_student_sessions));

    let identified = Router::new()
        .route("/tutors/:teacher_id", put(put_availability))
        .route("/sessions", post(create_session))
        .route(
            "/sessions/:session_id",
            put(reschedule_session).delete(cancel_session),
        )
        .route("/sessions/:session_id/reviews", post(submit_review))
        .route_layer(middleware::from_fn(caller_identity));

    let app = Router::new()
        .merge(public)
        .merge(identified)
        .with_state(state)
        .layer(cors);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap();
    info!(%address, "scheduling service listening");
    axum::serve(listener, app).await.unwrap();
}

async fn caller_identity(
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let caller = request
        .headers()
        .get("x-user-id")
        .ok_or((StatusCode::UNAUTHORIZED, "Missing caller identity".to_string()))?
        .to_str()
        .ok()
        .and_then(|value| value.parse::<Uuid>().ok())
        .ok_or((StatusCode::UNAUTHORIZED, "Malformed caller identity".to_string()))?;
    request.extensions_mut().insert(CallerId(caller));
    Ok(next.run(request).await)
}

fn is_party(session: &Session, caller: CallerId) -> bool {
    session.teacher_id == caller.0 || session.student_id == caller.0
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        "Caller is not a party to this session".to_string(),
    )
        .into_response()
}

async fn get_availability<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Path(teacher_id): Path<Uuid>,
) -> Response {
    match state.scheduler.tutor(teacher_id) {
        Ok(tutor) => Json(tutor).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn put_availability<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Extension(caller): Extension<CallerId>,
    Path(teacher_id): Path<Uuid>,
    Json(update): Json<AvailabilityUpdate>,
) -> Response {
    if caller.0 != teacher_id {
        return forbidden();
    }
    state
        .scheduler
        .set_availability(teacher_id, update.name, update.availability);
    (StatusCode::OK, "Availability updated".to_string()).into_response()
}

async fn get_teacher_sessions<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Path(teacher_id): Path<Uuid>,
) -> Json<Vec<Session>> {
    Json(state.scheduler.teacher_sessions(teacher_id))
}

async fn get_student_sessions<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Path(student_id): Path<Uuid>,
) -> Json<Vec<Session>> {
    Json(state.scheduler.student_sessions(student_id))
}

async fn create_session<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Extension(caller): Extension<CallerId>,
    Json(request): Json<CreateSessionRequest>,
) -> Response {
    let new = NewSession {
        teacher_id: request.teacher_id,
        student_id: caller.0,
        date: request.date,
        start_time: request.start_time,
        title: request.title,
    };
    match state
        .scheduler
        .create_session(new, Local::now().naive_local())
    {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn reschedule_session<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Extension(caller): Extension<CallerId>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RescheduleRequest>,
) -> Response {
    let session = match state.scheduler.session(session_id) {
        Ok(session) => session,
        Err(err) => return err.into_response(),
    };
    if !is_party(&session, caller) {
        return forbidden();
    }
    let change = Reschedule {
        date: request.date,
        start_time: request.start_time,
        title: request.title,
    };
    match state
        .scheduler
        .reschedule_session(session_id, change, Local::now().naive_local())
    {
        Ok(session) => Json(session).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn cancel_session<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Extension(caller): Extension<CallerId>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let session = match state.scheduler.session(session_id) {
        Ok(session) => session,
        Err(err) => return err.into_response(),
    };
    if !is_party(&session, caller) {
        return forbidden();
    }
    match state.scheduler.cancel_session(session_id) {
        Ok(()) => (StatusCode::OK, "Session cancelled".to_string()).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn submit_review<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Extension(caller): Extension<CallerId>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ReviewRequest>,
) -> Response {
    let session = match state.scheduler.session(session_id) {
        Ok(session) => session,
        Err(err) => return err.into_response(),
    };
    // Only the student who attended may review.
    if session.student_id != caller.0 {
        return forbidden();
    }
    let submission = ReviewSubmission {
        stars: request.stars,
        text: request.text,
        student_name: request.student_name,
    };
    match state
        .scheduler
        .submit_review(session_id, submission, Local::now().date_naive())
    {
        Ok(review) => (StatusCode::CREATED, Json(review)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_teacher_reviews<T: SchedulingBackend>(
    State(state): State<AppState<T>>,
    Path(teacher_id): Path<Uuid>,
) -> Json<Vec<crate::types::Review>> {
    Json(state.scheduler.teacher_reviews(teacher_id))
}
