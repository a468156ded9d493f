//! Quiz API routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::data::QuestionStore;
use crate::generation::Tutor;
use crate::protocol::{
    ExplainRequest, ExplainResponse, HealthResponse, QuestionsQuery, QuestionsResponse,
    StudyGuideRequest, StudyGuideResponse, TotalCountResponse,
};
use crate::sampler;

use super::error::ApiError;

/// State shared by every handler. Read-only after startup.
pub struct AppState {
    pub store: QuestionStore,
    pub tutor: Tutor,
}

impl AppState {
    pub fn new(store: QuestionStore, tutor: Tutor) -> Self {
        Self { store, tutor }
    }
}

pub fn quiz_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/questions", get(questions_handler))
        .route("/explain", post(explain_handler))
        .route("/study-guide", post(study_guide_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn questions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Response, ApiError> {
    if query.wants_total_count() {
        let total_count = state.store.len();
        return Ok(Json(TotalCountResponse { total_count }).into_response());
    }

    let count = query.parse_count().map_err(ApiError::BadRequest)?;
    let jurisdiction = query.parse_state().map_err(ApiError::BadRequest)?;

    let count = usize::try_from(count.max(0)).unwrap_or(0);
    let questions = sampler::sample(&state.store, count, jurisdiction);
    tracing::debug!(
        requested = count,
        served = questions.len(),
        state = ?jurisdiction,
        "sampled quiz"
    );

    Ok(Json(QuestionsResponse { questions }).into_response())
}

async fn explain_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let explanation = state
        .tutor
        .explain(&request.question, &request.options, &request.correct_answer)
        .await
        .map_err(ApiError::from_explain)?;

    Ok(Json(ExplainResponse { explanation }))
}

async fn study_guide_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StudyGuideRequest>, JsonRejection>,
) -> Result<Json<StudyGuideResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let guide = state
        .tutor
        .study_guide(&request.wrong_questions, request.score, request.total_questions)
        .await
        .map_err(ApiError::from_study_guide)?;

    Ok(Json(StudyGuideResponse {
        study_guide: guide.text,
        questions_processed: guide.questions_processed,
        total_wrong_questions: guide.total_wrong_questions,
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        questions: state.store.len(),
    })
}
