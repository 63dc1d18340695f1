use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info};
use serde::Serialize;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::server::ApiError;
use crate::trivia::{AnswerCheckRequest, AnswerVerdict, TriviaOrchestrator};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: TriviaOrchestrator,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub fn router(orchestrator: TriviaOrchestrator) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/question", get(get_question))
        .route("/check-answer", post(check_answer));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(AppState { orchestrator })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Server is running",
    })
}

async fn get_question(State(state): State<AppState>) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state.orchestrator.generate_question().await?;

    Ok(Json(QuestionResponse {
        question: question.text,
    }))
}

async fn check_answer(
    State(state): State<AppState>,
    payload: Result<Json<AnswerCheckRequest>, JsonRejection>,
) -> Result<Json<AnswerVerdict>, ApiError> {
    let Json(request) = payload?;
    debug!(
        "Checking answer ({} chars) for question ({} chars)",
        request.answer.len(),
        request.question.len()
    );

    let verdict = state
        .orchestrator
        .check_answer(&request.question, &request.answer)
        .await?;

    Ok(Json(verdict))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    debug!("[{request_id}] {method} {path} started");
    let response = next.run(request).await;

    info!(
        "[{request_id}] {method} {path} -> {} in {}ms",
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
