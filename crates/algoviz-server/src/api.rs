//! HTTP API for the algorithm catalog and the current run.

use std::sync::Arc;

use algoviz_engine::{PlaybackSpeed, PlaybackStatus};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::error::{Error, Result};
use crate::models::Algorithm;
use crate::server::AppState;
use crate::session::{Control, RunFrame, RunStatus, StepDirection};

/// Build the API router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        // Catalog
        .route("/api/algorithms", get(list_algorithms))
        .route("/api/algorithms/{id}", get(get_algorithm))
        // Current run
        .route("/api/run", get(get_run).post(create_run))
        .route("/api/run/trace", get(get_trace))
        .route("/api/run/frame", get(get_frame))
        // Playback
        .route("/api/run/play", post(play))
        .route("/api/run/pause", post(pause))
        .route("/api/run/toggle", post(toggle))
        .route("/api/run/reset", post(reset))
        .route("/api/run/step", post(step))
        .route("/api/run/seek", post(seek))
        .route("/api/run/speed", post(speed))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

// --- Catalog endpoints ---

async fn list_algorithms(State(state): State<Arc<AppState>>) -> Json<Vec<Algorithm>> {
    Json(state.store().list())
}

async fn get_algorithm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Algorithm>> {
    state
        .store()
        .get(&id)
        .map(Json)
        .ok_or_else(Error::algorithm_not_found)
}

// --- Run endpoints ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunRequest {
    algorithm_id: String,
}

async fn create_run(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<RunStatus>> {
    state.start_run(&req.algorithm_id).await.map(Json)
}

async fn get_run(State(state): State<Arc<AppState>>) -> Result<Json<RunStatus>> {
    state.with_run(|session| Ok(session.status())).await.map(Json)
}

async fn get_trace(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>> {
    state
        .with_run(|session| Ok(serde_json::to_value(session.trace_view())?))
        .await
        .map(Json)
}

async fn get_frame(State(state): State<Arc<AppState>>) -> Result<Json<RunFrame>> {
    state.with_run(|session| session.frame()).await.map(Json)
}

// --- Playback endpoints ---

async fn play(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    state.control(Control::Play).await.map(Json)
}

async fn pause(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    state.control(Control::Pause).await.map(Json)
}

async fn toggle(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    state.control(Control::Toggle).await.map(Json)
}

async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    state.control(Control::Reset).await.map(Json)
}

#[derive(Debug, Deserialize)]
struct StepRequest {
    direction: StepDirection,
}

async fn step(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Result<Json<PlaybackStatus>> {
    state.control(Control::Step(req.direction)).await.map(Json)
}

#[derive(Debug, Deserialize)]
struct SeekRequest {
    position: isize,
}

async fn seek(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Result<Json<PlaybackStatus>> {
    state.control(Control::Seek(req.position)).await.map(Json)
}

#[derive(Debug, Deserialize)]
struct SpeedRequest {
    speed: PlaybackSpeed,
}

async fn speed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Result<Json<PlaybackStatus>> {
    state.control(Control::Speed(req.speed)).await.map(Json)
}
