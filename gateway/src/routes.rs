//! API Routes for the Link Simulator
//!
//! - GET/PUT parameters (input surface)
//! - GET frame (render sink pulls the latest published frame)
//! - GET report (text summary of the latest metrics)
//! - POST analysis (on-demand distance sweep)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use link_model::{LinkParameters, LinkReport, PerformanceMetrics, SweepResult, SweepSeries};
use link_sim::Frame;
use serde::Serialize;

use crate::input::{InputOptions, ParameterUpdate};
use crate::AppState;

// ========== Request/Response Types ==========

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub report: String,
    pub metrics: PerformanceMetrics,
    pub sweep: SweepResult,
    pub series: [SweepSeries; 3],
}

// ========== Route Handlers ==========

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "fso-gateway",
        "loop_state": state.status.state().as_str(),
        "ticks": state.status.ticks(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn get_parameters(State(state): State<AppState>) -> Json<LinkParameters> {
    Json(state.store.snapshot())
}

/// Apply a partial edit; unknown tags are rejected before the store is touched
pub async fn update_parameters(
    State(state): State<AppState>,
    Json(req): Json<ParameterUpdate>,
) -> Result<Json<LinkParameters>, (StatusCode, String)> {
    let edit = req
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(state.store.update(|params| edit.apply(params))))
}

pub async fn get_options() -> Json<InputOptions> {
    Json(InputOptions::current())
}

/// Latest published frame
pub async fn get_frame(
    State(state): State<AppState>,
) -> Result<Json<Frame>, (StatusCode, String)> {
    let latest = state.frames.borrow().clone();
    latest
        .map(|frame| Json(Frame::clone(&frame)))
        .ok_or((StatusCode::SERVICE_UNAVAILABLE, "No frame published yet".to_string()))
}

/// Text report for the latest frame, or for the current parameters before the first tick
pub async fn get_report(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let latest = state.frames.borrow().clone();
    let report = match latest {
        Some(frame) => LinkReport::new(frame.params, frame.metrics),
        None => {
            let params = state.store.snapshot();
            let metrics = PerformanceMetrics::compute(&params).map_err(internal_error)?;
            LinkReport::new(params, metrics)
        }
    };

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], report.to_string()))
}

/// Run the distance sweep on one snapshot of the current parameters
pub async fn run_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResponse>, (StatusCode, String)> {
    let snapshot = state.store.snapshot();

    let metrics = PerformanceMetrics::compute(&snapshot).map_err(internal_error)?;
    let sweep = SweepResult::run(&snapshot, &state.sweep).map_err(internal_error)?;

    tracing::info!(
        "Analysis sweep: {} points over {:.0}-{:.0} m, weather={}",
        sweep.points.len(),
        state.sweep.start_m,
        state.sweep.end_m,
        snapshot.weather
    );

    Ok(Json(AnalysisResponse {
        report: LinkReport::new(snapshot, metrics).to_string(),
        metrics,
        series: sweep.series(),
        sweep,
    }))
}

fn internal_error(e: link_model::ModelError) -> (StatusCode, String) {
    tracing::error!("Model evaluation failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

// ========== Router ==========

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/parameters", get(get_parameters).put(update_parameters))
        .route("/options", get(get_options))
        .route("/frame", get(get_frame))
        .route("/report", get(get_report))
        .route("/analysis", post(run_analysis));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
}
