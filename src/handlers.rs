use crate::assistant::{self, GREETING};
use crate::errors::AppError;
use crate::metrics;
use crate::models::{
    ChartQuery, ChartResponse, ChatRequest, ChatResponse, ClearResponse, ConflictResponse,
    CphRequest, CphResponse, Entry, HistoryQuery, HistoryResponse, PalletsRequest,
    PalletsResponse, StatsResponse, SubmissionRequest, SubmissionResponse, SubmissionStatus,
    ZphRequest, ZphResponse,
};
use crate::sop::{self, SopDocument};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::persist_data;
use crate::submission::{self, Outcome, Submission};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

pub async fn calculate_pallets(
    payload: Result<Json<PalletsRequest>, JsonRejection>,
) -> Result<Json<PalletsResponse>, AppError> {
    let Json(payload) = payload?;
    let pallets_processed =
        metrics::pallets_processed(payload.carried_over, payload.delivered, payload.remaining)?;

    Ok(Json(PalletsResponse {
        pallets_processed,
        cartons_processed: metrics::cartons_processed(pallets_processed)?,
    }))
}

pub async fn calculate_cph(
    payload: Result<Json<CphRequest>, JsonRejection>,
) -> Result<Json<CphResponse>, AppError> {
    let Json(payload) = payload?;
    let cph = metrics::cartons_per_hour(payload.cartons_processed, payload.hours_worked)?;
    Ok(Json(CphResponse { cph }))
}

pub async fn calculate_zph(
    payload: Result<Json<ZphRequest>, JsonRejection>,
) -> Result<Json<ZphResponse>, AppError> {
    let Json(payload) = payload?;
    let zph = metrics::zracks_per_hour(payload.z_racks, payload.hours_hanging)?;
    Ok(Json(ZphResponse { zph }))
}

pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let submission = Submission::try_from(payload)?;
    info!(
        "POST /api/submissions - date: {}, overwrite: {}",
        submission.date, submission.overwrite
    );

    let mut data = state.data.lock().await;
    let mut updated = data.clone();
    let outcome = submission::submit(&mut updated, &submission, Utc::now())?;

    let (status, response) = match outcome {
        Outcome::Conflict(existing) => {
            warn!("entry for {} already exists, overwrite not confirmed", existing.date);
            let body = ConflictResponse {
                message: format!(
                    "An entry for {} already exists. Resubmit with overwrite to replace it.",
                    existing.date
                ),
                existing,
            };
            return Ok((StatusCode::CONFLICT, Json(body)).into_response());
        }
        Outcome::Created(entry) => (
            StatusCode::CREATED,
            SubmissionResponse {
                status: SubmissionStatus::Created,
                entry,
                previous: None,
            },
        ),
        Outcome::Replaced { previous, entry } => (
            StatusCode::OK,
            SubmissionResponse {
                status: SubmissionStatus::Replaced,
                entry,
                previous: Some(previous),
            },
        ),
    };

    persist_data(&state.data_path, &updated).await?;
    *data = updated;
    info!("saved entry for {} ({:?})", response.entry.date, response.status);

    Ok((status, Json(response)).into_response())
}

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(HistoryResponse {
        entries: data.query(&query),
    }))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Entry>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("Invalid date '{date}', expected YYYY-MM-DD")))?;
    let data = state.data.lock().await;
    data.entry_for(date)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("No entry for {date}")))
}

pub async fn clear_history(State(state): State<AppState>) -> Result<Json<ClearResponse>, AppError> {
    let mut data = state.data.lock().await;
    let mut updated = data.clone();
    let cleared = updated.clear();

    persist_data(&state.data_path, &updated).await?;
    *data = updated;
    info!("cleared {cleared} entries from history");

    Ok(Json(ClearResponse { cleared }))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(ChartResponse {
        metric: query.metric,
        points: data.chart_series(query.metric, query.from, query.to),
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data)))
}

pub async fn chat_greeting() -> Json<ChatResponse> {
    Json(ChatResponse {
        reply: GREETING.to_string(),
        fallback: false,
    })
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    let document: &Option<SopDocument> = &state.sop;
    let context = sop::context_for(document.as_ref());
    let reply = assistant::respond(state.assistant.as_ref(), &payload.message, &context).await?;

    Ok(Json(ChatResponse {
        reply: reply.text,
        fallback: reply.fallback,
    }))
}
