use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use fpl_shared::{Message, PinRequest, PinResponse};
use tracing::info;

use crate::config::{MAX_MESSAGE_LEN, MAX_PLAYER_NAME_LEN};
use crate::error::{AppError, MessageError};
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (pinned_count, pins_updated_at) = {
        let pins = state.pins.read().await;
        (pins.pinned().len(), pins.updated_at())
    };
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "pinned_players": pinned_count,
        "pins_updated_at": pins_updated_at.map(|at| at.to_rfc3339()),
        "observability": {
            "pin_requests_total": observability.pin_requests_total,
            "pin_failures_total": observability.pin_failures_total,
            "message_updates_total": observability.message_updates_total,
        }
    }))
}

/// `POST /api/pin-player`: Pin or unpin a player and return the authoritative set.
pub async fn pin_player(
    State(state): State<AppState>,
    payload: Result<Json<PinRequest>, JsonRejection>,
) -> Result<Json<PinResponse>, AppError> {
    state.observability.record_pin_request();
    let result = apply_pin(&state, payload).await;
    if result.is_err() {
        state.observability.record_pin_failure();
    }
    result
}

async fn apply_pin(
    state: &AppState,
    payload: Result<Json<PinRequest>, JsonRejection>,
) -> Result<Json<PinResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let name = validate_player_name(&request.player_name)?;

    let mut pins = state.pins.write().await;
    let pinned = pins.apply(request.action, name).await?;
    info!(
        player = name,
        action = request.action.as_str(),
        pinned = pinned.len(),
        "pinned players updated"
    );
    Ok(Json(PinResponse::ok(pinned)))
}

fn validate_player_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::MissingPlayerName);
    }
    if name.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(AppError::PlayerNameTooLong);
    }
    Ok(name)
}

/// `GET /api/pinned-players`: Current authoritative pinned set.
pub async fn pinned_players(State(state): State<AppState>) -> Json<PinResponse> {
    let pins = state.pins.read().await;
    Json(PinResponse::ok(pins.pinned()))
}

pub async fn get_message(State(state): State<AppState>) -> Json<Message> {
    let message = state.message.read().await.clone();
    Json(Message { message })
}

pub async fn set_message(
    State(state): State<AppState>,
    payload: Result<Json<Message>, JsonRejection>,
) -> Result<Json<Message>, MessageError> {
    let Json(update) = payload.map_err(|e| MessageError::MalformedPayload(e.body_text()))?;
    if update.message.chars().count() > MAX_MESSAGE_LEN {
        return Err(MessageError::TooLong);
    }

    let mut current = state.message.write().await;
    current.clone_from(&update.message);
    state.observability.record_message_update();
    Ok(Json(update))
}
