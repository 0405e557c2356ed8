//! HTTP request handlers
//!
//! Implements the REST endpoints: service banner, health check, effect
//! catalog, and the multipart audio processing endpoint. Handler failures
//! are reported through [`crate::Error`], which maps onto status codes and
//! a JSON error payload here.

use crate::api::server::AppContext;
use crate::audio::effects::{EffectInfo, EFFECT_CATALOG};
use crate::error::Error;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

/// Error payload returned for all failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// GET / - Service banner
pub async fn home() -> Json<serde_json::Value> {
    Json(json!({ "message": "Voice Morpher API - ready" }))
}

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "voice_morpher".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/effects - Static catalog of available effects
pub async fn list_effects() -> Json<&'static [EffectInfo]> {
    Json(&EFFECT_CATALOG[..])
}

/// POST /api/process-audio - Apply an effect to an uploaded clip
///
/// Expects a multipart form with an `audio` file part and an `effect` text
/// part. Returns the processed clip as an attached WAV file.
pub async fn process_audio(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Response, Error> {
    let mut audio: Option<Vec<u8>> = None;
    let mut effect: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("audio") => {
                let bytes = field.bytes().await.map_err(|e| {
                    Error::BadRequest(format!("Failed to read 'audio' part: {}", e))
                })?;
                audio = Some(bytes.to_vec());
            }
            Some("effect") => {
                let text = field.text().await.map_err(|e| {
                    Error::BadRequest(format!("Failed to read 'effect' part: {}", e))
                })?;
                effect = Some(text);
            }
            _ => {}
        }
    }

    let audio = audio.ok_or_else(|| Error::BadRequest("Missing 'audio' file".to_string()))?;
    let effect =
        effect.ok_or_else(|| Error::BadRequest("Missing 'effect' in form data".to_string()))?;

    info!("Processing {} byte upload with effect '{}'", audio.len(), effect);

    // Decode/transform/encode is CPU-bound; keep it off the async runtime
    let pipeline = ctx.pipeline.clone();
    let wav = tokio::task::spawn_blocking(move || pipeline.process(audio, &effect))
        .await
        .map_err(|e| Error::Internal(format!("Processing task failed: {}", e)))?
        .map_err(|e| {
            error!("Processing failed: {}", e);
            e
        })?;

    let headers = [
        (header::CONTENT_TYPE, "audio/wav"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"morphed_voice.wav\"",
        ),
    ];

    Ok((headers, wav).into_response())
}
