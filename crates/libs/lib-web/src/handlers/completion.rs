//! # Completion Proxy Handler
//!
//! `POST /api/openai/route` (alias `POST /api/openai`): forwards `{ prompt }` to the
//! completion model and answers `{ result }`.
//!
//! Every failure answers 500 through [`lib_core::AppError`]: the provider's own error
//! body when it sent one, a fixed message otherwise. That includes bodies axum cannot
//! extract.

use crate::services::CompletionModel;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use lib_core::Result;
use shared::{preview, CompletionRequest, CompletionResponse};
use std::sync::Arc;
use tracing::debug;

pub async fn complete(
    State(model): State<Arc<dyn CompletionModel>>,
    payload: std::result::Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>> {
    let Json(request) = payload?;
    debug!(prompt = %preview(&request.prompt, 80), "Completion requested");

    let result = model.complete(&request.prompt).await?;

    debug!(reply = %preview(&result, 80), "Completion succeeded");
    Ok(Json(CompletionResponse { result }))
}
