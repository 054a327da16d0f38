use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nanoid::nanoid;
use serde_json::json;
use std::sync::Arc;
use tracing::Instrument;

use crate::data_models::{ErrorPayload, UploadReceipt};
use crate::error::PipelineError;
use crate::storage::{UploadError, save_upload};

use super::AppState;
use super::models::RequestFields;

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorPayload::new(self.code()))).into_response()
    }
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    fields: RequestFields,
) -> Response {
    let options = fields.query_options();
    let span = tracing::info_span!("search", request_id = %nanoid!(10), query = %options.query);

    async move {
        match state.engine.search(&options).await {
            Ok(payload) => Json(payload).into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

pub async fn people_handler(
    State(state): State<Arc<AppState>>,
    fields: RequestFields,
) -> Response {
    let name = fields.person_name();
    let span = tracing::info_span!("people", request_id = %nanoid!(10));

    async move {
        match state.engine.people(&name).await {
            Ok(payload) => Json(payload).into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

pub async fn upload_pdf_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    store_upload(&state, multipart, "pdf", "Upload complete.").await
}

pub async fn upload_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    store_upload(&state, multipart, "img", "Image uploaded.").await
}

async fn read_file_field(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<String, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;
        return save_upload(&state.uploads_dir, &filename, &bytes).await;
    }
    Err(UploadError::MissingFile)
}

async fn store_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    error_prefix: &str,
    message: &str,
) -> Response {
    // A body that is not multipart has no file part.
    let result = match multipart {
        Ok(mut multipart) => read_file_field(state, &mut multipart).await,
        Err(_) => Err(UploadError::MissingFile),
    };

    match result {
        Ok(filename) => Json(UploadReceipt {
            ok: true,
            message: message.to_string(),
            filename,
        })
        .into_response(),
        Err(e) => {
            if let Some(code) = e.client_code() {
                return (StatusCode::BAD_REQUEST, Json(ErrorPayload::new(code))).into_response();
            }
            tracing::error!(error = ?e, "upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorPayload::new(format!("{error_prefix}_failed:{}", e.kind()))),
            )
                .into_response()
        }
    }
}
