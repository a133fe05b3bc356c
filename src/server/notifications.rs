use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::dto::{NotificationRequest, NotificationResponse};
use super::response::ApiError;
use crate::auth::RequireToken;
use crate::server::AppState;
use crate::telegram::{deliver, media::build_media_groups};
use crate::types::NewDocument;

/// Send a notification.
///
/// The request is recorded before any delivery is attempted, so a row always
/// exists even when forwarding fails. Destinations are delivered to
/// sequentially in input order with strict fail-fast semantics: the first
/// failing destination aborts the rest and the request reports 502, while
/// deliveries already made to earlier destinations are not undone and the
/// persisted rows remain.
pub async fn post_notification(
    _token: RequireToken,
    State(state): State<Arc<AppState>>,
    Json(request): Json<NotificationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.chat_ids.is_empty() {
        return Err(ApiError::unprocessable("chatIds must not be empty"));
    }

    let documents: Vec<NewDocument> = request
        .documents
        .iter()
        .flatten()
        .map(|doc| doc.to_new_document())
        .collect();

    // Built once per request. A base64 decode failure rejects the request
    // here, before anything is persisted or sent.
    let groups = build_media_groups(&documents, Some(&request.message))?;

    let created = state.store.create_notifications(
        &request.chat_ids,
        &request.message,
        request.button_url.as_deref(),
        &documents,
    )?;

    for notification in &created {
        deliver(
            state.messenger.as_ref(),
            notification.chat_id,
            &request.message,
            request.button_url.as_deref(),
            &groups,
        )
        .await?;
    }

    let response = NotificationResponse {
        chat_ids: request.chat_ids,
        message: request.message,
        button_url: request.button_url,
        documents: request.documents,
        created_at: created[0].created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
