//! The webhook endpoint: the transport delivers one update per request
//! and receives the single reply in the response body.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::ParticipantId;
use serde::{Deserialize, Serialize};
use store::ForumStore;

use crate::router::Caller;
use crate::AppState;

/// An inbound transport update. Updates without a message (edits,
/// membership changes) are acknowledged and ignored.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub from: Sender,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub username: String,
}

/// The reply sent back to the transport.
#[derive(Debug, Serialize)]
pub struct ReplyBody {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentBody>,
}

#[derive(Debug, Serialize)]
pub struct AttachmentBody {
    pub file_name: String,
    pub content: String,
}

/// POST /webhook — handles one update and returns its reply.
#[tracing::instrument(skip(state, update))]
pub async fn handle<S: ForumStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(update): Json<Update>,
) -> Json<Option<ReplyBody>> {
    let Some(message) = update.message else {
        return Json(None);
    };

    let caller = Caller {
        id: ParticipantId::new(message.from.id),
        display_name: message.from.username,
    };

    let reply = state.router.handle(&caller, &message.text).await;

    Json(Some(ReplyBody {
        text: reply.text,
        attachment: reply.attachment.map(|a| AttachmentBody {
            file_name: a.file_name.to_string(),
            // The table is CSV over UTF-8 strings, safe to ship as text.
            content: String::from_utf8_lossy(&a.bytes).into_owned(),
        }),
    }))
}
