// src/routes/chat.rs
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::debug;

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(payload) = payload?;
    let (message, mood) = payload.normalized();
    debug!(message_len = message.len(), mood, "chat request");

    let reply = state.router.route(message, mood).await;

    Ok(Json(ChatReply { reply }))
}
