//! The `{"status": ..., "msg": ...}` acknowledgement returned by the AJAX
//! endpoints. Failures are reported in the body with a 200 status so the page
//! script can show the message.
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Fail,
}

/// An AJAX acknowledgement.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct StatusReply {
    /// Whether the request took effect.
    pub status: ReplyStatus,
    /// A human-readable message for the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl StatusReply {
    /// A bare success acknowledgement.
    pub const fn success() -> Self {
        Self {
            status: ReplyStatus::Success,
            msg: None,
        }
    }
    /// A success acknowledgement carrying a message.
    pub fn success_with(msg: &str) -> Self {
        Self {
            status: ReplyStatus::Success,
            msg: Some(msg.to_owned()),
        }
    }
    /// A failure acknowledgement carrying a message.
    pub fn fail(msg: &str) -> Self {
        Self {
            status: ReplyStatus::Fail,
            msg: Some(msg.to_owned()),
        }
    }
}

impl IntoResponse for StatusReply {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
