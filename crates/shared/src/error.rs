use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NETWORK_FAILURE_MESSAGE: &str =
    "request failed; check the network connection or backend service";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection error, timeout, or a body that is not an envelope.
    Transport,
    /// The backend answered with `success=false` or an unusable payload.
    Application,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport() -> Self {
        Self::new(FailureKind::Transport, NETWORK_FAILURE_MESSAGE)
    }

    /// Application failure carrying the backend message, or the generic fallback.
    pub fn application(message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_FAILURE_MESSAGE.to_string());
        Self::new(FailureKind::Application, message)
    }

    pub fn is_transport(&self) -> bool {
        self.kind == FailureKind::Transport
    }
}
