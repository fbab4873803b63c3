pub mod health;
pub mod responses;
pub mod schema;

use serde::Serialize;

/// `{"message": ...}` body of successful table operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
