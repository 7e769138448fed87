use serde::{Deserialize, Serialize};

use crate::types::Field;

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
pub struct FormRequest {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStatusCheckRequest {
    pub client_name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
