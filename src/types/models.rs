use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Field;

/// A form definition as exposed to clients. `id` is always the app-level
/// identifier (or the native one for legacy records that never had one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub name: String,
    pub fields: Vec<Field>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}
