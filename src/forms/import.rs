use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::Field;

/// A form document as exported from an earlier deployment.
///
/// Exports may use extended JSON (`{"$oid": ...}`, `{"$date": ...}`) for
/// identifiers and timestamps; plain strings are accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedForm {
    #[serde(rename = "_id", default)]
    pub native_id: Option<NativeIdRepr>,
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub created_at: Option<TimestampRepr>,
    #[serde(default)]
    pub updated_at: Option<TimestampRepr>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NativeIdRepr {
    Plain(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl NativeIdRepr {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            NativeIdRepr::Plain(s) => s,
            NativeIdRepr::Extended { oid } => oid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimestampRepr {
    Plain(DateTime<Utc>),
    Extended {
        #[serde(rename = "$date")]
        date: DateTime<Utc>,
    },
}

impl TimestampRepr {
    #[must_use]
    pub fn into_datetime(self) -> DateTime<Utc> {
        match self {
            TimestampRepr::Plain(dt) => dt,
            TimestampRepr::Extended { date } => date,
        }
    }
}
