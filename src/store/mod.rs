mod native_id;
mod schema;
mod sqlite;

pub use native_id::{is_native_id, new_native_id};
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::{Field, Form, StatusCheck};

/// A form document as it sits in the `forms` collection.
///
/// `native_id` is assigned by the store; `id` is the app-level identifier and
/// is absent on legacy documents that were written without one.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRecord {
    pub native_id: String,
    pub id: Option<String>,
    pub name: String,
    pub fields: Vec<Field>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormRecord {
    /// The identifier clients see for this document.
    #[must_use]
    pub fn public_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.native_id)
    }

    /// Converts to the client-facing shape, dropping the native identifier.
    #[must_use]
    pub fn into_form(self) -> Form {
        let id = self.id.unwrap_or(self.native_id);
        Form {
            id,
            name: self.name,
            fields: self.fields,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A form document to insert. When `native_id` is `None` the store assigns one.
#[derive(Debug, Clone)]
pub struct FormDocument {
    pub native_id: Option<String>,
    pub id: Option<String>,
    pub name: String,
    pub fields: Vec<Field>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Store defines the document collection interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Form collection
    fn insert_form(&self, doc: &FormDocument) -> Result<FormRecord>;
    fn find_form_by_id(&self, id: &str) -> Result<Option<FormRecord>>;
    fn find_form_by_native_id(&self, native_id: &str) -> Result<Option<FormRecord>>;
    fn list_forms(&self, limit: usize) -> Result<Vec<FormRecord>>;
    fn count_forms(&self) -> Result<i64>;
    /// Replaces name and fields of the document; returns false if nothing matched.
    fn update_form(
        &self,
        native_id: &str,
        name: &str,
        fields: &[Field],
        updated_at: &DateTime<Utc>,
    ) -> Result<bool>;
    fn delete_form(&self, native_id: &str) -> Result<bool>;

    // Status check collection
    fn insert_status_check(&self, check: &StatusCheck) -> Result<()>;
    fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>>;

    /// Releases the underlying connection. Every later call fails with
    /// `Error::StoreClosed`.
    fn close(&self) -> Result<()>;
}
