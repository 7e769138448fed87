//! Form persistence on top of the document store.

mod import;
pub mod resolver;

pub use import::{ImportedForm, NativeIdRepr, TimestampRepr};

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::{FormDocument, FormRecord, Store, is_native_id};
use crate::types::{Field, Form};

use resolver::resolve;

/// Default cap on the number of forms returned by [`FormService::list`].
pub const DEFAULT_LIST_LIMIT: usize = 100;

#[derive(Clone)]
pub struct FormService {
    store: Arc<dyn Store>,
    list_limit: usize,
}

impl FormService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    #[must_use]
    pub fn with_list_limit(mut self, list_limit: usize) -> Self {
        self.list_limit = list_limit;
        self
    }

    pub fn create(&self, name: &str, fields: Vec<Field>) -> Result<Form> {
        validate_form_name(name)?;

        let now = Utc::now();
        let doc = FormDocument {
            native_id: None,
            id: Some(Uuid::new_v4().to_string()),
            name: name.to_string(),
            fields,
            created_at: now,
            updated_at: now,
        };

        let record = self.store.insert_form(&doc)?;
        tracing::info!(id = record.public_id(), "form created");
        Ok(record.into_form())
    }

    /// Returns up to the configured cap of forms in store order.
    pub fn list(&self) -> Result<Vec<Form>> {
        let records = self.store.list_forms(self.list_limit)?;
        Ok(records.into_iter().map(|r| r.into_form()).collect())
    }

    pub fn get(&self, id: &str) -> Result<Form> {
        Ok(self.resolve_record(id)?.into_form())
    }

    /// Replaces name and fields. `id` and `created_at` are left alone and
    /// `updated_at` always moves forward.
    pub fn update(&self, id: &str, name: &str, fields: Vec<Field>) -> Result<Form> {
        validate_form_name(name)?;

        let mut record = self.resolve_record(id)?;

        let updated_at = next_timestamp(record.updated_at);
        if !self
            .store
            .update_form(&record.native_id, name, &fields, &updated_at)?
        {
            return Err(Error::NotFound);
        }

        record.name = name.to_string();
        record.fields = fields;
        record.updated_at = updated_at;
        Ok(record.into_form())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let record = self.resolve_record(id)?;

        if !self.store.delete_form(&record.native_id)? {
            return Err(Error::NotFound);
        }
        tracing::info!(id = record.public_id(), "form deleted");
        Ok(())
    }

    fn resolve_record(&self, id: &str) -> Result<FormRecord> {
        let resolved = resolve(self.store.as_ref(), id)?.ok_or(Error::NotFound)?;
        tracing::debug!(id, matched_by = ?resolved.matched_by, "form resolved");
        Ok(resolved.record)
    }

    /// Inserts a document exported from an earlier deployment, keeping its
    /// identifiers and timestamps.
    pub fn import(&self, imported: ImportedForm) -> Result<Form> {
        validate_form_name(&imported.name)?;

        let native_id = imported.native_id.map(NativeIdRepr::into_string);
        if let Some(native_id) = &native_id {
            if !is_native_id(native_id) {
                return Err(Error::BadRequest(format!(
                    "'{native_id}' is not a valid native identifier"
                )));
            }
        }

        let now = Utc::now();
        let created_at = imported.created_at.map_or(now, TimestampRepr::into_datetime);
        let updated_at = imported
            .updated_at
            .map_or(created_at, TimestampRepr::into_datetime)
            .max(created_at);

        let doc = FormDocument {
            native_id,
            id: imported.id,
            name: imported.name,
            fields: imported.fields,
            created_at,
            updated_at,
        };

        Ok(self.store.insert_form(&doc)?.into_form())
    }
}

fn validate_form_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::BadRequest("form name cannot be empty".to_string()));
    }
    Ok(())
}

fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
