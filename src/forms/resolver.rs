//! Identifier resolution for form documents.
//!
//! Forms written by older deployments only carry the store-native `_id`;
//! everything created since carries an app-level `id`. Every id-addressed
//! operation goes through [`resolve`] so both kinds stay reachable the same way.

use crate::error::Result;
use crate::store::{FormRecord, Store, is_native_id};

/// Which key a lookup matched on, reported so callers can log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    AppId,
    NativeId,
}

#[derive(Debug, Clone)]
pub struct Resolved {
    pub record: FormRecord,
    pub matched_by: MatchedBy,
}

/// Looks a form up by app-level id, falling back to the native id on a miss.
///
/// The fallback query is skipped when `id` cannot be a native identifier.
pub fn resolve(store: &dyn Store, id: &str) -> Result<Option<Resolved>> {
    if let Some(record) = store.find_form_by_id(id)? {
        return Ok(Some(Resolved {
            record,
            matched_by: MatchedBy::AppId,
        }));
    }

    if !is_native_id(id) {
        return Ok(None);
    }

    Ok(store.find_form_by_native_id(id)?.map(|record| Resolved {
        record,
        matched_by: MatchedBy::NativeId,
    }))
}
