//! # Formforge
//!
//! A backend for form-builder applications: form definitions are stored as
//! documents and served over a small JSON API. Usable both as a standalone
//! binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! formforge = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use formforge::forms::DEFAULT_LIST_LIMIT;
//! use formforge::server::{AppState, create_router};
//! use formforge::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/formforge.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), DEFAULT_LIST_LIMIT));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `formforge` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod forms;
pub mod server;
pub mod store;
pub mod types;
