pub const SCHEMA: &str = r#"
-- Form definitions. _id is the store-native identifier; id is the app-level
-- identifier and may be NULL for documents imported from older deployments.
CREATE TABLE IF NOT EXISTS forms (
    _id TEXT PRIMARY KEY,
    id TEXT UNIQUE,
    name TEXT NOT NULL,
    fields TEXT NOT NULL DEFAULT '[]',  -- JSON array, stored as submitted
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS status_checks (
    id TEXT PRIMARY KEY,
    client_name TEXT NOT NULL,
    timestamp TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
