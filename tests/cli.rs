//! CLI integration tests for formforge admin commands.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;
use std::sync::Arc;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use formforge::forms::FormService;
use formforge::store::{SqliteStore, Store};
use predicates::prelude::*;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("formforge").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("FORMFORGE_DATA_DIR");
        cmd.env_remove("FORMFORGE_DB_NAME");
        cmd
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["admin", "init", "--data-dir", &self.data_dir_str()])
            .assert()
    }

    fn import(&self, file: &Path) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["admin", "import", "--data-dir", &self.data_dir_str(), "--file"])
            .arg(file)
            .assert()
    }

    fn forms(&self) -> FormService {
        let store = SqliteStore::new(self.data_dir().join("formforge.db")).expect("open store");
        store.initialize().expect("initialize store");
        FormService::new(Arc::new(store))
    }
}

#[test]
fn init_creates_database() {
    let ctx = TestContext::new();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("Initialized database"));

    ctx.temp_dir
        .child("formforge.db")
        .assert(predicate::path::exists());
}

#[test]
fn init_is_idempotent() {
    let ctx = TestContext::new();

    ctx.init().success();
    ctx.init()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn init_honors_db_name() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args([
            "admin",
            "init",
            "--data-dir",
            &ctx.data_dir_str(),
            "--db-name",
            "builder",
        ])
        .assert()
        .success();

    ctx.temp_dir
        .child("builder.db")
        .assert(predicate::path::exists());
}

#[test]
fn import_requires_init() {
    let ctx = TestContext::new();
    let file = ctx.temp_dir.child("forms.json");
    file.write_str("[]").unwrap();

    ctx.import(file.path())
        .failure()
        .stderr(predicate::str::contains("admin init"));
}

#[test]
fn import_loads_legacy_documents() {
    let ctx = TestContext::new();
    ctx.init().success();

    let file = ctx.temp_dir.child("forms.json");
    file.write_str(
        r#"[
            {
                "_id": {"$oid": "65a1b2c3d4e5f60718293a4b"},
                "name": "Legacy feedback",
                "fields": [{"type": "text", "label": "Comment", "name": "comment"}],
                "created_at": {"$date": "2024-01-12T09:30:00Z"}
            },
            {
                "id": "5f0c8a58-1d7e-4c55-9a34-1f1a0b7a2e11",
                "name": "Newsletter",
                "fields": []
            }
        ]"#,
    )
    .unwrap();

    ctx.import(file.path())
        .success()
        .stdout(predicate::str::contains("Imported 2 form(s)"));

    let forms = ctx.forms();
    let legacy = forms.get("65a1b2c3d4e5f60718293a4b").expect("legacy form");
    assert_eq!(legacy.id, "65a1b2c3d4e5f60718293a4b");
    assert_eq!(legacy.name, "Legacy feedback");
    assert_eq!(legacy.created_at, legacy.updated_at);

    let modern = forms
        .get("5f0c8a58-1d7e-4c55-9a34-1f1a0b7a2e11")
        .expect("modern form");
    assert_eq!(modern.name, "Newsletter");
}

#[test]
fn import_reports_bad_document() {
    let ctx = TestContext::new();
    ctx.init().success();

    let file = ctx.temp_dir.child("forms.json");
    file.write_str(r#"[{"name": "Ok", "fields": []}, {"fields": []}]"#)
        .unwrap();

    ctx.import(file.path())
        .failure()
        .stderr(predicate::str::contains("Document 1"));
}

#[test]
fn serve_rejects_zero_list_limit() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.cmd()
        .args([
            "serve",
            "--data-dir",
            &ctx.data_dir_str(),
            "--list-limit",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("list limit must be at least 1"));
}
