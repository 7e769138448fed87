use std::sync::Arc;

use formforge::server::{AppState, create_router};
use formforge::store::{SqliteStore, Store};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An in-process server bound to an ephemeral port, backed by a database in a
/// temp directory.
pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    server_task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_list_limit(formforge::forms::DEFAULT_LIST_LIMIT).await
    }

    pub async fn start_with_list_limit(list_limit: usize) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(temp_dir.path().join("test.db")).expect("open store");
        store.initialize().expect("initialize store");

        let state = Arc::new(AppState::new(Arc::new(store), list_limit));
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{}", addr);

        let server_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("server error: {e}");
            }
        });

        Self::wait_for_ready(&base_url).await;

        Self {
            temp_dir,
            base_url,
            server_task,
        }
    }

    async fn wait_for_ready(base_url: &str) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", base_url))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("Server did not become ready");
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}
