use std::sync::Arc;

use anyhow::{Context, Result};

use campus_access_api::app;
use campus_access_api::store::{MemoryStore, SharedStore};

/// In-process server over a fresh memory store.
///
/// Each test spawns its own so store contents never leak between tests, and
/// assertions can read documents directly through `store` to verify effects
/// the API responses do not expose.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
}

pub async fn spawn_server() -> Result<TestServer> {
    let store = Arc::new(MemoryStore::new());
    let shared: SharedStore = store.clone();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr().context("failed to read listener addr")?;

    tokio::spawn(async move {
        axum::serve(listener, app(shared)).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        store,
    })
}
