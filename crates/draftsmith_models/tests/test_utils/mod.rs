//! Test utilities: an in-process HTTP upstream.

use axum::Router;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts requests that reached a mock upstream.
#[derive(Debug, Clone, Default)]
pub struct HitCounter(Arc<AtomicUsize>);

#[allow(dead_code)]
impl HitCounter {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(app: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}
