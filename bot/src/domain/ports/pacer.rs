//! Narration pacing port

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the current invocation between narration lines
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}
