use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Mutex;

/// Receives every prompt and the raw model text it produced.
#[async_trait]
pub trait Interceptor: Send + Sync + Debug {
    async fn save(&self, prompt: &str, response: &str) -> std::io::Result<()>;
}

pub mod file;
pub use file::FileInterceptor;

/// Keeps transcripts in memory; handy for diagnostics screens and tests.
#[derive(Debug, Default)]
pub struct MemoryInterceptor {
    entries: Mutex<Vec<(String, String)>>,
}

impl MemoryInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(prompt, response)` pairs, oldest first.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Interceptor for MemoryInterceptor {
    async fn save(&self, prompt: &str, response: &str) -> std::io::Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((prompt.to_string(), response.to_string()));
        }
        Ok(())
    }
}
