//! Homophone-word collaborator for the English path.

use std::collections::HashMap;

use tracing::debug;

use crate::settings::settings;

#[derive(Debug, thiserror::Error)]
pub enum WordServiceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// External service answering "which words sound like this one".
pub trait WordService: Send + Sync {
    /// Homophones of `word`, in service order. The caller treats failure
    /// and an empty list the same way.
    fn homophones(&self, word: &str) -> Result<Vec<String>, WordServiceError>;
}

/// Live client: `GET {base_url}/{word}` returns a JSON array of words.
pub struct HttpWordService {
    base_url: String,
    max_doc_bytes: u64,
}

impl HttpWordService {
    pub fn new(base_url: impl Into<String>, max_doc_bytes: u64) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            max_doc_bytes,
        }
    }

    /// Client pointed at the `[services]` words host.
    pub fn from_settings() -> Self {
        let s = settings();
        Self::new(s.services.words_url.clone(), s.services.max_doc_bytes)
    }
}

impl WordService for HttpWordService {
    fn homophones(&self, word: &str) -> Result<Vec<String>, WordServiceError> {
        let url = format!("{}/{word}", self.base_url);
        debug!(url, "querying homophone words");
        let body = ureq::get(&url)
            .call()
            .map_err(|e| WordServiceError::Http(format!("{url}: {e}")))?
            .into_body()
            .with_config()
            .limit(self.max_doc_bytes)
            .read_to_string()
            .map_err(|e| WordServiceError::Http(format!("{url}: {e}")))?;
        serde_json::from_str(&body).map_err(|e| WordServiceError::Parse(format!("{url}: {e}")))
    }
}

/// Fixed in-memory service for tests and benchmarks.
#[derive(Debug, Default)]
pub struct StaticWordService {
    words: HashMap<String, Vec<String>>,
}

impl StaticWordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: &str, homophones: &[&str]) -> Self {
        self.words.insert(
            word.to_string(),
            homophones.iter().map(|h| h.to_string()).collect(),
        );
        self
    }
}

impl WordService for StaticWordService {
    fn homophones(&self, word: &str) -> Result<Vec<String>, WordServiceError> {
        Ok(self.words.get(word).cloned().unwrap_or_default())
    }
}

/// Stand-in for deployments without a words host; every query is empty.
pub struct NullWordService;

impl WordService for NullWordService {
    fn homophones(&self, _word: &str) -> Result<Vec<String>, WordServiceError> {
        Ok(Vec::new())
    }
}
