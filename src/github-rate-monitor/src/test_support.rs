//! Fakes shared by unit tests.

use crate::fetcher::{FetchResult, QuotaSource};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Answers every fetch with the same result and records the tokens it saw.
pub(crate) struct CannedSource {
    result: FetchResult,
    pub(crate) tokens: Mutex<Vec<String>>,
}

impl CannedSource {
    pub(crate) fn new(result: FetchResult) -> Self {
        Self {
            result,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.tokens.lock().len()
    }
}

#[async_trait]
impl QuotaSource for CannedSource {
    async fn fetch(&self, token: &str) -> FetchResult {
        self.tokens.lock().push(token.to_string());
        self.result.clone()
    }
}
