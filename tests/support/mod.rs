use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use parking_lot::Mutex as DataMutex;

use resq_rust::advisory::{
    AdvisoryClient, AdvisoryError, AdvisoryReply, AdvisoryRequest, AdvisoryResult,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
#[allow(dead_code)]
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Advisory double that records requests and replies with a fixed body.
#[allow(dead_code)]
pub struct CannedAdvisory {
    reply: Option<String>,
    pub requests: DataMutex<Vec<AdvisoryRequest>>,
}

#[allow(dead_code)]
impl CannedAdvisory {
    pub fn replying(body: impl Into<String>) -> Self {
        Self {
            reply: Some(body.into()),
            requests: DataMutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: DataMutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .last()
            .map(|r| r.prompt.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AdvisoryClient for CannedAdvisory {
    async fn generate(&self, request: AdvisoryRequest) -> AdvisoryResult<AdvisoryReply> {
        self.requests.lock().push(request);
        match &self.reply {
            Some(body) => Ok(AdvisoryReply {
                text: body.clone(),
                sources: Vec::new(),
            }),
            None => Err(AdvisoryError::Upstream("canned failure".to_string())),
        }
    }

    async fn relay(&self, prompt: &str) -> AdvisoryResult<serde_json::Value> {
        self.requests
            .lock()
            .push(AdvisoryRequest::new(prompt.to_string()));
        match &self.reply {
            Some(body) => Ok(serde_json::json!({ "text": body })),
            None => Err(AdvisoryError::Upstream("canned failure".to_string())),
        }
    }
}
