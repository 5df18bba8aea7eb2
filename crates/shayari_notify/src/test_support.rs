//! In-memory stand-ins for the registry, the content store and FCM.

use shayari_common::{DeviceToken, PoemRecord};
use shayari_config::NotificationConfig;
use shayari_db::{DbError, DeviceTokenRepository, PoemRepository};
use shayari_firebase::{FcmMessage, FirebaseError, PushSender};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::dispatcher::Dispatcher;

pub type TestDispatcher = Dispatcher<MemoryTokens, MemoryPoems, MockSender>;

#[derive(Default)]
pub struct MemoryTokens {
    tokens: Mutex<BTreeMap<String, DeviceToken>>,
    unavailable: bool,
    /// Reads that still fail before the registry recovers
    failing_reads: AtomicUsize,
    fail_deletes: bool,
    reads: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemoryTokens {
    pub fn with(tokens: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut map = store.tokens.lock().unwrap();
            for token in tokens {
                map.insert(token.to_string(), DeviceToken::new(*token, None));
            }
        }
        store
    }

    /// Every read and upsert fails
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// The next `count` reads fail, later ones succeed
    pub fn failing_first_reads(self, count: usize) -> Self {
        self.failing_reads.store(count, Ordering::SeqCst);
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Number of reads attempted, failed ones included
    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of delete calls that reached the registry
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.tokens.lock().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, token: &str) -> Option<DeviceToken> {
        self.tokens.lock().unwrap().get(token).cloned()
    }
}

impl DeviceTokenRepository for MemoryTokens {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn upsert_token(&self, token: &str, user_id: Option<&str>) -> Result<DeviceToken, DbError> {
        if self.unavailable {
            return Err(DbError::QueryError("registry unavailable".to_string()));
        }
        let mut map = self.tokens.lock().unwrap();
        let previous = map.get(token).and_then(|t| t.user_id.clone());
        let stored = DeviceToken::new(token, user_id.map(str::to_string).or(previous));
        map.insert(token.to_string(), stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<DeviceToken>, DbError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if self.unavailable || failing {
            return Err(DbError::QueryError("registry unavailable".to_string()));
        }
        Ok(self.tokens.lock().unwrap().values().cloned().collect())
    }

    async fn delete_token(&self, token: &str) -> Result<bool, DbError> {
        if self.fail_deletes {
            return Err(DbError::QueryError("registry is read-only".to_string()));
        }
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokens.lock().unwrap().remove(token).is_some())
    }
}

#[derive(Default)]
pub struct MemoryPoems {
    poems: Vec<PoemRecord>,
    fail_reads: bool,
}

impl MemoryPoems {
    pub fn with(texts: &[&str]) -> Self {
        let poems = texts
            .iter()
            .enumerate()
            .map(|(i, text)| PoemRecord::from_stored(i as i64 + 1, Some(text.to_string()), None))
            .collect();
        Self {
            poems,
            fail_reads: false,
        }
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }
}

impl PoemRepository for MemoryPoems {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn insert_poem(&self, _text: Option<&str>) -> Result<PoemRecord, DbError> {
        Err(DbError::QueryError("read-only test store".to_string()))
    }

    async fn find_all(&self) -> Result<Vec<PoemRecord>, DbError> {
        if self.fail_reads {
            return Err(DbError::QueryError("content store unavailable".to_string()));
        }
        Ok(self.poems.clone())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// 404 UNREGISTERED
    Unregistered,
    /// 400 INVALID_ARGUMENT about the registration token
    InvalidToken,
    /// 503 UNAVAILABLE
    Unavailable,
}

impl Failure {
    fn to_error(self) -> FirebaseError {
        let (status, code, message) = match self {
            Failure::Unregistered => (404, "UNREGISTERED", "Requested entity was not found."),
            Failure::InvalidToken => (
                400,
                "INVALID_ARGUMENT",
                "The registration token is not a valid FCM registration token",
            ),
            Failure::Unavailable => (503, "UNAVAILABLE", "The service is currently unavailable."),
        };
        let body = serde_json::json!({
            "error": {
                "code": status,
                "message": message,
                "status": code,
                "details": [{"@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError", "errorCode": code}]
            }
        });
        FirebaseError::from_api_response(status, &body.to_string())
    }
}

/// Records every message; fails for scripted tokens.
#[derive(Default)]
pub struct MockSender {
    sent: Mutex<Vec<FcmMessage>>,
    failures: HashMap<String, Failure>,
    /// When set, each send signals `entered` and waits for `release`
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl MockSender {
    pub fn failing(failures: &[(&str, Failure)]) -> Self {
        Self {
            failures: failures
                .iter()
                .map(|(token, failure)| (token.to_string(), *failure))
                .collect(),
            ..Self::default()
        }
    }

    pub fn gated(entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            gate: Some((entered, release)),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<FcmMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl PushSender for MockSender {
    async fn send(&self, message: &FcmMessage) -> Result<String, FirebaseError> {
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }

        let count = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            sent.len()
        };

        match self.failures.get(message.token()) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(format!("projects/shayari-test/messages/{}", count)),
        }
    }
}

pub fn dispatcher(tokens: MemoryTokens, poems: MemoryPoems, sender: MockSender) -> TestDispatcher {
    Dispatcher::from_config(tokens, poems, sender, &NotificationConfig::default())
}
