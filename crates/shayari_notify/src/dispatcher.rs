//! Random shayari dispatch
//!
//! One dispatch cycle picks a poem uniformly at random and sends it to every
//! registered device. Each send is handled on its own: a dead token is removed
//! from the registry, any other failure is logged and the loop moves on.

use rand::Rng;
use serde::Serialize;
use shayari_common::{PoemRecord, ShayariError};
use shayari_config::NotificationConfig;
use shayari_db::{DbError, DeviceTokenRepository, PoemRepository};
use shayari_firebase::{
    AndroidConfig, AndroidNotification, FcmMessage, Message, Notification, PushSender,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::title::{Occasion, TitlePolicy};

/// Value of the `type` data field on every dispatched message
pub const MESSAGE_TYPE: &str = "daily_shayari";

/// Errors that abandon a dispatch cycle
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Reading poems or tokens, or deleting a dead token, failed
    #[error("Store error: {0}")]
    Store(#[from] DbError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DispatchError> for ShayariError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Store(db) => db.into(),
            DispatchError::Config(msg) => ShayariError::ConfigError(msg),
        }
    }
}

/// Counters for one completed fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DispatchReport {
    pub poem_id: i64,
    pub random_index: usize,
    pub attempted: usize,
    pub delivered: usize,
    /// Dead tokens removed from the registry
    pub pruned: usize,
    /// Failed sends whose token was kept
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The device registry is empty; nothing was read or sent
    NoDevices,
    /// The content store is empty; nothing was sent
    NoPoems,
    /// Another cycle was still running
    Skipped,
    Sent(DispatchReport),
}

impl DispatchOutcome {
    pub fn summary(&self) -> String {
        match self {
            DispatchOutcome::NoDevices => "No registered devices".to_string(),
            DispatchOutcome::NoPoems => "No shayari available".to_string(),
            DispatchOutcome::Skipped => "A dispatch cycle is already running".to_string(),
            DispatchOutcome::Sent(report) => format!(
                "Shayari {} sent to {} of {} devices",
                report.poem_id, report.delivered, report.attempted
            ),
        }
    }
}

/// Clears the in-flight flag when the cycle ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Sends a random poem to every registered device
///
/// Generic over the device registry, the content store and the push sender so
/// the SQL repositories and the FCM client can be swapped out in tests.
pub struct Dispatcher<T, P, S> {
    tokens: T,
    poems: P,
    sender: S,
    titles: TitlePolicy,
    android_channel_id: Option<String>,
    in_flight: AtomicBool,
}

impl<T, P, S> Dispatcher<T, P, S>
where
    T: DeviceTokenRepository + Send + Sync,
    P: PoemRepository + Send + Sync,
    S: PushSender,
{
    pub fn new(tokens: T, poems: P, sender: S, titles: TitlePolicy) -> Self {
        Self {
            tokens,
            poems,
            sender,
            titles,
            android_channel_id: None,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_android_channel(mut self, channel_id: Option<String>) -> Self {
        self.android_channel_id = channel_id;
        self
    }

    pub fn from_config(tokens: T, poems: P, sender: S, config: &NotificationConfig) -> Self {
        Self::new(tokens, poems, sender, TitlePolicy::from_config(config))
            .with_android_channel(config.android_channel_id.clone())
    }

    /// The device registry, shared with the registration endpoint
    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    pub fn poems(&self) -> &P {
        &self.poems
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Runs one regular dispatch cycle, titled with the default title
    pub async fn dispatch_random_poem(&self) -> Result<DispatchOutcome, DispatchError> {
        self.dispatch(Occasion::Regular).await
    }

    /// Runs one dispatch cycle for `occasion`
    ///
    /// Returns `Skipped` right away when another cycle is still in flight.
    ///
    /// # Errors
    ///
    /// A store failure abandons the rest of the cycle. Failed sends never do.
    pub async fn dispatch(&self, occasion: Occasion) -> Result<DispatchOutcome, DispatchError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            info!(?occasion, "Dispatch cycle already in flight, skipping");
            return Ok(DispatchOutcome::Skipped);
        };

        self.run_cycle(occasion).await
    }

    async fn run_cycle(&self, occasion: Occasion) -> Result<DispatchOutcome, DispatchError> {
        let devices = self.tokens.find_all().await?;
        if devices.is_empty() {
            info!("No device tokens registered, nothing to send");
            return Ok(DispatchOutcome::NoDevices);
        }

        let poems = self.poems.find_all().await?;
        if poems.is_empty() {
            info!("No shayari in the content store, nothing to send");
            return Ok(DispatchOutcome::NoPoems);
        }

        let random_index = pick_index(poems.len());
        let poem = &poems[random_index];
        let title = self.titles.title_for(occasion);

        info!(
            ?occasion,
            poem_id = poem.id,
            random_index,
            devices = devices.len(),
            "Dispatching random shayari"
        );

        let mut report = DispatchReport {
            poem_id: poem.id,
            random_index,
            attempted: 0,
            delivered: 0,
            pruned: 0,
            failed: 0,
        };

        for device in &devices {
            let message = self.build_message(&device.token, title, poem, random_index);
            report.attempted += 1;

            match self.sender.send(&message).await {
                Ok(name) => {
                    report.delivered += 1;
                    debug!(token = %device.token, message = %name, "Shayari delivered");
                }
                Err(err) if err.is_dead_token() => {
                    warn!(token = %device.token, error = %err, "Removing dead device token");
                    self.tokens.delete_token(&device.token).await?;
                    report.pruned += 1;
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(token = %device.token, error = %err, "Failed to deliver shayari");
                }
            }
        }

        info!(
            poem_id = report.poem_id,
            delivered = report.delivered,
            pruned = report.pruned,
            failed = report.failed,
            "Dispatch cycle complete"
        );

        Ok(DispatchOutcome::Sent(report))
    }

    fn build_message(
        &self,
        token: &str,
        title: &str,
        poem: &PoemRecord,
        random_index: usize,
    ) -> FcmMessage {
        let mut data = HashMap::new();
        data.insert("shayari_id".to_string(), poem.id.to_string());
        data.insert("random_index".to_string(), random_index.to_string());
        data.insert("type".to_string(), MESSAGE_TYPE.to_string());

        FcmMessage {
            message: Message {
                token: token.to_string(),
                notification: Some(Notification {
                    title: title.to_string(),
                    body: poem.text.clone(),
                }),
                data: Some(data),
                android: Some(AndroidConfig {
                    priority: "high".to_string(),
                    notification: Some(AndroidNotification {
                        sound: Some("default".to_string()),
                        channel_id: self.android_channel_id.clone(),
                    }),
                }),
            },
        }
    }
}

/// Uniform index in `[0, len)`; `len` must be non-zero.
fn pick_index(len: usize) -> usize {
    rand::thread_rng().gen_range(0..len)
}
