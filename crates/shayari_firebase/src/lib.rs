//! Firebase Cloud Messaging integration for the Shayari backend
//!
//! This crate sends push notifications through the FCM HTTP v1 API.
//!
//! # Features
//!
//! - Authentication with a service account (key file or base64 encoded JSON)
//! - Access token caching between sends
//! - Message payloads with notification, data and Android delivery hints
//! - Classification of FCM errors, so callers can prune dead tokens
//! - The [`PushSender`] trait, the seam the dispatcher is tested through
//!
//! # Example
//!
//! ```rust,no_run
//! use shayari_config::FirebaseConfig;
//! use shayari_firebase::{FcmMessage, FirebaseClient, PushSender};
//!
//! async fn send(config: FirebaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FirebaseClient::from_config(config).await?;
//!     let message = FcmMessage::to_token("device-token", "Hello", "World");
//!     let name = client.send(&message).await?;
//!     println!("sent {}", name);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod models;
pub mod push;

pub use client::{FcmErrorCode, FirebaseClient, FirebaseError};
pub use models::{AndroidConfig, AndroidNotification, FcmMessage, Message, Notification};
pub use push::PushSender;
