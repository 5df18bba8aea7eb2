// --- File: crates/shayari_common/src/models.rs ---

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body used when a stored poem has no text ("today's beautiful shayari!").
pub const DEFAULT_POEM_TEXT: &str = "आज की खूबसूरत शायरी!";

/// A stored poem eligible for random selection and push delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PoemRecord {
    /// Store-assigned identifier
    pub id: i64,

    /// The poem text; never empty once read from the store
    pub text: String,

    /// When the poem was created, if the store recorded it
    pub created_at: Option<DateTime<Utc>>,
}

impl PoemRecord {
    /// Build a record from raw stored values, applying the default-text policy.
    ///
    /// A missing or empty text is replaced by [`DEFAULT_POEM_TEXT`]. Whitespace
    /// is kept as stored.
    pub fn from_stored(id: i64, text: Option<String>, created_at: Option<DateTime<Utc>>) -> Self {
        let text = text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_POEM_TEXT.to_string());

        Self {
            id,
            text,
            created_at,
        }
    }
}

/// A push-notification destination for one installed app instance.
///
/// The token value is the unique key; registering the same token again only
/// refreshes `last_updated_at` (and the user, when one is supplied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeviceToken {
    /// The FCM registration token
    pub token: String,

    /// The user this device belongs to, if the app sent one
    pub user_id: Option<String>,

    /// The timestamp of the last registration
    pub last_updated_at: DateTime<Utc>,
}

impl DeviceToken {
    /// Create a new device token stamped with the current time.
    pub fn new(token: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            token: token.into(),
            user_id,
            last_updated_at: Utc::now(),
        }
    }
}
