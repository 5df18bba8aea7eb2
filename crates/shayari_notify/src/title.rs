use shayari_config::NotificationConfig;

/// What a dispatch cycle was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occasion {
    /// The once-a-day morning run
    Morning,
    /// Interval cycles and manual triggers
    Regular,
}

/// Maps a dispatch occasion to the notification title.
#[derive(Debug, Clone)]
pub struct TitlePolicy {
    morning_title: String,
    default_title: String,
}

impl TitlePolicy {
    pub fn new(morning_title: impl Into<String>, default_title: impl Into<String>) -> Self {
        Self {
            morning_title: morning_title.into(),
            default_title: default_title.into(),
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.morning_title.clone(), config.default_title.clone())
    }

    pub fn title_for(&self, occasion: Occasion) -> &str {
        match occasion {
            Occasion::Morning => &self.morning_title,
            Occasion::Regular => &self.default_title,
        }
    }
}
