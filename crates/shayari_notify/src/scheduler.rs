use chrono::{DateTime, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use shayari_config::NotificationConfig;
use shayari_db::{DeviceTokenRepository, PoemRepository};
use shayari_firebase::PushSender;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::dispatcher::{DispatchError, DispatchOutcome, Dispatcher};
use crate::title::Occasion;

/// A once-a-day run at a local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRun {
    pub at: NaiveTime,
    pub timezone: Tz,
}

impl DailyRun {
    /// Reads `daily_at` and `timezone`. An empty `daily_at` means no daily run.
    pub fn from_config(config: &NotificationConfig) -> Result<Option<Self>, DispatchError> {
        let raw = config.daily_at.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let at = NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| {
            DispatchError::Config(format!("Invalid daily_at '{}': {}", config.daily_at, e))
        })?;
        let timezone: Tz = config.timezone.parse().map_err(|_| {
            DispatchError::Config(format!("Unknown timezone: {}", config.timezone))
        })?;

        Ok(Some(Self { at, timezone }))
    }

    /// First occurrence of the local time strictly after `after`.
    ///
    /// A day whose local time falls in a DST gap is skipped; an ambiguous
    /// local time resolves to the earlier instant.
    pub fn next_after(&self, after: DateTime<Utc>) -> DateTime<Utc> {
        let mut date = after.with_timezone(&self.timezone).date_naive();

        for _ in 0..3 {
            let local = match self.timezone.from_local_datetime(&date.and_time(self.at)) {
                LocalResult::Single(t) => Some(t),
                LocalResult::Ambiguous(earlier, _) => Some(earlier),
                LocalResult::None => None,
            };
            if let Some(next) = local.map(|t| t.with_timezone(&Utc)) {
                if next > after {
                    return next;
                }
            }
            match date.succ_opt() {
                Some(following) => date = following,
                None => break,
            }
        }

        after + chrono::Duration::days(1)
    }
}

/// Triggers dispatch cycles on a fixed interval, plus an optional daily run
///
/// Every trigger runs in its own task, so a slow cycle never delays the next
/// one; the dispatcher's in-flight guard turns an overlapping trigger into a
/// skip.
pub struct Scheduler<T, P, S> {
    dispatcher: Arc<Dispatcher<T, P, S>>,
    period: Duration,
    daily: Option<DailyRun>,
}

impl<T, P, S> Scheduler<T, P, S>
where
    T: DeviceTokenRepository + Send + Sync + 'static,
    P: PoemRepository + Send + Sync + 'static,
    S: PushSender + 'static,
{
    pub fn new(dispatcher: Arc<Dispatcher<T, P, S>>, period: Duration) -> Self {
        // tokio panics on a zero period
        let period = period.max(Duration::from_secs(1));
        Self {
            dispatcher,
            period,
            daily: None,
        }
    }

    pub fn with_daily_run(mut self, daily: Option<DailyRun>) -> Self {
        self.daily = daily;
        self
    }

    /// # Errors
    ///
    /// An unknown timezone or a malformed `daily_at`.
    pub fn from_config(
        dispatcher: Arc<Dispatcher<T, P, S>>,
        config: &NotificationConfig,
    ) -> Result<Self, DispatchError> {
        Ok(Self::new(dispatcher, Duration::from_secs(config.interval_secs))
            .with_daily_run(DailyRun::from_config(config)?))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn daily(&self) -> Option<DailyRun> {
        self.daily
    }

    /// Starts both loops on the current runtime. The first interval cycle
    /// runs one period from now.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            period_secs = self.period.as_secs(),
            daily = ?self.daily,
            "Shayari scheduler started"
        );

        tokio::spawn(async move {
            let interval = Self::run_interval(Arc::clone(&self.dispatcher), self.period);
            match self.daily {
                Some(daily) => {
                    tokio::join!(interval, Self::run_daily(self.dispatcher, daily));
                }
                None => interval.await,
            }
        })
    }

    async fn run_interval(dispatcher: Arc<Dispatcher<T, P, S>>, period: Duration) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            Self::fire(&dispatcher, Occasion::Regular);
        }
    }

    async fn run_daily(dispatcher: Arc<Dispatcher<T, P, S>>, daily: DailyRun) {
        let mut after = Utc::now();

        loop {
            let next = daily.next_after(after);
            info!(next_run = %next, "Daily shayari run scheduled");

            let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            sleep(wait).await;

            Self::fire(&dispatcher, Occasion::Morning);
            after = next;
        }
    }

    fn fire(dispatcher: &Arc<Dispatcher<T, P, S>>, occasion: Occasion) {
        let dispatcher = Arc::clone(dispatcher);
        tokio::spawn(async move {
            match dispatcher.dispatch(occasion).await {
                Ok(DispatchOutcome::Sent(_)) => {}
                Ok(outcome) => info!(?occasion, "Scheduled dispatch: {}", outcome.summary()),
                Err(e) => error!(?occasion, "Scheduled dispatch failed: {}", e),
            }
        });
    }
}
