#[cfg(test)]
mod tests {
    use crate::dispatcher::DispatchError;
    use crate::scheduler::{DailyRun, Scheduler};
    use crate::test_support::{dispatcher, MemoryPoems, MemoryTokens, MockSender, TestDispatcher};
    use chrono::Utc;
    use shayari_config::NotificationConfig;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    fn title_of(d: &TestDispatcher, index: usize) -> String {
        d.sender().sent()[index]
            .message
            .notification
            .as_ref()
            .unwrap()
            .title
            .clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_cycle_runs_after_one_period() {
        let d = Arc::new(dispatcher(
            MemoryTokens::with(&["A", "B"]),
            MemoryPoems::with(&["Poem1"]),
            MockSender::default(),
        ));
        let handle = Scheduler::new(Arc::clone(&d), Duration::from_secs(300)).spawn();

        sleep(Duration::from_secs(299)).await;
        assert!(d.sender().sent().is_empty());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(d.sender().sent().len(), 2);
        assert_eq!(title_of(&d, 0), "आज की शायरी 🌟");

        sleep(Duration::from_secs(300)).await;
        assert_eq!(d.sender().sent().len(), 4);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_does_not_stop_the_loop() {
        let d = Arc::new(dispatcher(
            MemoryTokens::with(&["A"]).failing_first_reads(1),
            MemoryPoems::with(&["Poem1"]),
            MockSender::default(),
        ));
        let handle = Scheduler::new(Arc::clone(&d), Duration::from_secs(60)).spawn();

        sleep(Duration::from_secs(61)).await;
        assert_eq!(d.tokens().read_calls(), 1);
        assert!(d.sender().sent().is_empty());

        // the registry is back and the next tick delivers
        sleep(Duration::from_secs(60)).await;
        assert_eq!(d.tokens().read_calls(), 2);
        assert_eq!(d.sender().sent().len(), 1);

        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_daily_run_fires_once_with_morning_title() {
        let d = Arc::new(dispatcher(
            MemoryTokens::with(&["A"]),
            MemoryPoems::with(&["Poem1"]),
            MockSender::default(),
        ));
        let timezone = chrono_tz::Asia::Kolkata;
        // two minutes of wall-clock time from now, in local time
        let at = (Utc::now() + chrono::Duration::minutes(2))
            .with_timezone(&timezone)
            .time();
        let handle = Scheduler::new(Arc::clone(&d), Duration::from_secs(3600))
            .with_daily_run(Some(DailyRun { at, timezone }))
            .spawn();

        sleep(Duration::from_secs(60)).await;
        assert!(d.sender().sent().is_empty());

        sleep(Duration::from_secs(120)).await;
        assert_eq!(d.sender().sent().len(), 1);
        assert_eq!(title_of(&d, 0), "Good Morning! ☀️");

        // the next daily run is a day away
        sleep(Duration::from_secs(600)).await;
        assert_eq!(d.sender().sent().len(), 1);

        handle.abort();
    }

    #[test]
    fn test_period_comes_from_config() {
        let config = NotificationConfig {
            interval_secs: 0,
            ..NotificationConfig::default()
        };
        let d = Arc::new(dispatcher(
            MemoryTokens::default(),
            MemoryPoems::default(),
            MockSender::default(),
        ));

        let scheduler = Scheduler::from_config(Arc::clone(&d), &NotificationConfig::default()).unwrap();
        assert_eq!(scheduler.period(), Duration::from_secs(300));
        assert!(scheduler.daily().is_some());
        // a zero period would panic inside tokio
        assert_eq!(
            Scheduler::from_config(d, &config).unwrap().period(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_bad_daily_settings_are_rejected() {
        let config = NotificationConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..NotificationConfig::default()
        };
        let d = Arc::new(dispatcher(
            MemoryTokens::default(),
            MemoryPoems::default(),
            MockSender::default(),
        ));

        assert!(matches!(
            Scheduler::from_config(d, &config),
            Err(DispatchError::Config(_))
        ));
    }
}
