#[cfg(test)]
mod tests {
    use crate::dispatcher::{DispatchError, DispatchOutcome, DispatchReport, MESSAGE_TYPE};
    use crate::test_support::{dispatcher, Failure, MemoryPoems, MemoryTokens, MockSender};
    use crate::title::Occasion;
    use shayari_common::DEFAULT_POEM_TEXT;
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn report(outcome: DispatchOutcome) -> DispatchReport {
        match outcome {
            DispatchOutcome::Sent(report) => report,
            other => panic!("expected a completed fan-out, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_registry_sends_nothing() {
        // The content store is never consulted when there is nobody to send to
        let d = dispatcher(
            MemoryTokens::default(),
            MemoryPoems::with(&["Poem1"]).failing_reads(),
            MockSender::default(),
        );

        let outcome = d.dispatch_random_poem().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::NoDevices);
        assert!(d.sender().sent().is_empty());
    }

    #[tokio::test]
    async fn test_empty_content_store_sends_nothing() {
        let d = dispatcher(
            MemoryTokens::with(&["A", "B"]),
            MemoryPoems::default(),
            MockSender::default(),
        );

        let outcome = d.dispatch_random_poem().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::NoPoems);
        assert!(d.sender().sent().is_empty());
        assert_eq!(d.tokens().snapshot(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_every_device_gets_the_same_poem() {
        let tokens = ["t1", "t2", "t3", "t4"];
        let d = dispatcher(
            MemoryTokens::with(&tokens),
            MemoryPoems::with(&["Poem1", "Poem2", "Poem3"]),
            MockSender::default(),
        );

        let report = report(d.dispatch_random_poem().await.unwrap());
        let sent = d.sender().sent();

        assert_eq!(report.attempted, 4);
        assert_eq!(report.delivered, 4);
        assert_eq!(sent.len(), 4);
        assert!(report.random_index < 3);

        let mut targets: Vec<&str> = sent.iter().map(|m| m.token()).collect();
        targets.sort_unstable();
        assert_eq!(targets, tokens);

        for message in &sent {
            let data = message.message.data.as_ref().unwrap();
            assert_eq!(data["shayari_id"], report.poem_id.to_string());
            assert_eq!(data["random_index"], report.random_index.to_string());
            assert_eq!(data["type"], MESSAGE_TYPE);
        }
    }

    #[tokio::test]
    async fn test_message_carries_poem_text_and_android_hints() {
        let d = dispatcher(
            MemoryTokens::with(&["A"]),
            MemoryPoems::with(&["Dil se dil tak"]),
            MockSender::default(),
        )
        .with_android_channel(Some("shayari_daily".to_string()));

        d.dispatch_random_poem().await.unwrap();
        let sent = d.sender().sent();
        let message = &sent[0].message;

        let notification = message.notification.as_ref().unwrap();
        assert_eq!(notification.body, "Dil se dil tak");
        assert_eq!(notification.title, "आज की शायरी 🌟");

        let android = message.android.as_ref().unwrap();
        assert_eq!(android.priority, "high");
        let hints = android.notification.as_ref().unwrap();
        assert_eq!(hints.sound.as_deref(), Some("default"));
        assert_eq!(hints.channel_id.as_deref(), Some("shayari_daily"));
    }

    #[tokio::test]
    async fn test_morning_run_uses_morning_title() {
        let d = dispatcher(
            MemoryTokens::with(&["A", "B"]),
            MemoryPoems::with(&["Poem1"]),
            MockSender::default(),
        );

        report(d.dispatch(Occasion::Morning).await.unwrap());

        for message in d.sender().sent() {
            assert_eq!(message.message.notification.unwrap().title, "Good Morning! ☀️");
        }
    }

    #[tokio::test]
    async fn test_poem_without_text_uses_default_body() {
        let d = dispatcher(
            MemoryTokens::with(&["A"]),
            MemoryPoems::with(&[""]),
            MockSender::default(),
        );

        d.dispatch_random_poem().await.unwrap();

        let sent = d.sender().sent();
        assert_eq!(
            sent[0].message.notification.as_ref().unwrap().body,
            DEFAULT_POEM_TEXT
        );
    }

    #[tokio::test]
    async fn test_invalid_token_is_pruned_and_others_still_delivered() {
        let d = dispatcher(
            MemoryTokens::with(&["A", "B", "C"]),
            MemoryPoems::with(&["Poem1"]),
            MockSender::failing(&[("B", Failure::InvalidToken)]),
        );

        let report = report(d.dispatch_random_poem().await.unwrap());

        assert_eq!(report.random_index, 0);
        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.pruned, 1);
        assert_eq!(d.sender().sent().len(), 3);
        assert_eq!(d.tokens().snapshot(), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_unregistered_token_is_pruned() {
        let d = dispatcher(
            MemoryTokens::with(&["fresh", "stale"]),
            MemoryPoems::with(&["Poem1", "Poem2"]),
            MockSender::failing(&[("stale", Failure::Unregistered)]),
        );

        let report = report(d.dispatch_random_poem().await.unwrap());

        assert_eq!(report.pruned, 1);
        assert_eq!(d.tokens().snapshot(), vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_transient_failure_keeps_token() {
        let d = dispatcher(
            MemoryTokens::with(&["A", "B"]),
            MemoryPoems::with(&["Poem1"]),
            MockSender::failing(&[("A", Failure::Unavailable)]),
        );

        let report = report(d.dispatch_random_poem().await.unwrap());

        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.pruned, 0);
        assert_eq!(d.tokens().delete_calls(), 0);
        assert_eq!(d.tokens().snapshot(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_store_read_failure_abandons_cycle() {
        let d = dispatcher(
            MemoryTokens::with(&["A"]),
            MemoryPoems::with(&["Poem1"]).failing_reads(),
            MockSender::default(),
        );

        let err = d.dispatch_random_poem().await.unwrap_err();

        assert!(matches!(err, DispatchError::Store(_)));
        assert!(d.sender().sent().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_abandons_rest_of_cycle() {
        let d = dispatcher(
            MemoryTokens::with(&["A", "B"]).failing_deletes(),
            MemoryPoems::with(&["Poem1"]),
            MockSender::failing(&[("A", Failure::Unregistered)]),
        );

        let err = d.dispatch_random_poem().await.unwrap_err();

        assert!(matches!(err, DispatchError::Store(_)));
        // B comes after A and is never attempted
        assert_eq!(d.sender().sent().len(), 1);
        assert_eq!(d.tokens().snapshot(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_overlapping_trigger_is_skipped() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let d = Arc::new(dispatcher(
            MemoryTokens::with(&["A"]),
            MemoryPoems::with(&["Poem1"]),
            MockSender::gated(entered.clone(), release.clone()),
        ));

        let running = tokio::spawn({
            let d = Arc::clone(&d);
            async move { d.dispatch_random_poem().await }
        });
        entered.notified().await;

        assert_eq!(
            d.dispatch_random_poem().await.unwrap(),
            DispatchOutcome::Skipped
        );

        release.notify_one();
        let first = running.await.unwrap().unwrap();
        assert_eq!(report(first).delivered, 1);

        // The guard is released once the cycle ends
        release.notify_one();
        let second = d.dispatch_random_poem().await.unwrap();
        assert_eq!(report(second).delivered, 1);
    }

    #[tokio::test]
    async fn test_random_index_is_uniform() {
        const POEMS: usize = 5;
        const CYCLES: usize = 1000;
        // chi-square critical value for 4 degrees of freedom at p = 0.001
        const CRITICAL: f64 = 18.47;

        let d = dispatcher(
            MemoryTokens::with(&["A"]),
            MemoryPoems::with(&["P1", "P2", "P3", "P4", "P5"]),
            MockSender::default(),
        );

        let mut counts = [0usize; POEMS];
        for _ in 0..CYCLES {
            let report = report(d.dispatch_random_poem().await.unwrap());
            assert!(report.random_index < POEMS);
            assert_eq!(report.poem_id, report.random_index as i64 + 1);
            counts[report.random_index] += 1;
        }

        let expected = CYCLES as f64 / POEMS as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        assert!(
            chi_square < CRITICAL,
            "index distribution {:?} is not uniform (chi-square {:.2})",
            counts,
            chi_square
        );
    }
}
