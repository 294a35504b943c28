//! The poll loop: fetch, validate, parse, notify, sleep.

use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use hwbot_api::{parse_status, validate, ApiClient};

use crate::error::BotError;
use crate::notifier::Notify;

/// Polls the review API and relays status changes to the chat.
///
/// Owns the time cursor: the lower bound of the next query window. The cursor
/// advances to the server-reported `current_date` only after a fully
/// successful cycle, so a failed cycle re-queries the same window.
pub struct StatusPoller<N: Notify> {
    client: ApiClient,
    notifier: N,
    cursor: i64,
    poll_interval: std::time::Duration,
    /// Shutdown signal receiver.
    shutdown: watch::Receiver<bool>,
}

impl<N: Notify> StatusPoller<N> {
    /// Creates a new poller starting its query window at `cursor`.
    pub fn new(
        client: ApiClient,
        notifier: N,
        cursor: i64,
        poll_interval: std::time::Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            notifier,
            cursor,
            poll_interval,
            shutdown,
        }
    }

    /// Current lower bound of the query window.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run the polling loop until shutdown signal.
    ///
    /// There is no normal termination; the loop runs until the process is
    /// killed or the shutdown watch flips.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.poll_interval);

        debug!(
            poll_interval_s = self.poll_interval.as_secs(),
            cursor = self.cursor,
            "starting status poller"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                _ = self.shutdown.changed() => {
                    if *self.shutdown.borrow() {
                        debug!("poller received shutdown signal");
                        break;
                    }
                }
            }
        }

        debug!("status poller stopped");
    }

    /// Run one poll cycle. Never panics and never propagates an error:
    /// failures are logged, reported to the chat best-effort, and the next
    /// cycle starts after the usual delay.
    pub async fn poll_once(&mut self) {
        match self.poll_cycle().await {
            Ok(sent) => {
                if sent == 0 {
                    debug!(cursor = self.cursor, "no status changes");
                }
            }
            Err(e) => {
                error!(cursor = self.cursor, error = %e, "poll cycle failed");

                let diagnostic = format!("Сбой в работе программы: {e}");
                if let Err(e) = self.notifier.notify(&diagnostic).await {
                    warn!(error = %e, "could not deliver diagnostic to chat");
                }
            }
        }
    }

    /// One fetch-validate-parse-notify pass. Returns the number of
    /// notifications delivered.
    async fn poll_cycle(&mut self) -> Result<usize, BotError> {
        let payload = self.client.fetch(self.cursor).await?;
        let (homeworks, next_cursor) = validate(payload)?;

        // Every changed homework gets its own notification, in server order.
        let mut sent = 0;
        for record in &homeworks {
            let text = parse_status(record)?;
            self.notifier.notify(&text).await?;
            info!(cursor = self.cursor, "status change relayed");
            sent += 1;
        }

        self.cursor = next_cursor;
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::error::Result;

    /// Notifier that records every message instead of sending it.
    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notify for RecordingNotifier {
        async fn notify(&self, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(BotError::MissingVar("simulated delivery failure"));
            }
            Ok(())
        }
    }

    fn poller_for(
        server: &mockito::Server,
        cursor: i64,
    ) -> StatusPoller<RecordingNotifier> {
        let client = ApiClient::with_endpoint("token", server.url() + "/");
        let (_tx, rx) = watch::channel(false);
        StatusPoller::new(
            client,
            RecordingNotifier::default(),
            cursor,
            Duration::from_millis(10),
            rx,
        )
    }

    #[tokio::test]
    async fn test_cursor_advances_on_success() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::UrlEncoded("from_date".into(), "0".into()))
            .with_body(r#"{"homeworks": [], "current_date": 100}"#)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::UrlEncoded(
                "from_date".into(),
                "100".into(),
            ))
            .with_body(r#"{"homeworks": [], "current_date": 200}"#)
            .create_async()
            .await;

        let mut poller = poller_for(&server, 0);
        poller.poll_once().await;
        assert_eq!(poller.cursor(), 100);

        poller.poll_once().await;
        assert_eq!(poller.cursor(), 200);

        first.assert_async().await;
        second.assert_async().await;

        // Empty homeworks: cursor moved, nothing was sent.
        assert!(poller.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_cursor_holds_on_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let mut poller = poller_for(&server, 7);
        poller.poll_once().await;

        assert_eq!(poller.cursor(), 7);

        // The failure made it to the chat as a diagnostic.
        let messages = poller.notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Сбой в работе программы:"), "{}", messages[0]);
    }

    #[tokio::test]
    async fn test_every_changed_homework_is_relayed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_body(
                r#"{
                    "homeworks": [
                        {"homework_name": "hw1", "status": "approved"},
                        {"homework_name": "hw2", "status": "rejected"}
                    ],
                    "current_date": 300
                }"#,
            )
            .create_async()
            .await;

        let mut poller = poller_for(&server, 0);
        poller.poll_once().await;

        let messages = poller.notifier.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("\"hw1\""));
        assert!(messages[1].contains("\"hw2\""));
        assert_eq!(poller.cursor(), 300);
    }

    #[tokio::test]
    async fn test_unknown_status_suppresses_cursor_advance() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_body(
                r#"{
                    "homeworks": [{"homework_name": "hw1", "status": "lost"}],
                    "current_date": 300
                }"#,
            )
            .create_async()
            .await;

        let mut poller = poller_for(&server, 5);
        poller.poll_once().await;

        assert_eq!(poller.cursor(), 5);
        let messages = poller.notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Сбой в работе программы:"));
    }

    #[tokio::test]
    async fn test_diagnostic_delivery_failure_is_absorbed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = ApiClient::with_endpoint("token", server.url() + "/");
        let (_tx, rx) = watch::channel(false);
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let mut poller =
            StatusPoller::new(client, notifier, 0, Duration::from_millis(10), rx);

        // Must not panic or propagate even though the diagnostic send fails.
        poller.poll_once().await;
        assert_eq!(poller.cursor(), 0);
    }

    #[tokio::test]
    async fn test_loop_survives_bad_status_cycles() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .expect_at_least(2)
            .create_async()
            .await;

        let mut poller = poller_for(&server, 0);
        poller.poll_once().await;
        poller.poll_once().await;

        // Two failed cycles, two diagnostics, loop still alive.
        assert_eq!(poller.notifier.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_poller_shutdown() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_body(r#"{"homeworks": [], "current_date": 1}"#)
            .create_async()
            .await;

        let client = ApiClient::with_endpoint("token", server.url() + "/");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut poller = StatusPoller::new(
            client,
            RecordingNotifier::default(),
            0,
            Duration::from_millis(10),
            shutdown_rx,
        );

        let handle = tokio::spawn(async move {
            poller.run().await;
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_millis(500), handle).await;
        assert!(result.is_ok(), "poller should stop after shutdown signal");
    }
}
