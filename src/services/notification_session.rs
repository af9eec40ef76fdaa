use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::domain::ports::TaskSpawner;
use crate::services::notification_store::NotificationStore;

/// Ties the notification store to the authentication lifecycle.
///
/// Signing in fetches immediately and then polls every `poll_interval`;
/// signing out (or dropping the session) cancels the poller and clears the
/// store, so no callback outlives the session that started it.
pub struct NotificationSession {
    store: Arc<NotificationStore>,
    spawner: Arc<dyn TaskSpawner>,
    poll_interval: Duration,
    poller: Mutex<Option<CancellationToken>>,
}

impl NotificationSession {
    pub fn new(
        store: Arc<NotificationStore>,
        spawner: Arc<dyn TaskSpawner>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            spawner,
            poll_interval,
            poller: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<NotificationStore> {
        &self.store
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .map(|poller| poller.is_some())
            .unwrap_or(false)
    }

    /// Drive the session from the viewer's authentication state
    pub fn set_authenticated(&self, authenticated: bool) {
        if authenticated {
            self.start();
        } else {
            self.stop();
            self.store.clear();
        }
    }

    /// Manual refresh; races harmlessly with the poller (last write wins)
    pub async fn refresh(&self) {
        self.store.fetch_notifications().await;
    }

    fn start(&self) {
        let mut poller = match self.poller.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if poller.is_some() {
            return;
        }

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let store = Arc::clone(&self.store);
        let interval = self.poll_interval;

        tracing::info!("Starting notification polling every {:?}", interval);

        self.spawner.spawn(Box::pin(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        metrics::counter!("timesaver_notification_polls_total").increment(1);
                        tokio::select! {
                            _ = cancelled.cancelled() => break,
                            _ = store.fetch_notifications() => {}
                        }
                    }
                }
            }

            tracing::debug!("Notification polling stopped");
        }));

        *poller = Some(token);
    }

    fn stop(&self) {
        let token = match self.poller.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(token) = token {
            tracing::info!("Stopping notification polling");
            token.cancel();
        }
    }

    /// Cancel polling without touching the store
    pub fn shutdown(&self) {
        self.stop();
    }
}

impl Drop for NotificationSession {
    fn drop(&mut self) {
        self.stop();
    }
}
