use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use crate::domain::ports::NotificationApi;
use crate::models::{
    count_unread, NewNotification, NotificationItem, NotificationList, NotificationState,
};
use crate::services::placeholder;
use crate::services::timeout::with_timeout;

/// State transitions of the notification store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    FetchStarted,
    /// Full replace from the backend, not a delta
    FetchSucceeded(NotificationList),
    /// Keep what we have; fall back to `fallback` only when empty
    FetchFailed {
        fallback: Vec<NotificationItem>,
        error: String,
    },
    /// The in-flight fetch was dropped before it settled
    FetchCancelled,
    MarkRead(HashSet<String>),
    Add(NotificationItem),
    ClearAll,
}

/// Apply one action. `unread_count` tracks the unread items after each call.
pub fn reduce(state: &mut NotificationState, action: NotificationAction) {
    match action {
        NotificationAction::FetchStarted => {
            state.loading = true;
        }
        NotificationAction::FetchSucceeded(list) => {
            state.unread_count = list.unread();
            state.notifications = list.notifications;
            state.loading = false;
            state.error = None;
            state.fetched = true;
        }
        NotificationAction::FetchFailed { fallback, error } => {
            if state.notifications.is_empty() {
                state.unread_count = count_unread(&fallback);
                state.notifications = fallback;
            }
            state.loading = false;
            state.error = Some(error);
            state.fetched = true;
        }
        NotificationAction::FetchCancelled => {
            state.loading = false;
        }
        NotificationAction::MarkRead(ids) => {
            let mut newly_read = 0;
            for item in state
                .notifications
                .iter_mut()
                .filter(|item| ids.contains(&item.id))
            {
                if !item.is_read {
                    item.is_read = true;
                    newly_read += 1;
                }
            }
            state.unread_count = state.unread_count.saturating_sub(newly_read);
        }
        NotificationAction::Add(item) => {
            state.notifications.insert(0, item);
            state.unread_count += 1;
        }
        NotificationAction::ClearAll => {
            *state = NotificationState::default();
        }
    }
}

/// Clears `loading` when a fetch future is dropped mid-request
struct FetchGuard<'a> {
    store: &'a NotificationStore,
    epoch: u64,
    settled: bool,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.settled || self.store.epoch.load(Ordering::SeqCst) != self.epoch {
            return;
        }
        tracing::debug!("Notification fetch cancelled before completion");
        self.store.dispatch(NotificationAction::FetchCancelled);
    }
}

/// Client-side notification cache for one signed-in session.
///
/// State is published through a watch channel; views hold a receiver from
/// [`NotificationStore::subscribe`]. Backend failures never escape: they land
/// in `error` and the store degrades to cached or placeholder data.
pub struct NotificationStore {
    api: Arc<dyn NotificationApi>,
    state: watch::Sender<NotificationState>,
    request_timeout: Duration,
    /// Bumped on clear so fetches started before a logout are discarded
    epoch: AtomicU64,
    last_local_id: AtomicI64,
}

impl NotificationStore {
    pub fn new(api: Arc<dyn NotificationApi>, request_timeout: Duration) -> Self {
        let (state, _) = watch::channel(NotificationState::default());
        Self {
            api,
            state,
            request_timeout,
            epoch: AtomicU64::new(0),
            last_local_id: AtomicI64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> NotificationState {
        self.state.borrow().clone()
    }

    pub fn unread_count(&self) -> usize {
        self.state.borrow().unread_count
    }

    fn dispatch(&self, action: NotificationAction) {
        self.state.send_modify(|state| reduce(state, action));
    }

    /// Refresh from the backend. Never fails; see the type docs.
    pub async fn fetch_notifications(&self) {
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.dispatch(NotificationAction::FetchStarted);
        let mut guard = FetchGuard {
            store: self,
            epoch,
            settled: false,
        };

        let result = with_timeout(self.request_timeout, self.api.fetch_notifications()).await;
        guard.settled = true;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("Discarding notification fetch that finished after logout");
            return;
        }

        match result {
            Ok(list) => {
                tracing::debug!(
                    count = list.notifications.len(),
                    unread = list.unread(),
                    "Notifications refreshed"
                );
                self.dispatch(NotificationAction::FetchSucceeded(list));
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Notification fetch unauthorized, clearing state");
                self.clear();
            }
            Err(e) => {
                tracing::warn!("Failed to fetch notifications: {}", e);
                metrics::counter!("timesaver_fetch_failures_total", "resource" => "notifications")
                    .increment(1);
                self.dispatch(NotificationAction::FetchFailed {
                    fallback: placeholder::notifications(Utc::now()),
                    error: e.to_string(),
                });
            }
        }
    }

    /// Optimistically mark `ids` as read, then tell the backend.
    ///
    /// The local change stands even if the backend call fails.
    pub async fn mark_as_read<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: HashSet<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return;
        }

        self.dispatch(NotificationAction::MarkRead(ids.clone()));

        let ids: Vec<String> = ids.into_iter().collect();
        if let Err(e) = with_timeout(self.request_timeout, self.api.mark_as_read(&ids)).await {
            tracing::warn!(
                "Failed to mark {} notification(s) as read on the backend: {}",
                ids.len(),
                e
            );
        }
    }

    /// Insert a locally created notification at the head of the list
    pub fn add_notification(&self, notification: NewNotification) -> NotificationItem {
        let now = Utc::now();
        let id = self.next_local_id(now.timestamp_millis());
        let item = notification.into_item(id.to_string(), now);

        self.dispatch(NotificationAction::Add(item.clone()));
        item
    }

    /// Reset to the empty signed-out state
    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.dispatch(NotificationAction::ClearAll);
    }

    /// Millisecond timestamp, bumped past the previous one on collision
    fn next_local_id(&self, now_millis: i64) -> i64 {
        let mut previous = self.last_local_id.load(Ordering::SeqCst);
        loop {
            let candidate = now_millis.max(previous + 1);
            match self.last_local_id.compare_exchange(
                previous,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: &str, is_read: bool) -> NotificationItem {
        NotificationItem {
            id: id.to_string(),
            title: format!("Title {}", id),
            message: "Message".to_string(),
            is_read,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn ids(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fetch_replaces_wholesale() {
        let mut state = NotificationState {
            notifications: vec![item("old", false)],
            unread_count: 1,
            loading: true,
            error: Some("previous failure".to_string()),
            fetched: true,
        };

        reduce(
            &mut state,
            NotificationAction::FetchSucceeded(NotificationList::new(vec![
                item("a", false),
                item("b", true),
            ])),
        );

        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.notifications[0].id, "a");
        assert_eq!(state.unread_count, 1);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_failure_keeps_stale_data() {
        let mut state = NotificationState {
            notifications: vec![item("cached", false)],
            unread_count: 1,
            loading: true,
            error: None,
            fetched: true,
        };

        reduce(
            &mut state,
            NotificationAction::FetchFailed {
                fallback: vec![item("placeholder", true)],
                error: "offline".to_string(),
            },
        );

        assert_eq!(state.notifications[0].id, "cached");
        assert_eq!(state.unread_count, 1);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_failure_on_empty_installs_fallback() {
        let mut state = NotificationState::default();
        reduce(&mut state, NotificationAction::FetchStarted);
        reduce(
            &mut state,
            NotificationAction::FetchFailed {
                fallback: vec![item("placeholder", true)],
                error: "offline".to_string(),
            },
        );

        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.unread_count, 0);
        assert!(!state.loading);
    }

    #[test]
    fn test_cancelled_fetch_only_clears_loading() {
        let mut state = NotificationState {
            notifications: vec![item("cached", false)],
            unread_count: 1,
            loading: true,
            error: Some("earlier".to_string()),
            fetched: true,
        };

        reduce(&mut state, NotificationAction::FetchCancelled);

        assert!(!state.loading);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.error.as_deref(), Some("earlier"));
    }

    #[test]
    fn test_mark_read_counts_only_unread_matches() {
        let mut state = NotificationState {
            notifications: vec![item("a", false), item("b", true), item("c", false)],
            unread_count: 2,
            loading: false,
            error: None,
            fetched: true,
        };

        reduce(&mut state, NotificationAction::MarkRead(ids(&["a", "b", "missing"])));

        assert_eq!(state.unread_count, 1);
        assert!(state.get("a").unwrap().is_read);
        assert!(!state.get("c").unwrap().is_read);
    }

    #[test]
    fn test_mark_read_clamps_at_zero() {
        let mut state = NotificationState {
            notifications: vec![item("a", false)],
            unread_count: 0,
            loading: false,
            error: None,
            fetched: true,
        };

        reduce(&mut state, NotificationAction::MarkRead(ids(&["a"])));
        assert_eq!(state.unread_count, 0);
    }

    #[test]
    fn test_add_inserts_at_head() {
        let mut state = NotificationState::default();
        reduce(&mut state, NotificationAction::Add(item("first", false)));
        reduce(&mut state, NotificationAction::Add(item("second", false)));

        assert_eq!(state.notifications[0].id, "second");
        assert_eq!(state.unread_count, 2);
    }

    #[test]
    fn test_clear_all() {
        let mut state = NotificationState {
            notifications: vec![item("a", false)],
            unread_count: 1,
            loading: true,
            error: Some("x".to_string()),
            fetched: true,
        };
        reduce(&mut state, NotificationAction::ClearAll);
        assert_eq!(state, NotificationState::default());
    }
}
