use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::wire::id_string;

/// In-app notification shown in the dashboard bell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "is_read")]
    pub is_read: bool,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Locally synthesized notification; missing fields are filled in on insert
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNotification {
    pub id: Option<String>,
    pub title: String,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewNotification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Fill in defaults: the fallback id, unread, created now
    pub fn into_item(self, fallback_id: String, now: DateTime<Utc>) -> NotificationItem {
        NotificationItem {
            id: self.id.unwrap_or(fallback_id),
            title: self.title,
            message: self.message,
            is_read: false,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

/// Notification list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    #[serde(default, alias = "results")]
    pub notifications: Vec<NotificationItem>,
    /// Server-side count; may exceed the page when the list is truncated
    #[serde(default, alias = "unread_count")]
    pub unread_count: Option<usize>,
}

impl NotificationList {
    pub fn new(notifications: Vec<NotificationItem>) -> Self {
        let unread_count = Some(count_unread(&notifications));
        Self {
            notifications,
            unread_count,
        }
    }

    /// Server count when given, otherwise counted from the list
    pub fn unread(&self) -> usize {
        self.unread_count
            .unwrap_or_else(|| count_unread(&self.notifications))
    }
}

pub fn count_unread(items: &[NotificationItem]) -> usize {
    items.iter().filter(|item| !item.is_read).count()
}

/// Derived lifecycle of the notification store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Unauthenticated or never fetched
    Idle,
    Loading,
    Ready,
    /// Data shown is stale or placeholder, `error` is set
    ReadyWithError,
}

/// Reactive notification state published to views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    /// Newest first by insertion position
    pub notifications: Vec<NotificationItem>,
    pub unread_count: usize,
    pub loading: bool,
    pub error: Option<String>,
    /// A fetch has settled since the last clear
    pub fetched: bool,
}

impl NotificationState {
    pub fn status(&self) -> NotificationStatus {
        if self.loading {
            NotificationStatus::Loading
        } else if self.error.is_some() {
            NotificationStatus::ReadyWithError
        } else if self.fetched || !self.notifications.is_empty() {
            NotificationStatus::Ready
        } else {
            NotificationStatus::Idle
        }
    }

    pub fn get(&self, id: &str) -> Option<&NotificationItem> {
        self.notifications.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_accepts_numeric_ids_and_snake_case() {
        let json = r#"{
            "results": [
                { "id": 12, "title": "Digest ready", "message": "5 new items", "is_read": false, "created_at": "2024-03-01T08:00:00Z" },
                { "id": "n-2", "title": "Welcome", "message": "Hi", "isRead": true, "createdAt": "2024-02-28T08:00:00Z" }
            ]
        }"#;

        let list: NotificationList = serde_json::from_str(json).unwrap();

        assert_eq!(list.notifications.len(), 2);
        assert_eq!(list.notifications[0].id, "12");
        assert!(list.notifications[1].is_read);
        assert_eq!(list.unread_count, None);
        assert_eq!(list.unread(), 1);
    }

    #[test]
    fn test_server_unread_count_wins() {
        let json = r#"{ "notifications": [], "unreadCount": 7 }"#;
        let list: NotificationList = serde_json::from_str(json).unwrap();
        assert_eq!(list.unread(), 7);
    }

    #[test]
    fn test_new_notification_defaults() {
        let now = Utc::now();
        let item = NewNotification::new("Title", "Body").into_item("123".to_string(), now);

        assert_eq!(item.id, "123");
        assert!(!item.is_read);
        assert_eq!(item.created_at, now);
    }

    #[test]
    fn test_status() {
        let mut state = NotificationState::default();
        assert_eq!(state.status(), NotificationStatus::Idle);

        state.loading = true;
        assert_eq!(state.status(), NotificationStatus::Loading);

        state.loading = false;
        state.error = Some("offline".to_string());
        assert_eq!(state.status(), NotificationStatus::ReadyWithError);
    }

    #[test]
    fn test_empty_fetch_is_ready_not_idle() {
        let state = NotificationState {
            fetched: true,
            ..NotificationState::default()
        };
        assert_eq!(state.status(), NotificationStatus::Ready);
    }
}
