use crate::domain::errors::ClientResult;
use crate::models::NotificationList;

/// Backend operations behind the notification store
#[async_trait::async_trait]
pub trait NotificationApi: Send + Sync {
    /// Fetch the notification list and unread count for the current session
    async fn fetch_notifications(&self) -> ClientResult<NotificationList>;

    /// Mark a set of notifications as read
    async fn mark_as_read(&self, ids: &[String]) -> ClientResult<()>;
}
