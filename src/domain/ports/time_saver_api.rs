use crate::domain::errors::ClientResult;
use crate::models::{
    ArticleSummary, ContentItem, ContentPage, ContentQuery, ContentUpdate, InteractionKind,
    NewContent, TimeSaverAnalytics, TimeSaverStats,
};

/// Backend operations for Time Saver content, stats and article lookup
#[async_trait::async_trait]
pub trait TimeSaverApi: Send + Sync {
    /// List content filtered, sorted and paginated by `query`
    async fn list_content(&self, query: &ContentQuery) -> ClientResult<ContentPage>;

    /// Get a single content item by ID
    async fn get_content(&self, id: &str) -> ClientResult<ContentItem>;

    async fn get_stats(&self) -> ClientResult<TimeSaverStats>;

    /// Analytics over the trailing `days` days
    async fn get_analytics(&self, days: u32) -> ClientResult<TimeSaverAnalytics>;

    /// Record that the content was viewed
    async fn record_view(&self, id: &str) -> ClientResult<()>;

    /// Record a typed interaction (bookmark, share, ...)
    async fn record_interaction(&self, id: &str, kind: InteractionKind) -> ClientResult<()>;

    /// Search published regular articles
    async fn search_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>>;

    /// Search AI-generated articles
    async fn search_ai_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>>;

    async fn create_content(&self, content: &NewContent) -> ClientResult<ContentItem>;

    async fn update_content(&self, id: &str, update: &ContentUpdate) -> ClientResult<ContentItem>;

    async fn delete_content(&self, id: &str) -> ClientResult<()>;
}
