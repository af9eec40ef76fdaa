use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::{ClientError, ClientResult};
use crate::domain::ports::{TaskSpawner, TimeSaverApi};
use crate::models::{
    ArticleSummary, ContentItem, ContentPage, ContentQuery, ContentUpdate, DashboardSnapshot,
    FetchOutcome, InteractionKind, LinkedArticleInfo, NavigationTarget, NewContent, SortField,
    SortOrder, TimeSaverAnalytics, TimeSaverStats,
};
use crate::services::link_resolver::{self, LinkResolver};
use crate::services::placeholder;
use crate::services::timeout::with_timeout;

/// Time Saver content access for views.
///
/// Reads degrade to placeholder data on transient failures and say so through
/// [`FetchOutcome`]. Mutations validate locally and propagate every error.
/// Tracking calls are fire-and-forget.
#[derive(Clone)]
pub struct TimeSaverService {
    api: Arc<dyn TimeSaverApi>,
    spawner: Arc<dyn TaskSpawner>,
    resolver: LinkResolver,
    request_timeout: Duration,
}

impl TimeSaverService {
    pub fn new(
        api: Arc<dyn TimeSaverApi>,
        spawner: Arc<dyn TaskSpawner>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            api,
            spawner,
            resolver: LinkResolver::default(),
            request_timeout,
        }
    }

    pub fn with_resolver(mut self, resolver: LinkResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub async fn list_content(&self, query: &ContentQuery) -> FetchOutcome<ContentPage> {
        match with_timeout(self.request_timeout, self.api.list_content(query)).await {
            Ok(page) => FetchOutcome::Live(page),
            Err(e) => fallback("content", e, || placeholder::content_page(query)),
        }
    }

    /// A specific item has no safe stand-in, so errors propagate
    pub async fn get_content(&self, id: &str) -> ClientResult<ContentItem> {
        let id = require_id(id)?;
        with_timeout(self.request_timeout, self.api.get_content(id)).await
    }

    pub async fn get_stats(&self) -> FetchOutcome<TimeSaverStats> {
        match with_timeout(self.request_timeout, self.api.get_stats()).await {
            Ok(stats) => FetchOutcome::Live(stats),
            Err(e) => fallback("stats", e, placeholder::stats),
        }
    }

    /// Analytics over the trailing `days`, clamped to 1..=365
    pub async fn get_analytics(&self, days: u32) -> FetchOutcome<TimeSaverAnalytics> {
        let days = days.clamp(1, 365);
        match with_timeout(self.request_timeout, self.api.get_analytics(days)).await {
            Ok(analytics) => FetchOutcome::Live(analytics),
            Err(e) => fallback("analytics", e, || placeholder::analytics(days)),
        }
    }

    /// Stats and the newest `recent_limit` items, fetched concurrently.
    /// Each half reports its own outcome.
    pub async fn load_dashboard(&self, recent_limit: u32) -> DashboardSnapshot {
        let recent_query = ContentQuery::new()
            .sort_by(SortField::PublishedAt, SortOrder::Desc)
            .limit(recent_limit);

        let (stats, recent) = tokio::join!(self.get_stats(), self.list_content(&recent_query));

        DashboardSnapshot {
            stats,
            recent: recent.map(|page| page.items),
        }
    }

    /// Record a view in the background; failures are only logged
    pub fn record_view(&self, content_id: &str) {
        let api = Arc::clone(&self.api);
        let id = content_id.to_string();
        let limit = self.request_timeout;

        self.spawner.spawn(Box::pin(async move {
            if let Err(e) = with_timeout(limit, api.record_view(&id)).await {
                tracing::warn!("Failed to record view for content {}: {}", id, e);
                metrics::counter!("timesaver_tracking_failures_total", "event" => "view")
                    .increment(1);
            }
        }));
    }

    /// Record an interaction in the background; failures are only logged
    pub fn record_interaction(&self, content_id: &str, kind: InteractionKind) {
        let api = Arc::clone(&self.api);
        let id = content_id.to_string();
        let limit = self.request_timeout;

        self.spawner.spawn(Box::pin(async move {
            if let Err(e) = with_timeout(limit, api.record_interaction(&id, kind)).await {
                tracing::warn!("Failed to record {} for content {}: {}", kind, id, e);
                metrics::counter!("timesaver_tracking_failures_total", "event" => kind.as_str())
                    .increment(1);
            }
        }));
    }

    pub async fn search_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        with_timeout(self.request_timeout, self.api.search_articles(query)).await
    }

    pub async fn search_ai_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        with_timeout(self.request_timeout, self.api.search_ai_articles(query)).await
    }

    pub async fn create_content(&self, content: &NewContent) -> ClientResult<ContentItem> {
        content.validate()?;
        let created = with_timeout(self.request_timeout, self.api.create_content(content)).await?;
        tracing::info!("Created content {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update_content(
        &self,
        id: &str,
        update: &ContentUpdate,
    ) -> ClientResult<ContentItem> {
        let id = require_id(id)?;
        update.validate()?;
        let updated =
            with_timeout(self.request_timeout, self.api.update_content(id, update)).await?;
        tracing::info!("Updated content {}", updated.id);
        Ok(updated)
    }

    pub async fn delete_content(&self, id: &str) -> ClientResult<()> {
        let id = require_id(id)?;
        with_timeout(self.request_timeout, self.api.delete_content(id)).await?;
        tracing::info!("Deleted content {}", id);
        Ok(())
    }

    pub fn resolve(&self, content: &ContentItem, is_authenticated: bool) -> NavigationTarget {
        self.resolver.resolve(content, is_authenticated)
    }

    pub fn has_linked_article(&self, content: &ContentItem) -> bool {
        link_resolver::has_linked_article(content)
    }

    pub fn linked_article_info(&self, content: &ContentItem) -> Option<LinkedArticleInfo> {
        link_resolver::linked_article_info(content)
    }
}

fn require_id(id: &str) -> ClientResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        Err(ClientError::Validation("Content ID is required".to_string()))
    } else {
        Ok(id)
    }
}

/// Transient failures become placeholder data; anything else is reported
fn fallback<T>(
    resource: &'static str,
    error: ClientError,
    placeholder: impl FnOnce() -> T,
) -> FetchOutcome<T> {
    if error.is_transient() {
        tracing::warn!("Failed to fetch {}, using placeholder data: {}", resource, error);
        metrics::counter!("timesaver_fetch_failures_total", "resource" => resource).increment(1);
        FetchOutcome::Placeholder {
            data: placeholder(),
            reason: error.to_string(),
        }
    } else {
        tracing::error!("Failed to fetch {}: {}", resource, error);
        FetchOutcome::Failed(error)
    }
}
