use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use timesaver::domain::ports::{NotificationApi, TimeSaverApi};
use timesaver::models::{
    ArticleSummary, ContentItem, ContentPage, ContentQuery, ContentUpdate, InteractionKind,
    NewContent, NotificationList, TimeSaverAnalytics, TimeSaverStats,
};
use timesaver::{ClientError, ClientResult};

/// Scripted backend response
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Err(ClientError),
    /// Never resolves
    Hang,
}

impl<T: Clone> Reply<T> {
    async fn resolve(&self) -> ClientResult<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Err(error) => Err(error.clone()),
            Reply::Hang => futures::future::pending::<ClientResult<T>>().await,
        }
    }
}

fn network_down() -> ClientError {
    ClientError::Network("connection refused".to_string())
}

pub struct FakeNotificationApi {
    reply: Mutex<Reply<NotificationList>>,
    mark_reply: Mutex<Reply<()>>,
    fetch_calls: AtomicUsize,
    marked: Mutex<Vec<Vec<String>>>,
}

impl FakeNotificationApi {
    pub fn new(list: NotificationList) -> Self {
        Self {
            reply: Mutex::new(Reply::Ok(list)),
            mark_reply: Mutex::new(Reply::Ok(())),
            fetch_calls: AtomicUsize::new(0),
            marked: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(NotificationList::new(Vec::new()))
    }

    pub fn failing(error: ClientError) -> Self {
        let api = Self::empty();
        api.set_reply(Reply::Err(error));
        api
    }

    pub fn set_reply(&self, reply: Reply<NotificationList>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn fail_mark_read(&self) {
        *self.mark_reply.lock().unwrap() = Reply::Err(network_down());
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn marked(&self) -> Vec<Vec<String>> {
        self.marked.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotificationApi for FakeNotificationApi {
    async fn fetch_notifications(&self) -> ClientResult<NotificationList> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.reply.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn mark_as_read(&self, ids: &[String]) -> ClientResult<()> {
        let mut sorted = ids.to_vec();
        sorted.sort();
        self.marked.lock().unwrap().push(sorted);
        let reply = self.mark_reply.lock().unwrap().clone();
        reply.resolve().await
    }
}

pub struct FakeTimeSaverApi {
    pub content: Mutex<Reply<ContentPage>>,
    pub stats: Mutex<Reply<TimeSaverStats>>,
    pub analytics: Mutex<Reply<TimeSaverAnalytics>>,
    pub articles: Mutex<Vec<ArticleSummary>>,
    pub fail_tracking: Mutex<bool>,
    pub views: Mutex<Vec<String>>,
    pub interactions: Mutex<Vec<(String, InteractionKind)>>,
    pub search_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub last_query: Mutex<Option<ContentQuery>>,
    pub analytics_days: Mutex<Option<u32>>,
}

impl FakeTimeSaverApi {
    pub fn new(items: Vec<ContentItem>) -> Self {
        let total = items.len() as u64;
        Self {
            content: Mutex::new(Reply::Ok(ContentPage {
                items,
                total,
                page: 1,
                limit: 20,
            })),
            stats: Mutex::new(Reply::Ok(TimeSaverStats {
                total_items: total,
                today_new: 1,
                critical_updates: 0,
                total_views: 42,
                average_read_time_seconds: 75.0,
            })),
            analytics: Mutex::new(Reply::Ok(TimeSaverAnalytics::default())),
            articles: Mutex::new(Vec::new()),
            fail_tracking: Mutex::new(false),
            views: Mutex::new(Vec::new()),
            interactions: Mutex::new(Vec::new()),
            search_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            analytics_days: Mutex::new(None),
        }
    }

    pub fn items(&self) -> Vec<ContentItem> {
        match &*self.content.lock().unwrap() {
            Reply::Ok(page) => page.items.clone(),
            _ => Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl TimeSaverApi for FakeTimeSaverApi {
    async fn list_content(&self, query: &ContentQuery) -> ClientResult<ContentPage> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        let reply = self.content.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn get_content(&self, id: &str) -> ClientResult<ContentItem> {
        self.items()
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("content {}", id)))
    }

    async fn get_stats(&self) -> ClientResult<TimeSaverStats> {
        let reply = self.stats.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn get_analytics(&self, days: u32) -> ClientResult<TimeSaverAnalytics> {
        *self.analytics_days.lock().unwrap() = Some(days);
        let reply = self.analytics.lock().unwrap().clone();
        reply.resolve().await
    }

    async fn record_view(&self, id: &str) -> ClientResult<()> {
        if *self.fail_tracking.lock().unwrap() {
            return Err(network_down());
        }
        self.views.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn record_interaction(&self, id: &str, kind: InteractionKind) -> ClientResult<()> {
        if *self.fail_tracking.lock().unwrap() {
            return Err(network_down());
        }
        self.interactions
            .lock()
            .unwrap()
            .push((id.to_string(), kind));
        Ok(())
    }

    async fn search_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let needle = query.to_lowercase();
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|article| article.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn search_ai_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>> {
        self.search_articles(query).await
    }

    async fn create_content(&self, content: &NewContent) -> ClientResult<ContentItem> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut item = ContentItem::new("created-1", content.title.clone());
        item.summary = content.summary.clone();
        item.category = Some(content.category.clone());
        Ok(item)
    }

    async fn update_content(&self, id: &str, update: &ContentUpdate) -> ClientResult<ContentItem> {
        let mut item = self.get_content(id).await?;
        if let Some(title) = &update.title {
            item.title = title.clone();
        }
        if let Some(is_priority) = update.is_priority {
            item.is_priority = is_priority;
        }
        Ok(item)
    }

    async fn delete_content(&self, id: &str) -> ClientResult<()> {
        self.get_content(id).await.map(|_| ())
    }
}
