use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{ClientError, ClientResult};
use crate::models::wire::{non_empty, RawId, StringOrList};

/// Article a content item points to (regular or AI-generated)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLinkedArticle", rename_all = "camelCase")]
pub struct LinkedArticle {
    pub id: String,
    pub title: String,
    /// Absent when the backend sent no slug or an empty one
    pub slug: Option<String>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLinkedArticle {
    pub id: RawId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "is_published")]
    pub is_published: Option<bool>,
}

impl From<RawLinkedArticle> for LinkedArticle {
    fn from(raw: RawLinkedArticle) -> Self {
        Self {
            id: raw.id.into(),
            title: raw.title.unwrap_or_default(),
            slug: non_empty(raw.slug),
            is_published: raw.is_published.unwrap_or(false),
        }
    }
}

/// Time Saver digest item in its canonical shape.
///
/// Deserialization goes through [`RawContentItem`], so every item that enters
/// the crate has list-valued `key_points`/`tags` and blank optional strings
/// folded to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawContentItem", rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub category: Option<String>,
    pub content_group: Option<String>,
    pub tags: Vec<String>,
    pub read_time_seconds: u32,
    pub view_count: u64,
    pub is_priority: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub source_url: Option<String>,
    pub linked_article: Option<LinkedArticle>,
    pub linked_ai_article: Option<LinkedArticle>,
}

impl ContentItem {
    /// Minimal item with only presentation basics set
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            key_points: Vec::new(),
            category: None,
            content_group: None,
            tags: Vec::new(),
            read_time_seconds: 0,
            view_count: 0,
            is_priority: false,
            published_at: None,
            source_url: None,
            linked_article: None,
            linked_ai_article: None,
        }
    }
}

/// Content as the backend actually sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContentItem {
    pub id: RawId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "key_points")]
    pub key_points: Option<StringOrList>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "content_group")]
    pub content_group: Option<String>,
    #[serde(default)]
    pub tags: Option<StringOrList>,
    #[serde(default, alias = "read_time_seconds")]
    pub read_time_seconds: Option<u32>,
    #[serde(default, alias = "view_count")]
    pub view_count: Option<u64>,
    #[serde(default, alias = "is_priority")]
    pub is_priority: Option<bool>,
    #[serde(default, alias = "published_at")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "source_url")]
    pub source_url: Option<String>,
    #[serde(default, alias = "linked_article")]
    pub linked_article: Option<LinkedArticle>,
    #[serde(default, alias = "linked_ai_article")]
    pub linked_ai_article: Option<LinkedArticle>,
}

impl From<RawContentItem> for ContentItem {
    fn from(raw: RawContentItem) -> Self {
        Self {
            id: raw.id.into(),
            title: raw.title.unwrap_or_default(),
            summary: raw.summary.unwrap_or_default(),
            key_points: raw
                .key_points
                .map(|points| points.into_entries('\n'))
                .unwrap_or_default(),
            category: non_empty(raw.category),
            content_group: non_empty(raw.content_group),
            tags: raw.tags.map(|tags| tags.into_entries(',')).unwrap_or_default(),
            read_time_seconds: raw.read_time_seconds.unwrap_or(0),
            view_count: raw.view_count.unwrap_or(0),
            is_priority: raw.is_priority.unwrap_or(false),
            published_at: raw.published_at,
            source_url: non_empty(raw.source_url),
            linked_article: raw.linked_article,
            linked_ai_article: raw.linked_ai_article,
        }
    }
}

/// Sortable content fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    PublishedAt,
    ViewCount,
    ReadTime,
    Priority,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::PublishedAt => "published_at",
            SortField::ViewCount => "view_count",
            SortField::ReadTime => "read_time_seconds",
            SortField::Priority => "is_priority",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filter, sort and page parameters for content listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub category: Option<String>,
    pub content_group: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self {
            category: None,
            content_group: None,
            search: None,
            sort_by: None,
            sort_order: SortOrder::Desc,
            page: 1,
            limit: 20,
        }
    }
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(Some(category.into()));
        self
    }

    pub fn content_group(mut self, group: impl Into<String>) -> Self {
        self.content_group = non_empty(Some(group.into()));
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(Some(search.into()));
        self
    }

    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = order;
        self
    }

    /// Pages are 1-based; 0 is bumped to 1
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Clamped to 1..=100
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, 100);
        self
    }

    /// Query-string pairs in the backend's parameter names
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(group) = &self.content_group {
            pairs.push(("content_group", group.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(field) = self.sort_by {
            pairs.push(("sort_by", field.as_str().to_string()));
            pairs.push(("sort_order", self.sort_order.as_str().to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// One page of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPage {
    #[serde(alias = "results")]
    pub items: Vec<ContentItem>,
    #[serde(default, alias = "count")]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

/// Typed interaction events recorded against content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Bookmark,
    Share,
    LinkClick,
    Like,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Bookmark => "bookmark",
            InteractionKind::Share => "share",
            InteractionKind::LinkClick => "link_click",
            InteractionKind::Like => "like",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload for creating content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    pub title: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_group: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time_seconds: Option<u32>,
    pub is_priority: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_article_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_ai_article_id: Option<String>,
}

impl NewContent {
    /// Check required fields before anything is sent
    pub fn validate(&self) -> ClientResult<()> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation("Title is required".to_string()));
        }
        if self.summary.trim().is_empty() {
            return Err(ClientError::Validation("Summary is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(ClientError::Validation("Category is required".to_string()));
        }
        if self.read_time_seconds == Some(0) {
            return Err(ClientError::Validation(
                "Read time must be greater than zero".to_string(),
            ));
        }
        if let Some(url) = &self.source_url {
            validate_source_url(url)?;
        }
        Ok(())
    }
}

/// Partial update; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_priority: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl ContentUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.is_empty() {
            return Err(ClientError::Validation("Nothing to update".to_string()));
        }
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(ClientError::Validation("Title cannot be empty".to_string()));
        }
        if matches!(&self.summary, Some(summary) if summary.trim().is_empty()) {
            return Err(ClientError::Validation("Summary cannot be empty".to_string()));
        }
        if matches!(&self.category, Some(category) if category.trim().is_empty()) {
            return Err(ClientError::Validation("Category cannot be empty".to_string()));
        }
        if let Some(url) = &self.source_url {
            validate_source_url(url)?;
        }
        Ok(())
    }
}

fn validate_source_url(url: &str) -> ClientResult<()> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ClientError::Validation(format!(
            "Source URL must start with http:// or https://, got '{}'",
            url
        )))
    }
}
