use chrono::{TimeZone, Utc};
use timesaver::models::{ContentItem, LinkedArticle, NotificationItem};

pub fn regular_article(slug: &str) -> LinkedArticle {
    LinkedArticle {
        id: format!("article-{}", slug),
        title: format!("Article {}", slug),
        slug: Some(slug.to_string()),
        is_published: true,
    }
}

pub fn ai_article(slug: &str) -> LinkedArticle {
    LinkedArticle {
        id: format!("ai-{}", slug),
        title: format!("AI article {}", slug),
        slug: Some(slug.to_string()),
        is_published: true,
    }
}

/// Content item with the given link fields populated
pub fn content_with(
    linked: Option<LinkedArticle>,
    linked_ai: Option<LinkedArticle>,
    source_url: Option<&str>,
) -> ContentItem {
    let mut item = ContentItem::new("content-1", "Digest");
    item.linked_article = linked;
    item.linked_ai_article = linked_ai;
    item.source_url = source_url.map(str::to_string);
    item
}

pub fn notification(id: &str, is_read: bool) -> NotificationItem {
    NotificationItem {
        id: id.to_string(),
        title: format!("Notification {}", id),
        message: "Something happened".to_string(),
        is_read,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}
