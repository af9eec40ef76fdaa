//! Stand-in data shown when the backend is unreachable.

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};

use crate::models::{
    CategoryCount, ContentItem, ContentPage, ContentQuery, DailyViews, LinkedArticle,
    NotificationItem, TimeSaverAnalytics, TimeSaverStats,
};

fn published(day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).single()
}

/// One item per link kind: regular, AI and external
pub fn content_items() -> Vec<ContentItem> {
    let mut regular = ContentItem::new("placeholder-1", "Weekly AI research roundup");
    regular.summary = "The most important papers and releases of the week.".to_string();
    regular.key_points = vec![
        "New open-weight models released".to_string(),
        "Benchmarks continue to saturate".to_string(),
    ];
    regular.category = Some("ai".to_string());
    regular.read_time_seconds = 120;
    regular.is_priority = true;
    regular.published_at = published(3);
    regular.linked_article = Some(LinkedArticle {
        id: "placeholder-article-1".to_string(),
        title: "AI research roundup".to_string(),
        slug: Some("ai-research-roundup".to_string()),
        is_published: true,
    });

    let mut ai = ContentItem::new("placeholder-2", "Machine learning in production");
    ai.summary = "Lessons from deploying models at scale.".to_string();
    ai.key_points = vec!["Monitor drift".to_string(), "Version your data".to_string()];
    ai.category = Some("ml".to_string());
    ai.read_time_seconds = 90;
    ai.published_at = published(2);
    ai.linked_ai_article = Some(LinkedArticle {
        id: "placeholder-ai-1".to_string(),
        title: "ML in production, explained".to_string(),
        slug: Some("ml-in-production".to_string()),
        is_published: true,
    });

    let mut external = ContentItem::new("placeholder-3", "Industry news digest");
    external.summary = "Headlines from around the industry.".to_string();
    external.category = Some("industry".to_string());
    external.read_time_seconds = 60;
    external.published_at = published(1);
    external.source_url = Some("https://example.com/industry-news".to_string());

    vec![regular, ai, external]
}

/// Placeholder page honoring the query's category, search and limit
pub fn content_page(query: &ContentQuery) -> ContentPage {
    let search = query.search.as_ref().map(|s| s.to_lowercase());
    let matching: Vec<ContentItem> = content_items()
        .into_iter()
        .filter(|item| match &query.category {
            Some(category) => item.category.as_deref() == Some(category.as_str()),
            None => true,
        })
        .filter(|item| match &search {
            Some(needle) => {
                item.title.to_lowercase().contains(needle)
                    || item.summary.to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect();

    let total = matching.len() as u64;
    ContentPage {
        items: matching.into_iter().take(query.limit as usize).collect(),
        total,
        page: 1,
        limit: query.limit,
    }
}

pub fn stats() -> TimeSaverStats {
    TimeSaverStats {
        total_items: 3,
        today_new: 0,
        critical_updates: 1,
        total_views: 0,
        average_read_time_seconds: 90.0,
    }
}

pub fn analytics(days: u32) -> TimeSaverAnalytics {
    let start = Utc::now().date_naive();
    let views_by_day = (0..days)
        .rev()
        .map(|offset| DailyViews {
            date: start - ChronoDuration::days(i64::from(offset)),
            views: 0,
        })
        .collect();

    TimeSaverAnalytics {
        views_by_day,
        top_content: Vec::new(),
        category_breakdown: vec![
            CategoryCount {
                category: "ai".to_string(),
                count: 1,
            },
            CategoryCount {
                category: "ml".to_string(),
                count: 1,
            },
            CategoryCount {
                category: "industry".to_string(),
                count: 1,
            },
        ],
    }
}

/// Minimal notification set; already read so no badge is raised
pub fn notifications(now: DateTime<Utc>) -> Vec<NotificationItem> {
    vec![NotificationItem {
        id: "placeholder-notification".to_string(),
        title: "Notifications unavailable".to_string(),
        message: "We couldn't reach the notification service. Showing cached data.".to_string(),
        is_read: true,
        created_at: now,
    }]
}
