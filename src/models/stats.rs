use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ClientError;
use crate::models::ContentItem;

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeSaverStats {
    #[serde(alias = "total_items")]
    pub total_items: u64,
    #[serde(alias = "today_new")]
    pub today_new: u64,
    #[serde(alias = "critical_updates")]
    pub critical_updates: u64,
    #[serde(alias = "total_views")]
    pub total_views: u64,
    #[serde(alias = "average_read_time_seconds")]
    pub average_read_time_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Server-aggregated analytics, transported as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeSaverAnalytics {
    #[serde(alias = "views_by_day")]
    pub views_by_day: Vec<DailyViews>,
    #[serde(alias = "top_content")]
    pub top_content: Vec<ContentItem>,
    #[serde(alias = "category_breakdown")]
    pub category_breakdown: Vec<CategoryCount>,
}

/// Outcome of a read that may degrade to placeholder data.
///
/// Keeps "showing stand-in content" distinct from "the backend answered", so
/// callers can flag outages instead of silently rendering mock data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Live(T),
    Placeholder { data: T, reason: String },
    Failed(ClientError),
}

impl<T> FetchOutcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchOutcome::Live(data) | FetchOutcome::Placeholder { data, .. } => Some(data),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            FetchOutcome::Live(data) | FetchOutcome::Placeholder { data, .. } => Some(data),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FetchOutcome::Live(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, FetchOutcome::Placeholder { .. })
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            FetchOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Live(data) => FetchOutcome::Live(f(data)),
            FetchOutcome::Placeholder { data, reason } => FetchOutcome::Placeholder {
                data: f(data),
                reason,
            },
            FetchOutcome::Failed(error) => FetchOutcome::Failed(error),
        }
    }
}

/// Stats and recent content loaded side by side; each half stands alone
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: FetchOutcome<TimeSaverStats>,
    pub recent: FetchOutcome<Vec<ContentItem>>,
}

impl DashboardSnapshot {
    /// Both halves came from the backend
    pub fn is_fully_live(&self) -> bool {
        self.stats.is_live() && self.recent.is_live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_map_keeps_reason() {
        let outcome: FetchOutcome<Vec<u8>> = FetchOutcome::Placeholder {
            data: vec![1, 2, 3],
            reason: "offline".to_string(),
        };

        let mapped = outcome.map(|v| v.len());
        assert_eq!(
            mapped,
            FetchOutcome::Placeholder {
                data: 3,
                reason: "offline".to_string()
            }
        );
    }

    #[test]
    fn test_failed_has_no_data() {
        let outcome: FetchOutcome<u8> = FetchOutcome::Failed(ClientError::Unauthorized);
        assert!(outcome.data().is_none());
        assert_eq!(outcome.error(), Some(&ClientError::Unauthorized));
    }

    #[test]
    fn test_stats_accept_partial_payload() {
        let stats: TimeSaverStats =
            serde_json::from_str(r#"{ "total_items": 12, "todayNew": 3 }"#).unwrap();
        assert_eq!(stats.total_items, 12);
        assert_eq!(stats.today_new, 3);
        assert_eq!(stats.total_views, 0);
    }
}
