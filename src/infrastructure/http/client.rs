use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::errors::{ClientError, ClientResult};
use crate::domain::ports::{NotificationApi, TimeSaverApi};
use crate::models::wire::ListEnvelope;
use crate::models::{
    ArticleSummary, ContentItem, ContentPage, ContentQuery, ContentUpdate, InteractionKind,
    NewContent, NotificationList, TimeSaverAnalytics, TimeSaverStats,
};

const MAX_ERROR_BODY: usize = 500;

/// reqwest-backed adapter for the Time Saver REST API
#[derive(Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

#[derive(Serialize)]
struct MarkReadRequest<'a> {
    ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InteractionRequest {
    interaction_type: InteractionKind,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "detail", alias = "message")]
    error: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `time-saver/content/{id}[/{action}]` with `id` escaped as one path segment
    pub fn content_endpoint(&self, id: &str, action: Option<&str>) -> ClientResult<Url> {
        if id == "." || id == ".." {
            return Err(ClientError::Validation(format!("Invalid content id: {}", id)));
        }

        let mut url = Url::parse(&self.endpoint("time-saver/content"))
            .map_err(|e| ClientError::Validation(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("API URL cannot carry a path".to_string()))?
            .push(id)
            .extend(action);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.http_client.request(method, self.endpoint(path)))
    }

    fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        self.authorize(self.http_client.request(method, url))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else if e.is_connect() {
            ClientError::Network(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// Map a non-2xx response onto the client error taxonomy
pub fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| truncate(body));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Backend {
            status: status.as_u16(),
            message,
        },
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[async_trait::async_trait]
impl NotificationApi for HttpBackend {
    async fn fetch_notifications(&self) -> ClientResult<NotificationList> {
        self.send_json(self.request(Method::GET, "notifications"))
            .await
    }

    async fn mark_as_read(&self, ids: &[String]) -> ClientResult<()> {
        let builder = self
            .request(Method::POST, "notifications/mark-read")
            .json(&MarkReadRequest { ids });
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TimeSaverApi for HttpBackend {
    async fn list_content(&self, query: &ContentQuery) -> ClientResult<ContentPage> {
        let builder = self
            .request(Method::GET, "time-saver/content")
            .query(&query.to_query_pairs());
        self.send_json(builder).await
    }

    async fn get_content(&self, id: &str) -> ClientResult<ContentItem> {
        let url = self.content_endpoint(id, None)?;
        self.send_json(self.request_url(Method::GET, url)).await
    }

    async fn get_stats(&self) -> ClientResult<TimeSaverStats> {
        self.send_json(self.request(Method::GET, "time-saver/stats"))
            .await
    }

    async fn get_analytics(&self, days: u32) -> ClientResult<TimeSaverAnalytics> {
        let builder = self
            .request(Method::GET, "time-saver/analytics")
            .query(&[("days", days)]);
        self.send_json(builder).await
    }

    async fn record_view(&self, id: &str) -> ClientResult<()> {
        let url = self.content_endpoint(id, Some("view"))?;
        self.send(self.request_url(Method::POST, url)).await?;
        Ok(())
    }

    async fn record_interaction(&self, id: &str, kind: InteractionKind) -> ClientResult<()> {
        let url = self.content_endpoint(id, Some("interactions"))?;
        let builder = self
            .request_url(Method::POST, url)
            .json(&InteractionRequest {
                interaction_type: kind,
            });
        self.send(builder).await?;
        Ok(())
    }

    async fn search_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>> {
        let builder = self
            .request(Method::GET, "articles/search")
            .query(&[("q", query)]);
        let found: ListEnvelope<ArticleSummary> = self.send_json(builder).await?;
        Ok(found.into_vec())
    }

    async fn search_ai_articles(&self, query: &str) -> ClientResult<Vec<ArticleSummary>> {
        let builder = self
            .request(Method::GET, "ai-articles/search")
            .query(&[("q", query)]);
        let found: ListEnvelope<ArticleSummary> = self.send_json(builder).await?;
        Ok(found.into_vec())
    }

    async fn create_content(&self, content: &NewContent) -> ClientResult<ContentItem> {
        let builder = self
            .request(Method::POST, "time-saver/content")
            .json(content);
        self.send_json(builder).await
    }

    async fn update_content(&self, id: &str, update: &ContentUpdate) -> ClientResult<ContentItem> {
        let url = self.content_endpoint(id, None)?;
        let builder = self.request_url(Method::PUT, url).json(update);
        self.send_json(builder).await
    }

    async fn delete_content(&self, id: &str) -> ClientResult<()> {
        let url = self.content_endpoint(id, None)?;
        self.send(self.request_url(Method::DELETE, url)).await?;
        Ok(())
    }
}
