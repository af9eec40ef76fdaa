use std::sync::Arc;

use timesaver::config::Config;
use timesaver::infrastructure::http::HttpBackend;
use timesaver::infrastructure::observability;
use timesaver::infrastructure::runtime::TokioTaskSpawner;
use timesaver::models::FetchOutcome;
use timesaver::services::{NotificationSession, NotificationStore, TimeSaverService};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing and metrics
    let _observability =
        observability::init(&config).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!("Configuration loaded, backend at {}", config.api_base_url);

    let backend = Arc::new(HttpBackend::new(&config)?);
    let spawner = Arc::new(TokioTaskSpawner::new());

    let content = TimeSaverService::new(backend.clone(), spawner.clone(), config.request_timeout);
    let dashboard = content.load_dashboard(5).await;
    match &dashboard.stats {
        FetchOutcome::Live(stats) => tracing::info!(
            "{} items, {} new today, {} critical",
            stats.total_items,
            stats.today_new,
            stats.critical_updates
        ),
        FetchOutcome::Placeholder { reason, .. } => {
            tracing::warn!("Showing placeholder stats: {}", reason)
        }
        FetchOutcome::Failed(e) => tracing::error!("Could not load stats: {}", e),
    }
    if let Some(recent) = dashboard.recent.data() {
        for item in recent {
            let target = content.resolve(item, config.is_authenticated());
            tracing::info!(
                "{} -> {}",
                item.title,
                target.url.as_deref().unwrap_or("(no link)")
            );
        }
    }

    let store = Arc::new(NotificationStore::new(backend, config.request_timeout));
    let session = NotificationSession::new(store.clone(), spawner, config.poll_interval);
    session.set_authenticated(config.is_authenticated());
    if !config.is_authenticated() {
        tracing::warn!("TIMESAVER_API_TOKEN not set, notifications are disabled");
    }

    let mut updates = WatchStream::new(store.subscribe());
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(state) = updates.next() => {
                if !state.loading {
                    tracing::info!(
                        unread = state.unread_count,
                        total = state.notifications.len(),
                        error = ?state.error,
                        "Notifications updated"
                    );
                }
            }
        }
    }

    tracing::info!("Shutting down");
    session.set_authenticated(false);

    Ok(())
}
