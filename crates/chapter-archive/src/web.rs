/// HTTP front end: the chapter page, a small JSON API, and the media/static files.
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use chapter_common::filter::{SearchFilter, snapshot};
use chapter_common::model::{Chapter, SearchQuery};

use crate::config::Config;
use crate::error::AppError;
use crate::page;
use crate::state::ArchiveState;

/// Query string of a search form submission: `?term=...&by=title|description`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    term: Option<String>,
    by: Option<String>,
}

impl SearchParams {
    /// The submitted query, or `None` when no term was submitted.
    fn submitted(&self) -> Option<SearchQuery> {
        let term = self.term.clone()?;
        Some(SearchQuery::new(term, self.by.as_deref().unwrap_or("title")))
    }
}

pub fn router(state: Arc<ArchiveState>, static_dir: &std::path::Path) -> Router {
    let files = ServeDir::new(state.data_dir());
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/chapters", get(api_chapters))
        .route("/api/search", get(api_search))
        .nest_service("/files", files)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: &Config, state: Arc<ArchiveState>) -> Result<(), AppError> {
    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "web server ready");
    axum::serve(listener, router(state, &config.static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("web server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn health() -> &'static str {
    "ok"
}

async fn index(
    State(state): State<Arc<ArchiveState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let chapters = state.chapters().await;
    let mut slots = snapshot(&chapters);
    let query = params.submitted();
    if let Some(query) = &query {
        SearchFilter::new().apply(query, &mut slots);
    }
    Html(page::render(&slots, query.as_ref()))
}

async fn api_chapters(State(state): State<Arc<ArchiveState>>) -> Json<Vec<Chapter>> {
    Json(state.chapters().await.clone())
}

async fn api_search(
    State(state): State<Arc<ArchiveState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Chapter>> {
    let query = params
        .submitted()
        .unwrap_or_else(|| SearchQuery::new("", params.by.as_deref().unwrap_or("title")));

    let chapters = state.chapters().await;
    let mut slots = snapshot(&chapters);
    SearchFilter::new().apply(&query, &mut slots);
    Json(
        slots
            .into_iter()
            .filter(|slot| slot.visibility.is_shown())
            .map(|slot| slot.chapter.clone())
            .collect(),
    )
}
