/// MCP server implementation for the chapter archive.
///
/// Exposes four tools:
/// - `search_chapters`: Case-insensitive substring search over titles or descriptions
/// - `get_chapter`: Look up a chapter by its number
/// - `list_chapters`: Page through the catalog in order
/// - `reload_chapters`: Re-read the data directory
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use chapter_common::api::{
    ChapterDetail, ChapterListResponse, ChapterSummary, GetChapterParams, ListChaptersParams,
    ReloadChaptersResponse, SearchChaptersParams, SearchChaptersResponse,
};
use chapter_common::catalog::chapter_number;
use chapter_common::filter::{SearchFilter, snapshot};
use chapter_common::model::SearchQuery;

use crate::state::ArchiveState;

const DEFAULT_LIST_LIMIT: u32 = 50;
const MAX_LIST_LIMIT: u32 = 200;

#[derive(Clone)]
pub struct ChapterArchiveServer {
    state: Arc<ArchiveState>,
    tool_router: ToolRouter<ChapterArchiveServer>,
}

impl ChapterArchiveServer {
    pub fn new(state: Arc<ArchiveState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl ChapterArchiveServer {
    #[tool(description = "Search chapters by case-insensitive substring match against the title (default) or the description. An empty term returns every chapter.")]
    async fn search_chapters(
        &self,
        Parameters(params): Parameters<SearchChaptersParams>,
    ) -> Result<Json<SearchChaptersResponse>, String> {
        let field = params
            .field
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or("title");
        let query = SearchQuery::new(params.term, field);

        let chapters = self.state.chapters().await;
        let mut slots = snapshot(&chapters);
        SearchFilter::new().apply(&query, &mut slots);

        let results: Vec<ChapterSummary> = slots
            .iter()
            .filter(|slot| slot.visibility.is_shown())
            .map(|slot| ChapterSummary::from(slot.chapter))
            .collect();

        Ok(Json(SearchChaptersResponse {
            term: query.term,
            field: query.field.to_string(),
            total: chapters.len(),
            results,
        }))
    }

    #[tool(description = "Get the full record of a chapter by its number (e.g. 12 for '12. La batalla de l'Ebre').")]
    async fn get_chapter(
        &self,
        Parameters(params): Parameters<GetChapterParams>,
    ) -> Result<Json<ChapterDetail>, String> {
        let chapters = self.state.chapters().await;
        let chapter = chapters
            .iter()
            .find(|c| chapter_number(c) == Some(params.number))
            .ok_or_else(|| format!("chapter not found: {}", params.number))?;
        Ok(Json(ChapterDetail::from(chapter)))
    }

    #[tool(description = "List chapters in catalog order (numbered chapters first). Supports offset/limit paging; limit defaults to 50, max 200.")]
    async fn list_chapters(
        &self,
        Parameters(params): Parameters<ListChaptersParams>,
    ) -> Result<Json<ChapterListResponse>, String> {
        let offset = params.offset.unwrap_or(0) as usize;
        let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT) as usize;

        let chapters = self.state.chapters().await;
        let page: Vec<ChapterSummary> = chapters
            .iter()
            .skip(offset)
            .take(limit)
            .map(ChapterSummary::from)
            .collect();

        Ok(Json(ChapterListResponse {
            total: chapters.len(),
            offset,
            chapters: page,
        }))
    }

    #[tool(description = "Re-read the chapter data directory and replace the in-memory catalog.")]
    async fn reload_chapters(&self) -> Result<Json<ReloadChaptersResponse>, String> {
        info!("reload_chapters tool invoked");
        let chapter_count = self
            .state
            .reload()
            .await
            .map_err(|e| format!("reload failed: {e}"))?;
        Ok(Json(ReloadChaptersResponse { chapter_count }))
    }
}

#[tool_handler]
impl ServerHandler for ChapterArchiveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "chapter-archive".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Chapter archive MCP server. Use search_chapters to find chapters by title or \
                 description, get_chapter to fetch one by number, list_chapters to browse the \
                 catalog in order, and reload_chapters after the data directory changes."
                    .to_string(),
            ),
        }
    }
}
