use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::chapter_number;
use crate::model::Chapter;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchChaptersParams {
    /// Text to look for (case-insensitive substring). An empty term matches every chapter.
    pub term: String,
    /// Field to match against: "title" (default) or "description".
    pub field: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetChapterParams {
    /// Chapter number, as found in the chapter title or description.
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListChaptersParams {
    /// Number of chapters to skip (default: 0).
    pub offset: Option<u32>,
    /// Maximum number of chapters to return (default: 50, max: 200).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChapterSummary {
    pub number: Option<u64>,
    pub title: String,
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        Self {
            number: chapter_number(chapter),
            title: chapter.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChapterDetail {
    pub number: Option<u64>,
    pub title: String,
    pub description: String,
    pub link: String,
    pub image: String,
    pub file: String,
}

impl From<&Chapter> for ChapterDetail {
    fn from(chapter: &Chapter) -> Self {
        Self {
            number: chapter_number(chapter),
            title: chapter.title.clone(),
            description: chapter.description.clone(),
            link: chapter.link.clone(),
            image: chapter.image.clone(),
            file: chapter.file.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchChaptersResponse {
    pub term: String,
    pub field: String,
    /// Number of chapters searched.
    pub total: usize,
    pub results: Vec<ChapterSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChapterListResponse {
    pub total: usize,
    pub offset: usize,
    pub chapters: Vec<ChapterSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadChaptersResponse {
    pub chapter_count: usize,
}
