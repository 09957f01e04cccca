/// In-memory chapter catalog shared by the web and tool servers.
use std::path::{Path, PathBuf};

use chapter_common::catalog;
use chapter_common::model::Chapter;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;

use crate::error::AppError;

pub struct ArchiveState {
    data_dir: PathBuf,
    chapters: RwLock<Vec<Chapter>>,
}

impl ArchiveState {
    /// Load the catalog from `data_dir`.
    pub fn load(data_dir: PathBuf) -> Result<Self, AppError> {
        let chapters = catalog::read_chapters(&data_dir)?;
        Ok(Self::from_chapters(data_dir, chapters))
    }

    pub fn from_chapters(data_dir: PathBuf, chapters: Vec<Chapter>) -> Self {
        Self {
            data_dir,
            chapters: RwLock::new(chapters),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub async fn chapters(&self) -> RwLockReadGuard<'_, Vec<Chapter>> {
        self.chapters.read().await
    }

    /// Re-read the data directory and swap in the new catalog.
    ///
    /// The directory is read on the blocking pool before the write lock is taken,
    /// so readers are only blocked for the swap itself. On error the current
    /// catalog is kept.
    pub async fn reload(&self) -> Result<usize, AppError> {
        let data_dir = self.data_dir.clone();
        let fresh =
            tokio::task::spawn_blocking(move || catalog::read_chapters(&data_dir)).await??;
        let count = fresh.len();
        *self.chapters.write().await = fresh;
        info!(chapter_count = count, "in-memory catalog updated");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reload_picks_up_new_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.json"), r#"{"title":"1. U","description":""}"#).unwrap();

        let state = ArchiveState::load(dir.path().to_path_buf()).unwrap();
        assert_eq!(state.chapters().await.len(), 1);

        std::fs::write(dir.path().join("2.json"), r#"{"title":"2. Dos","description":""}"#)
            .unwrap();
        assert_eq!(state.reload().await.unwrap(), 2);
        assert_eq!(state.chapters().await[1].title, "2. Dos");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_reload_leaves_runtime_free_for_readers() {
        let dir = tempfile::tempdir().unwrap();
        for n in 1..=50 {
            std::fs::write(
                dir.path().join(format!("{n}.json")),
                format!(r#"{{"title":"{n}. Capítol","description":""}}"#),
            )
            .unwrap();
        }
        let state = std::sync::Arc::new(ArchiveState::from_chapters(
            dir.path().to_path_buf(),
            Vec::new(),
        ));

        let reloader = {
            let state = std::sync::Arc::clone(&state);
            tokio::spawn(async move { state.reload().await })
        };
        // The single runtime thread still serves readers while the scan runs.
        let before = state.chapters().await.len();
        assert!(before == 0 || before == 50);

        assert_eq!(reloader.await.unwrap().unwrap(), 50);
        let chapters = state.chapters().await;
        assert_eq!(chapters[0].title, "1. Capítol");
        assert_eq!(chapters[49].title, "50. Capítol");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("gone");
        let state = ArchiveState::from_chapters(
            data_dir,
            vec![Chapter {
                title: "1. U".to_string(),
                ..Chapter::default()
            }],
        );
        assert!(state.reload().await.is_err());
        assert_eq!(state.chapters().await.len(), 1);
    }
}
