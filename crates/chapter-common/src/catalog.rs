/// Loading and ordering of the chapter catalog.
///
/// The data directory holds one JSON document per chapter (next to the audio
/// files it describes). Chapters are ordered by the number found in their title
/// or, failing that, in their description; chapters without a number go last.
use std::cmp::Ordering;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::CommonError;
use crate::model::Chapter;

const CHAPTER_EXTENSION: &str = "json";

static DESCRIPTION_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Capítol ([0-9]+)").expect("valid regex"));

/// Read every `*.json` chapter file under `dir` (recursively) and return them sorted.
///
/// A file that cannot be read fails the whole load. A file that is not a valid
/// chapter document is logged and skipped.
pub fn read_chapters(dir: &Path) -> Result<Vec<Chapter>, CommonError> {
    let mut chapters = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(CHAPTER_EXTENSION) {
            continue;
        }

        let data = std::fs::read(path).map_err(|source| CommonError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match serde_json::from_slice::<Chapter>(&data) {
            Ok(chapter) => chapters.push(chapter),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot parse chapter file, skipping");
            }
        }
    }

    sort_chapters(&mut chapters);
    debug!(dir = %dir.display(), count = chapters.len(), "chapters loaded");
    Ok(chapters)
}

/// Extract the chapter number.
///
/// Examples:
/// - title "12. La batalla de l'Ebre" → 12
/// - title "La retirada", description "Capítol 40: ..." → 40
/// - title "0. Pròleg", no number in the description → `None`
pub fn chapter_number(chapter: &Chapter) -> Option<u64> {
    leading_number(&chapter.title).or_else(|| {
        DESCRIPTION_NUMBER_RE
            .captures(&chapter.description)
            .and_then(|caps| caps[1].parse().ok())
    })
}

/// Positive integer at the start of `text`, ignoring leading whitespace and an
/// optional `+` sign. Numbers above `u64::MAX` count as no number.
fn leading_number(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse::<u64>().ok().filter(|&n| n > 0)
}

/// Sort numbered chapters ascending, unnumbered chapters after them.
///
/// The sort is stable: chapters sharing a number, and unnumbered chapters,
/// keep their relative order.
pub fn sort_chapters(chapters: &mut [Chapter]) {
    chapters.sort_by_cached_key(|chapter| match chapter_number(chapter) {
        Some(n) => (Ordering::Less, n),
        None => (Ordering::Greater, 0),
    });
}
