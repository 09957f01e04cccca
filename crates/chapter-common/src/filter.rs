/// Search filter over a list of chapter elements.
///
/// The filter never owns the chapters. Callers hand it a snapshot of elements at
/// call time; the filter only flips each element's visibility. The form and the
/// submit event are injected too.
use tracing::debug;

use crate::model::{Chapter, SearchQuery, Visibility};

/// A chapter element whose visibility the filter controls.
pub trait ChapterElement {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn set_visibility(&mut self, visibility: Visibility);
}

/// The form a search submission is read from.
pub trait SearchForm {
    /// Current value of the search term input.
    fn term(&self) -> String;
    /// Current value of the search mode selector.
    fn mode(&self) -> String;
}

/// The event that triggered a search.
pub trait SubmitEvent {
    /// Suppress the event's default action (page reload/navigation).
    fn prevent_default(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchFilter;

impl SearchFilter {
    pub fn new() -> Self {
        Self
    }

    /// Handle a form submission: suppress the default action, read the query from
    /// the form and apply it to `chapters`.
    ///
    /// Returns the number of chapters left visible.
    pub fn handle_submit<E: ChapterElement>(
        &self,
        event: &mut impl SubmitEvent,
        form: &impl SearchForm,
        chapters: &mut [E],
    ) -> usize {
        event.prevent_default();
        let query = SearchQuery::new(form.term(), form.mode());
        self.apply(&query, chapters)
    }

    /// Show every chapter whose selected field contains the term, hide the rest.
    ///
    /// Every element is written on every call, so a previous result never leaks
    /// into the next one. Returns the number of chapters left visible.
    pub fn apply<E: ChapterElement>(&self, query: &SearchQuery, chapters: &mut [E]) -> usize {
        let term = query.term.to_lowercase();
        let mut visible = 0;
        for chapter in chapters.iter_mut() {
            let shown = query.matches_normalized(&term, chapter.title(), chapter.description());
            if shown {
                visible += 1;
                chapter.set_visibility(Visibility::Shown);
            } else {
                chapter.set_visibility(Visibility::Hidden);
            }
        }
        debug!(
            term = %query.term,
            field = %query.field,
            visible,
            total = chapters.len(),
            "search filter applied"
        );
        visible
    }
}

/// A borrowed chapter paired with the visibility the filter assigned to it.
#[derive(Debug, Clone, Copy)]
pub struct ChapterSlot<'a> {
    pub chapter: &'a Chapter,
    pub visibility: Visibility,
}

impl ChapterElement for ChapterSlot<'_> {
    fn title(&self) -> &str {
        &self.chapter.title
    }

    fn description(&self) -> &str {
        &self.chapter.description
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}

/// Snapshot of `chapters` with every slot initially shown.
pub fn snapshot(chapters: &[Chapter]) -> Vec<ChapterSlot<'_>> {
    chapters
        .iter()
        .map(|chapter| ChapterSlot {
            chapter,
            visibility: Visibility::Shown,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeElement {
        title: String,
        description: String,
        display: &'static str,
    }

    impl FakeElement {
        fn new(title: &str, description: &str) -> Self {
            Self {
                title: title.to_string(),
                description: description.to_string(),
                display: "",
            }
        }
    }

    impl ChapterElement for FakeElement {
        fn title(&self) -> &str {
            &self.title
        }

        fn description(&self) -> &str {
            &self.description
        }

        fn set_visibility(&mut self, visibility: Visibility) {
            self.display = visibility.display();
        }
    }

    struct FakeForm {
        term: &'static str,
        mode: &'static str,
    }

    impl SearchForm for FakeForm {
        fn term(&self) -> String {
            self.term.to_string()
        }

        fn mode(&self) -> String {
            self.mode.to_string()
        }
    }

    #[derive(Default)]
    struct FakeEvent {
        default_prevented: bool,
    }

    impl SubmitEvent for FakeEvent {
        fn prevent_default(&mut self) {
            self.default_prevented = true;
        }
    }

    fn sample() -> Vec<FakeElement> {
        vec![
            FakeElement::new("Intro", "Basics"),
            FakeElement::new("Advanced Topics", "Deep dive"),
        ]
    }

    fn displays(elements: &[FakeElement]) -> Vec<&'static str> {
        elements.iter().map(|e| e.display).collect()
    }

    #[test]
    fn test_filter_by_title() {
        let mut elements = sample();
        let visible = SearchFilter::new().apply(&SearchQuery::new("intro", "title"), &mut elements);
        assert_eq!(visible, 1);
        assert_eq!(displays(&elements), ["block", "none"]);
    }

    #[test]
    fn test_filter_by_description() {
        let mut elements = sample();
        let visible =
            SearchFilter::new().apply(&SearchQuery::new("deep", "description"), &mut elements);
        assert_eq!(visible, 1);
        assert_eq!(displays(&elements), ["none", "block"]);
    }

    #[test]
    fn test_title_mode_ignores_description() {
        let mut elements = sample();
        SearchFilter::new().apply(&SearchQuery::new("deep", "title"), &mut elements);
        assert_eq!(displays(&elements), ["none", "none"]);
    }

    #[test]
    fn test_empty_term_shows_all() {
        let mut elements = sample();
        let filter = SearchFilter::new();
        filter.apply(&SearchQuery::new("intro", "title"), &mut elements);
        let visible = filter.apply(&SearchQuery::new("", "title"), &mut elements);
        assert_eq!(visible, 2);
        assert_eq!(displays(&elements), ["block", "block"]);
    }

    #[test]
    fn test_unrecognized_mode_hides_all() {
        let mut elements = sample();
        let visible = SearchFilter::new().apply(&SearchQuery::new("", "author"), &mut elements);
        assert_eq!(visible, 0);
        assert_eq!(displays(&elements), ["none", "none"]);
    }

    #[test]
    fn test_handle_submit_prevents_default_and_filters() {
        let mut elements = vec![
            FakeElement::new("Hello World", ""),
            FakeElement::new("Farewell", ""),
        ];
        let mut event = FakeEvent::default();
        let form = FakeForm {
            term: "HELLO",
            mode: "title",
        };
        let visible = SearchFilter::new().handle_submit(&mut event, &form, &mut elements);
        assert!(event.default_prevented);
        assert_eq!(visible, 1);
        assert_eq!(displays(&elements), ["block", "none"]);
    }

    #[test]
    fn test_handle_submit_on_empty_collection() {
        let mut elements: Vec<FakeElement> = Vec::new();
        let mut event = FakeEvent::default();
        let form = FakeForm {
            term: "x",
            mode: "title",
        };
        assert_eq!(
            SearchFilter::new().handle_submit(&mut event, &form, &mut elements),
            0
        );
        assert!(event.default_prevented);
    }

    #[test]
    fn test_snapshot_slots_follow_filter() {
        let chapters = vec![
            Chapter {
                title: "1. Intro".to_string(),
                description: "Basics".to_string(),
                ..Chapter::default()
            },
            Chapter {
                title: "2. Advanced Topics".to_string(),
                description: "Deep dive".to_string(),
                ..Chapter::default()
            },
        ];
        let mut slots = snapshot(&chapters);
        assert!(slots.iter().all(|s| s.visibility.is_shown()));

        SearchFilter::new().apply(&SearchQuery::new("ADVANCED", "title"), &mut slots);
        let shown: Vec<&str> = slots
            .iter()
            .filter(|s| s.visibility.is_shown())
            .map(|s| s.chapter.title.as_str())
            .collect();
        assert_eq!(shown, ["2. Advanced Topics"]);
    }
}
