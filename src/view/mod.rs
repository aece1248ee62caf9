pub mod terminal;

use serde::Serialize;

use crate::autocomplete::Suggestion;
use crate::facts::{self, FactViewModel, FactsPage};
use crate::pagination::{self, PaginationView};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub facts: Vec<FactViewModel>,
    pub pagination: PaginationView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub per_page: u32,
}

impl PageSnapshot {
    pub fn build(page: &FactsPage, query: Option<&str>, per_page: u32) -> Self {
        Self {
            facts: facts::project(&page.records),
            pagination: pagination::build_pagination_view(&page.pagination),
            query: query.map(|q| q.to_string()),
            per_page,
        }
    }
}

pub trait PageView {
    /// Replace everything on display with `snapshot`.
    fn apply_snapshot(&mut self, snapshot: &PageSnapshot);

    fn show_suggestions(&mut self, suggestions: &[Suggestion]);

    fn clear_suggestions(&mut self);

    /// Report a failed request. The previous snapshot stays on display.
    fn show_error(&mut self, message: &str);
}

#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    pub snapshots: Vec<PageSnapshot>,
    pub suggestions: Vec<Suggestion>,
    pub errors: Vec<String>,
}

impl RecordingView {
    pub fn current(&self) -> Option<&PageSnapshot> {
        self.snapshots.last()
    }
}

impl PageView for RecordingView {
    fn apply_snapshot(&mut self, snapshot: &PageSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        self.suggestions = suggestions.to_vec();
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
