use crate::interaction::Observer;
use notekit_types::{InteractionEvent, NoteCard, reconcile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub keyword: String,
    pub notes: Vec<NoteCard>,
    pub total: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Observer for SearchResults {
    fn apply_event(&mut self, event: &InteractionEvent) -> usize {
        reconcile(&mut self.notes, event)
    }
}
