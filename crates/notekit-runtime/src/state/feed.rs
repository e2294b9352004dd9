use super::Waterfall;
use crate::interaction::Observer;
use notekit_types::{Category, InteractionEvent};

/// Home feed: category tabs over a paginated waterfall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub categories: Vec<Category>,
    pub current_tab: usize,
    pub notes: Waterfall,
    pub page_num: u32,
    pub page_size: u32,
    pub has_more: bool,
    pub loading_more: bool,
}

impl FeedView {
    pub fn new(page_size: u32) -> Self {
        Self {
            categories: vec![Category::recommended()],
            current_tab: 0,
            notes: Waterfall::new(),
            page_num: 1,
            page_size,
            has_more: true,
            loading_more: false,
        }
    }

    /// Category of the selected tab; `None` for the recommended tab.
    pub fn category_filter(&self) -> Option<&Category> {
        if self.current_tab == 0 {
            return None;
        }
        self.categories
            .get(self.current_tab)
            .filter(|category| !category.is_recommended())
    }

    pub fn reset(&mut self) {
        self.notes.clear();
        self.page_num = 1;
        self.has_more = true;
        self.loading_more = false;
    }
}

impl Observer for FeedView {
    fn apply_event(&mut self, event: &InteractionEvent) -> usize {
        self.notes.apply_event(event)
    }
}
