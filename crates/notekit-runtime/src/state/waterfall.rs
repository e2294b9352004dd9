use crate::interaction::Observer;
use notekit_types::{InteractionEvent, NoteCard, Page, PageInfo, reconcile};

/// A note list plus its two-column split. Item `i` of `items` sits in
/// `left` when `i` is even and in `right` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Waterfall {
    pub items: Vec<NoteCard>,
    pub left: Vec<NoteCard>,
    pub right: Vec<NoteCard>,
}

impl Waterfall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.left.clear();
        self.right.clear();
    }

    pub fn reset(&mut self, items: Vec<NoteCard>) {
        self.clear();
        self.append(items);
    }

    /// Add a page; the parity continues from the current length.
    pub fn append(&mut self, items: Vec<NoteCard>) {
        for item in items {
            if self.items.len() % 2 == 0 {
                self.left.push(item.clone());
            } else {
                self.right.push(item.clone());
            }
            self.items.push(item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Observer for Waterfall {
    fn apply_event(&mut self, event: &InteractionEvent) -> usize {
        reconcile(&mut self.items, event)
            + reconcile(&mut self.left, event)
            + reconcile(&mut self.right, event)
    }
}

/// Paginated note list with its own loading flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteList {
    pub notes: Waterfall,
    pub page: PageInfo,
    pub page_size: u32,
    pub has_more: bool,
    pub loading: bool,
}

impl NoteList {
    pub fn new(page_size: u32) -> Self {
        Self {
            notes: Waterfall::new(),
            page: PageInfo::new(0, 1),
            page_size,
            has_more: true,
            loading: false,
        }
    }

    pub fn next_page(&self, reset: bool) -> u32 {
        if reset { 1 } else { self.page.current_page + 1 }
    }

    pub fn apply_page(&mut self, page: Page<NoteCard>, reset: bool) {
        if reset {
            self.notes.reset(page.items);
        } else {
            self.notes.append(page.items);
        }
        self.has_more = page.info.has_more();
        self.page = page.info;
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Observer for NoteList {
    fn apply_event(&mut self, event: &InteractionEvent) -> usize {
        self.notes.apply_event(event)
    }
}
