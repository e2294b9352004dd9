use serde::{Deserialize, Serialize};

/// Pagination cursor as reported by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// Fill in whatever the server left out with the page that was requested.
    pub fn resolve(current: Option<u32>, total: Option<u32>, requested: u32) -> Self {
        Self::new(current.unwrap_or(requested), total.unwrap_or(requested))
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// One page of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.info.has_more()
    }
}
