use super::{ServiceContext, decode, expect_data};
use crate::state::SearchResults;
use crate::transport::ApiRequest;
use crate::{Error, Result};
use notekit_types::NoteCard;
use serde::Deserialize;
use serde_json::json;

/// Suggestions shown before the user types anything.
pub const RECOMMENDED_KEYWORDS: [&str; 8] = [
    "Weekend brunch",
    "City walk",
    "Home workout",
    "Skincare routine",
    "Camping gear",
    "Desk setup",
    "Coffee shops",
    "Budget travel",
];

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SearchPage {
    notes: Vec<NoteCard>,
    total: Option<u64>,
    current_page: Option<u32>,
    total_pages: Option<u32>,
}

pub struct SearchService {
    ctx: ServiceContext,
}

impl SearchService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn search(&self, keyword: &str) -> Result<SearchResults> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            let message = "Please enter a search keyword";
            self.ctx.notify(message);
            return Err(Error::InvalidInput(message.to_string()));
        }

        tracing::debug!(keyword, "searching");
        let request = ApiRequest::get("/search/comprehensive")
            .payload(json!({ "keyword": keyword }))
            .public();
        let page: SearchPage = match self.ctx.send(request).await.and_then(expect_data) {
            Ok(data) => decode(data)?,
            Err(err) => {
                tracing::warn!(keyword, error = %err, "search failed");
                self.ctx.notify("Search failed");
                return Err(err);
            }
        };

        let results = SearchResults {
            keyword: keyword.to_string(),
            notes: page.notes,
            total: page.total.unwrap_or(0),
            current_page: page.current_page.unwrap_or(1),
            total_pages: page.total_pages.unwrap_or(1),
        };
        if results.is_empty() {
            self.ctx.notify("No matching content");
        }
        Ok(results)
    }
}
