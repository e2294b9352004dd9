use super::{ServiceContext, decode, expect_data};
use crate::state::FeedView;
use crate::transport::ApiRequest;
use crate::{Error, Result};
use notekit_types::{Category, NoteCard, Page, PageInfo};
use serde::Deserialize;
use serde_json::json;

/// Server message that ends pagination instead of reporting an error.
const NO_MORE_DATA: &str = "No more data";

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LatestPage {
    data: Vec<NoteCard>,
    current_page: Option<u32>,
    total_pages: Option<u32>,
}

/// Categories offered by the publish screen when the server has none.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("1", "Life"),
        Category::new("2", "Food"),
        Category::new("3", "Travel"),
        Category::new("4", "Fashion"),
        Category::new("5", "Fitness"),
    ]
}

pub struct FeedService {
    ctx: ServiceContext,
}

impl FeedService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Server categories without the leading "Recommended" entry.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let response = self.ctx.send(ApiRequest::get("/categories").public()).await?;
        let categories: Vec<Category> = decode(expect_data(response)?)?;
        Ok(categories
            .into_iter()
            .filter(|category| !category.is_recommended())
            .collect())
    }

    /// Tab list for the home feed. Always starts with "Recommended".
    pub async fn categories(&self) -> Vec<Category> {
        let mut categories = vec![Category::recommended()];
        match self.fetch_categories().await {
            Ok(list) => categories.extend(list),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
                self.ctx.notify("Failed to load categories");
            }
        }
        categories
    }

    pub async fn load_categories(&self, view: &mut FeedView) {
        view.categories = self.categories().await;
        if view.current_tab >= view.categories.len() {
            view.current_tab = 0;
        }
    }

    fn list_request(&self, view: &FeedView, page: u32, show_spinner: bool) -> ApiRequest {
        let mut payload = json!({ "page": page, "pageSize": view.page_size });
        if let Some(category) = view.category_filter() {
            payload["categoryId"] = json!(category.id);
        }
        if let Some(user_id) = self.ctx.session.user_id() {
            payload["userId"] = json!(user_id);
        }
        let request = ApiRequest::get("/latest").payload(payload).public();
        if show_spinner { request } else { request.quiet() }
    }

    async fn fetch_page(&self, request: ApiRequest, fallback_page: u32) -> Result<Page<NoteCard>> {
        let data = expect_data(self.ctx.send(request).await?)?;
        let page: LatestPage = decode(data)?;
        Ok(Page {
            items: page.data,
            info: PageInfo::resolve(page.current_page, page.total_pages, fallback_page),
        })
    }

    /// Reset the feed and load page 1 of the selected tab.
    pub async fn load_initial(&self, view: &mut FeedView) -> Result<()> {
        view.reset();
        let request = self.list_request(view, 1, true);

        match self.fetch_page(request, 1).await {
            Ok(page) => {
                view.has_more = page.has_more();
                view.notes.reset(page.items);
                tracing::debug!(count = view.notes.len(), "feed loaded");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load feed");
                self.ctx.notify("Failed to load");
                Err(err)
            }
        }
    }

    /// Append the next page. No-op while a load is running or when the
    /// feed is exhausted.
    pub async fn load_more(&self, view: &mut FeedView) -> Result<()> {
        if !view.has_more || view.loading_more {
            return Ok(());
        }

        view.loading_more = true;
        let next_page = view.page_num + 1;
        let request = self.list_request(view, next_page, false);
        let result = self.fetch_page(request, next_page).await;
        view.loading_more = false;

        match result {
            Ok(page) if page.items.is_empty() => {
                view.has_more = false;
                Ok(())
            }
            Ok(page) => {
                view.has_more = page.has_more();
                view.page_num = next_page;
                view.notes.append(page.items);
                Ok(())
            }
            Err(Error::Api { message }) if message == NO_MORE_DATA => {
                view.has_more = false;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, page = next_page, "failed to load more");
                self.ctx.notify("Failed to load");
                Err(err)
            }
        }
    }

    /// Select a category tab and reload. Selecting the current tab does
    /// nothing.
    pub async fn switch_tab(&self, view: &mut FeedView, index: usize) -> Result<()> {
        if view.current_tab == index {
            return Ok(());
        }
        view.current_tab = index;
        self.load_initial(view).await
    }
}
