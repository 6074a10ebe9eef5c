use serde::Serialize;
use std::sync::Arc;

use domain::{CategoryTree, ContentItem, CoreError, ScopeResolver};

use crate::traits::{CategoryStore, ContentItemStore};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub total_items: i64,
    pub items_per_page: i64,
    pub current_page: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub items: Vec<ContentItem>,
    pub pagination: Pagination,
    pub announcements: Vec<ContentItem>,
}

impl FeedView {
    fn empty(page: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination {
                total_items: 0,
                items_per_page: page.per_page,
                current_page: page.page,
            },
            announcements: Vec::new(),
        }
    }
}

/// Merges the global and category-scoped announcement streams with the
/// regular content feed for one viewed category.
#[derive(Clone)]
pub struct AnnouncementAggregator {
    categories: Arc<dyn CategoryStore>,
    content: Arc<dyn ContentItemStore>,
    /// Slug of the dedicated announcements category.
    announcements_slug: String,
}

impl AnnouncementAggregator {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        content: Arc<dyn ContentItemStore>,
        announcements_slug: String,
    ) -> Self {
        Self { categories, content, announcements_slug }
    }

    pub async fn aggregate(
        &self,
        category_slug: &str,
        scope_override: Option<i64>,
        page: PageRequest,
    ) -> Result<FeedView, CoreError> {
        let Some(category) = self.categories.get_by_slug(category_slug).await? else {
            // A vanished category must never hard-fail the feed.
            tracing::debug!(category_slug, "feed requested for unknown category");
            return Ok(FeedView::empty(page));
        };

        let global = degrade("global", self.content.list_global_announcements().await);

        if category.slug == self.announcements_slug {
            // Dedicated view: the merged set of every announcement IS
            // the feed, always rendered as a single page whose size
            // equals the total count. Documented quirk, not paging.
            let scoped = degrade("scoped", self.content.list_scoped_announcements(None).await);
            let items = merge_announcements(global, scoped);
            let total = items.len() as i64;
            return Ok(FeedView {
                items,
                pagination: Pagination {
                    total_items: total,
                    items_per_page: total,
                    current_page: 1,
                },
                announcements: Vec::new(),
            });
        }

        let scoped = degrade(
            "scoped",
            self.content.list_scoped_announcements(Some(category.id)).await,
        );
        let announcements = merge_announcements(global, scoped);

        let tree = CategoryTree::new(self.categories.list_all().await?);
        let scope = ScopeResolver::new(&tree).resolve(category.id, scope_override);
        let (items, total_items) = self.content.list_page(&scope, page.limit(), page.offset()).await?;

        Ok(FeedView {
            items,
            pagination: Pagination {
                total_items,
                items_per_page: page.per_page,
                current_page: page.page,
            },
            announcements,
        })
    }
}

/// An unreachable announcement axis degrades to an empty list.
fn degrade(axis: &str, result: Result<Vec<ContentItem>, CoreError>) -> Vec<ContentItem> {
    match result {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(axis, "announcement axis unavailable, degrading to empty: {err}");
            Vec::new()
        }
    }
}

/// Must-read first, then newest first; the sort is stable so ties keep
/// insertion order (global axis before scoped).
fn merge_announcements(global: Vec<ContentItem>, scoped: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut merged = global;
    merged.extend(scoped);
    merged.sort_by(|a, b| {
        b.must_read
            .cmp(&a.must_read)
            .then(b.created_at.cmp(&a.created_at))
    });
    merged
}
