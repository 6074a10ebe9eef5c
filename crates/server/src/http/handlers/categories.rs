use axum::{extract::State, Json};
use domain::{Category, CategoryLevel, CategoryTree};
use engine::traits::CategoryStore;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    pub level: Option<CategoryLevel>,
    /// Slugs from the root ancestor down to this category.
    pub breadcrumb: Vec<String>,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryView>>, ApiError> {
    let categories = state.db.list_all().await?;
    let tree = CategoryTree::new(categories.clone());

    let views = categories
        .into_iter()
        .map(|category| {
            let level = tree.level(category.id);
            let breadcrumb = tree
                .breadcrumb(category.id)
                .into_iter()
                .map(|c| c.slug)
                .collect();
            CategoryView { category, level, breadcrumb }
        })
        .collect();

    Ok(Json(views))
}
