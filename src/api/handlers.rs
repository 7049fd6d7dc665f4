use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Article, Category, Limit};

use super::error::ApiResult;
use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RssQuery {
    pub category: Option<String>,
    pub limit: Option<String>,
}

impl RssQuery {
    fn category(&self) -> ApiResult<Category> {
        Ok(self.category.as_deref().unwrap_or("all").parse()?)
    }

    fn limit(&self) -> ApiResult<Limit> {
        match self.limit.as_deref() {
            None | Some("") => Ok(Limit::Unbounded),
            Some(raw) => Ok(raw.parse()?),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub id: Category,
    pub label: &'static str,
    pub feeds: usize,
}

/// Latest articles for a category
///
/// `GET /api/rss?category=<cat>&limit=<n>`; `limit=-1` (the default) returns
/// every article that survived filtering.
pub async fn get_rss(
    State(state): State<AppState>,
    Query(query): Query<RssQuery>,
) -> ApiResult<Json<Vec<Article>>> {
    let category = query.category()?;
    let limit = query.limit()?;

    let articles = state.aggregator.aggregate(category, limit).await?;
    Ok(Json(articles))
}

/// Supported categories and how many feeds back each of them
pub async fn get_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    let registry = state.aggregator.registry();
    let categories = Category::CONCRETE
        .iter()
        .map(|category| CategoryInfo {
            id: *category,
            label: category.label(),
            feeds: registry.for_category(*category).len(),
        })
        .collect();

    Json(categories)
}

pub async fn health() -> &'static str {
    "ok"
}
