//! 公共只读接口：分类、单词与参考数据

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use kazlearn_shared::dto::{PublicCategoryParams, PublicWordParams};
use kazlearn_shared::models::{Category, DifficultyLevel, Language, WordSummary, WordType};

use super::{SharedStore, paging};
use crate::error::ApiResult;
use crate::store::backend::DEFAULT_LANGUAGE;

pub fn public_routes() -> Router<SharedStore> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/words", get(list_words))
        .route("/languages", get(list_languages))
        .route("/word-types", get(list_word_types))
        .route("/difficulty-levels", get(list_difficulty_levels))
}

/// GET /categories，默认只返回启用的分类
async fn list_categories(
    State(store): State<SharedStore>,
    Query(params): Query<PublicCategoryParams>,
) -> Json<Vec<Category>> {
    let active_only = params.active_only.unwrap_or(true);
    Json(
        store
            .categories
            .list_by(|c| !active_only || c.is_active)
            .into_iter()
            .map(|c| store.category_view(c))
            .collect(),
    )
}

/// GET /words
async fn list_words(
    State(store): State<SharedStore>,
    Query(params): Query<PublicWordParams>,
) -> ApiResult<Json<Vec<WordSummary>>> {
    let (skip, limit) = paging(params.skip, params.limit)?;
    let language = params.language_code.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let rows = store
        .words
        .list_by(|w| params.category_id.is_none_or(|id| w.category_id == id))
        .iter()
        .skip(skip)
        .take(limit)
        .map(|w| store.word_summary(w, language))
        .collect();
    Ok(Json(rows))
}

async fn list_languages(State(store): State<SharedStore>) -> Json<Vec<Language>> {
    Json(store.languages.list_by(|l| l.is_active))
}

async fn list_word_types(State(store): State<SharedStore>) -> Json<Vec<WordType>> {
    Json(store.word_types.list())
}

async fn list_difficulty_levels(State(store): State<SharedStore>) -> Json<Vec<DifficultyLevel>> {
    Json(store.difficulty_levels.list())
}
