//! 管理端分类接口
//!
//! 分类带多语言译名与实时单词数；仍有单词的分类不能删除。

use std::cmp::Ordering;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use tracing::{info, warn};

use kazlearn_shared::dto::{
    BulkStatusRequest, BulkStatusResponse, CategoryListParams, CategoryPayload,
    CategoryStatusRequest, CountResponse, MessageResponse, SortDirection,
};
use kazlearn_shared::models::{Category, CategoryTranslation};

use super::{SharedStore, contains_ci, paging, search_term};
use crate::error::{ApiError, ApiResult};
use crate::store::BackendStore;

pub const CATEGORY_NAME_MAX_CHARS: usize = 100;

pub fn category_routes() -> Router<SharedStore> {
    Router::new()
        .route("/admin/categories", get(list_categories).post(create_category))
        .route("/admin/categories/count", get(count_categories))
        .route("/admin/categories/bulk-status", post(bulk_status))
        .route(
            "/admin/categories/{category_id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/admin/categories/{category_id}/status", patch(set_status))
}

/// 搜索同时匹配名称与各语言译名
fn filter_categories(store: &BackendStore, params: &CategoryListParams) -> Vec<Category> {
    let search = search_term(&params.search);
    let active_only = params.active_only.unwrap_or(false);
    store
        .categories
        .list_by(|c| {
            if active_only && !c.is_active {
                return false;
            }
            match search {
                Some(term) => {
                    contains_ci(&c.category_name, term)
                        || c
                            .translations
                            .iter()
                            .any(|t| contains_ci(&t.translated_name, term))
                }
                None => true,
            }
        })
        .into_iter()
        .map(|c| store.category_view(c))
        .collect()
}

fn sort_categories(
    rows: &mut [Category],
    sort_by: Option<&str>,
    direction: SortDirection,
    language: &str,
) {
    let compare = |a: &Category, b: &Category| -> Ordering {
        match sort_by.unwrap_or("id") {
            "category_name" => a
                .display_name(language)
                .to_lowercase()
                .cmp(&b.display_name(language).to_lowercase()),
            "word_count" => a.word_count.cmp(&b.word_count),
            "is_active" => a.is_active.cmp(&b.is_active),
            _ => a.id.cmp(&b.id),
        }
        .then(a.id.cmp(&b.id))
    };
    rows.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b),
        SortDirection::Desc => compare(b, a),
    });
}

fn validate_payload(
    store: &BackendStore,
    payload: &CategoryPayload,
    own_id: Option<i64>,
) -> ApiResult<(String, Vec<CategoryTranslation>)> {
    let name = payload.category_name.trim();
    if name.is_empty() {
        return Err(ApiError::invalid(
            "body",
            "category_name",
            "ensure this value has at least 1 characters",
            "value_error.any_str.min_length",
        ));
    }
    if name.chars().count() > CATEGORY_NAME_MAX_CHARS {
        return Err(ApiError::invalid(
            "body",
            "category_name",
            &format!("ensure this value has at most {CATEGORY_NAME_MAX_CHARS} characters"),
            "value_error.any_str.max_length",
        ));
    }
    let duplicate = store.categories.count_by(|c| {
        Some(c.id) != own_id && c.category_name.to_lowercase() == name.to_lowercase()
    });
    if duplicate > 0 {
        return Err(ApiError::BadRequest(format!(
            "Category '{name}' already exists"
        )));
    }

    let mut translations: Vec<CategoryTranslation> = Vec::new();
    for t in &payload.translations {
        if store.language_by_code(&t.language_code).is_none() {
            return Err(ApiError::BadRequest(format!(
                "Language '{}' does not exist",
                t.language_code
            )));
        }
        // 空译名视为删除该语言的译名
        let translated = t.translated_name.trim();
        if translated.is_empty() {
            continue;
        }
        translations.retain(|existing| existing.language_code != t.language_code);
        translations.push(CategoryTranslation {
            language_code: t.language_code.clone(),
            translated_name: translated.to_string(),
            translated_description: t
                .translated_description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        });
    }
    Ok((name.to_string(), translations))
}

fn description(payload: &CategoryPayload) -> Option<String> {
    payload
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

// ============================================================================
// 路由处理器
// ============================================================================

/// GET /admin/categories
async fn list_categories(
    State(store): State<SharedStore>,
    Query(params): Query<CategoryListParams>,
) -> ApiResult<Json<Vec<Category>>> {
    let (skip, limit) = paging(params.skip, params.limit)?;
    let language = params.language_code.as_deref().unwrap_or("en");
    let mut rows = filter_categories(&store, &params);
    sort_categories(
        &mut rows,
        params.sort_by.as_deref(),
        params.sort_direction.unwrap_or_default(),
        language,
    );
    Ok(Json(rows.into_iter().skip(skip).take(limit).collect()))
}

/// GET /admin/categories/count
async fn count_categories(
    State(store): State<SharedStore>,
    Query(params): Query<CategoryListParams>,
) -> Json<CountResponse> {
    Json(CountResponse {
        count: filter_categories(&store, &params).len() as i64,
    })
}

/// GET /admin/categories/{category_id}
async fn get_category(
    State(store): State<SharedStore>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<Category>> {
    store
        .categories
        .get(category_id)
        .map(|c| Json(store.category_view(c)))
        .ok_or_else(|| ApiError::not_found("Category", category_id))
}

/// POST /admin/categories
async fn create_category(
    State(store): State<SharedStore>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let (name, translations) = validate_payload(&store, &payload, None)?;
    let category = store.categories.create(|id| Category {
        id,
        category_name: name,
        description: description(&payload),
        is_active: payload.is_active,
        word_count: 0,
        translations,
    });
    info!(category_id = category.id, name = %category.category_name, "创建分类");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /admin/categories/{category_id}
///
/// 整体替换，包括译名列表
async fn update_category(
    State(store): State<SharedStore>,
    Path(category_id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<Json<Category>> {
    if !store.categories.contains(category_id) {
        return Err(ApiError::not_found("Category", category_id));
    }
    let (name, translations) = validate_payload(&store, &payload, Some(category_id))?;
    let description = description(&payload);
    let category = store
        .categories
        .update(category_id, |c| {
            c.category_name = name;
            c.description = description;
            c.is_active = payload.is_active;
            c.translations = translations;
        })
        .ok_or_else(|| ApiError::not_found("Category", category_id))?;
    info!(category_id, "更新分类");
    Ok(Json(store.category_view(category)))
}

/// PATCH /admin/categories/{category_id}/status
async fn set_status(
    State(store): State<SharedStore>,
    Path(category_id): Path<i64>,
    Json(req): Json<CategoryStatusRequest>,
) -> ApiResult<Json<Category>> {
    let category = store
        .categories
        .update(category_id, |c| c.is_active = req.is_active)
        .ok_or_else(|| ApiError::not_found("Category", category_id))?;
    info!(category_id, is_active = req.is_active, "切换分类状态");
    Ok(Json(store.category_view(category)))
}

/// POST /admin/categories/bulk-status
///
/// 不存在的 ID 忽略，返回实际更新条数
async fn bulk_status(
    State(store): State<SharedStore>,
    Json(req): Json<BulkStatusRequest>,
) -> ApiResult<Json<BulkStatusResponse>> {
    if req.category_ids.is_empty() {
        return Err(ApiError::invalid(
            "body",
            "category_ids",
            "ensure this value has at least 1 items",
            "value_error.list.min_items",
        ));
    }
    let updated = req
        .category_ids
        .iter()
        .filter(|id| {
            store
                .categories
                .update(**id, |c| c.is_active = req.is_active)
                .is_some()
        })
        .count() as i64;
    info!(updated, is_active = req.is_active, "批量切换分类状态");
    Ok(Json(BulkStatusResponse { updated }))
}

/// DELETE /admin/categories/{category_id}
async fn delete_category(
    State(store): State<SharedStore>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !store.categories.contains(category_id) {
        return Err(ApiError::not_found("Category", category_id));
    }
    let words = store.word_count_in_category(category_id);
    if words > 0 {
        warn!(category_id, words, "分类下仍有单词，拒绝删除");
        return Err(ApiError::BadRequest(format!(
            "Cannot delete category with {words} words. Move or delete the words first."
        )));
    }
    store.categories.remove(category_id);
    info!(category_id, "删除分类");
    Ok(Json(MessageResponse {
        message: format!("Category {category_id} deleted"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{admin, read_json, seeded_app};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_counts_and_active_filter() {
        let (app, _) = seeded_app();

        let response = admin(&app, Method::GET, "/api/v1/admin/categories/count", None).await;
        assert_eq!(read_json(response).await["count"], 7);

        let response = admin(
            &app,
            Method::GET,
            "/api/v1/admin/categories/count?active_only=true",
            None,
        )
        .await;
        assert_eq!(read_json(response).await["count"], 6);

        let response = admin(
            &app,
            Method::GET,
            "/api/v1/admin/categories?sort_by=word_count&sort_direction=desc&limit=1",
            None,
        )
        .await;
        let rows = read_json(response).await;
        assert_eq!(rows[0]["category_name"], "Places");
        assert_eq!(rows[0]["word_count"], 4);
    }

    #[tokio::test]
    async fn test_search_matches_translated_names() {
        let (app, _) = seeded_app();
        let response = admin(
            &app,
            Method::GET,
            "/api/v1/admin/categories?search=%D1%81%D0%B5%D0%BC%D1%8C%D1%8F",
            None,
        )
        .await;
        let rows = read_json(response).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["category_name"], "Family");
    }

    #[tokio::test]
    async fn test_create_update_and_delete() {
        let (app, store) = seeded_app();

        let response = admin(
            &app,
            Method::POST,
            "/api/v1/admin/categories",
            Some(json!({
                "category_name": "Colors",
                "translations": [
                    {"language_code": "kk", "translated_name": "Түстер"},
                    {"language_code": "ru", "translated_name": "  "}
                ]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = read_json(response).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["translations"].as_array().unwrap().len(), 1);
        assert_eq!(created["is_active"], true);

        let response = admin(
            &app,
            Method::PUT,
            &format!("/api/v1/admin/categories/{id}"),
            Some(json!({"category_name": "Colours", "is_active": false})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let stored = store.categories.get(id).unwrap();
        assert_eq!(stored.category_name, "Colours");
        assert!(stored.translations.is_empty());
        assert!(!stored.is_active);

        let response = admin(
            &app,
            Method::DELETE,
            &format!("/api/v1/admin/categories/{id}"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!store.categories.contains(id));
    }

    #[tokio::test]
    async fn test_unknown_language_and_duplicate_name() {
        let (app, _) = seeded_app();

        let response = admin(
            &app,
            Method::POST,
            "/api/v1/admin/categories",
            Some(json!({
                "category_name": "Colors",
                "translations": [{"language_code": "de", "translated_name": "Farben"}]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = admin(
            &app,
            Method::POST,
            "/api/v1/admin/categories",
            Some(json!({"category_name": "food"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_refused_while_words_remain() {
        let (app, store) = seeded_app();
        let response = admin(&app, Method::DELETE, "/api/v1/admin/categories/2", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("2 words"));
        assert!(store.categories.contains(2));
    }

    #[tokio::test]
    async fn test_status_single_and_bulk() {
        let (app, store) = seeded_app();

        let response = admin(
            &app,
            Method::PATCH,
            "/api/v1/admin/categories/7/status",
            Some(json!({"is_active": true})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(store.categories.get(7).unwrap().is_active);

        let response = admin(
            &app,
            Method::POST,
            "/api/v1/admin/categories/bulk-status",
            Some(json!({"category_ids": [1, 2, 99], "is_active": false})),
        )
        .await;
        assert_eq!(read_json(response).await["updated"], 2);
        assert!(!store.categories.get(1).unwrap().is_active);
    }
}
