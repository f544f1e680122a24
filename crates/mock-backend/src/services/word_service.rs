//! 管理端单词接口
//!
//! 列表、计数、详情、增删改、批量删除与导出。存在学习进度的单词只有带
//! `force=true` 才能删除，删除时一并清理译文、媒体与指南条目。

use std::cmp::Ordering;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};

use kazlearn_shared::dto::{
    BulkDeleteRequest, BulkDeleteResponse, BulkFailure, CountResponse, ExportFormat,
    ExportFormatParam, ForceParam, LanguageParam, MessageResponse, SortDirection, WordListParams,
    WordPayload,
};
use kazlearn_shared::models::{Word, WordDetail, WordSummary};

use super::{SharedStore, contains_ci, paging, search_term};
use crate::error::{ApiError, ApiResult};
use crate::store::BackendStore;
use crate::store::backend::DEFAULT_LANGUAGE;

/// 单词拼写长度范围（字符数）
pub const WORD_MIN_CHARS: usize = 2;
pub const WORD_MAX_CHARS: usize = 100;

pub fn word_routes() -> Router<SharedStore> {
    Router::new()
        .route("/admin/words", get(list_words).post(create_word))
        .route("/admin/words/count", get(count_words))
        .route("/admin/words/export", get(export_words))
        .route("/admin/words/bulk-delete", post(bulk_delete_words))
        .route(
            "/admin/words/{word_id}",
            get(get_word).put(update_word).delete(delete_word),
        )
}

// ============================================================================
// 过滤与排序
// ============================================================================

/// 按过滤条件筛选；搜索同时匹配拼写、西里尔写法与译文
fn filter_words(store: &BackendStore, params: &WordListParams) -> Vec<Word> {
    let search = search_term(&params.search);
    store.words.list_by(|w| {
        if params.category_id.is_some_and(|id| w.category_id != id) {
            return false;
        }
        if params.word_type_id.is_some_and(|id| w.word_type_id != id) {
            return false;
        }
        if params
            .difficulty_level_id
            .is_some_and(|id| w.difficulty_level_id != id)
        {
            return false;
        }
        match search {
            Some(term) => {
                contains_ci(&w.kazakh_word, term)
                    || w
                        .kazakh_cyrillic
                        .as_deref()
                        .is_some_and(|c| contains_ci(c, term))
                    || store
                        .translations_of(w.id)
                        .iter()
                        .any(|t| contains_ci(&t.translation, term))
            }
            None => true,
        }
    })
}

fn sort_summaries(rows: &mut [WordSummary], sort_by: Option<&str>, direction: SortDirection) {
    let compare = |a: &WordSummary, b: &WordSummary| -> Ordering {
        match sort_by.unwrap_or("id") {
            "kazakh_word" => a.kazakh_word.to_lowercase().cmp(&b.kazakh_word.to_lowercase()),
            "kazakh_cyrillic" => a.kazakh_cyrillic.cmp(&b.kazakh_cyrillic),
            "category_name" => a.category_name.cmp(&b.category_name),
            "word_type_name" => a.word_type_name.cmp(&b.word_type_name),
            "difficulty_level" | "difficulty_level_id" => a.difficulty_level.cmp(&b.difficulty_level),
            "primary_translation" => a.primary_translation.cmp(&b.primary_translation),
            "translation_count" => a.translation_count.cmp(&b.translation_count),
            _ => a.id.cmp(&b.id),
        }
        .then(a.id.cmp(&b.id))
    };
    rows.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b),
        SortDirection::Desc => compare(b, a),
    });
}

fn summaries(store: &BackendStore, params: &WordListParams) -> Vec<WordSummary> {
    let language = params.language_code.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let mut rows: Vec<WordSummary> = filter_words(store, params)
        .iter()
        .map(|w| store.word_summary(w, language))
        .collect();
    sort_summaries(
        &mut rows,
        params.sort_by.as_deref(),
        params.sort_direction.unwrap_or_default(),
    );
    rows
}

// ============================================================================
// 校验
// ============================================================================

fn validate_payload(store: &BackendStore, payload: &WordPayload, own_id: Option<i64>) -> ApiResult<()> {
    let word = payload.kazakh_word.trim();
    let chars = word.chars().count();
    if chars < WORD_MIN_CHARS {
        return Err(ApiError::invalid(
            "body",
            "kazakh_word",
            &format!("ensure this value has at least {WORD_MIN_CHARS} characters"),
            "value_error.any_str.min_length",
        ));
    }
    if chars > WORD_MAX_CHARS {
        return Err(ApiError::invalid(
            "body",
            "kazakh_word",
            &format!("ensure this value has at most {WORD_MAX_CHARS} characters"),
            "value_error.any_str.max_length",
        ));
    }
    if !store.categories.contains(payload.category_id) {
        return Err(ApiError::BadRequest(format!(
            "Category {} does not exist",
            payload.category_id
        )));
    }
    if !store.word_types.contains(payload.word_type_id) {
        return Err(ApiError::BadRequest(format!(
            "Word type {} does not exist",
            payload.word_type_id
        )));
    }
    if !store.difficulty_levels.contains(payload.difficulty_level_id) {
        return Err(ApiError::BadRequest(format!(
            "Difficulty level {} does not exist",
            payload.difficulty_level_id
        )));
    }
    let duplicate = store
        .words
        .count_by(|w| Some(w.id) != own_id && w.kazakh_word.to_lowercase() == word.to_lowercase());
    if duplicate > 0 {
        return Err(ApiError::BadRequest(format!("Word '{word}' already exists")));
    }
    Ok(())
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn progress_conflict(records: u32) -> ApiError {
    ApiError::Conflict(format!(
        "Cannot delete word: {records} progress records exist. Use force=true to delete anyway."
    ))
}

// ============================================================================
// 路由处理器
// ============================================================================

/// GET /admin/words
async fn list_words(
    State(store): State<SharedStore>,
    Query(params): Query<WordListParams>,
) -> ApiResult<Json<Vec<WordSummary>>> {
    let (skip, limit) = paging(params.skip, params.limit)?;
    let rows: Vec<WordSummary> = summaries(&store, &params)
        .into_iter()
        .skip(skip)
        .take(limit)
        .collect();
    info!(skip, limit, returned = rows.len(), "列出单词");
    Ok(Json(rows))
}

/// GET /admin/words/count
async fn count_words(
    State(store): State<SharedStore>,
    Query(params): Query<WordListParams>,
) -> Json<CountResponse> {
    let count = filter_words(&store, &params).len() as i64;
    Json(CountResponse { count })
}

/// GET /admin/words/{word_id}
async fn get_word(
    State(store): State<SharedStore>,
    Path(word_id): Path<i64>,
    Query(params): Query<LanguageParam>,
) -> ApiResult<Json<WordDetail>> {
    let word = store
        .words
        .get(word_id)
        .ok_or_else(|| ApiError::not_found("Word", word_id))?;
    let language = params.language_code.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    Ok(Json(store.word_detail(&word, language)))
}

/// POST /admin/words
async fn create_word(
    State(store): State<SharedStore>,
    Json(payload): Json<WordPayload>,
) -> ApiResult<(StatusCode, Json<Word>)> {
    validate_payload(&store, &payload, None)?;
    let word = store.words.create(|id| Word {
        id,
        kazakh_word: payload.kazakh_word.trim().to_string(),
        kazakh_cyrillic: blank_to_none(&payload.kazakh_cyrillic),
        category_id: payload.category_id,
        word_type_id: payload.word_type_id,
        difficulty_level_id: payload.difficulty_level_id,
        created_at: Some(Utc::now()),
    });
    info!(word_id = word.id, word = %word.kazakh_word, "创建单词");
    Ok((StatusCode::CREATED, Json(word)))
}

/// PUT /admin/words/{word_id}
async fn update_word(
    State(store): State<SharedStore>,
    Path(word_id): Path<i64>,
    Json(payload): Json<WordPayload>,
) -> ApiResult<Json<Word>> {
    if !store.words.contains(word_id) {
        return Err(ApiError::not_found("Word", word_id));
    }
    validate_payload(&store, &payload, Some(word_id))?;
    let word = store
        .words
        .update(word_id, |w| {
            w.kazakh_word = payload.kazakh_word.trim().to_string();
            w.kazakh_cyrillic = blank_to_none(&payload.kazakh_cyrillic);
            w.category_id = payload.category_id;
            w.word_type_id = payload.word_type_id;
            w.difficulty_level_id = payload.difficulty_level_id;
        })
        .ok_or_else(|| ApiError::not_found("Word", word_id))?;
    info!(word_id, "更新单词");
    Ok(Json(word))
}

/// DELETE /admin/words/{word_id}?force=
async fn delete_word(
    State(store): State<SharedStore>,
    Path(word_id): Path<i64>,
    Query(ForceParam { force }): Query<ForceParam>,
) -> ApiResult<Json<MessageResponse>> {
    if !store.words.contains(word_id) {
        return Err(ApiError::not_found("Word", word_id));
    }
    let records = store.progress_count(word_id);
    if records > 0 && !force {
        warn!(word_id, records, "单词存在学习进度，拒绝删除");
        return Err(progress_conflict(records));
    }
    store.delete_word_cascade(word_id);
    info!(word_id, force, "删除单词");
    Ok(Json(MessageResponse {
        message: format!("Word {word_id} deleted"),
    }))
}

/// POST /admin/words/bulk-delete
///
/// 未带 force 时，只要有一个单词存在学习进度就整批拒绝
async fn bulk_delete_words(
    State(store): State<SharedStore>,
    Json(req): Json<BulkDeleteRequest>,
) -> ApiResult<Json<BulkDeleteResponse>> {
    if req.word_ids.is_empty() {
        return Err(ApiError::invalid(
            "body",
            "word_ids",
            "ensure this value has at least 1 items",
            "value_error.list.min_items",
        ));
    }

    if !req.force {
        let blocked: Vec<(i64, u32)> = req
            .word_ids
            .iter()
            .map(|id| (*id, store.progress_count(*id)))
            .filter(|(_, records)| *records > 0)
            .collect();
        if !blocked.is_empty() {
            let records: u32 = blocked.iter().map(|(_, r)| r).sum();
            let ids: Vec<String> = blocked.iter().map(|(id, _)| id.to_string()).collect();
            return Err(ApiError::Conflict(format!(
                "Cannot delete words: {records} progress records exist for word(s) {}. Use force=true to delete anyway.",
                ids.join(", ")
            )));
        }
    }

    let mut reply = BulkDeleteResponse::default();
    for id in req.word_ids {
        if store.delete_word_cascade(id) {
            reply.deleted.push(id);
        } else {
            reply.failed.push(BulkFailure {
                id,
                detail: "Word not found".to_string(),
            });
        }
    }
    info!(
        deleted = reply.deleted.len(),
        failed = reply.failed.len(),
        force = req.force,
        "批量删除单词"
    );
    Ok(Json(reply))
}

/// GET /admin/words/export?format=csv|json
async fn export_words(
    State(store): State<SharedStore>,
    Query(params): Query<WordListParams>,
    Query(ExportFormatParam { format }): Query<ExportFormatParam>,
) -> ApiResult<Response> {
    let rows = summaries(&store, &params);
    info!(rows = rows.len(), format = format.as_str(), "导出单词");
    let disposition = format!(
        "attachment; filename=\"words_export.{}\"",
        format.extension()
    );
    let response = match format {
        ExportFormat::Json => {
            let body = serde_json::to_vec_pretty(&rows)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            (
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        ExportFormat::Csv => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            to_csv(&rows)?,
        )
            .into_response(),
    };
    Ok(response)
}

const CSV_HEADER: [&str; 7] = [
    "id",
    "kazakh_word",
    "kazakh_cyrillic",
    "category",
    "word_type",
    "difficulty_level",
    "translation",
];

fn to_csv(rows: &[WordSummary]) -> ApiResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.id.to_string(),
            row.kazakh_word.clone(),
            row.kazakh_cyrillic.clone().unwrap_or_default(),
            row.category_name.clone().unwrap_or_default(),
            row.word_type_name.clone().unwrap_or_default(),
            row.difficulty_level.map(|d| d.to_string()).unwrap_or_default(),
            row.primary_translation.clone().unwrap_or_default(),
        ])?;
    }
    wtr.into_inner()
        .map_err(|e| ApiError::Internal(format!("csv export failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{admin, read_json, read_text, seeded_app};
    use axum::http::Method;
    use serde_json::json;

    #[test]
    fn test_csv_quotes_fields_with_separators() {
        let row: WordSummary = serde_json::from_value(json!({
            "id": 7,
            "kazakh_word": "sälem",
            "kazakh_cyrillic": "сәлем",
            "category_id": 1,
            "word_type_id": 1,
            "difficulty_level_id": 1,
            "category_name": "Greetings, basic",
            "primary_translation": "say \"hi\""
        }))
        .unwrap();

        let text = String::from_utf8(to_csv(&[row]).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("7,sälem,сәлем,\"Greetings, basic\",,,\"say \"\"hi\"\"\"")
        );

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[3], "Greetings, basic");
        assert_eq!(&record[6], "say \"hi\"");
    }

    #[tokio::test]
    async fn test_list_filters_sorts_and_pages() {
        let (app, _) = seeded_app();

        let response = admin(
            &app,
            Method::GET,
            "/api/v1/admin/words?category_id=3&sort_by=kazakh_word&sort_direction=desc&limit=2",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let rows = read_json(response).await;
        let words: Vec<&str> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["kazakh_word"].as_str().unwrap())
            .collect();
        // Family: dos, ana, äke
        assert_eq!(words, vec!["äke", "dos"]);

        let response = admin(&app, Method::GET, "/api/v1/admin/words/count?category_id=3", None).await;
        assert_eq!(read_json(response).await["count"], 3);
    }

    #[tokio::test]
    async fn test_search_matches_translations() {
        let (app, _) = seeded_app();
        let response = admin(
            &app,
            Method::GET,
            "/api/v1/admin/words?search=MOUNT&language_code=ru",
            None,
        )
        .await;
        let rows = read_json(response).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["kazakh_word"], "tau");
        assert_eq!(rows[0]["primary_translation"], "гора");
    }

    #[tokio::test]
    async fn test_limit_above_maximum_is_rejected() {
        let (app, _) = seeded_app();
        let response = admin(&app, Method::GET, "/api/v1/admin/words?limit=500", None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert_eq!(body["detail"][0]["loc"], json!(["query", "limit"]));
    }

    #[tokio::test]
    async fn test_create_validates_length_and_references() {
        let (app, store) = seeded_app();

        let short = json!({"kazakh_word": "a", "category_id": 1, "word_type_id": 1, "difficulty_level_id": 1});
        let response = admin(&app, Method::POST, "/api/v1/admin/words", Some(short)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bad_category = json!({"kazakh_word": "alma", "category_id": 99, "word_type_id": 1, "difficulty_level_id": 1});
        let response = admin(&app, Method::POST, "/api/v1/admin/words", Some(bad_category)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let duplicate = json!({"kazakh_word": "Sälem", "category_id": 1, "word_type_id": 1, "difficulty_level_id": 1});
        let response = admin(&app, Method::POST, "/api/v1/admin/words", Some(duplicate)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let ok = json!({"kazakh_word": " alma ", "kazakh_cyrillic": "", "category_id": 2, "word_type_id": 1, "difficulty_level_id": 1});
        let response = admin(&app, Method::POST, "/api/v1/admin/words", Some(ok)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let word = read_json(response).await;
        assert_eq!(word["kazakh_word"], "alma");
        assert!(word["kazakh_cyrillic"].is_null());
        assert!(store.words.contains(word["id"].as_i64().unwrap()));
    }

    #[tokio::test]
    async fn test_update_keeps_own_spelling() {
        let (app, _) = seeded_app();
        let payload = json!({"kazakh_word": "sälem", "kazakh_cyrillic": "сәлем", "category_id": 1, "word_type_id": 4, "difficulty_level_id": 2});
        let response = admin(&app, Method::PUT, "/api/v1/admin/words/1", Some(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["difficulty_level_id"], 2);
    }

    #[tokio::test]
    async fn test_delete_with_progress_needs_force() {
        let (app, store) = seeded_app();

        let response = admin(&app, Method::DELETE, "/api/v1/admin/words/1", None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = read_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("progress records"));
        assert!(store.words.contains(1));

        let response = admin(&app, Method::DELETE, "/api/v1/admin/words/1?force=true", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!store.words.contains(1));
        assert!(store.translations_of(1).is_empty());
    }

    #[tokio::test]
    async fn test_bulk_delete_reports_missing_ids() {
        let (app, store) = seeded_app();

        let response = admin(
            &app,
            Method::POST,
            "/api/v1/admin/words/bulk-delete",
            Some(json!({"word_ids": [1, 2]})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(store.words.contains(2));

        let response = admin(
            &app,
            Method::POST,
            "/api/v1/admin/words/bulk-delete",
            Some(json!({"word_ids": [2, 3, 404]})),
        )
        .await;
        let reply: BulkDeleteResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(reply.deleted, vec![2, 3]);
        assert_eq!(reply.failed.len(), 1);
        assert_eq!(reply.failed[0].id, 404);
    }

    #[tokio::test]
    async fn test_export_csv_respects_filters() {
        let (app, _) = seeded_app();
        let response = admin(
            &app,
            Method::GET,
            "/api/v1/admin/words/export?format=csv&category_id=2",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );
        let text = read_text(response).await;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER.join(","));
        // Food: su, nan
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("water"));
    }

    #[tokio::test]
    async fn test_export_json() {
        let (app, _) = seeded_app();
        let response = admin(&app, Method::GET, "/api/v1/admin/words/export?format=json", None).await;
        let rows = read_json(response).await;
        assert_eq!(rows.as_array().unwrap().len(), 15);
    }
}
