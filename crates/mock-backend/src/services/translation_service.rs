//! 管理端译文接口
//!
//! 每个单词每种语言至多一条译文，语言创建后不可修改。

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};
use tracing::info;

use kazlearn_shared::dto::{CreateTranslationRequest, MessageResponse, UpdateTranslationRequest};
use kazlearn_shared::models::Translation;

use super::SharedStore;
use crate::error::{ApiError, ApiResult};

pub fn translation_routes() -> Router<SharedStore> {
    Router::new()
        .route("/admin/translations", post(create_translation))
        .route(
            "/admin/translations/{translation_id}",
            put(update_translation).delete(delete_translation),
        )
}

fn validate_text(text: &str) -> ApiResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::invalid(
            "body",
            "translation",
            "ensure this value has at least 1 characters",
            "value_error.any_str.min_length",
        ));
    }
    Ok(text.to_string())
}

fn clean_alternatives(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// POST /admin/translations
async fn create_translation(
    State(store): State<SharedStore>,
    Json(req): Json<CreateTranslationRequest>,
) -> ApiResult<(StatusCode, Json<Translation>)> {
    let text = validate_text(&req.translation)?;
    if !store.words.contains(req.word_id) {
        return Err(ApiError::not_found("Word", req.word_id));
    }
    let language = store
        .languages
        .get(req.language_id)
        .ok_or_else(|| ApiError::BadRequest(format!("Language {} does not exist", req.language_id)))?;
    let exists = store
        .translations
        .count_by(|t| t.word_id == req.word_id && t.language_id == req.language_id);
    if exists > 0 {
        return Err(ApiError::BadRequest(format!(
            "Translation for language '{}' already exists",
            language.language_code
        )));
    }

    let translation = store.translations.create(|id| Translation {
        id,
        word_id: req.word_id,
        language_id: language.id,
        language_code: language.language_code.clone(),
        translation: text,
        alternative_translations: clean_alternatives(req.alternative_translations),
    });
    info!(
        translation_id = translation.id,
        word_id = translation.word_id,
        language = %translation.language_code,
        "创建译文"
    );
    Ok((StatusCode::CREATED, Json(translation)))
}

/// PUT /admin/translations/{translation_id}
async fn update_translation(
    State(store): State<SharedStore>,
    Path(translation_id): Path<i64>,
    Json(req): Json<UpdateTranslationRequest>,
) -> ApiResult<Json<Translation>> {
    let text = validate_text(&req.translation)?;
    let alternatives = clean_alternatives(req.alternative_translations);
    let translation = store
        .translations
        .update(translation_id, |t| {
            t.translation = text;
            t.alternative_translations = alternatives;
        })
        .ok_or_else(|| ApiError::not_found("Translation", translation_id))?;
    info!(translation_id, "更新译文");
    Ok(Json(translation))
}

/// DELETE /admin/translations/{translation_id}
async fn delete_translation(
    State(store): State<SharedStore>,
    Path(translation_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    store
        .translations
        .remove(translation_id)
        .ok_or_else(|| ApiError::not_found("Translation", translation_id))?;
    info!(translation_id, "删除译文");
    Ok(Json(MessageResponse {
        message: format!("Translation {translation_id} deleted"),
    }))
}
