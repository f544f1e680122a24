//! 学习指南接口
//!
//! 指南条目按 `order_in_guide` 排序；新加入的单词排在末尾，已在指南中的单词跳过。

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use tracing::info;

use kazlearn_shared::dto::{
    AddGuideWordsRequest, AddGuideWordsResponse, MessageResponse, UpdateGuideWordRequest,
};
use kazlearn_shared::models::{Guide, GuideWordMapping};

use super::SharedStore;
use crate::error::{ApiError, ApiResult};
use crate::store::BackendStore;

/// 重要度取值范围
pub const IMPORTANCE_RANGE: std::ops::RangeInclusive<i32> = 0..=10;

pub fn guide_routes() -> Router<SharedStore> {
    Router::new()
        .route("/admin/guides", get(list_guides))
        .route(
            "/admin/guides/{guide_id}/words",
            get(list_guide_words).post(add_guide_words),
        )
        .route(
            "/admin/guides/{guide_id}/words/{word_id}",
            put(update_guide_word).delete(remove_guide_word),
        )
}

fn check_importance(score: i32) -> ApiResult<()> {
    if IMPORTANCE_RANGE.contains(&score) {
        return Ok(());
    }
    Err(ApiError::invalid(
        "body",
        "importance_score",
        &format!(
            "ensure this value is between {} and {}",
            IMPORTANCE_RANGE.start(),
            IMPORTANCE_RANGE.end()
        ),
        "value_error.number.not_in_range",
    ))
}

fn require_guide(store: &BackendStore, guide_id: i64) -> ApiResult<()> {
    if store.guides.contains(guide_id) {
        Ok(())
    } else {
        Err(ApiError::not_found("Guide", guide_id))
    }
}

/// GET /admin/guides
async fn list_guides(State(store): State<SharedStore>) -> Json<Vec<Guide>> {
    Json(
        store
            .guides
            .list()
            .into_iter()
            .map(|g| store.guide_view(g))
            .collect(),
    )
}

/// GET /admin/guides/{guide_id}/words
async fn list_guide_words(
    State(store): State<SharedStore>,
    Path(guide_id): Path<i64>,
) -> ApiResult<Json<Vec<GuideWordMapping>>> {
    require_guide(&store, guide_id)?;
    Ok(Json(store.guide_mappings(guide_id)))
}

/// POST /admin/guides/{guide_id}/words
async fn add_guide_words(
    State(store): State<SharedStore>,
    Path(guide_id): Path<i64>,
    Json(req): Json<AddGuideWordsRequest>,
) -> ApiResult<Json<AddGuideWordsResponse>> {
    require_guide(&store, guide_id)?;
    check_importance(req.importance_score)?;

    let mut next_order = store
        .guide_mappings(guide_id)
        .iter()
        .map(|m| m.order_in_guide)
        .max()
        .unwrap_or(0);
    let mut added = Vec::new();
    for word_id in req.word_ids {
        let Some(word) = store.words.get(word_id) else {
            continue;
        };
        if store.guide_mapping(guide_id, word_id).is_some() {
            continue;
        }
        next_order += 1;
        let mut mapping = store.guide_words.create(|id| GuideWordMapping {
            id,
            guide_id,
            word_id,
            kazakh_word: None,
            order_in_guide: next_order,
            importance_score: req.importance_score,
        });
        mapping.kazakh_word = Some(word.kazakh_word);
        added.push(mapping);
    }
    info!(guide_id, added = added.len(), "加入指南单词");
    Ok(Json(AddGuideWordsResponse { added }))
}

/// PUT /admin/guides/{guide_id}/words/{word_id}
async fn update_guide_word(
    State(store): State<SharedStore>,
    Path((guide_id, word_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateGuideWordRequest>,
) -> ApiResult<Json<GuideWordMapping>> {
    require_guide(&store, guide_id)?;
    if let Some(score) = req.importance_score {
        check_importance(score)?;
    }
    if req.order_in_guide.is_some_and(|order| order < 1) {
        return Err(ApiError::invalid(
            "body",
            "order_in_guide",
            "ensure this value is greater than or equal to 1",
            "value_error.number.not_ge",
        ));
    }
    let mapping = store
        .guide_mapping(guide_id, word_id)
        .ok_or_else(|| ApiError::NotFound(format!("Word {word_id} is not in guide {guide_id}")))?;
    store.guide_words.update(mapping.id, |m| {
        if let Some(order) = req.order_in_guide {
            m.order_in_guide = order;
        }
        if let Some(score) = req.importance_score {
            m.importance_score = score;
        }
    });
    info!(
        guide_id,
        word_id,
        order = ?req.order_in_guide,
        importance = ?req.importance_score,
        "更新指南条目"
    );
    store
        .guide_mapping(guide_id, word_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Word {word_id} is not in guide {guide_id}")))
}

/// DELETE /admin/guides/{guide_id}/words/{word_id}
async fn remove_guide_word(
    State(store): State<SharedStore>,
    Path((guide_id, word_id)): Path<(i64, i64)>,
) -> ApiResult<Json<MessageResponse>> {
    require_guide(&store, guide_id)?;
    let removed = store
        .guide_words
        .remove_by(|m| m.guide_id == guide_id && m.word_id == word_id);
    if removed == 0 {
        return Err(ApiError::NotFound(format!(
            "Word {word_id} is not in guide {guide_id}"
        )));
    }
    info!(guide_id, word_id, "移出指南单词");
    Ok(Json(MessageResponse {
        message: format!("Word {word_id} removed from guide {guide_id}"),
    }))
}
