//! 单词媒体接口
//!
//! multipart 上传：文件在 `file` 字段，其余为文本字段。只保存元数据与 URL，
//! 文件内容在校验后丢弃。

use std::collections::HashMap;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    routing::{delete, get, put},
};
use tracing::{info, warn};

use kazlearn_shared::models::{WordImage, WordSound};

use super::SharedStore;
use crate::error::{ApiError, ApiResult};
use crate::store::BackendStore;

const MIB: usize = 1024 * 1024;

/// 图片大小上限
pub const IMAGE_MAX_BYTES: usize = 5 * MIB;

/// 音频大小上限
pub const SOUND_MAX_BYTES: usize = 10 * MIB;

pub fn media_routes() -> Router<SharedStore> {
    Router::new()
        .route("/word-images/{word_id}", get(list_images).post(upload_image))
        .route("/word-images/{word_id}/{image_id}", delete(delete_image))
        .route(
            "/word-images/{word_id}/{image_id}/primary",
            put(set_primary_image),
        )
        .route("/word-sounds/{word_id}", get(list_sounds).post(upload_sound))
        .route("/word-sounds/{word_id}/{sound_id}", delete(delete_sound))
}

// ============================================================================
// multipart 解析
// ============================================================================

/// 解析后的上传内容
struct Upload {
    file_name: String,
    content_type: String,
    bytes: Bytes,
    fields: HashMap<String, String>,
}

impl Upload {
    /// 空白文本字段视为未填
    fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn flag(&self, name: &str) -> bool {
        self.text(name)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
    }

    /// 校验类型前缀与大小
    fn check(&self, mime_prefix: &str, max_bytes: usize) -> ApiResult<()> {
        if !self.content_type.starts_with(mime_prefix) {
            return Err(ApiError::BadRequest(format!(
                "Invalid file type '{}'. Expected {mime_prefix}*",
                self.content_type
            )));
        }
        if self.bytes.len() > max_bytes {
            return Err(ApiError::PayloadTooLarge(format!(
                "File too large. Maximum size is {}MB",
                max_bytes / MIB
            )));
        }
        Ok(())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut file: Option<(String, String, Bytes)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            file = Some((file_name, content_type, bytes));
        } else {
            let value = field.text().await?;
            fields.insert(name, value);
        }
    }

    let (file_name, content_type, bytes) = file.ok_or_else(|| {
        ApiError::invalid("body", "file", "field required", "value_error.missing")
    })?;
    Ok(Upload {
        file_name,
        content_type,
        bytes,
        fields,
    })
}

fn require_word(store: &BackendStore, word_id: i64) -> ApiResult<()> {
    if store.words.contains(word_id) {
        Ok(())
    } else {
        Err(ApiError::not_found("Word", word_id))
    }
}

// ============================================================================
// 图片
// ============================================================================

/// GET /word-images/{word_id}
async fn list_images(
    State(store): State<SharedStore>,
    Path(word_id): Path<i64>,
) -> ApiResult<Json<Vec<WordImage>>> {
    require_word(&store, word_id)?;
    Ok(Json(store.images.list_by(|i| i.word_id == word_id)))
}

/// POST /word-images/{word_id}
///
/// 单词的第一张图片自动成为主图
async fn upload_image(
    State(store): State<SharedStore>,
    Path(word_id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<WordImage>)> {
    require_word(&store, word_id)?;
    let upload = read_upload(multipart).await?;
    if let Err(e) = upload.check("image/", IMAGE_MAX_BYTES) {
        warn!(word_id, file = %upload.file_name, size = upload.bytes.len(), "图片被拒绝");
        return Err(e);
    }

    let is_first = store.images.count_by(|i| i.word_id == word_id) == 0;
    let is_primary = is_first || upload.flag("is_primary");
    if is_primary {
        clear_primary(&store, word_id);
    }
    let image = store.images.create(|id| WordImage {
        id,
        word_id,
        image_url: format!("/static/images/words/{word_id}/{id}_{}", upload.file_name),
        alt_text: upload.text("alt_text"),
        is_primary,
        source: upload.text("source"),
        license: upload.text("license"),
    });
    info!(
        word_id,
        image_id = image.id,
        size = upload.bytes.len(),
        is_primary,
        "上传图片"
    );
    Ok((StatusCode::CREATED, Json(image)))
}

fn clear_primary(store: &BackendStore, word_id: i64) {
    for image in store.images.list_by(|i| i.word_id == word_id && i.is_primary) {
        store.images.update(image.id, |i| i.is_primary = false);
    }
}

/// DELETE /word-images/{word_id}/{image_id}
///
/// 删除主图后，剩余的第一张图片成为主图
async fn delete_image(
    State(store): State<SharedStore>,
    Path((word_id, image_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    let image = store
        .images
        .get(image_id)
        .filter(|i| i.word_id == word_id)
        .ok_or_else(|| ApiError::not_found("Image", image_id))?;
    store.images.remove(image_id);
    if image.is_primary {
        if let Some(next) = store.images.list_by(|i| i.word_id == word_id).first() {
            store.images.update(next.id, |i| i.is_primary = true);
        }
    }
    info!(word_id, image_id, "删除图片");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /word-images/{word_id}/{image_id}/primary
async fn set_primary_image(
    State(store): State<SharedStore>,
    Path((word_id, image_id)): Path<(i64, i64)>,
) -> ApiResult<Json<WordImage>> {
    store
        .images
        .get(image_id)
        .filter(|i| i.word_id == word_id)
        .ok_or_else(|| ApiError::not_found("Image", image_id))?;
    clear_primary(&store, word_id);
    let image = store
        .images
        .update(image_id, |i| i.is_primary = true)
        .ok_or_else(|| ApiError::not_found("Image", image_id))?;
    info!(word_id, image_id, "设置主图");
    Ok(Json(image))
}

// ============================================================================
// 音频
// ============================================================================

/// GET /word-sounds/{word_id}
async fn list_sounds(
    State(store): State<SharedStore>,
    Path(word_id): Path<i64>,
) -> ApiResult<Json<Vec<WordSound>>> {
    require_word(&store, word_id)?;
    Ok(Json(store.sounds.list_by(|s| s.word_id == word_id)))
}

/// POST /word-sounds/{word_id}
async fn upload_sound(
    State(store): State<SharedStore>,
    Path(word_id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<WordSound>)> {
    require_word(&store, word_id)?;
    let upload = read_upload(multipart).await?;
    if let Err(e) = upload.check("audio/", SOUND_MAX_BYTES) {
        warn!(word_id, file = %upload.file_name, size = upload.bytes.len(), "音频被拒绝");
        return Err(e);
    }

    let sound = store.sounds.create(|id| WordSound {
        id,
        word_id,
        sound_url: format!("/static/audio/words/{word_id}/{id}_{}", upload.file_name),
        sound_type: upload.text("sound_type"),
        alt_text: upload.text("alt_text"),
        source: upload.text("source"),
        license: upload.text("license"),
    });
    info!(word_id, sound_id = sound.id, size = upload.bytes.len(), "上传音频");
    Ok((StatusCode::CREATED, Json(sound)))
}

/// DELETE /word-sounds/{word_id}/{sound_id}
async fn delete_sound(
    State(store): State<SharedStore>,
    Path((word_id, sound_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    store
        .sounds
        .get(sound_id)
        .filter(|s| s.word_id == word_id)
        .ok_or_else(|| ApiError::not_found("Sound", sound_id))?;
    store.sounds.remove(sound_id);
    info!(word_id, sound_id, "删除音频");
    Ok(StatusCode::NO_CONTENT)
}
