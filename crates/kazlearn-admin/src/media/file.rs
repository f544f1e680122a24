//! 本地媒体文件

use std::path::Path;

use kazlearn_shared::i18n::Params;
use tracing::{debug, warn};

use crate::api::UploadForm;
use crate::error::{AdminError, Result};
use crate::notify::Toaster;

/// 图片大小上限（5 MB）
pub const IMAGE_LIMIT: u64 = 5 * 1024 * 1024;
/// 音频大小上限（10 MB）
pub const AUDIO_LIMIT: u64 = 10 * 1024 * 1024;

/// 媒体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    pub fn limit_bytes(self) -> u64 {
        match self {
            MediaKind::Image => IMAGE_LIMIT,
            MediaKind::Audio => AUDIO_LIMIT,
        }
    }

    pub fn limit_mb(self) -> u64 {
        self.limit_bytes() / (1024 * 1024)
    }

    fn mime_prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Audio => "audio/",
        }
    }

    fn too_large_key(self) -> &'static str {
        match self {
            MediaKind::Image => "admin:media.image_too_large",
            MediaKind::Audio => "admin:media.audio_too_large",
        }
    }

    fn invalid_type_key(self) -> &'static str {
        match self {
            MediaKind::Image => "admin:media.invalid_image_type",
            MediaKind::Audio => "admin:media.invalid_audio_type",
        }
    }
}

/// 待上传的本地文件
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// 异步读取文件；未指定 MIME 时按扩展名推断
    pub async fn read(path: &Path, mime_type: Option<&str>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = match mime_type {
            Some(m) => m.to_string(),
            None => mime_from_path(path).to_string(),
        };
        debug!(file = %file_name, mime = %mime_type, size = bytes.len(), "读取本地文件");
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// 上传前校验类型与大小，失败时发出错误提示
    pub fn check(&self, kind: MediaKind, toaster: &Toaster) -> Result<()> {
        let (key, params) = if !self.mime_type.starts_with(kind.mime_prefix()) {
            (
                kind.invalid_type_key(),
                Params::new().with("mime", &self.mime_type),
            )
        } else if self.size() > kind.limit_bytes() {
            (
                kind.too_large_key(),
                Params::new().with("limit", kind.limit_mb()),
            )
        } else {
            return Ok(());
        };

        warn!(file = %self.file_name, mime = %self.mime_type, size = self.size(), "文件被拒绝");
        let message = toaster.i18n().t_with(key, &params);
        toaster.push(crate::notify::ToastLevel::Error, message.clone());
        Err(AdminError::FileRejected(message))
    }

    pub(crate) fn into_upload(self) -> UploadForm {
        UploadForm::new(&self.file_name, &self.mime_type, self.bytes)
    }
}

/// 按扩展名推断 MIME 类型
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
