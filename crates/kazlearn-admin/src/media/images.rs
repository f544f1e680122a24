//! 单词图片管理

use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::WordImage;
use tracing::info;

use super::file::{LocalFile, MediaKind};
use crate::api::MediaApi;
use crate::error::{AdminError, Result};
use crate::state::ConsoleState;

/// 图片上传附带的元数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMeta {
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub source: Option<String>,
    pub license: Option<String>,
}

/// 某个单词的图片列表
pub struct ImageManager {
    state: ConsoleState,
    api: MediaApi,
    word_id: i64,
    images: Vec<WordImage>,
}

impl ImageManager {
    pub fn new(state: ConsoleState, word_id: i64) -> Self {
        let api = state.media_api();
        Self {
            state,
            api,
            word_id,
            images: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<&[WordImage]> {
        match self.api.images(self.word_id).await {
            Ok(images) => {
                self.images = images;
                Ok(&self.images)
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                Err(e)
            }
        }
    }

    /// 校验并上传；成功后追加到本地列表，不重新拉取
    pub async fn upload(&mut self, file: LocalFile, meta: ImageMeta) -> Result<&WordImage> {
        file.check(MediaKind::Image, &self.state.toaster)?;

        let file_name = file.file_name.clone();
        let form = file
            .into_upload()
            .text("alt_text", meta.alt_text.as_deref())
            .text("is_primary", Some(meta.is_primary))
            .text("source", meta.source.as_deref())
            .text("license", meta.license.as_deref());

        let image = match self.api.upload_image(self.word_id, form).await {
            Ok(image) => image,
            Err(e) => {
                self.state.toaster.error_from(&e);
                return Err(e);
            }
        };
        info!(word_id = self.word_id, image_id = image.id, "图片已上传");

        if image.is_primary {
            self.clear_primary();
        }
        self.images.push(image);
        self.state
            .toaster
            .success("admin:media.uploaded", &Params::new().with("file", &file_name));
        self.images
            .last()
            .ok_or_else(|| AdminError::Internal("uploaded image missing".into()))
    }

    pub async fn delete(&mut self, image_id: i64) -> Result<()> {
        if let Err(e) = self.api.delete_image(self.word_id, image_id).await {
            self.state.toaster.error_from(&e);
            return Err(e);
        }
        self.images.retain(|img| img.id != image_id);
        self.state
            .toaster
            .success("admin:media.deleted", &Params::new());
        Ok(())
    }

    pub async fn set_primary(&mut self, image_id: i64) -> Result<()> {
        if !self.images.iter().any(|img| img.id == image_id) {
            return Err(AdminError::InvalidState(format!(
                "image {} does not belong to word {}",
                image_id, self.word_id
            )));
        }
        if let Err(e) = self.api.set_primary_image(self.word_id, image_id).await {
            self.state.toaster.error_from(&e);
            return Err(e);
        }
        for img in &mut self.images {
            img.is_primary = img.id == image_id;
        }
        self.state
            .toaster
            .success("admin:media.primary_set", &Params::new());
        Ok(())
    }

    pub fn images(&self) -> &[WordImage] {
        &self.images
    }

    pub fn primary(&self) -> Option<&WordImage> {
        self.images.iter().find(|img| img.is_primary)
    }

    pub fn word_id(&self) -> i64 {
        self.word_id
    }

    fn clear_primary(&mut self) {
        for img in &mut self.images {
            img.is_primary = false;
        }
    }
}
