//! 单词音频管理

use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::WordSound;
use tracing::info;

use super::file::{LocalFile, MediaKind};
use crate::api::MediaApi;
use crate::error::{AdminError, Result};
use crate::state::ConsoleState;

/// 音频上传附带的元数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundMeta {
    /// 如 `pronunciation`、`example`
    pub sound_type: Option<String>,
    pub alt_text: Option<String>,
    pub source: Option<String>,
    pub license: Option<String>,
}

/// 某个单词的音频列表
pub struct SoundManager {
    state: ConsoleState,
    api: MediaApi,
    word_id: i64,
    sounds: Vec<WordSound>,
}

impl SoundManager {
    pub fn new(state: ConsoleState, word_id: i64) -> Self {
        let api = state.media_api();
        Self {
            state,
            api,
            word_id,
            sounds: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<&[WordSound]> {
        match self.api.sounds(self.word_id).await {
            Ok(sounds) => {
                self.sounds = sounds;
                Ok(&self.sounds)
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                Err(e)
            }
        }
    }

    pub async fn upload(&mut self, file: LocalFile, meta: SoundMeta) -> Result<&WordSound> {
        file.check(MediaKind::Audio, &self.state.toaster)?;

        let file_name = file.file_name.clone();
        let form = file
            .into_upload()
            .text("sound_type", meta.sound_type.as_deref())
            .text("alt_text", meta.alt_text.as_deref())
            .text("source", meta.source.as_deref())
            .text("license", meta.license.as_deref());

        let sound = match self.api.upload_sound(self.word_id, form).await {
            Ok(sound) => sound,
            Err(e) => {
                self.state.toaster.error_from(&e);
                return Err(e);
            }
        };
        info!(word_id = self.word_id, sound_id = sound.id, "音频已上传");

        self.sounds.push(sound);
        self.state
            .toaster
            .success("admin:media.uploaded", &Params::new().with("file", &file_name));
        self.sounds
            .last()
            .ok_or_else(|| AdminError::Internal("uploaded sound missing".into()))
    }

    pub async fn delete(&mut self, sound_id: i64) -> Result<()> {
        if let Err(e) = self.api.delete_sound(self.word_id, sound_id).await {
            self.state.toaster.error_from(&e);
            return Err(e);
        }
        self.sounds.retain(|s| s.id != sound_id);
        self.state
            .toaster
            .success("admin:media.deleted", &Params::new());
        Ok(())
    }

    pub fn sounds(&self) -> &[WordSound] {
        &self.sounds
    }

    pub fn get(&self, sound_id: i64) -> Option<&WordSound> {
        self.sounds.iter().find(|s| s.id == sound_id)
    }
}
