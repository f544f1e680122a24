//! 译文行与单条译文编辑弹窗

use std::collections::HashSet;

use kazlearn_shared::dto::{CreateTranslationRequest, UpdateTranslationRequest};
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::{Language, Translation};
use tracing::info;
use validator::Validate;

use super::validation::FieldErrors;
use crate::api::AdminApi;
use crate::error::{AdminError, Result};
use crate::state::ConsoleState;

/// 备选译文条数上限
pub const MAX_ALTERNATIVES: usize = 10;
/// 单条译文长度上限
pub const MAX_TRANSLATION_LEN: usize = 200;

/// 表单中的一行译文
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct TranslationRow {
    /// 已存在的译文 id，新行为空
    pub id: Option<i64>,
    #[validate(required(code = "required", message = "language is required"))]
    pub language_id: Option<i64>,
    pub language_code: String,
    #[validate(length(max = 200, code = "translation_length", message = "translation is too long"))]
    pub translation: String,
    pub alternative_translations: Vec<String>,
}

impl TranslationRow {
    pub fn new(language: &Language, translation: &str) -> Self {
        Self {
            id: None,
            language_id: Some(language.id),
            language_code: language.language_code.clone(),
            translation: translation.to_string(),
            alternative_translations: Vec::new(),
        }
    }

    pub fn with_alternatives(mut self, alternatives: &[&str]) -> Self {
        self.alternative_translations = alternatives.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn from_translation(translation: &Translation) -> Self {
        Self {
            id: Some(translation.id),
            language_id: Some(translation.language_id),
            language_code: translation.language_code.clone(),
            translation: translation.translation.clone(),
            alternative_translations: translation.alternative_translations.clone(),
        }
    }

    /// 去除首尾空白并丢弃空的备选
    pub fn normalized(&self) -> Self {
        Self {
            translation: self.translation.trim().to_string(),
            alternative_translations: self
                .alternative_translations
                .iter()
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
            ..self.clone()
        }
    }

    /// 校验单行（调用方先 normalized）
    pub fn check(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };
        if self.translation.is_empty() {
            errors.insert("translation", "translation_required");
        }
        if self.alternative_translations.len() > MAX_ALTERNATIVES
            || self
                .alternative_translations
                .iter()
                .any(|a| a.chars().count() > MAX_TRANSLATION_LEN)
        {
            errors.insert("alternative_translations", "alternatives_invalid");
        }
        errors
    }

    /// 与已保存的译文内容是否一致
    pub fn same_content(&self, saved: &Translation) -> bool {
        self.translation == saved.translation
            && self.alternative_translations == saved.alternative_translations
    }

    pub fn create_request(&self, word_id: i64) -> Result<CreateTranslationRequest> {
        let language_id = self
            .language_id
            .ok_or_else(|| AdminError::Internal("translation row without language".into()))?;
        Ok(CreateTranslationRequest {
            word_id,
            language_id,
            translation: self.translation.clone(),
            alternative_translations: self.alternative_translations.clone(),
        })
    }

    pub fn update_request(&self) -> UpdateTranslationRequest {
        UpdateTranslationRequest {
            translation: self.translation.clone(),
            alternative_translations: self.alternative_translations.clone(),
        }
    }
}

/// 校验全部译文行：逐行规则加同语言去重
pub fn check_rows(rows: &[TranslationRow]) -> FieldErrors {
    let mut errors = FieldErrors::default();
    let mut seen = HashSet::new();
    for (index, row) in rows.iter().enumerate() {
        errors.merge_prefixed(&format!("translations.{index}"), row.check());
        if let Some(language_id) = row.language_id {
            if !seen.insert(language_id) {
                errors.insert("translations", "duplicate_language");
            }
        }
    }
    errors
}

/// 单条译文编辑弹窗
pub struct TranslationEditor {
    state: ConsoleState,
    api: AdminApi,
    word_id: i64,
    existing: Option<Translation>,
    languages: Vec<Language>,
    errors: FieldErrors,
    pub row: TranslationRow,
}

impl TranslationEditor {
    /// 为单词新增译文
    pub async fn open_new(state: ConsoleState, word_id: i64) -> Result<Self> {
        let languages = state.public_api().languages().await?;
        Ok(Self {
            api: state.admin_api(),
            state,
            word_id,
            existing: None,
            languages,
            errors: FieldErrors::default(),
            row: TranslationRow::default(),
        })
    }

    /// 编辑已有译文，语言不可修改
    pub async fn open_existing(state: ConsoleState, translation: Translation) -> Result<Self> {
        let languages = state.public_api().languages().await?;
        Ok(Self {
            api: state.admin_api(),
            state,
            word_id: translation.word_id,
            row: TranslationRow::from_translation(&translation),
            existing: Some(translation),
            languages,
            errors: FieldErrors::default(),
        })
    }

    /// 按语言代码选择语言
    pub fn choose_language(&mut self, code: &str) -> Result<()> {
        if self.existing.is_some() {
            return Err(AdminError::InvalidState(
                "the language of a saved translation cannot change".into(),
            ));
        }
        let language = self
            .languages
            .iter()
            .find(|l| l.language_code == code)
            .ok_or_else(|| AdminError::InvalidState(format!("unknown language: {code}")))?;
        self.row.language_id = Some(language.id);
        self.row.language_code = language.language_code.clone();
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<Translation> {
        let row = self.row.normalized();
        self.errors = row.check();
        if !self.errors.is_empty() {
            return Err(AdminError::Validation(self.errors.clone()));
        }

        let result = match &self.existing {
            Some(existing) => {
                self.api
                    .update_translation(existing.id, &row.update_request())
                    .await
            }
            None => {
                let req = row.create_request(self.word_id)?;
                self.api.create_translation(&req).await
            }
        };

        match result {
            Ok(saved) => {
                info!(word_id = self.word_id, translation_id = saved.id, "译文已保存");
                self.state
                    .toaster
                    .success("admin:translations.saved", &Params::new());
                self.row = TranslationRow::from_translation(&saved);
                self.existing = Some(saved.clone());
                Ok(saved)
            }
            Err(e) => {
                self.state.toaster.error(
                    "admin:translations.save_failed",
                    &Params::new()
                        .with("language", &row.language_code)
                        .with("detail", e.detail()),
                );
                Err(e)
            }
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }
}
