//! 单词编辑弹窗

use kazlearn_shared::dto::WordPayload;
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::{Translation, WordDetail};
use tracing::debug;
use validator::Validate;

use super::ReferenceData;
use super::translation::{TranslationRow, check_rows};
use super::unit_of_work::{SaveReport, TranslationChangeSet, UnitOfWork};
use super::validation::FieldErrors;
use crate::error::{AdminError, Result};
use crate::notify::ToastLevel;
use crate::state::ConsoleState;

/// 单词表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct WordForm {
    #[validate(length(min = 2, max = 100, code = "word_length", message = "word must be 2-100 characters"))]
    pub kazakh_word: String,
    #[validate(length(max = 100, code = "cyrillic_length", message = "cyrillic spelling is too long"))]
    pub kazakh_cyrillic: Option<String>,
    #[validate(required(code = "required", message = "category is required"))]
    pub category_id: Option<i64>,
    #[validate(required(code = "required", message = "word type is required"))]
    pub word_type_id: Option<i64>,
    #[validate(required(code = "required", message = "difficulty level is required"))]
    pub difficulty_level_id: Option<i64>,
    pub translations: Vec<TranslationRow>,
}

impl WordForm {
    pub fn new(kazakh_word: &str) -> Self {
        Self {
            kazakh_word: kazakh_word.to_string(),
            ..Default::default()
        }
    }

    pub fn cyrillic(mut self, kazakh_cyrillic: &str) -> Self {
        self.kazakh_cyrillic = Some(kazakh_cyrillic.to_string());
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn word_type(mut self, word_type_id: i64) -> Self {
        self.word_type_id = Some(word_type_id);
        self
    }

    pub fn difficulty(mut self, difficulty_level_id: i64) -> Self {
        self.difficulty_level_id = Some(difficulty_level_id);
        self
    }

    pub fn translation(mut self, row: TranslationRow) -> Self {
        self.translations.push(row);
        self
    }

    pub fn from_detail(detail: &WordDetail) -> Self {
        Self {
            kazakh_word: detail.word.kazakh_word.clone(),
            kazakh_cyrillic: detail.word.kazakh_cyrillic.clone(),
            category_id: Some(detail.word.category_id),
            word_type_id: Some(detail.word.word_type_id),
            difficulty_level_id: Some(detail.word.difficulty_level_id),
            translations: detail
                .translations
                .iter()
                .map(TranslationRow::from_translation)
                .collect(),
        }
    }

    /// 去除空白；空的西里尔拼写视为未填
    pub fn normalized(&self) -> Self {
        let cyrillic = self
            .kazakh_cyrillic
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self {
            kazakh_word: self.kazakh_word.trim().to_string(),
            kazakh_cyrillic: cyrillic,
            translations: self
                .translations
                .iter()
                .map(TranslationRow::normalized)
                .collect(),
            ..self.clone()
        }
    }

    /// 校验（调用方先 normalized）
    pub fn check(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };
        for (field, error) in check_rows(&self.translations).iter() {
            errors.insert_error(field, error.clone());
        }
        errors
    }

    pub fn payload(&self) -> Result<WordPayload> {
        let missing = |field: &str| AdminError::Internal(format!("{field} missing after validation"));
        Ok(WordPayload {
            kazakh_word: self.kazakh_word.clone(),
            kazakh_cyrillic: self.kazakh_cyrillic.clone(),
            category_id: self.category_id.ok_or_else(|| missing("category_id"))?,
            word_type_id: self.word_type_id.ok_or_else(|| missing("word_type_id"))?,
            difficulty_level_id: self
                .difficulty_level_id
                .ok_or_else(|| missing("difficulty_level_id"))?,
        })
    }
}

/// 单词编辑弹窗（新建或编辑）
pub struct WordEditor {
    state: ConsoleState,
    word_id: Option<i64>,
    saved_translations: Vec<Translation>,
    reference: ReferenceData,
    errors: FieldErrors,
    pub form: WordForm,
}

impl WordEditor {
    /// 新建：只拉取参考数据
    pub async fn open_create(state: ConsoleState) -> Result<Self> {
        let reference = ReferenceData::fetch(&state).await?;
        Ok(Self {
            state,
            word_id: None,
            saved_translations: Vec::new(),
            reference,
            errors: FieldErrors::default(),
            form: WordForm::default(),
        })
    }

    /// 编辑：并发拉取参考数据与单词详情
    pub async fn open_edit(state: ConsoleState, word_id: i64) -> Result<Self> {
        let words = state.words_api();
        let language = state.settings.language_code.clone();
        let (reference, detail) = tokio::try_join!(
            ReferenceData::fetch(&state),
            words.get(word_id, Some(&language)),
        )?;
        Ok(Self {
            state,
            word_id: Some(word_id),
            form: WordForm::from_detail(&detail),
            saved_translations: detail.translations,
            reference,
            errors: FieldErrors::default(),
        })
    }

    /// 追加一行译文（语言按代码查找）
    pub fn add_translation(&mut self, language_code: &str, text: &str) -> Result<()> {
        let language = self
            .reference
            .language_by_code(language_code)
            .ok_or_else(|| AdminError::InvalidState(format!("unknown language: {language_code}")))?;
        self.form.translations.push(TranslationRow::new(language, text));
        Ok(())
    }

    /// 按语言代码移除译文行
    pub fn remove_translation(&mut self, language_code: &str) {
        self.form
            .translations
            .retain(|row| row.language_code != language_code);
    }

    /// 提交：校验后按组合保存执行
    pub async fn submit(&mut self) -> Result<SaveReport> {
        let form = self.form.normalized();
        self.errors = form.check();
        if !self.errors.is_empty() {
            debug!(errors = %self.errors, "单词表单校验失败");
            return Err(AdminError::Validation(self.errors.clone()));
        }

        let payload = form.payload()?;
        let changes = TranslationChangeSet::diff(&self.saved_translations, &form.translations);
        let report = UnitOfWork::new(&self.state)
            .save_word(self.word_id, &payload, &self.saved_translations, changes)
            .await?;

        let key = if self.word_id.is_some() {
            "admin:words.updated"
        } else {
            "admin:words.created"
        };
        let mut message = self
            .state
            .t_with(key, &Params::new().with("word", &report.word.kazakh_word));
        let applied = report.applied_translations();
        if applied > 0 {
            let badge = self.state.t_with(
                "admin:words.translation_badge",
                &Params::new().count(applied as u64),
            );
            message = format!("{message} ({badge})");
        }
        self.state.toaster.push(ToastLevel::Success, message);

        // 之后的再次提交以服务端结果为基准
        self.word_id = Some(report.word.id);
        self.saved_translations = report.translations.clone();
        self.form = WordForm {
            translations: self
                .saved_translations
                .iter()
                .map(TranslationRow::from_translation)
                .collect(),
            ..form
        };
        Ok(report)
    }

    pub fn word_id(&self) -> Option<i64> {
        self.word_id
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiReply, ApiRequest, MockGateway};
    use crate::state::test_support::state_with;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn valid_form(word: &str) -> WordForm {
        WordForm::new(word).category(1).word_type(2).difficulty(1)
    }

    fn is_reference(req: &ApiRequest) -> bool {
        ["/categories", "/word-types", "/difficulty-levels"].contains(&req.path.as_str())
    }

    fn languages_reply() -> ApiReply {
        ApiReply::json(&json!([
            {"id": 1, "language_code": "en", "language_name": "English"},
            {"id": 2, "language_code": "kk", "language_name": "Қазақша"},
            {"id": 3, "language_code": "ru", "language_name": "Русский"}
        ]))
    }

    #[test]
    fn test_word_length_bounds() {
        let too_long = "ж".repeat(101);
        let longest = "ж".repeat(100);
        for bad in ["a", " a ", too_long.as_str()] {
            let errors = valid_form(bad).normalized().check();
            assert_eq!(errors.get("kazakh_word").unwrap().code, "word_length", "{bad}");
        }
        for good in ["ас", longest.as_str()] {
            assert!(valid_form(good).normalized().check().is_empty(), "{good}");
        }
    }

    #[test]
    fn test_required_ids() {
        let errors = WordForm::new("сәлем").normalized().check();
        assert!(errors.contains("category_id"));
        assert!(errors.contains("word_type_id"));
        assert!(errors.contains("difficulty_level_id"));
    }

    #[test]
    fn test_blank_cyrillic_becomes_none() {
        let form = valid_form("salem").cyrillic("   ").normalized();
        assert!(form.kazakh_cyrillic.is_none());
        let long = valid_form("salem").cyrillic(&"ә".repeat(101)).normalized();
        assert!(long.check().contains("kazakh_cyrillic"));
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_write_calls() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(is_reference)
            .returning(|_| Ok(ApiReply::json(&json!([]))));
        gateway
            .expect_send()
            .withf(|req| req.path == "/languages")
            .returning(|_| Ok(languages_reply()));

        let mut editor = WordEditor::open_create(state_with(gateway)).await.unwrap();
        editor.form = valid_form("a");
        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(ref e) if e.contains("kazakh_word")));
        assert!(editor.word_id().is_none());
    }

    #[tokio::test]
    async fn test_create_then_add_one_translation() {
        let translation_posts = Arc::new(AtomicUsize::new(0));
        let posts = translation_posts.clone();

        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(is_reference)
            .returning(|_| Ok(ApiReply::json(&json!([]))));
        gateway
            .expect_send()
            .withf(|req| req.path == "/languages")
            .returning(|_| Ok(languages_reply()));
        gateway
            .expect_send()
            .withf(|req| {
                req.is(Method::POST, "/admin/words")
                    && req.json_body()
                        == Some(&json!({
                            "kazakh_word": "сәлем",
                            "kazakh_cyrillic": null,
                            "category_id": 1,
                            "word_type_id": 2,
                            "difficulty_level_id": 1
                        }))
            })
            .times(1)
            .returning(|_| {
                Ok(ApiReply::json(&json!({
                    "id": 77, "kazakh_word": "сәлем", "category_id": 1,
                    "word_type_id": 2, "difficulty_level_id": 1
                })))
            });
        gateway
            .expect_send()
            .withf(|req| req.is(Method::PUT, "/admin/words/77"))
            .times(1)
            .returning(|_| {
                Ok(ApiReply::json(&json!({
                    "id": 77, "kazakh_word": "сәлем", "category_id": 1,
                    "word_type_id": 2, "difficulty_level_id": 1
                })))
            });
        gateway
            .expect_send()
            .withf(|req| req.is(Method::POST, "/admin/translations"))
            .times(1)
            .returning(move |req| {
                posts.fetch_add(1, Ordering::SeqCst);
                assert_eq!(req.json_body().unwrap()["word_id"], 77);
                Ok(ApiReply::json(&json!({
                    "id": 500, "word_id": 77, "language_id": 1,
                    "language_code": "en", "translation": "hello"
                })))
            });

        let state = state_with(gateway);
        let mut editor = WordEditor::open_create(state.clone()).await.unwrap();
        editor.form = valid_form("сәлем");

        let report = editor.submit().await.unwrap();
        assert!(report.is_complete());
        assert_eq!(report.applied_translations(), 0);
        assert_eq!(state.toaster.last().unwrap().message, "Word \"сәлем\" created");
        assert_eq!(editor.word_id(), Some(77));

        editor.add_translation("en", "hello").unwrap();
        let report = editor.submit().await.unwrap();
        assert_eq!(report.applied_translations(), 1);
        assert_eq!(translation_posts.load(Ordering::SeqCst), 1);
        assert_eq!(
            state.toaster.last().unwrap().message,
            "Word \"сәлем\" updated (1 translation)"
        );
        assert_eq!(editor.form.translations[0].id, Some(500));
    }

    #[tokio::test]
    async fn test_open_edit_loads_detail() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(is_reference)
            .returning(|_| Ok(ApiReply::json(&json!([]))));
        gateway
            .expect_send()
            .withf(|req| req.path == "/languages")
            .returning(|_| Ok(languages_reply()));
        gateway
            .expect_send()
            .withf(|req| req.is(Method::GET, "/admin/words/5"))
            .times(1)
            .returning(|_| {
                Ok(ApiReply::json(&json!({
                    "id": 5, "kazakh_word": "kitap", "kazakh_cyrillic": "кітап",
                    "category_id": 3, "word_type_id": 1, "difficulty_level_id": 2,
                    "translations": [
                        {"id": 9, "word_id": 5, "language_id": 1, "language_code": "en", "translation": "book"}
                    ]
                })))
            });

        let mut editor = WordEditor::open_edit(state_with(gateway), 5).await.unwrap();
        assert_eq!(editor.form.kazakh_cyrillic.as_deref(), Some("кітап"));
        assert_eq!(editor.form.translations.len(), 1);

        editor.add_translation("en", "volume").unwrap();
        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(ref e) if e.contains("translations")));
        assert!(editor.add_translation("de", "Buch").is_err());
    }
}
