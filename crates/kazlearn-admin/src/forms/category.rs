//! 分类编辑弹窗
//!
//! 分类与各语言译名在一次请求中提交，嵌套写入由后端负责。

use kazlearn_shared::dto::CategoryPayload;
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::{Category, CategoryTranslation, Language};
use tracing::debug;
use validator::Validate;

use super::validation::FieldErrors;
use crate::api::AdminApi;
use crate::error::{AdminError, Result};
use crate::state::ConsoleState;

/// 分类译名行
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CategoryTranslationRow {
    pub language_code: String,
    #[validate(length(max = 100, code = "category_name_length", message = "translated name is too long"))]
    pub translated_name: String,
    #[validate(length(max = 500, code = "description_length", message = "translated description is too long"))]
    pub translated_description: Option<String>,
}

impl CategoryTranslationRow {
    pub fn new(language_code: &str, translated_name: &str) -> Self {
        Self {
            language_code: language_code.to_string(),
            translated_name: translated_name.to_string(),
            translated_description: None,
        }
    }

    fn normalized(&self) -> Self {
        Self {
            language_code: self.language_code.clone(),
            translated_name: self.translated_name.trim().to_string(),
            translated_description: trimmed(self.translated_description.as_deref()),
        }
    }
}

/// 分类表单
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 2, max = 100, code = "category_name_length", message = "name must be 2-100 characters"))]
    pub category_name: String,
    #[validate(length(max = 500, code = "description_length", message = "description is too long"))]
    pub description: Option<String>,
    pub is_active: bool,
    pub translations: Vec<CategoryTranslationRow>,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            category_name: String::new(),
            description: None,
            is_active: true,
            translations: Vec::new(),
        }
    }
}

impl CategoryForm {
    pub fn new(category_name: &str) -> Self {
        Self {
            category_name: category_name.to_string(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn translation(mut self, row: CategoryTranslationRow) -> Self {
        self.translations.push(row);
        self
    }

    pub fn from_category(category: &Category) -> Self {
        Self {
            category_name: category.category_name.clone(),
            description: category.description.clone(),
            is_active: category.is_active,
            translations: category
                .translations
                .iter()
                .map(|t| CategoryTranslationRow {
                    language_code: t.language_code.clone(),
                    translated_name: t.translated_name.clone(),
                    translated_description: t.translated_description.clone(),
                })
                .collect(),
        }
    }

    pub fn normalized(&self) -> Self {
        Self {
            category_name: self.category_name.trim().to_string(),
            description: trimmed(self.description.as_deref()),
            is_active: self.is_active,
            translations: self
                .translations
                .iter()
                .map(CategoryTranslationRow::normalized)
                .collect(),
        }
    }

    /// 校验（调用方先 normalized）：至少一行译名非空
    pub fn check(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };
        for (index, row) in self.translations.iter().enumerate() {
            if let Err(e) = row.validate() {
                errors.merge_prefixed(&format!("translations.{index}"), FieldErrors::from(e));
            }
        }
        if !self
            .translations
            .iter()
            .any(|row| !row.translated_name.is_empty())
        {
            errors.insert("translations", "translations_required");
        }
        errors
    }

    /// 请求体，空译名行不提交
    pub fn payload(&self) -> CategoryPayload {
        CategoryPayload {
            category_name: self.category_name.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
            translations: self
                .translations
                .iter()
                .filter(|row| !row.translated_name.is_empty())
                .map(|row| CategoryTranslation {
                    language_code: row.language_code.clone(),
                    translated_name: row.translated_name.clone(),
                    translated_description: row.translated_description.clone(),
                })
                .collect(),
        }
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 分类编辑弹窗
pub struct CategoryEditor {
    state: ConsoleState,
    api: AdminApi,
    category_id: Option<i64>,
    languages: Vec<Language>,
    errors: FieldErrors,
    pub form: CategoryForm,
}

impl CategoryEditor {
    pub async fn open_create(state: ConsoleState) -> Result<Self> {
        let languages = state.public_api().languages().await?;
        Ok(Self {
            api: state.admin_api(),
            state,
            category_id: None,
            languages,
            errors: FieldErrors::default(),
            form: CategoryForm::default(),
        })
    }

    /// 编辑：并发拉取语言列表与分类详情
    pub async fn open_edit(state: ConsoleState, category_id: i64) -> Result<Self> {
        let public = state.public_api();
        let api = state.admin_api();
        let (languages, category) = tokio::try_join!(public.languages(), api.category(category_id))?;
        Ok(Self {
            api,
            state,
            category_id: Some(category_id),
            languages,
            errors: FieldErrors::default(),
            form: CategoryForm::from_category(&category),
        })
    }

    /// 设置某语言的译名，已有行则覆盖
    pub fn set_translation(&mut self, language_code: &str, name: &str) -> Result<()> {
        if !self.languages.iter().any(|l| l.language_code == language_code) {
            return Err(AdminError::InvalidState(format!(
                "unknown language: {language_code}"
            )));
        }
        match self
            .form
            .translations
            .iter_mut()
            .find(|row| row.language_code == language_code)
        {
            Some(row) => row.translated_name = name.to_string(),
            None => self
                .form
                .translations
                .push(CategoryTranslationRow::new(language_code, name)),
        }
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<Category> {
        let form = self.form.normalized();
        self.errors = form.check();
        if !self.errors.is_empty() {
            debug!(errors = %self.errors, "分类表单校验失败");
            return Err(AdminError::Validation(self.errors.clone()));
        }

        let payload = form.payload();
        let result = match self.category_id {
            Some(id) => self.api.update_category(id, &payload).await,
            None => self.api.create_category(&payload).await,
        };
        match result {
            Ok(category) => {
                let key = if self.category_id.is_some() {
                    "admin:categories.updated"
                } else {
                    "admin:categories.created"
                };
                self.state
                    .toaster
                    .success(key, &Params::new().with("name", &category.category_name));
                self.category_id = Some(category.id);
                self.form = CategoryForm::from_category(&category);
                Ok(category)
            }
            Err(e) => {
                self.state.toaster.error_from(&e);
                Err(e)
            }
        }
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiReply, MockGateway};
    use crate::state::test_support::state_with;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_requires_one_named_translation() {
        let form = CategoryForm::new("Animals")
            .translation(CategoryTranslationRow::new("kk", "   "))
            .normalized();
        let errors = form.check();
        assert_eq!(
            errors.get("translations").unwrap().code,
            "translations_required"
        );

        let ok = CategoryForm::new("Animals")
            .translation(CategoryTranslationRow::new("kk", "Жануарлар"))
            .normalized();
        assert!(ok.check().is_empty());
    }

    #[test]
    fn test_length_rules() {
        let form = CategoryForm::new("A")
            .description(&"x".repeat(501))
            .translation(CategoryTranslationRow::new("ru", &"ж".repeat(101)))
            .normalized();
        let errors = form.check();
        assert_eq!(errors.get("category_name").unwrap().code, "category_name_length");
        assert_eq!(errors.get("description").unwrap().code, "description_length");
        assert!(errors.contains("translations.0.translated_name"));
    }

    #[test]
    fn test_payload_drops_blank_rows() {
        let form = CategoryForm::new("Food")
            .translation(CategoryTranslationRow::new("kk", "Тамақ"))
            .translation(CategoryTranslationRow::new("ru", ""))
            .normalized();
        let payload = form.payload();
        assert_eq!(payload.translations.len(), 1);
        assert_eq!(payload.translations[0].language_code, "kk");
        assert!(payload.is_active);
    }

    #[tokio::test]
    async fn test_missing_translation_blocks_submit() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.path == "/languages")
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!([]))));

        let mut editor = CategoryEditor::open_create(state_with(gateway)).await.unwrap();
        editor.form = CategoryForm::new("Colours");
        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(ref e) if e.contains("translations")));
    }

    #[tokio::test]
    async fn test_create_sends_nested_translations_once() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.path == "/languages")
            .returning(|_| {
                Ok(ApiReply::json(&json!([
                    {"id": 2, "language_code": "kk", "language_name": "Қазақша"}
                ])))
            });
        gateway
            .expect_send()
            .withf(|req| {
                req.is(Method::POST, "/admin/categories")
                    && req.json_body().unwrap()["translations"][0]["translated_name"] == "Түстер"
            })
            .times(1)
            .returning(|_| {
                Ok(ApiReply::json(&json!({
                    "id": 12, "category_name": "Colours", "is_active": true,
                    "translations": [{"language_code": "kk", "translated_name": "Түстер"}]
                })))
            });

        let state = state_with(gateway);
        let mut editor = CategoryEditor::open_create(state.clone()).await.unwrap();
        editor.form = CategoryForm::new("Colours");
        editor.set_translation("kk", "Түстер").unwrap();
        assert!(editor.set_translation("de", "Farben").is_err());

        let category = editor.submit().await.unwrap();
        assert_eq!(category.id, 12);
        assert_eq!(editor.category_id(), Some(12));
        assert_eq!(
            state.toaster.last().unwrap().message,
            "Category \"Colours\" created"
        );
    }
}
