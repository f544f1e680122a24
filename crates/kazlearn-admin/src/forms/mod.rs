//! 编辑弹窗
//!
//! 每个弹窗打开时独立拉取参考数据（不与列表页共享缓存），提交前用 `validator`
//! 规则同步校验，失败时填充字段错误表并阻止提交。

pub mod category;
pub mod guide;
pub mod translation;
pub mod unit_of_work;
pub mod validation;
pub mod word;

pub use category::{CategoryEditor, CategoryForm, CategoryTranslationRow};
pub use guide::GuideMappingForm;
pub use translation::{TranslationEditor, TranslationRow};
pub use unit_of_work::{SaveReport, SaveStep, StepResult, TranslationChangeSet, UnitOfWork};
pub use validation::{FieldError, FieldErrors};
pub use word::{WordEditor, WordForm};

use kazlearn_shared::dto::PublicCategoryParams;
use kazlearn_shared::models::{Category, DifficultyLevel, Language, WordType};

use crate::error::Result;
use crate::state::ConsoleState;

/// 弹窗与过滤器使用的参考数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub categories: Vec<Category>,
    pub word_types: Vec<WordType>,
    pub difficulty_levels: Vec<DifficultyLevel>,
    pub languages: Vec<Language>,
}

impl ReferenceData {
    /// 并发拉取四类参考数据
    pub async fn fetch(state: &ConsoleState) -> Result<Self> {
        let api = state.public_api();
        let category_params = PublicCategoryParams {
            language_code: Some(state.settings.language_code.clone()),
            active_only: None,
        };
        let (categories, word_types, difficulty_levels, languages) = tokio::try_join!(
            api.categories(&category_params),
            api.word_types(),
            api.difficulty_levels(),
            api.languages(),
        )?;
        Ok(Self {
            categories,
            word_types,
            difficulty_levels,
            languages,
        })
    }

    pub fn language(&self, id: i64) -> Option<&Language> {
        self.languages.iter().find(|l| l.id == id)
    }

    pub fn language_by_code(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.language_code == code)
    }
}
