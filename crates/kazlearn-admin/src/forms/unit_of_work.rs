//! 单词 + 译文的组合保存
//!
//! 保存顺序：先创建/更新单词，再把译文行与已保存译文比较，分为新增、修改、删除三组，
//! 逐个请求、顺序执行。单词步骤失败则不再继续；译文步骤失败时发出错误提示并继续，
//! 已生效的修改保留，不做补偿。结果以 [`SaveReport`] 逐步列出。

use std::collections::HashSet;

use kazlearn_shared::dto::WordPayload;
use kazlearn_shared::i18n::Params;
use kazlearn_shared::models::{Translation, Word};
use tracing::{info, warn};

use super::translation::TranslationRow;
use crate::api::{AdminApi, AdminWordsApi};
use crate::error::Result;
use crate::notify::Toaster;
use crate::state::ConsoleState;

/// 译文变更集
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationChangeSet {
    pub created: Vec<TranslationRow>,
    pub updated: Vec<TranslationRow>,
    pub deleted: Vec<Translation>,
}

impl TranslationChangeSet {
    /// 比较已保存译文与表单行
    ///
    /// 没有 id（或 id 不在已保存列表中）的行为新增；内容变化的行为修改；
    /// 表单中不再出现的已保存译文为删除
    pub fn diff(original: &[Translation], rows: &[TranslationRow]) -> Self {
        let mut changes = Self::default();
        let mut kept = HashSet::new();

        for row in rows {
            match row
                .id
                .and_then(|id| original.iter().find(|t| t.id == id))
            {
                Some(saved) => {
                    kept.insert(saved.id);
                    if !row.same_content(saved) {
                        changes.updated.push(row.clone());
                    }
                }
                None => changes.created.push(TranslationRow {
                    id: None,
                    ..row.clone()
                }),
            }
        }

        changes.deleted = original
            .iter()
            .filter(|t| !kept.contains(&t.id))
            .cloned()
            .collect();
        changes
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }
}

/// 保存步骤
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStep {
    CreateWord,
    UpdateWord { word_id: i64 },
    CreateTranslation { language_code: String },
    UpdateTranslation { translation_id: i64, language_code: String },
    DeleteTranslation { translation_id: i64, language_code: String },
}

/// 单步结果，失败时附带后端 detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub step: SaveStep,
    pub error: Option<String>,
}

impl StepResult {
    fn ok(step: SaveStep) -> Self {
        Self { step, error: None }
    }

    fn failed(step: SaveStep, detail: String) -> Self {
        Self {
            step,
            error: Some(detail),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// 组合保存报告
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    /// 保存后的单词
    pub word: Word,
    pub steps: Vec<StepResult>,
    /// 按已生效步骤推算的当前译文
    pub translations: Vec<Translation>,
    applied: usize,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(StepResult::is_ok)
    }

    pub fn failures(&self) -> Vec<&StepResult> {
        self.steps.iter().filter(|s| !s.is_ok()).collect()
    }

    /// 成功新增或修改的译文数
    pub fn applied_translations(&self) -> usize {
        self.applied
    }
}

/// 组合保存执行器
pub struct UnitOfWork {
    toaster: Toaster,
    words: AdminWordsApi,
    admin: AdminApi,
}

impl UnitOfWork {
    pub fn new(state: &ConsoleState) -> Self {
        Self {
            toaster: state.toaster.clone(),
            words: state.words_api(),
            admin: state.admin_api(),
        }
    }

    /// 顺序执行单词保存与译文变更
    pub async fn save_word(
        &self,
        word_id: Option<i64>,
        payload: &WordPayload,
        original: &[Translation],
        changes: TranslationChangeSet,
    ) -> Result<SaveReport> {
        let (step, result) = match word_id {
            Some(id) => (
                SaveStep::UpdateWord { word_id: id },
                self.words.update(id, payload).await,
            ),
            None => (SaveStep::CreateWord, self.words.create(payload).await),
        };
        let word = match result {
            Ok(word) => word,
            Err(e) => {
                warn!(error = %e, word = %payload.kazakh_word, "保存单词失败");
                self.toaster
                    .error("admin:words.save_failed", &Params::new().with("detail", e.detail()));
                return Err(e);
            }
        };

        let mut report = SaveReport {
            steps: vec![StepResult::ok(step)],
            translations: original.to_vec(),
            applied: 0,
            word,
        };
        let word_id = report.word.id;

        for row in changes.created {
            let step = SaveStep::CreateTranslation {
                language_code: row.language_code.clone(),
            };
            let result = match row.create_request(word_id) {
                Ok(req) => self.admin.create_translation(&req).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(saved) => {
                    report.translations.push(saved);
                    report.applied += 1;
                    report.steps.push(StepResult::ok(step));
                }
                Err(e) => {
                    self.save_failed(&row.language_code, &e.detail());
                    report.steps.push(StepResult::failed(step, e.detail()));
                }
            }
        }

        for row in changes.updated {
            let Some(translation_id) = row.id else {
                continue;
            };
            let step = SaveStep::UpdateTranslation {
                translation_id,
                language_code: row.language_code.clone(),
            };
            match self
                .admin
                .update_translation(translation_id, &row.update_request())
                .await
            {
                Ok(saved) => {
                    if let Some(slot) = report.translations.iter_mut().find(|t| t.id == saved.id) {
                        *slot = saved;
                    }
                    report.applied += 1;
                    report.steps.push(StepResult::ok(step));
                }
                Err(e) => {
                    self.save_failed(&row.language_code, &e.detail());
                    report.steps.push(StepResult::failed(step, e.detail()));
                }
            }
        }

        for translation in changes.deleted {
            let step = SaveStep::DeleteTranslation {
                translation_id: translation.id,
                language_code: translation.language_code.clone(),
            };
            match self.admin.delete_translation(translation.id).await {
                Ok(()) => {
                    report.translations.retain(|t| t.id != translation.id);
                    report.steps.push(StepResult::ok(step));
                }
                Err(e) => {
                    self.toaster.error(
                        "admin:translations.delete_failed",
                        &Params::new()
                            .with("id", translation.id)
                            .with("detail", e.detail()),
                    );
                    report.steps.push(StepResult::failed(step, e.detail()));
                }
            }
        }

        info!(
            word_id,
            steps = report.steps.len(),
            failures = report.failures().len(),
            applied = report.applied,
            "单词保存完成"
        );
        Ok(report)
    }

    fn save_failed(&self, language_code: &str, detail: &str) {
        self.toaster.error(
            "admin:translations.save_failed",
            &Params::new()
                .with("language", language_code)
                .with("detail", detail),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiReply, MockGateway};
    use crate::error::AdminError;
    use crate::notify::ToastLevel;
    use crate::state::test_support::state_with;
    use reqwest::Method;
    use serde_json::json;

    fn saved(id: i64, code: &str, text: &str) -> Translation {
        Translation {
            id,
            word_id: 7,
            language_id: id,
            language_code: code.to_string(),
            translation: text.to_string(),
            alternative_translations: Vec::new(),
        }
    }

    fn payload() -> WordPayload {
        WordPayload {
            kazakh_word: "alma".into(),
            kazakh_cyrillic: Some("алма".into()),
            category_id: 1,
            word_type_id: 2,
            difficulty_level_id: 1,
        }
    }

    fn word_json(id: i64) -> serde_json::Value {
        json!({
            "id": id, "kazakh_word": "alma", "kazakh_cyrillic": "алма",
            "category_id": 1, "word_type_id": 2, "difficulty_level_id": 1
        })
    }

    #[test]
    fn test_diff_buckets() {
        let original = vec![saved(1, "en", "apple"), saved(2, "ru", "яблоко"), saved(3, "kk", "алма")];
        let mut changed = TranslationRow::from_translation(&original[1]);
        changed.translation = "яблочко".into();
        let rows = vec![
            TranslationRow::from_translation(&original[0]),
            changed,
            TranslationRow {
                id: None,
                language_id: Some(9),
                language_code: "de".into(),
                translation: "Apfel".into(),
                alternative_translations: Vec::new(),
            },
        ];

        let changes = TranslationChangeSet::diff(&original, &rows);
        assert_eq!(changes.created.len(), 1);
        assert_eq!(changes.updated.len(), 1);
        assert_eq!(changes.updated[0].id, Some(2));
        assert_eq!(changes.deleted.len(), 1);
        assert_eq!(changes.deleted[0].id, 3);
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_diff_unknown_id_becomes_create() {
        let rows = vec![TranslationRow::from_translation(&saved(42, "en", "x"))];
        let changes = TranslationChangeSet::diff(&[], &rows);
        assert_eq!(changes.created.len(), 1);
        assert!(changes.created[0].id.is_none());
    }

    #[test]
    fn test_diff_unchanged_is_empty() {
        let original = vec![saved(1, "en", "apple")];
        let rows = vec![TranslationRow::from_translation(&original[0])];
        assert!(TranslationChangeSet::diff(&original, &rows).is_empty());
    }

    #[test]
    fn test_diff_removed_rows_compare_by_value() {
        let original = vec![saved(1, "en", "apple"), saved(2, "ru", "яблоко")];
        let rows = vec![TranslationRow::from_translation(&original[0])];

        let changes = TranslationChangeSet::diff(&original, &rows);
        assert_eq!(
            changes,
            TranslationChangeSet {
                created: Vec::new(),
                updated: Vec::new(),
                deleted: vec![original[1].clone()],
            }
        );
        assert_ne!(changes, TranslationChangeSet::default());
    }

    #[tokio::test]
    async fn test_word_failure_stops_everything() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.is(Method::POST, "/admin/words"))
            .times(1)
            .returning(|_| {
                Err(AdminError::Api {
                    status: 400,
                    detail: "Word already exists".into(),
                })
            });

        let state = state_with(gateway);
        let changes = TranslationChangeSet {
            created: vec![TranslationRow::from_translation(&saved(1, "en", "apple"))],
            ..Default::default()
        };
        let err = UnitOfWork::new(&state)
            .save_word(None, &payload(), &[], changes)
            .await
            .unwrap_err();

        assert_eq!(err.detail(), "Word already exists");
        assert_eq!(
            state.toaster.last().unwrap().message,
            "Could not save word: Word already exists"
        );
    }

    #[tokio::test]
    async fn test_translation_failure_continues() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send()
            .withf(|req| req.is(Method::PUT, "/admin/words/7"))
            .times(1)
            .returning(|_| Ok(ApiReply::json(&word_json(7))));
        gateway
            .expect_send()
            .withf(|req| req.is(Method::POST, "/admin/translations"))
            .times(1)
            .returning(|_| {
                Err(AdminError::Api {
                    status: 400,
                    detail: "Translation already exists".into(),
                })
            });
        gateway
            .expect_send()
            .withf(|req| req.is(Method::DELETE, "/admin/translations/2"))
            .times(1)
            .returning(|_| Ok(ApiReply::json(&json!({"message": "deleted"}))));

        let state = state_with(gateway);
        let original = vec![saved(2, "ru", "яблоко")];
        let changes = TranslationChangeSet {
            created: vec![TranslationRow {
                id: None,
                language_id: Some(1),
                language_code: "en".into(),
                translation: "apple".into(),
                alternative_translations: Vec::new(),
            }],
            updated: Vec::new(),
            deleted: original.clone(),
        };

        let report = UnitOfWork::new(&state)
            .save_word(Some(7), &payload(), &original, changes)
            .await
            .unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.failures().len(), 1);
        assert_eq!(
            report.failures()[0].step,
            SaveStep::CreateTranslation {
                language_code: "en".into()
            }
        );
        assert_eq!(report.applied_translations(), 0);
        assert!(report.translations.is_empty());

        let toasts = state.toaster.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(
            toasts[0].message,
            "Could not save the en translation: Translation already exists"
        );
    }
}
