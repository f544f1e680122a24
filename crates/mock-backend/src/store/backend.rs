//! 词汇平台的内存数据集
//!
//! 各实体一张 [`MemoryStore`] 表，外加学习进度计数（只用于删除保护）。
//! 列表行、详情等派生视图在这里拼装，路由处理器只做参数校验与响应。

use std::sync::Arc;

use dashmap::DashMap;

use kazlearn_shared::models::{
    Category, DifficultyLevel, ExampleSentence, Guide, GuideWordMapping, Language, Translation,
    Word, WordDetail, WordImage, WordSound, WordSummary, WordType,
};

use super::MemoryStore;

/// 列表与详情默认的译文语言
pub const DEFAULT_LANGUAGE: &str = "en";

/// 后端数据集
#[derive(Debug, Clone, Default)]
pub struct BackendStore {
    pub languages: MemoryStore<Language>,
    pub word_types: MemoryStore<WordType>,
    pub difficulty_levels: MemoryStore<DifficultyLevel>,
    pub categories: MemoryStore<Category>,
    pub words: MemoryStore<Word>,
    pub translations: MemoryStore<Translation>,
    pub examples: MemoryStore<ExampleSentence>,
    pub images: MemoryStore<WordImage>,
    pub sounds: MemoryStore<WordSound>,
    pub guides: MemoryStore<Guide>,
    pub guide_words: MemoryStore<GuideWordMapping>,
    /// word_id -> 学习进度记录数
    progress: Arc<DashMap<i64, u32>>,
}

impl BackendStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language_by_code(&self, code: &str) -> Option<Language> {
        self.languages
            .list_by(|l| l.language_code == code)
            .into_iter()
            .next()
    }

    // ========== 学习进度 ==========

    pub fn set_progress(&self, word_id: i64, records: u32) {
        if records == 0 {
            self.progress.remove(&word_id);
        } else {
            self.progress.insert(word_id, records);
        }
    }

    pub fn progress_count(&self, word_id: i64) -> u32 {
        self.progress.get(&word_id).map(|v| *v).unwrap_or(0)
    }

    // ========== 单词 ==========

    pub fn translations_of(&self, word_id: i64) -> Vec<Translation> {
        self.translations.list_by(|t| t.word_id == word_id)
    }

    pub fn word_count_in_category(&self, category_id: i64) -> usize {
        self.words.count_by(|w| w.category_id == category_id)
    }

    /// 列表行：展示字段按 `language_code` 取值
    pub fn word_summary(&self, word: &Word, language_code: &str) -> WordSummary {
        let translations = self.translations_of(word.id);
        let primary_translation = translations
            .iter()
            .find(|t| t.language_code == language_code)
            .or_else(|| translations.first())
            .map(|t| t.translation.clone());

        WordSummary {
            id: word.id,
            kazakh_word: word.kazakh_word.clone(),
            kazakh_cyrillic: word.kazakh_cyrillic.clone(),
            category_id: word.category_id,
            category_name: self
                .categories
                .get(word.category_id)
                .map(|c| c.display_name(language_code).to_string()),
            word_type_id: word.word_type_id,
            word_type_name: self.word_types.get(word.word_type_id).map(|t| t.type_name),
            difficulty_level_id: word.difficulty_level_id,
            difficulty_level: self
                .difficulty_levels
                .get(word.difficulty_level_id)
                .map(|d| d.level_number),
            primary_translation,
            translation_count: translations.len() as i64,
            image_count: self.images.count_by(|i| i.word_id == word.id) as i64,
            sound_count: self.sounds.count_by(|s| s.word_id == word.id) as i64,
        }
    }

    pub fn word_detail(&self, word: &Word, language_code: &str) -> WordDetail {
        WordDetail {
            word: word.clone(),
            category_name: self
                .categories
                .get(word.category_id)
                .map(|c| c.display_name(language_code).to_string()),
            word_type_name: self.word_types.get(word.word_type_id).map(|t| t.type_name),
            translations: self.translations_of(word.id),
            images: self.images.list_by(|i| i.word_id == word.id),
            sounds: self.sounds.list_by(|s| s.word_id == word.id),
            example_sentences: self.examples.list_by(|e| e.word_id == word.id),
        }
    }

    /// 删除单词及其全部从属数据
    pub fn delete_word_cascade(&self, word_id: i64) -> bool {
        if self.words.remove(word_id).is_none() {
            return false;
        }
        self.translations.remove_by(|t| t.word_id == word_id);
        self.examples.remove_by(|e| e.word_id == word_id);
        self.images.remove_by(|i| i.word_id == word_id);
        self.sounds.remove_by(|s| s.word_id == word_id);
        self.guide_words.remove_by(|m| m.word_id == word_id);
        self.progress.remove(&word_id);
        true
    }

    // ========== 分类与指南 ==========

    /// 带实时单词数的分类
    pub fn category_view(&self, mut category: Category) -> Category {
        category.word_count = self.word_count_in_category(category.id) as i64;
        category
    }

    pub fn guide_view(&self, mut guide: Guide) -> Guide {
        guide.word_count = self.guide_words.count_by(|m| m.guide_id == guide.id) as i64;
        guide
    }

    /// 指南条目，按顺序排列并附带单词拼写
    pub fn guide_mappings(&self, guide_id: i64) -> Vec<GuideWordMapping> {
        let mut rows: Vec<GuideWordMapping> = self
            .guide_words
            .list_by(|m| m.guide_id == guide_id)
            .into_iter()
            .map(|mut m| {
                m.kazakh_word = self.words.get(m.word_id).map(|w| w.kazakh_word);
                m
            })
            .collect();
        rows.sort_by_key(|m| (m.order_in_guide, m.id));
        rows
    }

    pub fn guide_mapping(&self, guide_id: i64, word_id: i64) -> Option<GuideWordMapping> {
        self.guide_mappings(guide_id)
            .into_iter()
            .find(|m| m.word_id == word_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{SeedOptions, seed};

    #[test]
    fn test_summary_prefers_requested_language() {
        let store = BackendStore::new();
        seed(&store, &SeedOptions::default());

        let word = store.words.list().into_iter().next().unwrap();
        let en = store.word_summary(&word, "en");
        let ru = store.word_summary(&word, "ru");

        assert_eq!(en.translation_count, 2);
        assert_ne!(en.primary_translation, ru.primary_translation);
        assert!(en.category_name.is_some());
    }

    #[test]
    fn test_cascade_delete_removes_children() {
        let store = BackendStore::new();
        seed(&store, &SeedOptions::default());

        let word = store.words.list().into_iter().next().unwrap();
        store.set_progress(word.id, 3);
        assert!(store.delete_word_cascade(word.id));

        assert!(store.translations_of(word.id).is_empty());
        assert_eq!(store.guide_words.count_by(|m| m.word_id == word.id), 0);
        assert_eq!(store.progress_count(word.id), 0);
        assert!(!store.delete_word_cascade(word.id));
    }
}
