//! 演示数据
//!
//! 参考数据（语言、词性、难度）总是写入；词汇、分类与指南按需写入。

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;

use kazlearn_shared::models::{
    Category, CategoryTranslation, DifficultyLevel, ExampleSentence, Guide, GuideWordMapping,
    Language, Translation, Word, WordType,
};
use kazlearn_shared::test_utils::KAZAKH_WORDS;

use crate::store::BackendStore;

/// 预填充选项
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// 是否写入分类、单词与指南
    pub vocabulary: bool,
    /// 前 N 个单词带学习进度（删除时需要强制）
    pub progress_words: usize,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            vocabulary: true,
            progress_words: 1,
        }
    }
}

impl SeedOptions {
    /// 只有参考数据
    pub fn reference_only() -> Self {
        Self {
            vocabulary: false,
            progress_words: 0,
        }
    }
}

const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("kk", "Қазақша"), ("ru", "Русский")];

const WORD_TYPES: &[&str] = &["noun", "verb", "adjective", "phrase"];

const LEVELS: &[&str] = &["Beginner", "Elementary", "Intermediate", "Upper", "Advanced"];

/// (名称, 哈萨克语, 俄语, 是否启用)
const CATEGORIES: &[(&str, &str, &str, bool)] = &[
    ("Greetings", "Сәлемдесу", "Приветствия", true),
    ("Food", "Тағам", "Еда", true),
    ("Family", "Отбасы", "Семья", true),
    ("Nature", "Табиғат", "Природа", true),
    ("Places", "Орындар", "Места", true),
    ("Everyday", "Күнделікті", "Повседневное", true),
    ("Archive", "Мұрағат", "Архив", false),
];

/// 与 [`KAZAKH_WORDS`] 同序：(英语, 俄语, 分类序号, 词性序号)
const MEANINGS: &[(&str, &str, usize, usize)] = &[
    ("hello", "привет", 0, 3),
    ("thank you", "спасибо", 0, 3),
    ("book", "книга", 5, 0),
    ("water", "вода", 1, 0),
    ("bread", "хлеб", 1, 0),
    ("house", "дом", 4, 0),
    ("school", "школа", 4, 0),
    ("friend", "друг", 2, 0),
    ("mother", "мать", 2, 0),
    ("father", "отец", 2, 0),
    ("day", "день", 3, 0),
    ("night", "ночь", 3, 0),
    ("road", "дорога", 4, 0),
    ("city", "город", 4, 0),
    ("mountain", "гора", 3, 0),
];

/// 写入演示数据，返回写入的单词数
pub fn seed(store: &BackendStore, options: &SeedOptions) -> usize {
    let languages: Vec<Language> = LANGUAGES
        .iter()
        .map(|(code, name)| {
            store.languages.create(|id| Language {
                id,
                language_code: code.to_string(),
                language_name: name.to_string(),
                is_active: true,
            })
        })
        .collect();

    let word_types: Vec<WordType> = WORD_TYPES
        .iter()
        .map(|name| {
            store.word_types.create(|id| WordType {
                id,
                type_name: name.to_string(),
                description: None,
            })
        })
        .collect();

    let levels: Vec<DifficultyLevel> = LEVELS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            store.difficulty_levels.create(|id| DifficultyLevel {
                id,
                level_number: i as i32 + 1,
                level_name: name.to_string(),
            })
        })
        .collect();

    if !options.vocabulary {
        info!(languages = languages.len(), "参考数据已写入");
        return 0;
    }

    let categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|(name, kk, ru, active)| {
            store.categories.create(|id| Category {
                id,
                category_name: name.to_string(),
                description: None,
                is_active: *active,
                word_count: 0,
                translations: vec![
                    category_translation("kk", kk),
                    category_translation("ru", ru),
                ],
            })
        })
        .collect();

    let language_id = |code: &str| {
        languages
            .iter()
            .find(|l| l.language_code == code)
            .map(|l| l.id)
            .unwrap_or_default()
    };

    let mut words = Vec::with_capacity(KAZAKH_WORDS.len());
    for (i, ((latin, cyrillic), (en, ru, category, word_type))) in
        KAZAKH_WORDS.iter().zip(MEANINGS).enumerate()
    {
        let word = store.words.create(|id| Word {
            id,
            kazakh_word: latin.to_string(),
            kazakh_cyrillic: Some(cyrillic.to_string()),
            category_id: categories[*category].id,
            word_type_id: word_types[*word_type].id,
            difficulty_level_id: levels[i % 3].id,
            created_at: Some(Utc::now()),
        });
        for (code, text) in [("en", en), ("ru", ru)] {
            store.translations.create(|id| Translation {
                id,
                word_id: word.id,
                language_id: language_id(code),
                language_code: code.to_string(),
                translation: text.to_string(),
                alternative_translations: Vec::new(),
            });
        }
        words.push(word);
    }

    if let Some(first) = words.first() {
        store.examples.create(|id| ExampleSentence {
            id,
            word_id: first.id,
            kazakh_sentence: "Сәлем, досым!".to_string(),
            difficulty_level: Some(1),
            usage_context: Some("informal".to_string()),
            translations: BTreeMap::from([
                ("en".to_string(), "Hello, my friend!".to_string()),
                ("ru".to_string(), "Привет, друг!".to_string()),
            ]),
        });
    }

    let basics = store.guides.create(|id| Guide {
        id,
        guide_key: "basics".to_string(),
        title: "First words".to_string(),
        description: Some("Greetings and everyday nouns".to_string()),
        is_active: true,
        word_count: 0,
    });
    store.guides.create(|id| Guide {
        id,
        guide_key: "family".to_string(),
        title: "Family".to_string(),
        description: None,
        is_active: true,
        word_count: 0,
    });
    for (order, word) in words.iter().take(5).enumerate() {
        store.guide_words.create(|id| GuideWordMapping {
            id,
            guide_id: basics.id,
            word_id: word.id,
            kazakh_word: None,
            order_in_guide: order as i32 + 1,
            importance_score: 5,
        });
    }

    for word in words.iter().take(options.progress_words) {
        store.set_progress(word.id, 4);
    }

    info!(
        categories = categories.len(),
        words = words.len(),
        progress_words = options.progress_words,
        "演示数据已写入"
    );
    words.len()
}

fn category_translation(language_code: &str, name: &str) -> CategoryTranslation {
    CategoryTranslation {
        language_code: language_code.to_string(),
        translated_name: name.to_string(),
        translated_description: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_only() {
        let store = BackendStore::new();
        assert_eq!(seed(&store, &SeedOptions::reference_only()), 0);
        assert_eq!(store.languages.count(), 3);
        assert_eq!(store.difficulty_levels.count(), 5);
        assert_eq!(store.words.count(), 0);
    }

    #[test]
    fn test_full_seed() {
        let store = BackendStore::new();
        let words = seed(&store, &SeedOptions::default());

        assert_eq!(words, KAZAKH_WORDS.len());
        assert_eq!(store.translations.count(), words * 2);
        assert_eq!(store.progress_count(1), 4);
        assert_eq!(store.progress_count(2), 0);
        assert_eq!(store.guide_mappings(1).len(), 5);
        assert!(store.language_by_code("kk").is_some());
    }
}
