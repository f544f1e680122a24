//! 测试工具模块
//!
//! 提供集成测试和模拟后端共用的测试数据生成器与断言辅助。

use std::sync::atomic::{AtomicI64, Ordering};

use fake::Fake;
use fake::faker::lorem::en::{Sentence, Word};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// 常用哈萨克语词汇（拉丁转写, 西里尔）
pub const KAZAKH_WORDS: &[(&str, &str)] = &[
    ("sälem", "сәлем"),
    ("rahmet", "рахмет"),
    ("kitap", "кітап"),
    ("su", "су"),
    ("nan", "нан"),
    ("üi", "үй"),
    ("mektep", "мектеп"),
    ("dos", "дос"),
    ("ana", "ана"),
    ("äke", "әке"),
    ("kün", "күн"),
    ("tün", "түн"),
    ("jol", "жол"),
    ("qala", "қала"),
    ("tau", "тау"),
];

/// 生成唯一的测试 ID
///
/// 使用原子计数器确保并行测试时的唯一性
pub fn test_entity_id() -> i64 {
    static COUNTER: AtomicI64 = AtomicI64::new(10_000);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ==================== 测试数据生成器 ====================

/// 单词测试数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordTestData {
    pub kazakh_word: String,
    pub kazakh_cyrillic: Option<String>,
    pub category_id: i64,
    pub word_type_id: i64,
    pub difficulty_level_id: i64,
}

/// 分类测试数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTestData {
    pub category_name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub translations: Vec<Value>,
}

/// 测试数据生成器
///
/// 提供生成测试用单词、分类、翻译和媒体文件的便捷方法
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// 生成指定拼写的单词
    pub fn word(kazakh_word: &str) -> WordTestData {
        WordTestData {
            kazakh_word: kazakh_word.to_string(),
            kazakh_cyrillic: None,
            category_id: 1,
            word_type_id: 1,
            difficulty_level_id: 1,
        }
    }

    /// 从常用词表随机挑选一个单词，分类与难度随机
    pub fn random_word() -> WordTestData {
        let (latin, cyrillic) = KAZAKH_WORDS[(0..KAZAKH_WORDS.len()).fake::<usize>()];
        WordTestData {
            kazakh_word: cyrillic.to_string(),
            kazakh_cyrillic: Some(latin.to_string()),
            category_id: (1..4).fake::<i64>(),
            word_type_id: (1..4).fake::<i64>(),
            difficulty_level_id: (1..6).fake::<i64>(),
        }
    }

    /// 生成带英文翻译的分类
    pub fn category(name: &str) -> CategoryTestData {
        CategoryTestData {
            category_name: name.to_string(),
            description: Some(Sentence(3..8).fake()),
            is_active: true,
            translations: vec![Self::category_translation("en", name)],
        }
    }

    pub fn category_translation(language_code: &str, name: &str) -> Value {
        json!({
            "language_code": language_code,
            "translated_name": name,
            "translated_description": null
        })
    }

    /// 生成翻译请求体
    pub fn translation(word_id: i64, language_id: i64, text: &str) -> Value {
        json!({
            "word_id": word_id,
            "language_id": language_id,
            "translation": text,
            "alternative_translations": []
        })
    }

    /// 随机英文单词，用作翻译文本
    pub fn english_word() -> String {
        Word().fake()
    }

    /// 指定大小的 PNG 数据（仅文件头有效）
    pub fn image_bytes(size: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; size];
        let header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let n = header.len().min(size);
        bytes[..n].copy_from_slice(&header[..n]);
        bytes
    }

    /// 指定大小的 MP3 数据（仅 ID3 头有效）
    pub fn audio_bytes(size: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; size];
        let header = *b"ID3";
        let n = header.len().min(size);
        bytes[..n].copy_from_slice(&header[..n]);
        bytes
    }
}

// ==================== 测试断言辅助 ====================

/// 测试断言辅助函数
pub struct TestAssertions;

impl TestAssertions {
    /// 断言 JSON 字段值相等
    pub fn assert_json_field_eq(actual: &Value, expected: &Value, field: &str) {
        assert_eq!(
            actual.get(field),
            expected.get(field),
            "Field '{}' mismatch",
            field
        );
    }

    /// 断言 JSON 包含指定字段
    pub fn assert_json_has_field(value: &Value, field: &str) {
        assert!(
            value.get(field).is_some(),
            "Expected field '{}' not found in {:?}",
            field,
            value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_uniqueness() {
        let a = test_entity_id();
        let b = test_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_word_uses_known_vocabulary() {
        for _ in 0..20 {
            let word = TestDataGenerator::random_word();
            assert!(KAZAKH_WORDS.iter().any(|(_, c)| *c == word.kazakh_word));
            assert!((1..6).contains(&word.difficulty_level_id));
        }
    }

    #[test]
    fn test_media_bytes_have_requested_size() {
        assert_eq!(TestDataGenerator::image_bytes(1024).len(), 1024);
        assert_eq!(&TestDataGenerator::image_bytes(16)[1..4], b"PNG");
        assert_eq!(TestDataGenerator::audio_bytes(2).len(), 2);
    }

    #[test]
    fn test_json_assertions() {
        let a = json!({"kazakh_word": "сәлем", "id": 1});
        let b = json!({"kazakh_word": "сәлем", "id": 2});
        TestAssertions::assert_json_field_eq(&a, &b, "kazakh_word");
        TestAssertions::assert_json_has_field(&a, "id");
    }
}
