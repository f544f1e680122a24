//! 分类实体定义

use serde::{Deserialize, Serialize};

/// 单词分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub category_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub word_count: i64,
    #[serde(default)]
    pub translations: Vec<CategoryTranslation>,
}

/// 分类的多语言名称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTranslation {
    pub language_code: String,
    pub translated_name: String,
    #[serde(default)]
    pub translated_description: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Category {
    /// 取指定语言的显示名称，没有对应译名时回退到原始名称
    pub fn display_name(&self, language_code: &str) -> &str {
        self.translations
            .iter()
            .find(|t| t.language_code == language_code && !t.translated_name.trim().is_empty())
            .map(|t| t.translated_name.as_str())
            .unwrap_or(&self.category_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        Category {
            id: 1,
            category_name: "animals".to_string(),
            description: None,
            is_active: true,
            word_count: 0,
            translations: vec![
                CategoryTranslation {
                    language_code: "kk".to_string(),
                    translated_name: "Жануарлар".to_string(),
                    translated_description: None,
                },
                CategoryTranslation {
                    language_code: "ru".to_string(),
                    translated_name: "  ".to_string(),
                    translated_description: None,
                },
            ],
        }
    }

    #[test]
    fn test_display_name_uses_translation() {
        assert_eq!(category().display_name("kk"), "Жануарлар");
    }

    #[test]
    fn test_display_name_falls_back_on_blank_or_missing() {
        assert_eq!(category().display_name("ru"), "animals");
        assert_eq!(category().display_name("en"), "animals");
    }

    #[test]
    fn test_is_active_defaults_to_true() {
        let c: Category =
            serde_json::from_str(r#"{"id": 2, "category_name": "food"}"#).unwrap();
        assert!(c.is_active);
        assert!(c.translations.is_empty());
    }
}
