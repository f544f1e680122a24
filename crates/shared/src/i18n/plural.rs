//! 复数形式规则
//!
//! 仅覆盖控制台支持的语言：en、kk 为 one/other，ru 为 one/few/many/other。

/// CLDR 复数类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// 资源键后缀，如 `items_one`
    pub fn suffix(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

/// 根据语言和数量选择复数类别
pub fn category(locale: &str, count: u64) -> PluralCategory {
    match language_of(locale) {
        "ru" => {
            let (m10, m100) = (count % 10, count % 100);
            if m10 == 1 && m100 != 11 {
                PluralCategory::One
            } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
                PluralCategory::Few
            } else {
                PluralCategory::Many
            }
        }
        // en、kk 以及未知语言
        _ => {
            if count == 1 {
                PluralCategory::One
            } else {
                PluralCategory::Other
            }
        }
    }
}

/// 取语言部分：`kk-KZ` -> `kk`
pub fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_and_kazakh() {
        assert_eq!(category("en", 1), PluralCategory::One);
        assert_eq!(category("en", 0), PluralCategory::Other);
        assert_eq!(category("kk", 5), PluralCategory::Other);
        assert_eq!(category("kk-KZ", 1), PluralCategory::One);
    }

    #[test]
    fn test_russian_forms() {
        let cases = [
            (1, PluralCategory::One),
            (21, PluralCategory::One),
            (2, PluralCategory::Few),
            (24, PluralCategory::Few),
            (5, PluralCategory::Many),
            (11, PluralCategory::Many),
            (12, PluralCategory::Many),
            (111, PluralCategory::Many),
            (0, PluralCategory::Many),
        ];
        for (count, expected) in cases {
            assert_eq!(category("ru", count), expected, "count={count}");
        }
    }
}
