//! 词汇平台领域模型
//!
//! REST 接口双方（管理控制台与模拟后端）共用的实体定义，字段与后端 JSON 一一对应。

pub mod category;
pub mod guide;
pub mod media;
pub mod reference;
pub mod word;

// 重新导出常用类型
pub use category::{Category, CategoryTranslation};
pub use guide::{Guide, GuideWordMapping};
pub use media::{WordImage, WordSound};
pub use reference::{DifficultyLevel, Language, WordType};
pub use word::{ExampleSentence, Translation, Word, WordDetail, WordSummary};
