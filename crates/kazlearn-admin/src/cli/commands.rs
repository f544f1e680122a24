//! 命令行定义

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use kazlearn_shared::dto::ExportFormat;

/// 哈萨克语词汇平台管理控制台
#[derive(Parser, Debug)]
#[command(name = "kazlearn-admin")]
#[command(version, about = "Kazakh vocabulary platform admin console")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 界面语言（en, kk, ru），覆盖配置中的 ui.locale
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// 后端地址，覆盖配置中的 api.base_url
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 保存访问令牌
    Login {
        #[arg(long)]
        token: String,
    },

    /// 清除访问令牌
    Logout,

    /// 单词管理
    #[command(subcommand)]
    Words(WordCommands),

    /// 译文管理
    #[command(subcommand)]
    Translations(TranslationCommands),

    /// 分类管理
    #[command(subcommand)]
    Categories(CategoryCommands),

    /// 单词图片
    #[command(subcommand)]
    Images(ImageCommands),

    /// 单词音频
    #[command(subcommand)]
    Sounds(SoundCommands),

    /// 学习指南
    #[command(subcommand)]
    Guides(GuideCommands),
}

/// 单词筛选条件
#[derive(Args, Debug, Clone, Default)]
pub struct WordFilterArgs {
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<i64>,

    #[arg(long)]
    pub word_type: Option<i64>,

    #[arg(long)]
    pub difficulty: Option<i64>,
}

/// 分页与排序
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// 页码，从 1 开始
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// 每页条数，默认取配置 ui.page_size
    #[arg(long)]
    pub page_size: Option<u32>,

    /// 排序列
    #[arg(long)]
    pub sort_by: Option<String>,

    /// 降序
    #[arg(long)]
    pub desc: bool,
}

#[derive(Subcommand, Debug)]
pub enum WordCommands {
    /// 分页列出单词
    List {
        #[command(flatten)]
        filters: WordFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// 按关键字搜索单词
    Search {
        query: String,
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// 查看单词详情
    Show { id: i64 },

    /// 新建单词
    Create {
        kazakh_word: String,
        #[arg(long)]
        cyrillic: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        word_type: Option<i64>,
        #[arg(long)]
        difficulty: Option<i64>,
        /// 译文，格式 `语言代码=文本`，可重复
        #[arg(short, long = "translation", value_parser = parse_translation)]
        translations: Vec<(String, String)>,
    },

    /// 修改单词
    Update {
        id: i64,
        #[arg(long)]
        word: Option<String>,
        #[arg(long)]
        cyrillic: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        word_type: Option<i64>,
        #[arg(long)]
        difficulty: Option<i64>,
        /// 新增或替换译文，格式 `语言代码=文本`
        #[arg(short, long = "translation", value_parser = parse_translation)]
        translations: Vec<(String, String)>,
        /// 删除某语言的译文
        #[arg(long = "remove-translation")]
        remove_translations: Vec<String>,
    },

    /// 删除单词
    Delete {
        id: i64,
        /// 存在学习进度等依赖记录时一并删除
        #[arg(long)]
        force: bool,
    },

    /// 批量删除单词
    BulkDelete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
        #[arg(long)]
        force: bool,
    },

    /// 导出单词
    Export {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: FormatArg,
        /// 输出文件，默认 words.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filters: WordFilterArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum TranslationCommands {
    /// 为单词添加译文
    Add {
        word_id: i64,
        language: String,
        text: String,
        #[arg(short, long = "alt")]
        alternatives: Vec<String>,
    },

    /// 修改译文
    Update {
        word_id: i64,
        translation_id: i64,
        text: String,
        #[arg(short, long = "alt")]
        alternatives: Vec<String>,
    },

    /// 删除译文
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// 分页列出分类
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        active_only: bool,
        #[command(flatten)]
        page: PageArgs,
    },

    /// 查看分类
    Show { id: i64 },

    /// 新建分类
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        inactive: bool,
        /// 分类译名，格式 `语言代码=名称`，可重复
        #[arg(short, long = "translation", value_parser = parse_translation)]
        translations: Vec<(String, String)>,
    },

    /// 修改分类
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long = "translation", value_parser = parse_translation)]
        translations: Vec<(String, String)>,
    },

    /// 启用分类
    Activate {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },

    /// 停用分类
    Deactivate {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },

    /// 删除分类
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// 列出单词图片
    List { word_id: i64 },

    /// 上传图片
    Upload {
        word_id: i64,
        file: PathBuf,
        /// MIME 类型，默认按扩展名推断
        #[arg(long)]
        mime: Option<String>,
        #[arg(long)]
        alt_text: Option<String>,
        #[arg(long)]
        primary: bool,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        license: Option<String>,
    },

    /// 删除图片
    Delete { word_id: i64, image_id: i64 },

    /// 设为主图
    Primary { word_id: i64, image_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum SoundCommands {
    /// 列出单词音频
    List { word_id: i64 },

    /// 上传音频
    Upload {
        word_id: i64,
        file: PathBuf,
        #[arg(long)]
        mime: Option<String>,
        #[arg(long)]
        sound_type: Option<String>,
        #[arg(long)]
        alt_text: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        license: Option<String>,
    },

    /// 删除音频
    Delete { word_id: i64, sound_id: i64 },

    /// 播放音频
    Play { word_id: i64, sound_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum GuideCommands {
    /// 列出学习指南
    List,

    /// 列出指南中的单词
    Words { guide_id: i64 },

    /// 向指南批量添加单词
    Add {
        guide_id: i64,
        #[arg(required = true, num_args = 1..)]
        word_ids: Vec<i64>,
        #[arg(long, default_value = "5")]
        importance: i32,
    },

    /// 从指南移除单词
    Remove {
        guide_id: i64,
        #[arg(required = true, num_args = 1..)]
        word_ids: Vec<i64>,
    },

    /// 调整单词在指南中的顺序
    Move {
        guide_id: i64,
        word_id: i64,
        #[arg(value_enum)]
        direction: MoveDirection,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// 解析 `语言代码=文本`
fn parse_translation(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((code, text)) if !code.trim().is_empty() => {
            Ok((code.trim().to_string(), text.to_string()))
        }
        _ => Err(format!("expected LANG=TEXT, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_create() {
        let cli = Cli::parse_from([
            "kazlearn-admin",
            "words",
            "create",
            "сәлем",
            "--category",
            "1",
            "--word-type",
            "2",
            "--difficulty",
            "1",
            "-t",
            "en=hello",
            "-t",
            "ru=привет",
        ]);
        match cli.command {
            Commands::Words(WordCommands::Create {
                kazakh_word,
                category,
                translations,
                ..
            }) => {
                assert_eq!(kazakh_word, "сәлем");
                assert_eq!(category, Some(1));
                assert_eq!(
                    translations,
                    vec![
                        ("en".to_string(), "hello".to_string()),
                        ("ru".to_string(), "привет".to_string())
                    ]
                );
            }
            other => panic!("预期 words create，得到 {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "kazlearn-admin",
            "categories",
            "list",
            "--active-only",
            "--locale",
            "kk",
            "--api-url",
            "http://127.0.0.1:9000/api/v1",
        ]);
        assert_eq!(cli.locale.as_deref(), Some("kk"));
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9000/api/v1"));
        match cli.command {
            Commands::Categories(CategoryCommands::List {
                active_only, page, ..
            }) => {
                assert!(active_only);
                assert_eq!(page.page, 1);
                assert!(page.page_size.is_none());
            }
            other => panic!("预期 categories list，得到 {:?}", other),
        }
    }

    #[test]
    fn test_bulk_delete_requires_ids() {
        assert!(Cli::try_parse_from(["kazlearn-admin", "words", "bulk-delete"]).is_err());

        let cli = Cli::parse_from(["kazlearn-admin", "words", "bulk-delete", "1", "2", "--force"]);
        match cli.command {
            Commands::Words(WordCommands::BulkDelete { ids, force }) => {
                assert_eq!(ids, vec![1, 2]);
                assert!(force);
            }
            other => panic!("预期 words bulk-delete，得到 {:?}", other),
        }
    }

    #[test]
    fn test_guide_move_and_export_format() {
        let cli = Cli::parse_from(["kazlearn-admin", "guides", "move", "3", "9", "down"]);
        assert!(matches!(
            cli.command,
            Commands::Guides(GuideCommands::Move {
                guide_id: 3,
                word_id: 9,
                direction: MoveDirection::Down
            })
        ));

        let cli = Cli::parse_from(["kazlearn-admin", "words", "export", "-f", "json"]);
        match cli.command {
            Commands::Words(WordCommands::Export { format, output, .. }) => {
                assert_eq!(ExportFormat::from(format), ExportFormat::Json);
                assert!(output.is_none());
            }
            other => panic!("预期 words export，得到 {:?}", other),
        }
    }

    #[test]
    fn test_parse_translation() {
        assert_eq!(
            parse_translation("kk=сәлем=hi").unwrap(),
            ("kk".to_string(), "сәлем=hi".to_string())
        );
        assert!(parse_translation("hello").is_err());
        assert!(parse_translation("=hello").is_err());
    }
}
