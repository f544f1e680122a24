//! 单词媒体管理
//!
//! - [`file`]：本地文件读取与上传前的类型/大小校验
//! - [`ImageManager`] / [`SoundManager`]：某个单词的图片与音频列表
//! - [`Playback`]：音频播放控制，带 30 秒强制停止

pub mod file;
pub mod images;
pub mod playback;
pub mod sounds;

pub use file::{AUDIO_LIMIT, IMAGE_LIMIT, LocalFile, MediaKind};
pub use images::{ImageManager, ImageMeta};
pub use playback::{AudioSink, LoggingSink, MAX_PLAYBACK, Playback, PlaybackState};
pub use sounds::{SoundManager, SoundMeta};
