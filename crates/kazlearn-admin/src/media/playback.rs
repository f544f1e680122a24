//! 音频播放控制
//!
//! `play` 立即返回：先停止当前播放，交给 [`AudioSink`] 开始播放，并启动一个
//! [`MAX_PLAYBACK`] 的强制停止定时器。播放端即使从未报告结束，定时器到期后
//! 状态也会回到 `Idle`。

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::Result;

/// 单次播放的最长时间
pub const MAX_PLAYBACK: Duration = Duration::from_secs(30);

/// 音频输出端
#[cfg_attr(test, mockall::automock)]
pub trait AudioSink: Send + Sync {
    /// 开始播放，不等待播放结束
    fn start(&self, url: &str) -> Result<()>;

    fn stop(&self);
}

/// 只记录日志的输出端，命令行默认使用
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

impl AudioSink for LoggingSink {
    fn start(&self, url: &str) -> Result<()> {
        info!(url = %url, "播放音频");
        Ok(())
    }

    fn stop(&self) {
        info!("停止播放");
    }
}

/// 播放状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing { url: String },
}

/// 播放控制器
pub struct Playback {
    sink: Arc<dyn AudioSink>,
    current: Arc<Mutex<PlaybackState>>,
    timer: Option<CancellationToken>,
    max_duration: Duration,
}

impl Playback {
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            sink,
            current: Arc::new(Mutex::new(PlaybackState::Idle)),
            timer: None,
            max_duration: MAX_PLAYBACK,
        }
    }

    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// 播放，替换正在播放的音频
    pub fn play(&mut self, url: &str) -> Result<()> {
        self.stop();
        self.sink.start(url)?;
        *self.current.lock() = PlaybackState::Playing {
            url: url.to_string(),
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let sink = self.sink.clone();
        let current = self.current.clone();
        let max_duration = self.max_duration;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(max_duration) => {
                    debug!(?max_duration, "播放超时，强制停止");
                    sink.stop();
                    *current.lock() = PlaybackState::Idle;
                }
            }
        });
        self.timer = Some(token);
        Ok(())
    }

    /// 输出端报告播放结束
    pub fn finished(&mut self) {
        self.cancel_timer();
        *self.current.lock() = PlaybackState::Idle;
    }

    pub fn stop(&mut self) {
        self.cancel_timer();
        let mut current = self.current.lock();
        if matches!(*current, PlaybackState::Playing { .. }) {
            self.sink.stop();
            *current = PlaybackState::Idle;
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.current.lock().clone()
    }

    pub fn is_playing(&self) -> bool {
        matches!(*self.current.lock(), PlaybackState::Playing { .. })
    }

    fn cancel_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
        }
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
