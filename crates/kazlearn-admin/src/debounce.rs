//! 输入防抖
//!
//! 可取消的定时器：每次输入取消上一个待发送的值并重新计时，只有一串快速输入中的
//! 最后一个值会在静默 `delay` 之后送达接收端。

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// 防抖器
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<CancellationToken>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// 创建防抖器和接收端
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// 提交新值，替换尚未送达的旧值
    pub fn push(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    trace!("防抖值被新输入取代");
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(value);
                }
            }
        });
        self.pending = Some(token);
    }

    /// 丢弃待发送的值
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_only_last_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        for text in ["с", "сә", "сәл", "сәлем"] {
            debouncer.push(text.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let value = rx.recv().await.unwrap();
        assert_eq!(value, "сәлем");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_pauses_deliver_each_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.push(2);
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push("alma");
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push("kitap");
        drop(debouncer);

        // 发送端随防抖器一起释放，通道关闭且没有值
        assert_eq!(rx.recv().await, None);
    }
}
