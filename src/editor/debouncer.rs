use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// 防抖器
///
/// 每次 `trigger` 都会取消尚未执行的任务并重新计时，只有最后一次在静默
/// `delay` 之后执行。由编辑会话持有，随会话一起释放，释放时取消待执行任务。
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 重新计时并登记任务
    ///
    /// 计时结束后任务放进阻塞线程池执行，不占用运行时线程。
    /// 当前线程没有 tokio 运行时时直接同步执行。
    pub fn trigger<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::debug!("没有 tokio 运行时，防抖任务立即执行");
                task();
                return;
            }
        };

        let delay = self.delay;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tokio::task::spawn_blocking(task).await {
                log::warn!("防抖任务异常结束: {}", e);
            }
        }));
    }

    /// 取消待执行的任务
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(Duration::from_millis(1000))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
