use std::sync::Mutex;

/// 页面跳转
///
/// 会话失效后整页跳转到登录路由，调用方的内存状态应视为作废。
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// 只记录日志的跳转实现，供无界面的进程使用
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, path: &str) {
        tracing::warn!("Session ended, login required at {}", path);
    }
}

/// 把跳转请求排队，由宿主应用取走并执行
#[derive(Debug, Default)]
pub struct RedirectQueue {
    pending: Mutex<Vec<String>>,
}

impl RedirectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取走所有待执行的跳转
    pub fn drain(&self) -> Vec<String> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Navigator for RedirectQueue {
    fn redirect(&self, path: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(path.to_string());
        }
    }
}
