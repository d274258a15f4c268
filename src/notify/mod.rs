//! User-facing notices (the toast messages of the web front end).

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sink for notices raised by the workflows.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn success(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Error,
            message: message.to_string(),
        });
    }
}

/// Writes notices to the log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(notice = %notice.message, "success"),
            NoticeLevel::Error => tracing::warn!(notice = %notice.message, "error"),
        }
    }
}

/// Keeps every notice in memory, in arrival order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.lock())
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NoticeLevel::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NoticeLevel::Success)
    }

    fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        // A panic while pushing cannot leave the Vec half-written.
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        tracing::debug!(?notice, "notice recorded");
        self.lock().push(notice);
    }
}
