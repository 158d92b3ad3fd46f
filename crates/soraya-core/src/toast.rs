use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Queue cap. Older entries are dropped first when the UI falls behind.
const MAX_PENDING: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A transient user-facing message. The webview owns display and
/// auto-dismiss timing; this side only queues.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: jiff::Timestamp,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

/// Pending toasts, drained exactly once by the frontend poll.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        if self.pending.len() == MAX_PENDING {
            self.pending.pop_front();
        }
        self.pending.push_back(toast);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::new(ToastLevel::Info, message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::new(ToastLevel::Success, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::new(ToastLevel::Error, message));
    }

    /// Takes every pending toast. A second drain with no pushes in
    /// between returns an empty vec, so no message shows twice.
    pub fn drain(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
