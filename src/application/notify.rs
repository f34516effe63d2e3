//! User-facing mutation feedback.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::mutex_lock;

const SOURCE: &str = "application::notify";

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    #[serde(rename = "ttl_ms", serialize_with = "serialize_ttl")]
    pub ttl: Duration,
}

fn serialize_ttl<S: serde::Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self::with_ttl(ToastKind::Success, text, DEFAULT_TOAST_TTL)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::with_ttl(ToastKind::Error, text, DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(kind: ToastKind, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
            ttl,
        }
    }
}

/// Fire-and-forget sink for toasts. Delivery never fails the mutation.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// In-memory toast stack, drained by whatever renders it.
#[derive(Debug, Default)]
pub struct ToastQueue {
    queue: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast in arrival order.
    pub fn drain(&self) -> Vec<Toast> {
        mutex_lock(&self.queue, SOURCE, "drain").drain(..).collect()
    }

    pub fn len(&self) -> usize {
        mutex_lock(&self.queue, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        mutex_lock(&self.queue, SOURCE, "notify").push_back(toast);
    }
}

/// Writes toasts to the log instead of displaying them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => info!(toast_id = %toast.id, "{}", toast.text),
            ToastKind::Error => warn!(toast_id = %toast.id, "{}", toast.text),
        }
    }
}
