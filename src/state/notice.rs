use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notice stays on screen
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(4);

/// Only the most recent notices are kept
const MAX_NOTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient status message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// Queue of transient notices, newest last
#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, text: impl Into<String>, kind: NoticeKind, now: Instant) {
        self.queue.push_back(Notice {
            text: text.into(),
            kind,
            expires_at: now + NOTICE_LIFETIME,
        });
        while self.queue.len() > MAX_NOTICES {
            self.queue.pop_front();
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, NoticeKind::Info, Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text, NoticeKind::Error, Instant::now());
    }

    /// Drop expired notices
    pub fn prune(&mut self, now: Instant) {
        self.queue.retain(|notice| notice.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
