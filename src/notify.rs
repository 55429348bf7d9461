//! User-visible acknowledgments emitted by the submission pipeline.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast-style message for the submission surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

/// The form/dialog hosting a submission.
///
/// The pipeline calls `notify` once per finished attempt and `close` when
/// the dialog should go away.
pub trait SubmissionSurface: Send + Sync {
    fn notify(&self, notification: Notification);

    fn close(&self) {}
}
