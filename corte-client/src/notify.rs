//! Notification sink
//!
//! Screen flows report results ("2 peças removidas", "Erro ao carregar
//! dados") through an injectable sink instead of building popups
//! themselves, so the flows stay testable and hosts decide what a
//! notification looks like.

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Confirmation of a completed action.
    Success,
    /// Something went wrong.
    Error,
}

/// One user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    severity: Severity,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Where notifications go.
pub trait NotificationSink {
    /// Delivers one notification.
    fn notify(&mut self, notification: Notification);

    /// Convenience: delivers a success message.
    fn success(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::success(message));
    }

    /// Convenience: delivers an error message.
    fn error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::error(message));
    }
}

/// A sink that queues notifications in memory.
///
/// Useful in tests and for hosts that drain pending notifications on their
/// own schedule.
#[derive(Debug, Default)]
pub struct MemorySink {
    queue: Vec<Notification>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queued notifications without consuming them.
    pub fn pending(&self) -> &[Notification] {
        &self.queue
    }

    /// Removes and returns all queued notifications.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, notification: Notification) {
        self.queue.push(notification);
    }
}
