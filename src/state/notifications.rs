use derive_more::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum NotificationLevel {
    #[display("success")]
    Success,
    #[display("error")]
    Error,
}

/// A short-lived message for the user about the outcome of a mutation
#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[display("[{level}] {message}")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Messages waiting to be shown, oldest first
#[derive(Clone, Debug, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn success(&mut self, message: impl Into<String>) {
        self.pending.push(Notification {
            level: NotificationLevel::Success,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.pending.push(Notification {
            level: NotificationLevel::Error,
            message: message.into(),
        });
    }

    /// Hands every pending message to the caller and empties the queue
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_messages_in_order_once() {
        let mut queue = NotificationQueue::default();
        queue.success("Task created");
        queue.error("Could not change the task's status");

        let drained = queue.drain();
        assert_eq!(2, drained.len());
        assert_eq!("[success] Task created", drained[0].to_string());
        assert_eq!(NotificationLevel::Error, drained[1].level);
        assert!(queue.drain().is_empty());
    }
}
