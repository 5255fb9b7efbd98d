//! Unread-notification badge.
//!
//! Between read-acknowledgements the displayed count never decreases: a
//! poll value lower than the current count is treated as stale and ignored.
//! Opening the notifications screen arms an acknowledgement, after which
//! the next poll value is accepted as-is.

/// Badge count state fed by the notification poll.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    count: u32,
    ack_armed: bool,
}

impl Badge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed unread count.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Feed a polled server value.
    pub fn poll(&mut self, server_count: u32) {
        if server_count >= self.count || self.ack_armed {
            self.count = server_count;
            self.ack_armed = false;
        } else {
            tracing::debug!(
                displayed = self.count,
                polled = server_count,
                "ignoring stale lower poll value without read acknowledgement"
            );
        }
    }

    /// The user opened the notifications screen; the next poll value is
    /// accepted even if lower.
    pub fn acknowledge(&mut self) {
        self.ack_armed = true;
    }

    /// Explicit mark-all-read.
    pub fn mark_all_read(&mut self) {
        self.count = 0;
        self.ack_armed = false;
    }
}
