//! Notification badge polling.
//!
//! The unread count is fetched on shell mount and on a fixed 30-second
//! interval; opening the notifications screen forces a refresh shortly
//! after (the backend marks items read on open, so the badge may then
//! drop).

use std::time::Duration;

use kerala_shell::Badge;

use crate::api::NotificationApi;

/// Fixed poll interval for the unread count.
pub const NOTIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Delay before the forced refresh after opening the notifications screen,
/// giving the backend time to record the read acknowledgement.
pub const REFRESH_AFTER_OPEN_DELAY: Duration = Duration::from_millis(800);

pub struct NotificationPoller<A: NotificationApi> {
    api: A,
    badge: Badge,
}

impl<A: NotificationApi> NotificationPoller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            badge: Badge::new(),
        }
    }

    pub fn badge_count(&self) -> u32 {
        self.badge.count()
    }

    /// One poll step. Fetch failures keep the current badge value; the
    /// next tick is the retry.
    pub async fn tick(&mut self) {
        match self.api.unread_count().await {
            Ok(count) => self.badge.poll(count),
            Err(err) => {
                tracing::debug!(error = %err, "notification poll failed; keeping badge");
            }
        }
    }

    /// The user opened the notifications screen: arm the badge to accept a
    /// lower value, wait out the acknowledgement delay, and refresh.
    pub async fn refresh_after_open(&mut self) {
        self.badge.acknowledge();
        tokio::time::sleep(REFRESH_AFTER_OPEN_DELAY).await;
        self.tick().await;
    }

    /// Explicit clear-all from the notifications screen.
    pub async fn mark_all_read(&mut self) -> Result<(), kerala_client::ApiError> {
        self.api.mark_all_read().await?;
        self.badge.mark_all_read();
        Ok(())
    }

    /// Run the fixed-interval poll until the returned future is dropped
    /// (dropping it on logout/unmount cancels any in-flight fetch).
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(NOTIFICATION_POLL_INTERVAL);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}
