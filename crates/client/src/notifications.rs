//! Notification read models (`GET /api/notifications/` and friends).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use kerala_core::NotificationId;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationItem {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification list response; `unread_count` feeds the shell badge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationPage {
    pub unread_count: u32,
    pub results: Vec<NotificationItem>,
}
