//! User-facing notifications.
//!
//! Toast delivery belongs to the host page; the engine only queues
//! notifications and the RPC layer forwards them each frame.

use std::collections::VecDeque;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::NotificationSettings;
use constants::notification::MAX_PENDING_NOTIFICATIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: NotificationLevel,
    /// Display time. Unset durations are filled from the level when queued.
    pub duration_ms: Option<u32>,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NotificationLevel::Info,
            duration_ms: None,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NotificationLevel::Destructive,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Pending notifications, oldest first. When the host stops draining, the
/// oldest entries are dropped.
#[derive(Resource, Debug, Default)]
pub struct Notifications {
    pending: VecDeque<Notification>,
    settings: NotificationSettings,
}

impl Notifications {
    pub fn set_settings(&mut self, settings: NotificationSettings) {
        self.settings = settings;
    }

    pub fn push(&mut self, mut notification: Notification) {
        if notification.duration_ms.is_none() {
            notification.duration_ms = Some(match notification.level {
                NotificationLevel::Info => self.settings.duration_ms,
                NotificationLevel::Destructive => self.settings.error_duration_ms,
            });
        }
        if self.pending.len() == MAX_PENDING_NOTIFICATIONS {
            self.pending.pop_front();
        }
        debug!("Notification queued: {}", notification.title);
        self.pending.push_back(notification);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Notification> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_queue_in_order() {
        let mut notifications = Notifications::default();
        notifications.push(Notification::info("a", ""));
        notifications.push(Notification::destructive("b", ""));
        let titles: Vec<_> = notifications.drain().map(|n| n.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert!(notifications.is_empty());
    }

    #[test]
    fn durations_follow_level_unless_set() {
        let mut notifications = Notifications::default();
        notifications.push(Notification::info("a", ""));
        notifications.push(Notification::destructive("b", ""));
        notifications.push(Notification::info("c", "").with_duration(5000));
        let durations: Vec<_> = notifications.drain().map(|n| n.duration_ms).collect();
        assert_eq!(durations, vec![Some(3000), Some(5000), Some(5000)]);
    }

    #[test]
    fn queue_is_bounded() {
        let mut notifications = Notifications::default();
        for i in 0..MAX_PENDING_NOTIFICATIONS + 3 {
            notifications.push(Notification::info(i.to_string(), ""));
        }
        assert_eq!(notifications.len(), MAX_PENDING_NOTIFICATIONS);
        assert_eq!(notifications.iter().next().map(|n| n.title.as_str()), Some("3"));
    }
}
