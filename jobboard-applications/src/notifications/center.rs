//! Notification Center - per-recipient inbox of notifications

use super::{NewNotification, Notification};
use crate::{ApplicationError, ApplicationResult};
use chrono::{DateTime, Utc};
use jobboard_core::Clock;
use std::sync::Arc;
use tracing::debug;

pub struct NotificationCenter {
    /// Newest first
    notifications: Vec<Notification>,
    clock: Arc<dyn Clock>,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications: Vec::new(),
            clock,
        }
    }

    pub fn push(&mut self, new: NewNotification) -> Notification {
        let notification = Notification {
            id: uuid::Uuid::new_v4().to_string(),
            recipient_id: new.recipient_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            timestamp: self.clock.now(),
            read: false,
            action_url: new.action_url,
            priority: new.priority,
        };

        debug!(
            "Queued {:?} notification for {}",
            notification.kind, notification.recipient_id
        );
        self.notifications.insert(0, notification.clone());
        notification
    }

    pub fn for_recipient(&self, recipient_id: &str) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .collect()
    }

    pub fn unread_count(&self, recipient_id: &str) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
            .count()
    }

    pub fn mark_read(
        &mut self,
        recipient_id: &str,
        notification_id: &str,
    ) -> ApplicationResult<()> {
        let index = self.index_of(recipient_id, notification_id)?;
        self.notifications[index].read = true;
        Ok(())
    }

    /// Mark every notification of the recipient read; returns how many changed
    pub fn mark_all_read(&mut self, recipient_id: &str) -> usize {
        let mut changed = 0;
        for notification in self
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
        {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    pub fn remove(
        &mut self,
        recipient_id: &str,
        notification_id: &str,
    ) -> ApplicationResult<Notification> {
        let index = self.index_of(recipient_id, notification_id)?;
        Ok(self.notifications.remove(index))
    }

    // Another recipient's notification is reported as missing
    fn index_of(&self, recipient_id: &str, notification_id: &str) -> ApplicationResult<usize> {
        self.notifications
            .iter()
            .position(|n| n.id == notification_id && n.recipient_id == recipient_id)
            .ok_or_else(|| ApplicationError::not_found("notification", notification_id))
    }
}

/// Short relative age such as `30m ago`, `2h ago` or `3d ago`
pub fn format_relative(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).max(chrono::Duration::zero());

    if elapsed < chrono::Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < chrono::Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{NotificationKind, NotificationPriority};
    use chrono::Duration;
    use jobboard_core::ManualClock;

    fn center() -> (Arc<ManualClock>, NotificationCenter) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (clock.clone(), NotificationCenter::new(clock))
    }

    fn note(recipient: &str, title: &str) -> NewNotification {
        NewNotification::new(recipient, NotificationKind::Message, title, "body")
    }

    #[test]
    fn test_newest_first_per_recipient() {
        let (clock, mut center) = center();
        center.push(note("u1", "first"));
        clock.advance(Duration::minutes(5));
        center.push(note("u2", "other"));
        center.push(note("u1", "second").with_priority(NotificationPriority::High));

        let titles: Vec<_> = center
            .for_recipient("u1")
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(center.unread_count("u1"), 2);
    }

    #[test]
    fn test_read_and_remove() {
        let (_, mut center) = center();
        let first = center.push(note("u1", "first"));
        center.push(note("u1", "second"));
        let foreign = center.push(note("u2", "other"));

        center.mark_read("u1", &first.id).unwrap();
        assert_eq!(center.unread_count("u1"), 1);
        assert!(center.mark_read("u1", &foreign.id).unwrap_err().is_not_found());

        assert_eq!(center.mark_all_read("u1"), 1);
        assert_eq!(center.unread_count("u1"), 0);
        assert_eq!(center.unread_count("u2"), 1);

        let removed = center.remove("u1", &first.id).unwrap();
        assert_eq!(removed.title, "first");
        assert!(center.remove("u1", &first.id).is_err());
    }

    #[test]
    fn test_format_relative() {
        let now = Utc::now();
        assert_eq!(format_relative(now, now - Duration::minutes(30)), "30m ago");
        assert_eq!(format_relative(now, now - Duration::hours(2)), "2h ago");
        assert_eq!(format_relative(now, now - Duration::hours(25)), "1d ago");
        assert_eq!(format_relative(now, now + Duration::minutes(1)), "0m ago");
    }
}
