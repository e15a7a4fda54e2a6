//! Showing notifications without letting platform failures escape

use std::sync::Arc;

use streakline_domain::Notification;
use tracing::{debug, error};

use super::ports::{NotificationPlatform, UserFeedback};

#[derive(Clone)]
pub(crate) struct Dispatcher {
    platform: Arc<dyn NotificationPlatform>,
    feedback: Arc<dyn UserFeedback>,
}

impl Dispatcher {
    pub(crate) fn new(platform: Arc<dyn NotificationPlatform>, feedback: Arc<dyn UserFeedback>) -> Self {
        Self { platform, feedback }
    }

    /// Show `notification`. A failure is logged and reported to the user
    /// once with `failure_message`; returns whether it was shown.
    pub(crate) fn show(&self, notification: &Notification, failure_message: &str) -> bool {
        match self.platform.show(notification) {
            Ok(()) => {
                debug!(habit_id = ?notification.habit_id, title = %notification.title, "Notification shown");
                true
            }
            Err(err) => {
                error!(habit_id = ?notification.habit_id, error = %err, "Failed to show notification");
                self.feedback.error(failure_message);
                false
            }
        }
    }
}
