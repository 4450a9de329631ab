use std::sync::Arc;

use tracing::debug;

use crate::clients::BackendError;
use crate::domain::NotificationId;
use crate::models::Notification;
use crate::services::backend::NotificationApi;

/// Per-user notification feed. Nothing is cached; callers reload after each
/// action.
pub struct NotificationFeed<B> {
    backend: Arc<B>,
}

impl<B: NotificationApi> NotificationFeed<B> {
    #[must_use]
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, only_unread: bool) -> Result<Vec<Notification>, BackendError> {
        let mut notifications = self.backend.list_notifications(only_unread).await?;
        if only_unread {
            notifications.retain(|n| !n.is_read);
        }
        debug!(count = notifications.len(), only_unread, "Loaded notifications");
        Ok(notifications)
    }

    pub async fn unread_count(&self) -> Result<u64, BackendError> {
        self.backend.unread_count().await
    }

    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), BackendError> {
        self.backend.mark_notification_read(id).await
    }

    pub async fn mark_all_read(&self) -> Result<(), BackendError> {
        self.backend.mark_all_notifications_read().await
    }

    pub async fn delete(&self, id: &NotificationId) -> Result<(), BackendError> {
        self.backend.delete_notification(id).await
    }
}
