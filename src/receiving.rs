//! Notification queue (polling alternative to pushed webhooks)

use reqwest::Method;

use crate::client::{RequestOptions, Scope, SdkwaClient};
use crate::error::Result;
use crate::types::{DeleteNotificationResponse, ReceivedNotification};

impl SdkwaClient {
    /// Next queued notification, `None` when the queue is empty
    pub async fn receive_notification(&self) -> Result<Option<ReceivedNotification>> {
        self.get("/receiveNotification").await
    }

    /// Acknowledge a notification so the next one is delivered
    pub async fn delete_notification(&self, receipt_id: i64) -> Result<DeleteNotificationResponse> {
        self.request(
            Method::DELETE,
            &format!("/deleteNotification/{receipt_id}"),
            Scope::Instance,
            RequestOptions::default(),
        )
        .await
    }

    /// Receive one notification, route it through the webhook handler and
    /// acknowledge it. Returns `false` when the queue was empty.
    pub async fn dispatch_next_notification(&self) -> Result<bool> {
        let Some(notification) = self.receive_notification().await? else {
            return Ok(false);
        };
        self.webhook_handler().process(&notification.body);
        self.delete_notification(notification.receipt_id).await?;
        Ok(true)
    }
}
