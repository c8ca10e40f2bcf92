//! Webhook routing
//!
//! Maps a routing key derived from the document to a single callback:
//! - `typeWebhook` alone, or
//! - `typeWebhook + "_" + messageData.typeMessage` when the nested field is set
//!
//! One callback per key. Registering again for a key replaces the previous
//! callback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::events::WebhookNotification;

// =============================================================================
// Routing Keys
// =============================================================================

pub const STATE_INSTANCE_CHANGED: &str = "stateInstanceChanged";
pub const OUTGOING_MESSAGE_STATUS: &str = "outgoingMessageStatus";
pub const DEVICE_INFO: &str = "deviceInfo";
pub const INCOMING_TEXT: &str = "incomingMessageReceived_textMessage";
pub const INCOMING_EXTENDED_TEXT: &str = "incomingMessageReceived_extendedTextMessage";
pub const INCOMING_IMAGE: &str = "incomingMessageReceived_imageMessage";
pub const INCOMING_VIDEO: &str = "incomingMessageReceived_videoMessage";
pub const INCOMING_DOCUMENT: &str = "incomingMessageReceived_documentMessage";
pub const INCOMING_AUDIO: &str = "incomingMessageReceived_audioMessage";
pub const INCOMING_LOCATION: &str = "incomingMessageReceived_locationMessage";
pub const INCOMING_CONTACT: &str = "incomingMessageReceived_contactMessage";

/// Keys covered by [`WebhookHandler::on_incoming_message_file`]
pub const INCOMING_FILE_KEYS: [&str; 4] =
    [INCOMING_IMAGE, INCOMING_VIDEO, INCOMING_DOCUMENT, INCOMING_AUDIO];

/// Routing key of a webhook document, `None` without a string `typeWebhook`
pub fn routing_key(data: &Value) -> Option<String> {
    let base = data.get("typeWebhook")?.as_str()?;
    match data.pointer("/messageData/typeMessage").and_then(Value::as_str) {
        Some(type_message) => Some(format!("{base}_{type_message}")),
        None => Some(base.to_string()),
    }
}

// =============================================================================
// Handler
// =============================================================================

pub type WebhookCallback = Arc<dyn Fn(&WebhookNotification) + Send + Sync>;

/// Callback registry
///
/// Registration takes `&self` and returns `&Self`, so calls chain and the
/// handler can be shared behind an `Arc` with the webhook server.
#[derive(Default)]
pub struct WebhookHandler {
    callbacks: RwLock<HashMap<String, WebhookCallback>>,
}

impl fmt::Debug for WebhookHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks = self.callbacks.read();
        let mut keys: Vec<_> = callbacks.keys().collect();
        keys.sort();
        f.debug_struct("WebhookHandler")
            .field("routes", &keys)
            .finish()
    }
}

impl WebhookHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for an arbitrary routing key
    pub fn on<F>(&self, routing_key: impl Into<String>, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.insert(routing_key.into(), Arc::new(callback));
        self
    }

    fn insert(&self, routing_key: String, callback: WebhookCallback) {
        debug!("Registering webhook callback for {}", routing_key);
        self.callbacks.write().insert(routing_key, callback);
    }

    pub fn on_state_instance<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.on(STATE_INSTANCE_CHANGED, callback)
    }

    pub fn on_outgoing_message_status<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.on(OUTGOING_MESSAGE_STATUS, callback)
    }

    pub fn on_incoming_message_text<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.on(INCOMING_TEXT, callback)
    }

    pub fn on_incoming_message_extended_text<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.on(INCOMING_EXTENDED_TEXT, callback)
    }

    /// Image, video, document and audio messages share one callback
    pub fn on_incoming_message_file<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        let callback: WebhookCallback = Arc::new(callback);
        for key in INCOMING_FILE_KEYS {
            self.insert(key.to_string(), Arc::clone(&callback));
        }
        self
    }

    pub fn on_incoming_message_location<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.on(INCOMING_LOCATION, callback)
    }

    pub fn on_incoming_message_contact<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.on(INCOMING_CONTACT, callback)
    }

    pub fn on_device_info<F>(&self, callback: F) -> &Self
    where
        F: Fn(&WebhookNotification) + Send + Sync + 'static,
    {
        self.on(DEVICE_INFO, callback)
    }

    /// Drop the callback for a key, returning whether one was registered
    pub fn remove(&self, routing_key: &str) -> bool {
        self.callbacks.write().remove(routing_key).is_some()
    }

    pub fn is_registered(&self, routing_key: &str) -> bool {
        self.callbacks.read().contains_key(routing_key)
    }

    /// Number of registered routing keys
    pub fn len(&self) -> usize {
        self.callbacks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.read().is_empty()
    }

    /// Route a webhook document to its callback
    ///
    /// Documents without `typeWebhook` and keys without a callback are
    /// ignored. Returns `true` when a callback ran.
    pub fn process(&self, data: &Value) -> bool {
        let Some(key) = routing_key(data) else {
            debug!("Ignoring webhook without typeWebhook");
            return false;
        };

        // Lock is released before the callback runs so it may re-register
        let callback = self.callbacks.read().get(&key).cloned();
        match callback {
            Some(callback) => {
                debug!("Dispatching webhook {}", key);
                callback(&WebhookNotification::new(data.clone()));
                true
            }
            None => {
                debug!("No callback registered for webhook {}", key);
                false
            }
        }
    }

    /// Entry point for web frameworks, same as [`WebhookHandler::process`]
    pub fn handle_request(&self, data: &Value) -> bool {
        self.process(data)
    }

    /// Parse a raw request body and route it
    pub fn process_json(&self, body: &str) -> Result<bool> {
        let data: Value = serde_json::from_str(body).map_err(Error::InvalidJson)?;
        Ok(self.process(&data))
    }
}
