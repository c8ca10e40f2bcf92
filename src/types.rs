//! Request and response types for the SDKWA gateway API

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Messenger Type
// =============================================================================

/// Chat network an instance call targets
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessengerType {
    #[default]
    Whatsapp,
    Telegram,
}

impl MessengerType {
    /// Path segment used in instance URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Telegram => "telegram",
        }
    }
}

impl fmt::Display for MessengerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessengerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whatsapp" => Ok(Self::Whatsapp),
            "telegram" => Ok(Self::Telegram),
            other => Err(format!("unknown messenger type: {other}")),
        }
    }
}

// =============================================================================
// Upload Input
// =============================================================================

/// File accepted by upload-style calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Read from disk when the request is built
    Path(PathBuf),
    /// Already in memory
    Bytes(Vec<u8>),
}

impl FileSource {
    /// Base name of a path source
    pub fn base_name(&self) -> Option<String> {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Self::Bytes(_) => None,
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&std::path::Path> for FileSource {
    fn from(path: &std::path::Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for FileSource {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

// =============================================================================
// Account Types
// =============================================================================

/// Instance settings accepted by `setSettings`
///
/// Unlisted provider fields go through `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_send_messages_milliseconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_incoming_messages_readed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing_webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_webhook: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `getStateInstance`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StateInstance {
    pub state_instance: String,
}

impl StateInstance {
    pub fn is_authorized(&self) -> bool {
        self.state_instance == "authorized"
    }
}

/// Result of `qr`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QrResponse {
    /// `qrCode`, `alreadyLogged` or `error`
    #[serde(rename = "type")]
    pub kind: String,
    /// Base64 PNG for `qrCode`, a human readable text otherwise
    pub message: String,
}

/// Phone registration code request
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCodeRequest {
    pub phone_number: i64,
    /// `sms` or `voice`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

// =============================================================================
// Sending Types
// =============================================================================

/// Text message
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview: Option<bool>,
}

impl SendMessageRequest {
    pub fn new(chat_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            message: message.into(),
            quoted_message_id: None,
            link_preview: None,
        }
    }

    pub fn quoting(mut self, id_message: impl Into<String>) -> Self {
        self.quoted_message_id = Some(id_message.into());
        self
    }
}

/// Contact card
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub phone_contact: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendContactRequest {
    pub chat_id: String,
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_message_id: Option<String>,
}

/// File hosted elsewhere
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendFileByUrlRequest {
    pub chat_id: String,
    pub url_file: String,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_message_id: Option<String>,
}

/// File sent as multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFileByUploadRequest {
    pub chat_id: String,
    pub file: FileSource,
    pub file_name: String,
    pub caption: Option<String>,
    pub quoted_message_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendLocationRequest {
    pub chat_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_message_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryRequest {
    pub chat_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Mark a chat (or a single message) as read
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadChatRequest {
    pub chat_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_message: Option<String>,
}

/// Result of every send-style call
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub id_message: String,
}

/// Result of `uploadFile`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponse {
    pub url_file: String,
}

// =============================================================================
// Receiving Types
// =============================================================================

/// One entry of the notification queue
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedNotification {
    pub receipt_id: i64,
    /// Webhook document, same shape as a pushed webhook
    pub body: Value,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeleteNotificationResponse {
    pub result: bool,
}

// =============================================================================
// Instance Management Types
// =============================================================================

/// Order body for `createByOrder` / `extendByOrder`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstanceOrder<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_instance: Option<i64>,
    pub tariff: &'a str,
    pub period: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<&'a str>,
}

// =============================================================================
// Telegram Types
// =============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppRequest {
    pub title: String,
    pub short_name: String,
    pub url: String,
    pub description: String,
}
