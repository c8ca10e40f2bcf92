//! Typed view of webhook documents
//!
//! The gateway pushes loosely shaped JSON. [`WebhookEvent::from_value`] maps
//! the known shapes onto variants and keeps everything else in
//! [`WebhookEvent::Unknown`], so provider fields that are not modeled yet are
//! never lost.

use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// Event Union
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    IncomingMessage(IncomingMessage),
    OutgoingMessageStatus(OutgoingMessageStatus),
    StateInstanceChanged(StateInstanceChanged),
    DeviceInfo(DeviceInfo),
    /// Unrecognized or malformed document, kept as received
    Unknown(Value),
}

impl WebhookEvent {
    pub fn from_value(value: &Value) -> Self {
        Self::parse_known(value).unwrap_or_else(|| Self::Unknown(value.clone()))
    }

    fn parse_known(value: &Value) -> Option<Self> {
        match value.get("typeWebhook")?.as_str()? {
            "incomingMessageReceived" => {
                IncomingMessage::from_value(value).map(Self::IncomingMessage)
            }
            "outgoingMessageStatus" => serde_json::from_value(value.clone())
                .ok()
                .map(Self::OutgoingMessageStatus),
            "stateInstanceChanged" => serde_json::from_value(value.clone())
                .ok()
                .map(Self::StateInstanceChanged),
            "deviceInfo" => serde_json::from_value(value.clone())
                .ok()
                .map(Self::DeviceInfo),
            _ => None,
        }
    }
}

/// A webhook as handed to callbacks: the document and its typed view
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookNotification {
    /// Document exactly as received
    pub raw: Value,
    pub event: WebhookEvent,
}

impl WebhookNotification {
    pub fn new(raw: Value) -> Self {
        let event = WebhookEvent::from_value(&raw);
        Self { raw, event }
    }

    /// `typeWebhook` of the document
    pub fn type_webhook(&self) -> Option<&str> {
        self.raw.get("typeWebhook").and_then(Value::as_str)
    }
}

// =============================================================================
// Shared Fields
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceData {
    /// Number or string depending on the gateway version
    pub id_instance: Value,
    pub wid: Option<String>,
    pub type_instance: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SenderData {
    pub chat_id: String,
    pub sender: String,
    pub sender_name: Option<String>,
    pub chat_name: Option<String>,
}

// =============================================================================
// Incoming Messages
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub id_message: Option<String>,
    pub timestamp: Option<i64>,
    pub instance_data: Option<InstanceData>,
    pub sender_data: SenderData,
    pub content: MessageContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingEnvelope {
    #[serde(default)]
    id_message: Option<String>,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    instance_data: Option<InstanceData>,
    #[serde(default)]
    sender_data: SenderData,
    message_data: Value,
}

impl IncomingMessage {
    fn from_value(value: &Value) -> Option<Self> {
        let envelope: IncomingEnvelope = serde_json::from_value(value.clone()).ok()?;
        Some(Self {
            id_message: envelope.id_message,
            timestamp: envelope.timestamp,
            instance_data: envelope.instance_data,
            sender_data: envelope.sender_data,
            content: MessageContent::from_message_data(&envelope.message_data)?,
        })
    }

    /// Text of text and extended text messages, or the caption of a file
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text.as_str()),
            MessageContent::ExtendedText(data) => Some(data.text.as_str()),
            MessageContent::File { data, .. } => data.caption.as_deref(),
            _ => None,
        }
    }
}

/// `messageData`, selected by `typeMessage`
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    ExtendedText(ExtendedTextMessageData),
    /// Image, video, document or audio; `kind` is the `typeMessage`
    File {
        kind: String,
        data: FileMessageData,
    },
    Location(LocationMessageData),
    Contact(ContactMessageData),
    Other {
        type_message: String,
        data: Value,
    },
}

impl MessageContent {
    fn from_message_data(message_data: &Value) -> Option<Self> {
        let type_message = message_data.get("typeMessage")?.as_str()?;
        let parsed = match type_message {
            "textMessage" => message_data
                .pointer("/textMessageData/textMessage")
                .and_then(Value::as_str)
                .map(|text| Self::Text(text.to_string())),
            "extendedTextMessage" => field(message_data, "extendedTextMessageData")
                .map(Self::ExtendedText),
            "imageMessage" | "videoMessage" | "documentMessage" | "audioMessage" => {
                field(message_data, "fileMessageData").map(|data| Self::File {
                    kind: type_message.to_string(),
                    data,
                })
            }
            "locationMessage" => field(message_data, "locationMessageData").map(Self::Location),
            "contactMessage" => field(message_data, "contactMessageData").map(Self::Contact),
            _ => None,
        };

        Some(parsed.unwrap_or_else(|| Self::Other {
            type_message: type_message.to_string(),
            data: message_data.clone(),
        }))
    }

    /// `typeMessage` this content was parsed from
    pub fn type_message(&self) -> &str {
        match self {
            Self::Text(_) => "textMessage",
            Self::ExtendedText(_) => "extendedTextMessage",
            Self::File { kind, .. } => kind,
            Self::Location(_) => "locationMessage",
            Self::Contact(_) => "contactMessage",
            Self::Other { type_message, .. } => type_message,
        }
    }
}

fn field<T: for<'de> Deserialize<'de>>(message_data: &Value, key: &str) -> Option<T> {
    serde_json::from_value(message_data.get(key)?.clone()).ok()
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendedTextMessageData {
    pub text: String,
    pub description: Option<String>,
    pub title: Option<String>,
    pub preview_type: Option<String>,
    pub stanza_id: Option<String>,
    pub participant: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileMessageData {
    pub download_url: String,
    pub file_name: Option<String>,
    pub caption: Option<String>,
    pub mime_type: Option<String>,
    pub jpeg_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationMessageData {
    pub name_location: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub jpeg_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactMessageData {
    pub display_name: String,
    pub vcard: String,
}

// =============================================================================
// Status and State Events
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OutgoingMessageStatus {
    pub chat_id: Option<String>,
    pub id_message: String,
    /// `sent`, `delivered`, `read`, `failed`, ...
    pub status: String,
    pub timestamp: Option<i64>,
    pub send_by_api: Option<bool>,
    pub instance_data: Option<InstanceData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StateInstanceChanged {
    /// `authorized`, `notAuthorized`, `blocked`, `starting`, ...
    pub state_instance: String,
    pub timestamp: Option<i64>,
    pub instance_data: Option<InstanceData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceInfo {
    pub device_data: Value,
    pub timestamp: Option<i64>,
    pub instance_data: Option<InstanceData>,
}
