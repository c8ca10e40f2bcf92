//! SDKWA Client SDK
//!
//! Talks to the SDKWA messaging gateway (WhatsApp and Telegram instances) and
//! routes the webhooks it pushes back.
//!
//! # Architecture
//!
//! ```text
//! Application ──▶ SdkwaClient ──HTTPS──▶ {host}/{messenger}/{idInstance}/{method}
//!                     │
//!                     └── WebhookHandler ◀── server (POST /webhook)
//!                                        ◀── receiving (notification queue)
//! ```
//!
//! # Usage
//!
//! ## Sending a message
//!
//! ```no_run
//! use sdkwa::prelude::*;
//!
//! # async fn run() -> sdkwa::Result<()> {
//! let client = SdkwaClient::new(SdkwaConfig::new("1101000001", "token"))?;
//! let sent = client
//!     .send_message(&SendMessageRequest::new("79999999999@c.us", "Hello"))
//!     .await?;
//! println!("sent {}", sent.id_message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Handling webhooks
//!
//! ```no_run
//! use sdkwa::prelude::*;
//!
//! let handler = WebhookHandler::new();
//! handler
//!     .on_incoming_message_text(|n| {
//!         if let WebhookEvent::IncomingMessage(message) = &n.event {
//!             println!("{:?}", message.text());
//!         }
//!     })
//!     .on_state_instance(|n| println!("state: {}", n.raw["stateInstance"]));
//! ```
//!
//! ## Environment
//!
//! ```bash
//! export ID_INSTANCE=1101000001
//! export API_TOKEN_INSTANCE=your_token
//! export API_HOST=https://api.sdkwa.pro   # optional
//! export USER_ID=...  USER_TOKEN=...      # instance management only
//! ```

pub mod account;
pub mod chats;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod groups;
pub mod instances;
pub mod receiving;
pub mod sending;
pub mod server;
pub mod telegram;
pub mod types;
pub mod webhook;

pub use client::SdkwaClient;
pub use config::SdkwaConfig;
pub use error::{Error, Result};
pub use events::{WebhookEvent, WebhookNotification};
pub use types::*;
pub use webhook::WebhookHandler;

/// Prelude for common imports
pub mod prelude {
    pub use crate::client::SdkwaClient;
    pub use crate::config::SdkwaConfig;
    pub use crate::error::{Error, Result};
    pub use crate::events::*;
    pub use crate::types::*;
    pub use crate::webhook::WebhookHandler;
}
