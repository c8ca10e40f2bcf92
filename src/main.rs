//! SDKWA command line
//!
//! - `sdkwa serve`: webhook receiver that logs events and echoes text messages
//! - `sdkwa poll`: drains the notification queue through the same callbacks
//! - `sdkwa state`: prints the instance state
//!
//! Credentials come from the environment (or `.env`): `ID_INSTANCE`,
//! `API_TOKEN_INSTANCE`, optional `API_HOST`, `SDKWA_MESSENGER`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sdkwa::prelude::*;
use sdkwa::server;

#[derive(Debug, Parser)]
#[command(name = "sdkwa", version, about = "SDKWA gateway client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Receive webhooks over HTTP
    Serve {
        #[arg(long, env = "SDKWA_WEBHOOK_ADDR", default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
        /// Reply to incoming text messages with their own text
        #[arg(long)]
        echo: bool,
    },
    /// Poll the notification queue instead of receiving webhooks
    Poll {
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
        #[arg(long)]
        echo: bool,
    },
    /// Print the instance state
    State,
}

/// Text message waiting for an echo reply
#[derive(Debug)]
struct Reply {
    chat_id: String,
    text: String,
    quoted_message_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sdkwa=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let client = SdkwaClient::from_env().context("Failed to load SDKWA configuration")?;
    info!(
        "📋 Configuration loaded: instance {} on {}",
        client.config().id_instance,
        client.messenger()
    );

    match cli.command {
        Command::State => {
            let state = client
                .get_state_instance()
                .await
                .context("Failed to fetch instance state")?;
            println!("{}", state.state_instance);
        }
        Command::Serve { addr, echo } => {
            let replies = register_callbacks(&client, echo);
            let handler = client.shared_webhook_handler();
            let webhook_server = tokio::spawn(async move {
                if let Err(e) = server::run_server(addr, handler).await {
                    error!("Webhook server error: {}", e);
                }
            });
            let reply_worker = replies.map(|rx| spawn_reply_worker(client.clone(), rx));

            info!("🌐 Webhook receiver on http://{}/webhook", addr);
            wait_for_shutdown().await;

            webhook_server.abort();
            if let Some(worker) = reply_worker {
                worker.abort();
            }
        }
        Command::Poll {
            interval_secs,
            echo,
        } => {
            let replies = register_callbacks(&client, echo);
            let reply_worker = replies.map(|rx| spawn_reply_worker(client.clone(), rx));

            info!("🔁 Polling notifications every {}s when idle", interval_secs);
            tokio::select! {
                _ = poll_loop(&client, Duration::from_secs(interval_secs)) => {}
                _ = wait_for_shutdown() => {}
            }

            if let Some(worker) = reply_worker {
                worker.abort();
            }
        }
    }

    info!("✅ Stopped");
    Ok(())
}

/// Log every known event; with `echo`, queue text messages for a reply
fn register_callbacks(client: &SdkwaClient, echo: bool) -> Option<mpsc::Receiver<Reply>> {
    let handler = client.webhook_handler();

    handler
        .on_state_instance(|n| {
            if let WebhookEvent::StateInstanceChanged(change) = &n.event {
                info!("📶 Instance state: {}", change.state_instance);
            }
        })
        .on_outgoing_message_status(|n| {
            if let WebhookEvent::OutgoingMessageStatus(status) = &n.event {
                info!("📤 Message {} is {}", status.id_message, status.status);
            }
        })
        .on_incoming_message_file(|n| {
            if let WebhookEvent::IncomingMessage(message) = &n.event
                && let MessageContent::File { data, .. } = &message.content
            {
                info!(
                    "📎 File from {}: {}",
                    message.sender_data.chat_id, data.download_url
                );
            }
        })
        .on_incoming_message_location(|n| {
            if let WebhookEvent::IncomingMessage(message) = &n.event {
                info!("📍 Location from {}", message.sender_data.chat_id);
            }
        })
        .on_incoming_message_contact(|n| {
            if let WebhookEvent::IncomingMessage(message) = &n.event {
                info!("👤 Contact from {}", message.sender_data.chat_id);
            }
        })
        .on_device_info(|n| info!("📱 Device info: {}", n.raw));

    // Callbacks are synchronous; replies are sent from an async worker
    let (tx, rx) = mpsc::channel::<Reply>(64);
    let on_text = move |n: &WebhookNotification| {
        let WebhookEvent::IncomingMessage(message) = &n.event else {
            return;
        };
        let Some(text) = message.text() else {
            return;
        };
        info!("💬 {}: {}", message.sender_data.chat_id, text);

        if echo {
            let reply = Reply {
                chat_id: message.sender_data.chat_id.clone(),
                text: text.to_string(),
                quoted_message_id: message.id_message.clone(),
            };
            if let Err(e) = tx.try_send(reply) {
                warn!("Dropping echo reply: {}", e);
            }
        }
    };
    let on_extended_text = on_text.clone();
    handler
        .on_incoming_message_text(on_text)
        .on_incoming_message_extended_text(on_extended_text);

    echo.then_some(rx)
}

fn spawn_reply_worker(
    client: SdkwaClient,
    mut rx: mpsc::Receiver<Reply>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(reply) = rx.recv().await {
            let mut request = SendMessageRequest::new(reply.chat_id, reply.text);
            if let Some(id) = reply.quoted_message_id {
                request = request.quoting(id);
            }
            match client.send_message(&request).await {
                Ok(sent) => info!("✉️ Replied with {}", sent.id_message),
                Err(e) => error!("Failed to send reply: {}", e),
            }
        }
    })
}

/// Drain the queue, sleeping only when it is empty or a call failed
async fn poll_loop(client: &SdkwaClient, idle: Duration) {
    loop {
        match client.dispatch_next_notification().await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) if e.is_unauthorized() => {
                error!("Instance token rejected: {}", e);
                return;
            }
            Err(e) => warn!("Polling failed: {}", e),
        }
        tokio::time::sleep(idle).await;
    }
}

async fn wait_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => info!("📢 Shutdown signal received"),
        Err(err) => error!("Unable to listen for shutdown signal: {}", err),
    }
}
