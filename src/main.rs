// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Main entry point for the trailguard demo binary.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use trailguard::config::Config;
use trailguard::notify::channel;
use trailguard::notify::phone::format_phone_number;
use trailguard::registry::models::NewTourist;
use trailguard::registry::service::Registry;
use trailguard::registry::store::MemoryStore;

#[derive(Parser, Debug)]
#[command(version, about = "Tourist safety registry with encrypted records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the scripted end-to-end flow against an in-memory store
    Demo,
    /// Print the SMS channel status
    SmsStatus,
    /// Send a test SMS through the configured channel
    SendTestSms {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Message body
        #[arg(long, default_value = "Test SMS from the Tourist Safety System")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    install_panic_hook();

    // A missing or malformed cipher key is fatal here, before any request
    // could ever observe it.
    let config = Config::from_env().context("failed to load configuration")?;

    if let Err(e) = init_tracing(&config) {
        eprintln!("Failed to init tracing: {}", e);
    }

    let channel = channel::configure(&config);
    let store = Arc::new(MemoryStore::new());
    let registry = Registry::new(&config, store, channel.clone());

    match cli.command {
        Command::Demo => run_demo(&registry).await?,
        Command::SmsStatus => {
            let status = registry.sms_status();
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::SendTestSms { to, message } => {
            let destination = format_phone_number(&to)
                .with_context(|| format!("'{}' has no usable E.164 form", to))?;
            let outcome = channel
                .send(
                    &destination,
                    &message,
                    trailguard::constants::sms::SENDER_LABEL,
                )
                .await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

/// Walk the full flow once: seed, register, log in, fail a login, hit the
/// duplicate gate, dispatch an emergency.
async fn run_demo(registry: &Registry) -> anyhow::Result<()> {
    registry.seed_default_authorities().await?;

    let registration = registry
        .register_tourist(NewTourist {
            full_name: "Amira Khan".into(),
            nationality: "Indian".into(),
            passport: "P1234567".into(),
            phone: "+91 98765 43210".into(),
            email: Some("amira@example.com".into()),
            emergency_contact_name: "Rahul Khan".into(),
            emergency_contact_phone: "+91 98765 43211".into(),
            emergency_contact_email: "rahul@example.com".into(),
            password: "travel-safe".into(),
        })
        .await?;
    info!(tourist = %registration.tourist_id, tx = %registration.tx_hash, "registered");

    let session = registry.login_tourist("P1234567", "travel-safe").await?;
    info!(tourist = %session.tourist_id, "login succeeded");

    match registry.login_tourist("P1234567", "wrong").await {
        Err(e) => info!(rejection = %e, "wrong password rejected"),
        Ok(_) => anyhow::bail!("wrong password was accepted"),
    }

    match registry
        .register_tourist(NewTourist {
            full_name: "Someone Else".into(),
            nationality: "Unknown".into(),
            passport: "P1234567".into(),
            phone: "+1 555 000 1111".into(),
            email: None,
            emergency_contact_name: "EC".into(),
            emergency_contact_phone: "+1 555 000 2222".into(),
            emergency_contact_email: "ec@example.com".into(),
            password: "other".into(),
        })
        .await
    {
        Err(e) => info!(rejection = %e, "duplicate passport rejected"),
        Ok(_) => anyhow::bail!("duplicate passport was accepted"),
    }

    let report = registry
        .send_emergency(session.tourist_id.as_str(), "sos", Some("North Gate"))
        .await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC: {} at {}", message, location);
    }));
}

fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
