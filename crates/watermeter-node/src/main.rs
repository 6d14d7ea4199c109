//! Watermeter node provisioning tool.
//!
//! Boots the device context against a flash directory, then shows, changes
//! or resets the stored MQTT settings.
//!
//! # Usage
//!
//! ```text
//! watermeter-node [--flash-dir DIR] <COMMAND>
//!
//! Commands:
//!   show    Print the active configuration (password masked)
//!   set     Change one or more fields and save
//!   reset   Save the compiled-in defaults
//! ```
//!
//! The log level is controlled by `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use watermeter_core::ConfigField;
use watermeter_node::application::context::{BootConfig, DeviceContext};
use watermeter_node::application::persist_config::{ConfigStore, Filesystem};
use watermeter_node::infrastructure::storage::FlashDir;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Provision the MQTT settings stored on a watermeter node.
#[derive(Debug, Parser)]
#[command(name = "watermeter-node", version)]
struct Cli {
    /// Host directory that backs the device flash filesystem.
    #[arg(long, default_value = "flash", env = "WATERMETER_FLASH_DIR")]
    flash_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the active configuration.
    Show,
    /// Change one or more fields and save the configuration.
    Set {
        /// MQTT broker host name or address.
        #[arg(long)]
        server: Option<String>,
        /// MQTT username.
        #[arg(long)]
        username: Option<String>,
        /// MQTT password (stored in clear text).
        #[arg(long)]
        password: Option<String>,
    },
    /// Replace the stored configuration with the compiled-in defaults.
    Reset,
}

impl Command {
    /// Field changes requested by `set`, in document order.
    fn changes(&self) -> Vec<(ConfigField, &str)> {
        match self {
            Command::Set {
                server,
                username,
                password,
            } => [
                (ConfigField::ServerAddress, server),
                (ConfigField::Username, username),
                (ConfigField::Password, password),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .collect(),
            Command::Show | Command::Reset => Vec::new(),
        }
    }
}

/// Renders the configuration for the terminal, masking secrets.
fn render<F: Filesystem>(ctx: &DeviceContext<F>) -> String {
    ConfigField::ALL
        .into_iter()
        .map(|field| {
            let value = ctx.config().get(field);
            let shown = if field.is_secret() && !value.is_empty() {
                "********"
            } else {
                value
            };
            format!("{:<14} {shown}", field.key())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(flash_dir = %cli.flash_dir.display(), "watermeter node starting");

    let store = ConfigStore::new(FlashDir::new(&cli.flash_dir));
    let (mut ctx, outcome) = DeviceContext::boot(store);
    if let BootConfig::Fallback(e) = &outcome {
        // Refuse to overwrite a document we could not read.
        if !matches!(cli.command, Command::Show | Command::Reset) {
            anyhow::bail!("stored configuration is unreadable ({e}); run `reset` first");
        }
    }

    match &cli.command {
        Command::Show => {}
        Command::Set { .. } => {
            let changes = cli.command.changes();
            if changes.is_empty() {
                anyhow::bail!("nothing to set; pass --server, --username or --password");
            }
            for (field, value) in changes {
                ctx.update(field, value);
            }
            ctx.persist().context("failed to save configuration")?;
            info!("configuration saved");
        }
        Command::Reset => {
            ctx.reset();
            ctx.persist().context("failed to save default configuration")?;
            info!("configuration reset to defaults");
        }
    }

    println!("{}", render(&ctx));
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
