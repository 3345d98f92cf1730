//! Feedback Relay CLI - Configuration checks and Slack smoke tests.
//!
//! # Usage
//!
//! ```bash
//! # Load the relay configuration and report what was found
//! relay-cli check-config
//!
//! # Post a plain text message to the feedback channel
//! relay-cli send-test
//!
//! # Post a custom message to another channel
//! relay-cli send-test -c C0123456789 -t "Hello from relay-cli"
//! ```
//!
//! # Commands
//!
//! - `check-config` - Validate environment configuration
//! - `send-test` - Prove the bot token can post

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(author, version, about = "Feedback Relay CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration and report it
    CheckConfig,
    /// Post a test message to Slack
    SendTest {
        /// Channel ID (defaults to the configured feedback channel)
        #[arg(short, long)]
        channel: Option<String>,

        /// Message text
        #[arg(short, long, default_value = commands::slack::DEFAULT_TEST_TEXT)]
        text: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::CheckConfig => {
            commands::config::check()?;
        }
        Commands::SendTest { channel, text } => {
            commands::slack::send_test(channel.as_deref(), &text).await?;
        }
    }
    Ok(())
}
