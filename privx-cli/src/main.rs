//! PrivX CLI Application
//!
//! Command-line interface for administering PrivX roles and trusted clients
//! (extenders, web-proxies and carriers) over the PrivX REST API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;

mod commands;
mod config;
mod utils;

use commands::*;
use config::{CliConfig, ConnectionArgs};

#[derive(Parser)]
#[command(name = "privx-cli")]
#[command(about = "PrivX administration - roles and trusted clients")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path [default: ~/.config/privx/cli.toml]
    #[arg(short, long, global = true, env = "PRIVX_CLI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Role management; lists all roles when no action is given
    Roles {
        #[command(subcommand)]
        action: Option<RoleAction>,
    },

    /// Trusted client, CA certificate and pre-configuration management
    TrustedClients {
        #[command(subcommand)]
        action: TrustedClientAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleAction {
    /// Create a role from a JSON file
    Create {
        /// Role definition (JSON)
        file: PathBuf,
    },

    /// Show a role
    Show {
        /// Role ID
        #[arg(short, long)]
        id: String,
    },

    /// Delete roles
    Delete {
        /// Role IDs, comma separated
        #[arg(short, long)]
        id: String,
    },

    /// Replace a role with the contents of a JSON file
    Update {
        /// Role definition (JSON)
        file: PathBuf,

        /// Role ID
        #[arg(short, long)]
        id: String,
    },

    /// List the members of roles
    Members {
        /// Role IDs, comma separated
        #[arg(short, long)]
        id: String,
    },

    /// Resolve role names to IDs
    Resolve {
        /// Role names, comma separated
        #[arg(short, long)]
        name: String,
    },

    /// Request temporary AWS credentials for a role
    AwsToken {
        /// Role ID
        #[arg(short, long)]
        id: String,

        /// MFA token code
        #[arg(short, long)]
        mfa: Option<String>,

        /// Token lifetime in minutes
        #[arg(long, default_value = "50")]
        ttl: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrustedClientAction {
    /// List trusted clients of one type
    List {
        /// Client type (extender, webproxy, carrier)
        #[arg(short = 't', long = "type")]
        client_type: String,
    },

    /// Show a trusted client
    Show {
        /// Trusted client ID
        #[arg(long)]
        client_id: String,
    },

    /// List CA certificates
    ListCa {
        /// CA type (extender, webproxy)
        #[arg(short = 't', long = "type")]
        client_type: String,

        /// Access group ID
        #[arg(short, long)]
        group_id: Option<String>,
    },

    /// Show a CA certificate
    ShowCa {
        /// CA certificate ID
        #[arg(long)]
        client_id: String,

        /// CA type (extender, webproxy)
        #[arg(short = 't', long = "type")]
        client_type: String,
    },

    /// Download the revocation list of a CA certificate
    ShowCrl {
        /// CA certificate ID
        #[arg(long)]
        client_id: String,

        /// CA type (extender, webproxy)
        #[arg(short = 't', long = "type")]
        client_type: String,

        /// Destination file
        #[arg(short, long)]
        name: PathBuf,
    },

    /// Download the pre-configuration of a trusted client
    PreConfig {
        /// Trusted client ID
        #[arg(long)]
        client_id: String,

        /// Client type (extender, webproxy, carrier)
        #[arg(short = 't', long = "type")]
        client_type: String,

        /// Destination file
        #[arg(short, long)]
        name: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env values must be visible before clap reads the environment
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Starting PrivX CLI with command: {:?}", cli.command);

    if let Err(e) = run_command(cli).await {
        error!("Command failed: {:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run_command(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?.with_overrides(&cli.connection);
    let api = privx_providers::PrivxClient::new(config.into_privx_config()?)?;

    match cli.command {
        Commands::Roles { action } => roles::run_role_action(&api, action).await,
        Commands::TrustedClients { action } => {
            trusted_clients::run_trusted_client_action(&api, action).await
        }
    }
}
