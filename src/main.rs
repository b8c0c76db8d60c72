// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pchome_dns::constants::{
    DEFAULT_LOGIN_URL, DEFAULT_LOGOUT_URL, DEFAULT_MANAGE_URL, DEFAULT_MIRROR_PATH,
};
use pchome_dns::managers::{AccountService, DnssecManager, NameServerManager, ZoneManager};
use pchome_dns::mirror::MirrorStore;
use pchome_dns::panel::{PanelClient, PanelEndpoints};
use pchome_dns::zone::DnssecRecord;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Manage name-server and DNSSEC records on the PChome domain panel.
#[derive(Debug, Parser)]
#[command(name = "pchome-dns", version, about)]
struct Cli {
    /// Path of the local mirror file
    #[arg(long, global = true, env = "PCHOME_MIRROR", default_value = DEFAULT_MIRROR_PATH)]
    mirror: PathBuf,

    /// Login form URL
    #[arg(long, global = true, env = "PCHOME_LOGIN_URL", default_value = DEFAULT_LOGIN_URL, hide = true)]
    login_url: String,

    /// Logout URL
    #[arg(long, global = true, env = "PCHOME_LOGOUT_URL", default_value = DEFAULT_LOGOUT_URL, hide = true)]
    logout_url: String,

    /// Base URL of the domain management pages
    #[arg(long, global = true, env = "PCHOME_MANAGE_URL", default_value = DEFAULT_MANAGE_URL, hide = true)]
    manage_url: String,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in, sync every zone and create the mirror
    Init {
        /// Account email (prompted if absent)
        #[arg(long, env = "PCHOME_EMAIL")]
        email: Option<String>,
        /// Account password (prompted if absent)
        #[arg(long, env = "PCHOME_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Re-sync every zone into the mirror
    Refresh,
    /// List the zones on the account
    Zones,
    /// Name-server records
    Ns {
        #[command(subcommand)]
        action: NsAction,
    },
    /// DNSSEC records
    Dnssec {
        #[command(subcommand)]
        action: DnssecAction,
    },
    /// Print the mirror with the password redacted
    Show,
    /// Delete the mirror file
    Remove,
    /// End the panel session
    Logout,
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
enum NsAction {
    /// List a zone's name servers from the panel
    List { zone: String },
    /// Add a name server
    Add { zone: String, host: String, ip: String },
    /// Change a name server's address
    Update { zone: String, host: String, ip: String },
    /// Remove a name server
    Delete { zone: String, host: String, ip: String },
}

#[derive(Debug, Subcommand)]
enum DnssecAction {
    /// List a zone's DNSSEC records from the panel
    List { zone: String },
    /// Add a DNSSEC record
    Add {
        zone: String,
        key_tag: u16,
        algorithm: u8,
        digest: String,
    },
    /// Replace a DNSSEC record
    Update {
        zone: String,
        key_tag: u16,
        algorithm: u8,
        digest: String,
        new_key_tag: u16,
        new_algorithm: u8,
        new_digest: String,
    },
    /// Remove a DNSSEC record
    Delete {
        zone: String,
        key_tag: u16,
        algorithm: u8,
        digest: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Every panel call is awaited in turn; one thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(cli))
}

/// Install the tracing subscriber.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT=json`. Logs go
/// to stderr so command output on stdout stays clean.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    debug!("Logging initialized");
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        mirror,
        login_url,
        logout_url,
        manage_url,
        timeout_secs,
        command,
    } = cli;

    let store = MirrorStore::new(mirror);
    let account = AccountService::new(&store);
    let build_panel = || -> Result<PanelClient> {
        let endpoints = PanelEndpoints::new(&login_url, &logout_url, &manage_url)
            .context("Invalid panel URL")?;
        let panel = PanelClient::with_timeout(endpoints, timeout_secs.map(Duration::from_secs))?;
        Ok(panel)
    };

    match command {
        Command::Show => show(&store),
        Command::Remove => {
            account.remove()?;
            println!("Removed {}", store.path().display());
            Ok(())
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pchome-dns", &mut io::stdout());
            Ok(())
        }
        Command::Init { email, password } => {
            let email = match email {
                Some(email) => email,
                None => prompt("Paste your email here: ")?,
            };
            let password = match password {
                Some(password) => password,
                None => prompt("Paste your password here: ")?,
            };

            let mut panel = build_panel()?;
            let outcome = account.init(&mut panel, &email, &password).await;
            end_session(&mut panel).await;

            let config = outcome.context("First-run setup failed")?;
            println!(
                "Saved {} zones to {}",
                config.zones.len(),
                store.path().display()
            );
            Ok(())
        }
        command => {
            let mut panel = build_panel()?;
            account
                .login(&mut panel)
                .await
                .context("Could not log in with the stored credentials")?;

            let outcome = run_with_session(command, &mut panel, &store).await;
            end_session(&mut panel).await;
            outcome
        }
    }
}

async fn run_with_session(
    command: Command,
    panel: &mut PanelClient,
    store: &MirrorStore,
) -> Result<()> {
    match command {
        Command::Refresh => {
            let config = AccountService::new(store).refresh(panel).await?;
            println!("Refreshed {} zones", config.zones.len());
        }
        Command::Zones => {
            for zone in ZoneManager::new(panel).list().await? {
                println!("{zone}");
            }
        }
        Command::Ns { action } => {
            let manager = NameServerManager::new(panel, store);
            let records = match action {
                NsAction::List { zone } => manager.list(&zone).await?,
                NsAction::Add { zone, host, ip } => manager.add(&zone, &host, &ip).await?,
                NsAction::Update { zone, host, ip } => manager.update(&zone, &host, &ip).await?,
                NsAction::Delete { zone, host, ip } => manager.delete(&zone, &host, &ip).await?,
            };
            for (host, ip) in &records {
                println!("{host}\t{ip}");
            }
        }
        Command::Dnssec { action } => {
            let manager = DnssecManager::new(panel, store);
            let records = match action {
                DnssecAction::List { zone } => manager.list(&zone).await?,
                DnssecAction::Add {
                    zone,
                    key_tag,
                    algorithm,
                    digest,
                } => {
                    manager
                        .add(&zone, DnssecRecord::new(key_tag, algorithm, digest))
                        .await?
                }
                DnssecAction::Update {
                    zone,
                    key_tag,
                    algorithm,
                    digest,
                    new_key_tag,
                    new_algorithm,
                    new_digest,
                } => {
                    let old = DnssecRecord::new(key_tag, algorithm, digest);
                    let new = DnssecRecord::new(new_key_tag, new_algorithm, new_digest);
                    manager.update(&zone, &old, new).await?
                }
                DnssecAction::Delete {
                    zone,
                    key_tag,
                    algorithm,
                    digest,
                } => {
                    manager
                        .delete(&zone, &DnssecRecord::new(key_tag, algorithm, digest))
                        .await?
                }
            };
            for record in &records {
                println!("{}\t{}\t{}", record.key_tag, record.algorithm, record.digest);
            }
        }
        Command::Logout => {
            AccountService::new(store).logout(panel).await?;
            println!("Logged out");
        }
        Command::Init { .. } | Command::Show | Command::Remove | Command::Completions { .. } => {
            anyhow::bail!("this command does not use a panel session");
        }
    }
    Ok(())
}

/// Log out if a session is open. Failure is logged, not returned.
async fn end_session(panel: &mut PanelClient) {
    if !panel.is_authenticated() {
        return;
    }
    if let Err(e) = panel.logout().await {
        warn!(error = %e, "Logout failed");
    }
}

fn show(store: &MirrorStore) -> Result<()> {
    let mut config = store.load()?;
    config.password = "********".to_string();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}
