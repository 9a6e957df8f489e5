//! `cms-session`: inspect and drive the dashboard session from a terminal.
//!
//! ```text
//! cms-session peek <TOKEN>
//! cms-session login <TOKEN>
//! cms-session nav
//! cms-session watch --idle-secs 60
//! cms-session logout
//! ```
//!
//! The credential lives in a JSON file store (`--store`), standing in for the
//! browser's local storage. Nothing here verifies signatures.

use anyhow::Context;
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use cms_auth::session::{
    peek_unverified_claims, ClientSettings, CredentialStore, EventKind, EventTarget, FileStore,
    Mounted, NavigationRenderer, SessionHost, SessionWatchdog,
};
use cms_auth::telemetry::{get_subscriber, init_subscriber};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Notify;

#[derive(Parser, Debug)]
#[command(
    name = "cms-session",
    version,
    about = "Inspect and drive the CMS dashboard session"
)]
struct Cli {
    /// Credential store file
    #[arg(long, env = "CMS_SESSION_STORE", default_value = ".cms-session.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the unverified claims of a token
    Peek {
        token: String,
    },
    /// Save a token obtained elsewhere as the current credential
    Login {
        token: String,
    },
    /// Render the dashboard navigation for the stored credential
    Nav,
    /// Watch for inactivity; every line on stdin counts as a key press
    Watch {
        /// Idle window before the session expires
        #[arg(long, default_value_t = 45 * 60)]
        idle_secs: u64,
    },
    /// Erase the stored credential
    Logout,
}

/// Prints what a browser would show and wakes `watch` on navigation.
struct ConsoleHost {
    navigated: Notify,
}

impl SessionHost for ConsoleHost {
    fn navigate(&self, path: &str) {
        println!("-> {}", path);
        self.navigated.notify_one();
    }

    fn alert(&self, message: &str) {
        println!("[!] {}", message);
    }
}

fn console_host() -> Arc<ConsoleHost> {
    Arc::new(ConsoleHost {
        navigated: Notify::new(),
    })
}

fn peek(token: &str, settings: &ClientSettings) -> anyhow::Result<()> {
    let claims = peek_unverified_claims(token).context("token could not be decoded")?;

    println!("email:      {}", claims.email);
    if let Some(sub) = &claims.sub {
        println!("subject:    {}", sub);
    }
    if let Some(at) = claims.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single()) {
        println!("expires:    {} (not verified)", at.to_rfc3339());
    }
    println!(
        "privileged: {}",
        if claims.email == settings.privileged_identity {
            "yes"
        } else {
            "no"
        }
    );
    Ok(())
}

async fn watch(
    settings: ClientSettings,
    store: Arc<dyn CredentialStore>,
    host: Arc<ConsoleHost>,
) -> anyhow::Result<()> {
    let events = EventTarget::new();
    let watchdog = match SessionWatchdog::mount(&settings, store, host.clone(), &events)? {
        Mounted::Watching(watchdog) => watchdog,
        Mounted::RedirectedToLogin => return Ok(()),
    };
    println!(
        "watching, session expires after {}s without input",
        settings.idle_timeout.as_secs()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = host.navigated.notified() => break,
            line = lines.next_line() => match line.context("failed to read stdin")? {
                Some(_) => {
                    events.dispatch(EventKind::KeyPress);
                }
                None => break,
            },
        }
    }

    watchdog.unmount();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_subscriber(get_subscriber(
        "cms-session".into(),
        "warn".into(),
        std::io::stderr,
    ));

    let mut settings = ClientSettings::default();
    let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(&cli.store));

    match cli.command {
        Command::Peek { token } => peek(&token, &settings)?,
        Command::Login { token } => {
            if token.trim().is_empty() {
                anyhow::bail!("refusing to store a blank token");
            }
            store
                .set(&settings.storage_key, token.trim())
                .with_context(|| format!("failed to write {}", cli.store.display()))?;
            println!("credential stored in {}", cli.store.display());
        }
        Command::Nav => {
            let navigation = NavigationRenderer::new(settings, store, console_host()).render();
            for entry in &navigation.entries {
                println!("{:<14} {}", entry.label, entry.path);
            }
        }
        Command::Watch { idle_secs } => {
            settings.idle_timeout = Duration::from_secs(idle_secs);
            watch(settings, store, console_host()).await?;
        }
        Command::Logout => NavigationRenderer::new(settings, store, console_host()).logout(),
    }

    Ok(())
}
