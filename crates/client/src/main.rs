//! Command-line view of the CashCompass alert panel.
//!
//! ```bash
//! # List active alerts (with unread badge count)
//! cashcompass-alerts list
//!
//! # Dismiss one alert for good
//! cashcompass-alerts dismiss <ALERT_HASH>
//!
//! # Bring every dismissed alert back
//! cashcompass-alerts reset -v
//! ```

use std::process::ExitCode;

use cashcompass_client::api::AlertsApi;
use cashcompass_client::config::ClientConfig;
use cashcompass_client::controller::AlertController;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cashcompass-alerts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Server base URL (overrides CASHCOMPASS_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token (overrides CASHCOMPASS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Request timeout in seconds (overrides CASHCOMPASS_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show active alerts
    List,
    /// Permanently dismiss an alert
    Dismiss {
        /// `alert_hash` as printed by `list`
        alert_hash: String,
    },
    /// Restore all dismissed alerts
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.url {
        config = ClientConfig::new(url, config.token, config.timeout_secs);
    }
    if cli.token.is_some() {
        config.token = cli.token;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    let api = match AlertsApi::new(&config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    let controller = AlertController::new(api);

    let outcome = match cli.command {
        Command::List => controller.refresh().await,
        Command::Dismiss { alert_hash } => match controller.refresh().await {
            Ok(()) => controller.dismiss(&alert_hash).await,
            Err(e) => Err(e),
        },
        Command::Reset => controller.reset_all().await,
    };

    println!("{}", controller.view());
    let badge = controller.badge();
    if badge.visible {
        println!("\nUnread: {}", badge.count);
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cashcompass_client={level},cashcompass_alerts={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
