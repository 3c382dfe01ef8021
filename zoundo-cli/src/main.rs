// zoundo-cli/src/main.rs
mod commands;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{NotificationsCommands, RequestArgs, TracksCommands};
use output::{print_response, print_warning, ErrorResponse, ExitCode, OutputFormat, Response};
use std::path::PathBuf;
use tracing::warn;
use zoundo_client::{ApiError, Config, ZoundoClient};

#[derive(Parser)]
#[command(name = "zoundo")]
#[command(about = "A command-line client for the Zoundo API", long_about = None)]
struct Cli {
    /// More logging (-v info, -vv request tracing)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Force JSON output
    #[arg(long, global = true, conflicts_with = "human")]
    json: bool,
    /// Force human-readable output
    #[arg(long, global = true)]
    human: bool,
    /// API base URL [default: from config]
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Language for server messages [default: from config]
    #[arg(long, global = true)]
    lang: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a raw request to any endpoint
    Request(RequestArgs),
    /// Log in and remember the token
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the current user
    Me,
    /// Track operations
    #[command(subcommand)]
    Tracks(TracksCommands),
    /// Notification operations
    #[command(subcommand)]
    Notifications(NotificationsCommands),
    /// Upload a file as an asset
    Upload {
        path: PathBuf,
        /// Send inline as base64 JSON instead of multipart
        #[arg(long)]
        base64: bool,
    },
}

impl Cli {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.human {
            OutputFormat::Human
        } else {
            OutputFormat::Auto
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = cli.format();

    let code = match run(cli, format).await {
        Ok(()) => ExitCode::Success,
        Err(err) => report(&err, format),
    };
    std::process::exit(code.code());
}

async fn run(cli: Cli, format: OutputFormat) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    config.debug |= cli.verbose >= 2;

    logging::init(cli.verbose, config.debug);

    let client = ZoundoClient::new(&config)?;
    client.api().set_auth_error_handler(|| {
        if let Err(e) = Config::save_token(None) {
            warn!(error = %e, "failed to clear saved token");
        }
        print_warning("Session expired or invalid. Run `zoundo login` to sign in again.");
    });

    match cli.command {
        Commands::Request(args) => commands::handle_request(&client, args, format).await,
        Commands::Login { email } => commands::handle_login(&client, email, format).await,
        Commands::Logout => commands::handle_logout(&client, format),
        Commands::Me => commands::handle_me(&client, format).await,
        Commands::Tracks(cmd) => commands::handle_tracks(&client, cmd, format).await,
        Commands::Notifications(cmd) => {
            commands::handle_notifications(&client, cmd, format).await
        }
        Commands::Upload { path, base64 } => {
            commands::handle_upload(&client, &path, base64, format).await
        }
    }
}

/// Print the failure envelope and pick the exit code
fn report(err: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let (error, code) = match err.downcast_ref::<ApiError>() {
        Some(api_err) => (ErrorResponse::from_api(api_err), ExitCode::for_error(api_err)),
        None => (ErrorResponse::other(format!("{:#}", err)), ExitCode::PermanentError),
    };
    print_response(&Response::<()>::error(error), format);
    code
}
