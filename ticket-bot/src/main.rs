use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ticket_bot::bot::{Dialog, TicketBot};
use ticket_bot::config::Config;
use ticket_bot::conversation::{ConversationStore, ConversationStoreConfig};
use ticket_bot::railway::{TicketClient, TicketClientConfig};
use ticket_bot::search::{RetryConfig, SearchService};
use ticket_bot::stations::StationDirectory;

/// Train ticket search bot for Telegram.
#[derive(Parser, Debug)]
#[command(name = "ticket-bot")]
#[command(about = "Telegram bot for finding train tickets")]
#[command(version)]
struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "ticket_bot=info,teloxide=warn",
        1 => "ticket_bot=debug,teloxide=info",
        2 => "ticket_bot=trace,teloxide=debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    info!(
        environment = %config.environment,
        production = config.is_production(),
        language = %config.language,
        "starting ticket bot"
    );

    let mut client_config = TicketClientConfig::new().with_language(config.language);
    if let Some(base_url) = &config.base_url {
        client_config = client_config.with_base_url(base_url);
    }
    if let Some(csrf_url) = &config.csrf_url {
        client_config = client_config.with_csrf_url(csrf_url);
    }
    let client = match TicketClient::new(client_config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create ticket client");
            std::process::exit(1);
        }
    };

    let configured = config
        .credentials
        .as_ref()
        .map(|c| (c.token.as_str(), c.cookies.as_str()));
    // Searches refresh the token on demand, so this is not fatal.
    if let Err(e) = client.establish_credentials(configured).await {
        warn!(error = %e, "could not obtain railway credentials at startup");
    }

    let search = SearchService::new(
        client,
        Arc::new(StationDirectory::uzbekistan()),
        RetryConfig::default(),
    );
    let conversations = ConversationStore::new(&ConversationStoreConfig::default());
    let shutdown = CancellationToken::new();
    let dialog = Arc::new(Dialog::new(search, conversations, shutdown.clone()));

    let bot = match TicketBot::new(&config.telegram_token, dialog, shutdown) {
        Ok(bot) => bot,
        Err(e) => {
            error!(error = %e, "cannot start bot");
            std::process::exit(1);
        }
    };
    bot.run().await;
}
