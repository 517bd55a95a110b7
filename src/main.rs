//! # Sauna Bot Main Entry Point
//!
//! Initializes logging, loads configuration, discovers sauna ids when
//! needed, sets up the database and runs the Telegram bot.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sauna_bot::bot::dispatcher::CommandDispatcher;
use sauna_bot::bot::handlers::BotHandler;
use sauna_bot::config::Config;
use sauna_bot::database::connection::DatabaseManager;
use sauna_bot::database::store::SqliteUserConfigStore;
use sauna_bot::services::health::HealthService;
use sauna_bot::services::hoas::HoasClient;
use sauna_bot::services::saunas::{run_discovery, SaunaConfigDocument, SaunaTable, DEFAULT_SAUNA};
use sauna_bot::utils::datetime::{Clock, SystemClock};

/// Telegram bot for reserving saunas and stuff
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Find view and reservation ids from hoas site. Makes multiple requests to site
    #[arg(long)]
    create_config: bool,

    /// Path to the bot configuration file
    #[arg(long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sauna_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load(&cli.config)?;

    info!("Starting Sauna Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, Accounts: {}",
        config.database_url,
        config.http_port,
        config.accounts.len()
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let portal = Arc::new(HoasClient::new(
        &config.portal_url,
        config.accounts.clone(),
        clock.clone(),
    )?);

    let discovered = run_discovery(cli.create_config, &config.sauna_config_path, portal.as_ref())
        .await
        .map_err(|e| anyhow!("Could not create '{}': {}", config.sauna_config_path, e))?;
    if let Some(confirmation) = discovered {
        println!("{confirmation}");
        return Ok(());
    }

    let document = SaunaConfigDocument::load(&config.sauna_config_path)
        .map_err(|e| anyhow!("Could not read '{}': {}", config.sauna_config_path, e))?;
    let saunas = SaunaTable::build(&document)?;
    if !saunas.contains(DEFAULT_SAUNA) {
        return Err(anyhow!(
            "'{}' has no default sauna '{}'",
            config.sauna_config_path,
            DEFAULT_SAUNA
        ));
    }
    info!("Loaded {} saunas: {:?}", saunas.len(), saunas.letters());

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    let store = Arc::new(SqliteUserConfigStore::new(db_arc.as_ref().clone()));
    let sauna_count = saunas.len();
    let dispatcher = Arc::new(CommandDispatcher::new(
        store,
        portal,
        saunas,
        clock,
    ));

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(dispatcher);

    let health_service = HealthService::new(db_arc.clone(), sauna_count);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        info!("Listening...");
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    info!("Application stopped");
    Ok(())
}
