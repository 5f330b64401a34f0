use std::net::SocketAddr;

use anyhow::Context;
use teloxide::Bot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linear_relay::config::RelayConfig;
use linear_relay::notify::TelegramNotifier;
use linear_relay::notify::commands::run_commands;
use linear_relay::server::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linear_relay=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env().context("loading configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let bot = Bot::new(config.bot_token.clone());
    if config.bot_commands {
        tokio::spawn(run_commands(bot.clone()));
    }

    let notifier = TelegramNotifier::new(bot, config.chat.clone());
    let app = build_router(AppState::new(config.verifier(), notifier));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(
        addr = %config.bind_addr,
        chat = %config.chat,
        allowlist = config.ip_allowlist,
        "listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("shutting down");
    })
    .await
    .context("serving")?;

    Ok(())
}
