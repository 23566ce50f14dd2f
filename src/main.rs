use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing::info;

use storefront_bot::bot::{self, AppContext};
use storefront_bot::config::Config;
use storefront_bot::db;
use storefront_bot::logging::init_tracing;
use storefront_bot::session::SessionStore;

const SESSION_REAP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.log_format);
    info!("Starting storefront bot");

    let pool = db::open_database(&config.database_path).await?;
    db::init_database_schema(&pool).await?;

    let sessions = SessionStore::new(config.session_ttl);
    sessions.spawn_reaper(SESSION_REAP_INTERVAL);
    info!(session_ttl_secs = sessions.ttl().as_secs(), "Session store ready");

    let bot = Bot::new(config.bot_token.clone());

    // Updates queued while the bot was offline are dropped
    bot.delete_webhook().drop_pending_updates(true).await?;

    let ctx = AppContext::new(pool, Arc::new(config), sessions);

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
