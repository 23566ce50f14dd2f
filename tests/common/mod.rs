#![allow(dead_code)]

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use teloxide::types::{InlineKeyboardButtonKind, UserId};

use storefront_bot::bot::dialogue_manager::FileResolver;
use storefront_bot::bot::reply::Reply;
use storefront_bot::bot::AppContext;
use storefront_bot::config::Config;
use storefront_bot::db::init_database_schema;
use storefront_bot::session::SessionStore;

pub const ADMIN: UserId = UserId(1000);
pub const CUSTOMER: UserId = UserId(2000);

pub async fn setup_context() -> Result<AppContext> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    init_database_schema(&pool).await?;

    let config = Config::from_lookup(|key| match key {
        "TELEGRAM_BOT_TOKEN" => Some("123456:TEST".to_string()),
        "ADMIN_USER_ID" => Some(ADMIN.0.to_string()),
        _ => None,
    })?;

    Ok(AppContext::new(
        pool,
        Arc::new(config),
        SessionStore::new(Duration::from_secs(600)),
    ))
}

/// Resolves every document to a predictable storage path
pub struct StubResolver;

impl FileResolver for StubResolver {
    async fn resolve_path(&self, file_id: &str) -> Result<String> {
        Ok(format!("documents/{file_id}.jpg"))
    }
}

/// Button labels of a reply, row by row
pub fn button_labels(reply: &Reply) -> Vec<String> {
    reply
        .keyboard()
        .map(|markup| {
            markup
                .inline_keyboard
                .iter()
                .flatten()
                .map(|button| button.text.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Callback data of every callback button in a reply
pub fn callback_data(reply: &Reply) -> Vec<String> {
    reply
        .keyboard()
        .map(|markup| {
            markup
                .inline_keyboard
                .iter()
                .flatten()
                .filter_map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
