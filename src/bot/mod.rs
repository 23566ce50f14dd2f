//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `commands`: Slash commands and their handler
//! - `message_handler`: Handles incoming text, photo, and document messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `menu_router`: Renders the store screens for each menu action
//! - `dialogue_manager`: Administrator flows and their state transitions
//! - `ui_builder`: Creates keyboards and formats messages
//! - `reply`: Outbound messages and delivery

use std::sync::Arc;

use sqlx::SqlitePool;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::config::Config;
use crate::session::SessionStore;

pub mod callback_handler;
pub mod commands;
pub mod dialogue_manager;
pub mod menu_router;
pub mod message_handler;
pub mod reply;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use commands::{command_handler, Command};
pub use message_handler::message_handler;

pub type HandlerResult = anyhow::Result<()>;

/// Shared dependencies handed to every handler
#[derive(Clone)]
pub struct AppContext {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub sessions: SessionStore,
}

impl AppContext {
    pub fn new(pool: SqlitePool, config: Arc<Config>, sessions: SessionStore) -> Self {
        Self {
            pool,
            config,
            sessions,
        }
    }
}

/// Handler tree: commands first, then any other message, then button presses
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}
