//! Slash commands understood by the bot

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::UserId;
use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::dialogue::PendingInput;

use super::reply::{send_replies, Reply};
use super::{dialogue_manager, menu_router, AppContext, HandlerResult};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Store commands:")]
pub enum Command {
    #[command(description = "open the store menu")]
    Start,
    #[command(description = "add a product to a category (administrator)")]
    AddProduct,
    #[command(description = "delete a product by ID (administrator)")]
    DeleteProduct,
    #[command(description = "create a category (administrator)")]
    AddCategory,
    #[command(description = "delete a category and its products (administrator)")]
    DeleteCategory,
}

/// Compute the replies for a command sent by `user_id`
pub async fn handle_command(ctx: &AppContext, user_id: UserId, command: Command) -> Result<Vec<Reply>> {
    match command {
        Command::Start => Ok(menu_router::render_start(&ctx.config)),
        Command::AddProduct => dialogue_manager::start_add_product(ctx, user_id).await,
        Command::DeleteProduct => {
            dialogue_manager::start_pending_input(ctx, user_id, PendingInput::ProductIdToDelete).await
        }
        Command::AddCategory => {
            dialogue_manager::start_pending_input(ctx, user_id, PendingInput::NewCategoryName).await
        }
        Command::DeleteCategory => {
            dialogue_manager::start_pending_input(ctx, user_id, PendingInput::CategoryIdToDelete).await
        }
    }
}

pub async fn command_handler(bot: Bot, msg: Message, command: Command, ctx: AppContext) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = %msg.chat.id, "Ignoring command without a sender");
        return Ok(());
    };
    debug!(user_id = %user.id, command = ?command, "Received command");

    let replies = handle_command(&ctx, user.id, command).await?;
    send_replies(&bot, msg.chat.id, replies).await
}
