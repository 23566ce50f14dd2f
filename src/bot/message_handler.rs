//! Message Handler module for processing incoming Telegram messages

use teloxide::prelude::*;
use tracing::debug;

use crate::localization::t;

use super::dialogue_manager::{handle_admin_input, IncomingContent};
use super::reply::{send_replies, Reply};
use super::{AppContext, HandlerResult};

/// Reduce a message to the content the dialogue flows understand
pub fn classify_message(msg: &Message) -> IncomingContent {
    if let Some(text) = msg.text() {
        return IncomingContent::Text(text.to_string());
    }

    if let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) {
        return IncomingContent::Photo(largest_photo.file.id.0.clone());
    }

    if let Some(doc) = msg.document() {
        let is_image = doc
            .mime_type
            .as_ref()
            .is_some_and(|mime_type| mime_type.to_string().starts_with("image/"));
        if is_image {
            return IncomingContent::ImageDocument(doc.file.id.0.clone());
        }
        debug!(chat_id = %msg.chat.id, "Received non-image document");
    }

    IncomingContent::Other
}

pub async fn message_handler(bot: Bot, msg: Message, ctx: AppContext) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = %msg.chat.id, "Ignoring message without a sender");
        return Ok(());
    };

    let content = classify_message(&msg);
    let replies = match handle_admin_input(&ctx, &bot, user.id, content).await? {
        Some(replies) => replies,
        None => {
            debug!(user_id = %user.id, "Message outside of any dialogue");
            vec![Reply::text(t("unknown-input"))]
        }
    };

    send_replies(&bot, msg.chat.id, replies).await
}
