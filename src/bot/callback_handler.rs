//! Callback Handler module for processing inline keyboard callback queries

use std::fmt::Display;

use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error, warn};

use crate::menu::MenuAction;

use super::menu_router::route_callback;
use super::reply::send_replies;
use super::{AppContext, HandlerResult};

/// Handle callback queries from inline keyboards
pub async fn callback_handler(bot: Bot, q: CallbackQuery, ctx: AppContext) -> HandlerResult {
    let user_id = q.from.id;
    let data = q.data.as_deref().unwrap_or("");
    debug!(user_id = %user_id, data, "Received callback query");

    let result = match data.parse::<MenuAction>() {
        Ok(action) => match route_callback(&ctx, user_id, action).await {
            Ok(replies) => send_replies(&bot, ChatId::from(user_id), replies).await,
            Err(e) => Err(e),
        },
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Ignoring callback with unknown data");
            Ok(())
        }
    };

    // Answer the callback query to remove the loading state
    let answered = bot.answer_callback_query(q.id.clone()).await;
    settle_callback(user_id, result, answered)
}

/// Report the handling outcome, logging a failed answer instead of masking it
fn settle_callback<T, E: Display>(
    user_id: UserId,
    result: HandlerResult,
    answered: Result<T, E>,
) -> HandlerResult {
    if let Err(e) = answered {
        error!(user_id = %user_id, error = %e, "Failed to answer callback query");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_answer_keeps_handler_error() {
        let result = settle_callback(
            UserId(1),
            Err(anyhow::anyhow!("send failed")),
            Err::<(), _>("answer failed"),
        );
        assert_eq!(result.unwrap_err().to_string(), "send failed");
    }

    #[test]
    fn test_failed_answer_does_not_fail_handled_callback() {
        let result = settle_callback(UserId(1), Ok(()), Err::<(), _>("answer failed"));
        assert!(result.is_ok());
    }
}
