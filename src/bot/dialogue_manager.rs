//! Dialogue Manager module for the administrator flows
//!
//! `/add_product` walks through category, name, description and photo.
//! `/add_category`, `/delete_category` and `/delete_product` each wait for a
//! single text reply. All of this state lives in the administrator's own
//! session, so text from other users never feeds these flows.

use std::future::Future;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{FileId, UserId};
use tracing::{debug, info, warn};

use crate::db::{self, NewProduct};
use crate::dialogue::{parse_entity_id, AdminDialogueState, PendingInput};
use crate::localization::{t, t_args};

use super::reply::{PhotoRef, Reply};
use super::ui_builder::add_product_categories_keyboard;
use super::AppContext;

/// What an inbound message carried, reduced to what the flows care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingContent {
    Text(String),
    /// Content reference of the largest size of a photo attachment
    Photo(String),
    /// Content reference of a document with an `image/*` MIME type
    ImageDocument(String),
    Other,
}

/// Resolves an uploaded document to its storage path on the platform
pub trait FileResolver {
    fn resolve_path(&self, file_id: &str) -> impl Future<Output = Result<String>> + Send;
}

impl FileResolver for Bot {
    async fn resolve_path(&self, file_id: &str) -> Result<String> {
        let file = self.get_file(FileId(file_id.to_string())).await?;
        Ok(file.path)
    }
}

fn access_denied(user_id: UserId) -> Vec<Reply> {
    warn!(user_id = %user_id, "Rejected administrator command from non-administrator");
    vec![Reply::text(t("access-denied"))]
}

/// Handle `/add_product`: show the category picker and reset the flow
pub async fn start_add_product(ctx: &AppContext, user_id: UserId) -> Result<Vec<Reply>> {
    if !ctx.config.is_admin(user_id) {
        return Ok(access_denied(user_id));
    }

    let dialogue = ctx.sessions.dialogue(user_id);
    let categories = db::list_categories(&ctx.pool).await?;

    if categories.is_empty() {
        dialogue.exit().await;
        return Ok(vec![Reply::text(t("add-product-no-categories"))]);
    }

    dialogue.update(AdminDialogueState::ChoosingCategory).await;
    debug!(user_id = %user_id, categories = categories.len(), "Add-product flow started");

    Ok(vec![Reply::text(t("add-product-choose-category"))
        .with_keyboard(add_product_categories_keyboard(&categories))])
}

/// Handle `/add_category`, `/delete_category` and `/delete_product`
pub async fn start_pending_input(
    ctx: &AppContext,
    user_id: UserId,
    pending: PendingInput,
) -> Result<Vec<Reply>> {
    if !ctx.config.is_admin(user_id) {
        return Ok(access_denied(user_id));
    }

    ctx.sessions
        .dialogue(user_id)
        .update(AdminDialogueState::AwaitingInput(pending))
        .await;
    debug!(user_id = %user_id, pending = ?pending, "Waiting for administrator input");

    let prompt = match pending {
        PendingInput::NewCategoryName => "add-category-prompt",
        PendingInput::CategoryIdToDelete => "delete-category-prompt",
        PendingInput::ProductIdToDelete => "delete-product-prompt",
    };
    Ok(vec![Reply::text(t(prompt))])
}

/// Handle an `add_product_<id>` button press
pub async fn handle_category_choice(
    ctx: &AppContext,
    user_id: UserId,
    category_id: i64,
) -> Result<Vec<Reply>> {
    let dialogue = ctx.sessions.dialogue(user_id);

    if dialogue.get().await != AdminDialogueState::ChoosingCategory {
        debug!(user_id = %user_id, category_id, "Ignoring category choice outside the add-product flow");
        return Ok(Vec::new());
    }

    dialogue
        .update(AdminDialogueState::AwaitingName { category_id })
        .await;
    Ok(vec![Reply::text(t("add-product-name-prompt"))])
}

/// Feed a message into the user's active flow.
///
/// Returns `None` when the user has no flow in progress.
pub async fn handle_admin_input<R: FileResolver>(
    ctx: &AppContext,
    resolver: &R,
    user_id: UserId,
    content: IncomingContent,
) -> Result<Option<Vec<Reply>>> {
    let dialogue = ctx.sessions.dialogue(user_id);
    let state = dialogue.get().await;
    debug!(user_id = %user_id, dialogue_state = ?state, "Routing message through dialogue");

    let replies = match (state, content) {
        (AdminDialogueState::Idle, _) => return Ok(None),

        (AdminDialogueState::ChoosingCategory, _) => {
            vec![Reply::text(t("add-product-choose-category"))]
        }

        (AdminDialogueState::AwaitingName { category_id }, IncomingContent::Text(name)) => {
            dialogue
                .update(AdminDialogueState::AwaitingDescription { category_id, name })
                .await;
            vec![Reply::text(t("add-product-description-prompt"))]
        }
        (AdminDialogueState::AwaitingName { .. }, _) => {
            vec![Reply::text(t("add-product-name-prompt"))]
        }

        (
            AdminDialogueState::AwaitingDescription { category_id, name },
            IncomingContent::Text(description),
        ) => {
            dialogue
                .update(AdminDialogueState::AwaitingPhoto {
                    category_id,
                    name,
                    description,
                })
                .await;
            vec![Reply::text(t("add-product-photo-prompt"))]
        }
        (AdminDialogueState::AwaitingDescription { .. }, _) => {
            vec![Reply::text(t("add-product-description-prompt"))]
        }

        (
            AdminDialogueState::AwaitingPhoto {
                category_id,
                name,
                description,
            },
            content,
        ) => {
            let photo = match content {
                IncomingContent::Photo(file_id) => PhotoRef::Attachment(file_id),
                IncomingContent::ImageDocument(file_id) => {
                    PhotoRef::StoragePath(resolver.resolve_path(&file_id).await?)
                }
                IncomingContent::Text(_) | IncomingContent::Other => {
                    // Stays in this state until a usable image arrives
                    return Ok(Some(vec![Reply::text(t("add-product-photo-retry"))]));
                }
            };

            let product = NewProduct {
                name,
                description,
                photo_url: Some(photo.as_stored().to_string()),
                category_id,
            };
            dialogue.exit().await;
            save_product(ctx, user_id, product).await?
        }

        (AdminDialogueState::AwaitingInput(pending), IncomingContent::Text(text)) => {
            dialogue.exit().await;
            apply_pending_input(ctx, pending, &text).await?
        }
        (AdminDialogueState::AwaitingInput(pending), _) => {
            debug!(user_id = %user_id, pending = ?pending, "Ignoring non-text reply to single-shot command");
            Vec::new()
        }
    };

    Ok(Some(replies))
}

async fn save_product(ctx: &AppContext, user_id: UserId, product: NewProduct) -> Result<Vec<Reply>> {
    // The category may have been deleted while the flow was running
    if db::read_category(&ctx.pool, product.category_id).await?.is_none() {
        warn!(user_id = %user_id, category_id = product.category_id, "Category vanished before the product was saved");
        let id = product.category_id.to_string();
        return Ok(vec![Reply::text(t_args(
            "add-product-category-missing",
            &[("id", id.as_str())],
        ))]);
    }

    let product_id = db::create_product(&ctx.pool, &product).await?;
    info!(user_id = %user_id, product_id, "Product added through dialogue");
    Ok(vec![Reply::text(t("add-product-success"))])
}

/// Perform the mutation a single-shot command was waiting for
pub async fn apply_pending_input(
    ctx: &AppContext,
    pending: PendingInput,
    text: &str,
) -> Result<Vec<Reply>> {
    let reply = match pending {
        PendingInput::NewCategoryName => {
            db::create_category(&ctx.pool, text).await?;
            t_args("add-category-success", &[("name", text)])
        }
        PendingInput::CategoryIdToDelete => {
            let Some(category_id) = parse_entity_id(text) else {
                warn!(input = text, "Category deletion received a non-numeric ID");
                return Ok(vec![Reply::text(t_args("invalid-id", &[("input", text)]))]);
            };
            let id = category_id.to_string();
            match db::delete_category_cascade(&ctx.pool, category_id).await? {
                Some(removed) => {
                    let count = removed.to_string();
                    t_args(
                        "delete-category-success",
                        &[("id", id.as_str()), ("count", count.as_str())],
                    )
                }
                None => t_args("delete-category-not-found", &[("id", id.as_str())]),
            }
        }
        PendingInput::ProductIdToDelete => {
            let Some(product_id) = parse_entity_id(text) else {
                warn!(input = text, "Product deletion received a non-numeric ID");
                return Ok(vec![Reply::text(t_args("invalid-id", &[("input", text)]))]);
            };
            let id = product_id.to_string();
            if db::delete_product(&ctx.pool, product_id).await? {
                t_args("delete-product-success", &[("id", id.as_str())])
            } else {
                t_args("delete-product-not-found", &[("id", id.as_str())])
            }
        }
    };

    Ok(vec![Reply::text(reply)])
}
