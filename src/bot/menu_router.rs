//! Menu Router module: turns a menu action into the screen to show

use anyhow::Result;
use teloxide::types::UserId;
use tracing::debug;

use crate::config::Config;
use crate::db;
use crate::localization::{t, t_args};
use crate::menu::MenuAction;

use super::dialogue_manager;
use super::reply::{PhotoRef, Reply};
use super::ui_builder::{
    categories_keyboard, contact_manager_keyboard, format_product_caption, main_menu_keyboard,
    products_keyboard,
};
use super::AppContext;

/// Greeting with the main store menu
pub fn render_start(config: &Config) -> Vec<Reply> {
    vec![Reply::text(t("welcome")).with_keyboard(main_menu_keyboard(config))]
}

/// Dispatch a decoded button press
pub async fn route_callback(ctx: &AppContext, user_id: UserId, action: MenuAction) -> Result<Vec<Reply>> {
    debug!(user_id = %user_id, action = %action, "Routing menu action");

    match action {
        MenuAction::Catalog => render_catalog(ctx, user_id).await,
        MenuAction::Delivery => Ok(vec![
            Reply::html(t("delivery-text")).with_keyboard(main_menu_keyboard(&ctx.config))
        ]),
        MenuAction::Reviews => {
            let url = ctx.config.reviews_url.to_string();
            Ok(vec![Reply::html(t_args("reviews-text", &[("url", url.as_str())]))
                .with_keyboard(main_menu_keyboard(&ctx.config))])
        }
        MenuAction::ContactManager => Ok(vec![Reply::html(t("contact-manager-text"))
            .with_keyboard(contact_manager_keyboard(&ctx.config))]),
        MenuAction::PlaceOrder => Ok(vec![
            Reply::html(t("place-order-text")).with_keyboard(main_menu_keyboard(&ctx.config))
        ]),
        MenuAction::Category(category_id) => render_category(ctx, category_id).await,
        MenuAction::Product(product_id) => render_product(ctx, product_id).await,
        MenuAction::AddProductTo(category_id) => {
            dialogue_manager::handle_category_choice(ctx, user_id, category_id).await
        }
    }
}

async fn render_catalog(ctx: &AppContext, user_id: UserId) -> Result<Vec<Reply>> {
    let categories = db::list_categories(&ctx.pool).await?;

    if categories.is_empty() {
        return Ok(vec![Reply::text(t("catalog-empty"))]);
    }

    let is_admin = ctx.config.is_admin(user_id);
    let mut replies = Vec::with_capacity(2);
    if is_admin {
        replies.push(Reply::text(t("catalog-admin-note")));
    }
    replies.push(
        Reply::text(t("catalog-choose-category"))
            .with_keyboard(categories_keyboard(&categories, is_admin)),
    );
    Ok(replies)
}

async fn render_category(ctx: &AppContext, category_id: i64) -> Result<Vec<Reply>> {
    let products = db::list_products_in_category(&ctx.pool, category_id).await?;

    if products.is_empty() {
        return Ok(vec![Reply::text(t("category-empty"))]);
    }

    Ok(vec![
        Reply::text(t("category-choose-product")).with_keyboard(products_keyboard(&products))
    ])
}

async fn render_product(ctx: &AppContext, product_id: i64) -> Result<Vec<Reply>> {
    let Some(product) = db::read_product(&ctx.pool, product_id).await? else {
        return Ok(vec![Reply::text(t("product-not-found"))]);
    };

    let caption = format_product_caption(&product);
    let reply = match product.photo_url.as_deref() {
        Some(stored) => Reply::Photo {
            photo: PhotoRef::from_stored(stored),
            caption,
        },
        None => Reply::html(caption),
    };
    Ok(vec![reply])
}
