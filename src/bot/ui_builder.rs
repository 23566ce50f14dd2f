//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::config::Config;
use crate::db::{Category, Product};
use crate::localization::t;
use crate::menu::MenuAction;

fn callback_row(label: impl Into<String>, action: MenuAction) -> Vec<InlineKeyboardButton> {
    vec![InlineKeyboardButton::callback(label, action.callback_data())]
}

/// Main store menu, also reused under the static info screens
pub fn main_menu_keyboard(config: &Config) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        callback_row(t("btn-catalog"), MenuAction::Catalog),
        callback_row(t("btn-delivery"), MenuAction::Delivery),
        callback_row(t("btn-reviews"), MenuAction::Reviews),
        vec![InlineKeyboardButton::url(
            t("btn-contact-manager"),
            config.manager_url.clone(),
        )],
        callback_row(t("btn-place-order"), MenuAction::PlaceOrder),
    ])
}

/// Single button leading out of the bot into a chat with the manager
pub fn contact_manager_keyboard(config: &Config) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        t("btn-contact-manager"),
        config.manager_url.clone(),
    )]])
}

/// Category button label; the administrator also sees the ID for `/delete_category`
pub fn category_label(category: &Category, is_admin: bool) -> String {
    if is_admin {
        format!("{} [id: {}]", category.name, category.id)
    } else {
        category.name.clone()
    }
}

/// One row per category, opening its product list
pub fn categories_keyboard(categories: &[Category], is_admin: bool) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        categories
            .iter()
            .map(|category| {
                callback_row(
                    category_label(category, is_admin),
                    MenuAction::Category(category.id),
                )
            })
            .collect::<Vec<_>>(),
    )
}

/// Category picker for the add-product flow
pub fn add_product_categories_keyboard(categories: &[Category]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        categories
            .iter()
            .map(|category| callback_row(category.name.clone(), MenuAction::AddProductTo(category.id)))
            .collect::<Vec<_>>(),
    )
}

/// One row per product, labelled with the product name
pub fn products_keyboard(products: &[Product]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        products
            .iter()
            .map(|product| callback_row(product.name.clone(), MenuAction::Product(product.id)))
            .collect::<Vec<_>>(),
    )
}

/// HTML caption for the product card.
///
/// Name and description come from the administrator and are not escaped.
pub fn format_product_caption(product: &Product) -> String {
    format!("<b>{}</b>\n\n{}", product.name, product.description)
}
