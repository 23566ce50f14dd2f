//! # Menu Tags
//!
//! Every inline button that routes back into the bot carries one of these
//! tags as its callback data.

use std::fmt;
use std::str::FromStr;

use crate::errors::MenuTagError;

const CATALOG: &str = "menu_catalog";
const DELIVERY: &str = "menu_delivery";
const REVIEWS: &str = "menu_reviews";
const CONTACT_MANAGER: &str = "menu_contact_manager";
const PLACE_ORDER: &str = "menu_place_order";

const CATEGORY_PREFIX: &str = "category_";
const PRODUCT_PREFIX: &str = "product_";
const ADD_PRODUCT_PREFIX: &str = "add_product_";

/// Closed set of actions reachable from inline buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Catalog,
    Delivery,
    Reviews,
    ContactManager,
    PlaceOrder,
    /// Show the products of a category
    Category(i64),
    /// Show one product
    Product(i64),
    /// Pick the category for a product being added by the administrator
    AddProductTo(i64),
}

impl MenuAction {
    /// Callback data for a button that triggers this action
    pub fn callback_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Catalog => f.write_str(CATALOG),
            MenuAction::Delivery => f.write_str(DELIVERY),
            MenuAction::Reviews => f.write_str(REVIEWS),
            MenuAction::ContactManager => f.write_str(CONTACT_MANAGER),
            MenuAction::PlaceOrder => f.write_str(PLACE_ORDER),
            MenuAction::Category(id) => write!(f, "{CATEGORY_PREFIX}{id}"),
            MenuAction::Product(id) => write!(f, "{PRODUCT_PREFIX}{id}"),
            MenuAction::AddProductTo(id) => write!(f, "{ADD_PRODUCT_PREFIX}{id}"),
        }
    }
}

impl FromStr for MenuAction {
    type Err = MenuTagError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            CATALOG => return Ok(MenuAction::Catalog),
            DELIVERY => return Ok(MenuAction::Delivery),
            REVIEWS => return Ok(MenuAction::Reviews),
            CONTACT_MANAGER => return Ok(MenuAction::ContactManager),
            PLACE_ORDER => return Ok(MenuAction::PlaceOrder),
            _ => {}
        }

        let (constructor, raw_id): (fn(i64) -> MenuAction, &str) =
            if let Some(rest) = tag.strip_prefix(ADD_PRODUCT_PREFIX) {
                (MenuAction::AddProductTo, rest)
            } else if let Some(rest) = tag.strip_prefix(CATEGORY_PREFIX) {
                (MenuAction::Category, rest)
            } else if let Some(rest) = tag.strip_prefix(PRODUCT_PREFIX) {
                (MenuAction::Product, rest)
            } else {
                return Err(MenuTagError::Unknown(tag.to_string()));
            };

        raw_id
            .parse::<i64>()
            .map(constructor)
            .map_err(|_| MenuTagError::MalformedId(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_tags_parse() {
        assert_eq!("menu_catalog".parse::<MenuAction>(), Ok(MenuAction::Catalog));
        assert_eq!("menu_delivery".parse::<MenuAction>(), Ok(MenuAction::Delivery));
        assert_eq!("menu_reviews".parse::<MenuAction>(), Ok(MenuAction::Reviews));
        assert_eq!("menu_contact_manager".parse::<MenuAction>(), Ok(MenuAction::ContactManager));
        assert_eq!("menu_place_order".parse::<MenuAction>(), Ok(MenuAction::PlaceOrder));
    }

    #[test]
    fn test_identifier_tags_parse() {
        assert_eq!("category_3".parse::<MenuAction>(), Ok(MenuAction::Category(3)));
        assert_eq!("product_17".parse::<MenuAction>(), Ok(MenuAction::Product(17)));
        assert_eq!("add_product_5".parse::<MenuAction>(), Ok(MenuAction::AddProductTo(5)));
    }

    #[test]
    fn test_callback_data_matches_parser() {
        let action = MenuAction::AddProductTo(12);
        assert_eq!(action.callback_data(), "add_product_12");
        assert_eq!(action.callback_data().parse::<MenuAction>(), Ok(action));
    }

    #[test]
    fn test_bad_tags_are_rejected() {
        assert_eq!(
            "menu_unknown".parse::<MenuAction>(),
            Err(MenuTagError::Unknown("menu_unknown".to_string()))
        );
        assert_eq!(
            "category_abc".parse::<MenuAction>(),
            Err(MenuTagError::MalformedId("category_abc".to_string()))
        );
        assert!("product_".parse::<MenuAction>().is_err());
    }
}
