//! Administrator dialogue module for handling conversation state with users.

use serde::{Deserialize, Serialize};

/// Text the administrator owes the bot after a single-shot command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingInput {
    /// `/add_category`: the name of the new category
    NewCategoryName,
    /// `/delete_category`: the ID of the category to remove
    CategoryIdToDelete,
    /// `/delete_product`: the ID of the product to remove
    ProductIdToDelete,
}

/// Represents the conversation state of the administrator
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminDialogueState {
    #[default]
    Idle,
    /// `/add_product` was sent, waiting for a category button
    ChoosingCategory,
    AwaitingName {
        category_id: i64,
    },
    AwaitingDescription {
        category_id: i64,
        name: String,
    },
    AwaitingPhoto {
        category_id: i64,
        name: String,
        description: String,
    },
    AwaitingInput(PendingInput),
}

impl AdminDialogueState {
    pub fn is_idle(&self) -> bool {
        matches!(self, AdminDialogueState::Idle)
    }
}

/// Parses a catalog identifier typed by the administrator
pub fn parse_entity_id(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_parsing() {
        assert_eq!(parse_entity_id("42"), Some(42));
        assert_eq!(parse_entity_id("  9999 \n"), Some(9999));
        assert_eq!(parse_entity_id("forty-two"), None);
        assert_eq!(parse_entity_id(""), None);
    }

    #[test]
    fn test_default_state_is_idle() {
        assert!(AdminDialogueState::default().is_idle());
        assert!(!AdminDialogueState::ChoosingCategory.is_idle());
    }
}
