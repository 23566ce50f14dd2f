//! # Dialogue Tests
//!
//! End-to-end tests of the administrator flows against an in-memory store.

mod common;

use anyhow::Result;
use common::{callback_data, setup_context, StubResolver, ADMIN, CUSTOMER};

use storefront_bot::bot::commands::{handle_command, Command};
use storefront_bot::bot::dialogue_manager::{handle_admin_input, IncomingContent};
use storefront_bot::bot::menu_router::route_callback;
use storefront_bot::db;
use storefront_bot::dialogue::{AdminDialogueState, PendingInput};
use storefront_bot::localization::t;
use storefront_bot::menu::MenuAction;

fn text(value: &str) -> IncomingContent {
    IncomingContent::Text(value.to_string())
}

#[tokio::test]
async fn test_add_product_flow_with_photo_attachment() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;

    let replies = handle_command(&ctx, ADMIN, Command::AddProduct).await?;
    assert_eq!(replies.len(), 1);
    assert_eq!(callback_data(&replies[0]), vec![format!("add_product_{phones}")]);

    let replies = route_callback(&ctx, ADMIN, MenuAction::AddProductTo(phones)).await?;
    assert_eq!(replies[0].body(), t("add-product-name-prompt"));

    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, text("Pixel 8"))
        .await?
        .unwrap();
    assert_eq!(replies[0].body(), t("add-product-description-prompt"));

    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, text("128 GB, black"))
        .await?
        .unwrap();
    assert_eq!(replies[0].body(), t("add-product-photo-prompt"));

    let photo = IncomingContent::Photo("AgACAgIAAxkBAAIB".to_string());
    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, photo)
        .await?
        .unwrap();
    assert_eq!(replies[0].body(), t("add-product-success"));

    let products = db::list_products_in_category(&ctx.pool, phones).await?;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Pixel 8");
    assert_eq!(products[0].description, "128 GB, black");
    assert_eq!(products[0].photo_url.as_deref(), Some("AgACAgIAAxkBAAIB"));

    assert_eq!(ctx.sessions.get(ADMIN).await, AdminDialogueState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_image_document_is_stored_as_resolved_path() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;

    ctx.sessions
        .update(
            ADMIN,
            AdminDialogueState::AwaitingPhoto {
                category_id: phones,
                name: "Pixel 8".to_string(),
                description: "128 GB".to_string(),
            },
        )
        .await;

    let document = IncomingContent::ImageDocument("BQACAgIAAxkB".to_string());
    handle_admin_input(&ctx, &StubResolver, ADMIN, document).await?;

    let products = db::list_products_in_category(&ctx.pool, phones).await?;
    assert_eq!(
        products[0].photo_url.as_deref(),
        Some("documents/BQACAgIAAxkB.jpg")
    );
    Ok(())
}

#[tokio::test]
async fn test_photo_step_reprompts_until_an_image_arrives() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;
    let waiting = AdminDialogueState::AwaitingPhoto {
        category_id: phones,
        name: "Pixel 8".to_string(),
        description: "128 GB".to_string(),
    };
    ctx.sessions.update(ADMIN, waiting.clone()).await;

    for content in [text("here you go"), IncomingContent::Other] {
        let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, content)
            .await?
            .unwrap();
        assert_eq!(replies[0].body(), t("add-product-photo-retry"));
        assert_eq!(ctx.sessions.get(ADMIN).await, waiting);
    }

    assert_eq!(db::count_products_in_category(&ctx.pool, phones).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_product_is_not_saved_when_category_vanished() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;
    ctx.sessions
        .update(
            ADMIN,
            AdminDialogueState::AwaitingPhoto {
                category_id: phones,
                name: "Pixel 8".to_string(),
                description: "128 GB".to_string(),
            },
        )
        .await;
    db::delete_category_cascade(&ctx.pool, phones).await?;

    let photo = IncomingContent::Photo("AgACAgIAAxkBAAIB".to_string());
    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, photo)
        .await?
        .unwrap();

    assert!(replies[0].body().contains(&phones.to_string()));
    assert_eq!(db::count_products_in_category(&ctx.pool, phones).await?, 0);
    assert_eq!(ctx.sessions.get(ADMIN).await, AdminDialogueState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_add_product_restarts_from_category_choice() -> Result<()> {
    let ctx = setup_context().await?;
    db::create_category(&ctx.pool, "Phones").await?;
    ctx.sessions
        .update(ADMIN, AdminDialogueState::AwaitingName { category_id: 1 })
        .await;

    handle_command(&ctx, ADMIN, Command::AddProduct).await?;
    assert_eq!(
        ctx.sessions.get(ADMIN).await,
        AdminDialogueState::ChoosingCategory
    );
    Ok(())
}

#[tokio::test]
async fn test_add_product_without_categories_does_not_start() -> Result<()> {
    let ctx = setup_context().await?;

    let replies = handle_command(&ctx, ADMIN, Command::AddProduct).await?;
    assert_eq!(replies[0].body(), t("add-product-no-categories"));
    assert_eq!(ctx.sessions.get(ADMIN).await, AdminDialogueState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_category_button_outside_flow_is_ignored() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;

    let replies = route_callback(&ctx, ADMIN, MenuAction::AddProductTo(phones)).await?;
    assert!(replies.is_empty());
    assert_eq!(ctx.sessions.get(ADMIN).await, AdminDialogueState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_add_category_scenario() -> Result<()> {
    let ctx = setup_context().await?;

    let replies = handle_command(&ctx, ADMIN, Command::AddCategory).await?;
    assert_eq!(replies[0].body(), t("add-category-prompt"));

    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, text("Electronics"))
        .await?
        .unwrap();
    assert!(replies[0].body().contains("Electronics"));

    let categories = db::list_categories(&ctx.pool).await?;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Electronics");
    assert_eq!(ctx.sessions.get(ADMIN).await, AdminDialogueState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_delete_missing_product_scenario() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;
    db::create_product(
        &ctx.pool,
        &db::NewProduct {
            name: "Pixel 8".to_string(),
            description: "128 GB".to_string(),
            photo_url: None,
            category_id: phones,
        },
    )
    .await?;

    handle_command(&ctx, ADMIN, Command::DeleteProduct).await?;
    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, text("9999"))
        .await?
        .unwrap();

    assert!(replies[0].body().contains("9999"));
    assert_eq!(
        replies[0].body(),
        storefront_bot::localization::t_args("delete-product-not-found", &[("id", "9999")])
    );
    assert_eq!(db::count_products_in_category(&ctx.pool, phones).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_delete_category_removes_its_products() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;
    for name in ["Pixel 8", "iPhone 15"] {
        db::create_product(
            &ctx.pool,
            &db::NewProduct {
                name: name.to_string(),
                description: "new".to_string(),
                photo_url: Some("AgACAgIAAxkB".to_string()),
                category_id: phones,
            },
        )
        .await?;
    }

    handle_command(&ctx, ADMIN, Command::DeleteCategory).await?;
    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, text(&phones.to_string()))
        .await?
        .unwrap();

    assert!(replies[0].body().contains(&phones.to_string()));
    assert_eq!(db::count_products_in_category(&ctx.pool, phones).await?, 0);
    assert!(db::read_category(&ctx.pool, phones).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_id_cancels_deletion() -> Result<()> {
    let ctx = setup_context().await?;
    db::create_category(&ctx.pool, "Phones").await?;

    handle_command(&ctx, ADMIN, Command::DeleteCategory).await?;
    let replies = handle_admin_input(&ctx, &StubResolver, ADMIN, text("phones"))
        .await?
        .unwrap();

    assert!(replies[0].body().contains("phones"));
    assert_eq!(db::list_categories(&ctx.pool).await?.len(), 1);
    assert_eq!(ctx.sessions.get(ADMIN).await, AdminDialogueState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_non_admin_commands_are_refused_without_changes() -> Result<()> {
    let ctx = setup_context().await?;
    let phones = db::create_category(&ctx.pool, "Phones").await?;

    for command in [
        Command::AddProduct,
        Command::AddCategory,
        Command::DeleteCategory,
        Command::DeleteProduct,
    ] {
        let replies = handle_command(&ctx, CUSTOMER, command).await?;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].body(), t("access-denied"));
        assert_eq!(ctx.sessions.get(CUSTOMER).await, AdminDialogueState::Idle);
    }

    // Follow-up text from the customer is not treated as a command reply
    let outcome = handle_admin_input(&ctx, &StubResolver, CUSTOMER, text(&phones.to_string())).await?;
    assert!(outcome.is_none());
    assert!(db::read_category(&ctx.pool, phones).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_customer_text_does_not_consume_admin_prompt() -> Result<()> {
    let ctx = setup_context().await?;

    handle_command(&ctx, ADMIN, Command::AddCategory).await?;

    let outcome = handle_admin_input(&ctx, &StubResolver, CUSTOMER, text("Hello!")).await?;
    assert!(outcome.is_none());
    assert!(db::list_categories(&ctx.pool).await?.is_empty());
    assert_eq!(
        ctx.sessions.get(ADMIN).await,
        AdminDialogueState::AwaitingInput(PendingInput::NewCategoryName)
    );

    handle_admin_input(&ctx, &StubResolver, ADMIN, text("Watches")).await?;
    assert_eq!(db::list_categories(&ctx.pool).await?[0].name, "Watches");
    Ok(())
}

#[test]
fn test_dialogue_state_serialization() -> Result<()> {
    let state = AdminDialogueState::AwaitingPhoto {
        category_id: 3,
        name: "Pixel 8".to_string(),
        description: "128 GB".to_string(),
    };

    let json = serde_json::to_string(&state)?;
    let restored: AdminDialogueState = serde_json::from_str(&json)?;
    assert_eq!(restored, state);
    Ok(())
}
