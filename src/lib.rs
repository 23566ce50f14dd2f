//! # Storefront Telegram Bot
//!
//! A single-store catalog bot: customers browse categories and products and
//! read the delivery, payment and review information, while one configured
//! administrator manages the catalog through guided dialogues.

pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod errors;
pub mod localization;
pub mod logging;
pub mod menu;
pub mod session;
