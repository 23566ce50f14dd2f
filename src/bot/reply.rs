//! Outbound screens and how they are delivered

use anyhow::{Context, Result};
use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::{FileId, InlineKeyboardMarkup, InputFile, ParseMode};
use tracing::error;

/// Where a product photo lives on the messaging platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    /// Content reference of a photo attachment, re-sendable as is
    Attachment(String),
    /// Storage path of an uploaded document, fetched through the file URL
    StoragePath(String),
}

impl PhotoRef {
    /// Interpret a stored `photo_url` column value.
    ///
    /// Content references never contain `/`, storage paths always do.
    pub fn from_stored(raw: &str) -> Self {
        if raw.contains('/') {
            PhotoRef::StoragePath(raw.to_string())
        } else {
            PhotoRef::Attachment(raw.to_string())
        }
    }

    /// Value written to the `photo_url` column
    pub fn as_stored(&self) -> &str {
        match self {
            PhotoRef::Attachment(file_id) => file_id,
            PhotoRef::StoragePath(path) => path,
        }
    }

    pub fn input_file(&self, bot_token: &str) -> Result<InputFile> {
        match self {
            PhotoRef::Attachment(file_id) => Ok(InputFile::file_id(FileId(file_id.clone()))),
            PhotoRef::StoragePath(path) => {
                let url = Url::parse(&format!(
                    "https://api.telegram.org/file/bot{bot_token}/{path}"
                ))
                .context("Failed to build photo download URL")?;
                Ok(InputFile::url(url))
            }
        }
    }
}

/// One outbound message
#[derive(Debug, Clone)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
        html: bool,
    },
    Photo {
        photo: PhotoRef,
        caption: String,
    },
}

impl Reply {
    /// Plain text message without buttons
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
            html: false,
        }
    }

    /// HTML formatted message without buttons
    pub fn html(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
            html: true,
        }
    }

    /// Attach an inline keyboard; photos keep their caption only
    pub fn with_keyboard(self, markup: InlineKeyboardMarkup) -> Self {
        match self {
            Reply::Text { text, html, .. } => Reply::Text {
                text,
                keyboard: Some(markup),
                html,
            },
            photo => photo,
        }
    }

    /// Message text or photo caption
    pub fn body(&self) -> &str {
        match self {
            Reply::Text { text, .. } => text,
            Reply::Photo { caption, .. } => caption,
        }
    }

    pub fn keyboard(&self) -> Option<&InlineKeyboardMarkup> {
        match self {
            Reply::Text { keyboard, .. } => keyboard.as_ref(),
            Reply::Photo { .. } => None,
        }
    }
}

/// Send replies in order, stopping at the first failure
pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> Result<()> {
    for reply in replies {
        match reply {
            Reply::Text { text, keyboard, html } => {
                let mut request = bot.send_message(chat_id, text);
                if let Some(markup) = keyboard {
                    request = request.reply_markup(markup);
                }
                if html {
                    request = request.parse_mode(ParseMode::Html);
                }
                request.await?;
            }
            Reply::Photo { photo, caption } => {
                let input_file = photo.input_file(bot.token())?;
                if let Err(e) = bot
                    .send_photo(chat_id, input_file)
                    .caption(caption)
                    .parse_mode(ParseMode::Html)
                    .await
                {
                    error!(chat_id = %chat_id, photo = photo.as_stored(), error = %e, "Failed to send product photo");
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
