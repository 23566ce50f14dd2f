//! # Localization Module
//!
//! User-facing text is kept in a Fluent resource embedded at compile time.
//! The store speaks a single language, so there is one bundle and no
//! language negotiation.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::sync::LazyLock;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Locale of the embedded message catalog
pub const DEFAULT_LOCALE: &str = "en";

const MAIN_RESOURCE: &str = include_str!("../locales/en/main.ftl");

/// Message catalog for the storefront bot
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a manager backed by the embedded catalog
    pub fn new() -> Self {
        Self::from_source(MAIN_RESOURCE)
    }

    /// Create a manager from raw Fluent source
    pub fn from_source(source: &str) -> Self {
        let locale: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap_or_default();
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Arguments are plain text inside Telegram messages, bidi marks only get in the way
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(error_count = errors.len(), "Message catalog contains syntax errors");
                resource
            }
        };
        if let Err(errors) = bundle.add_resource(resource) {
            warn!(error_count = errors.len(), "Message catalog contains duplicate keys");
        }

        Self { bundle }
    }

    /// Whether the catalog defines `key`
    pub fn has_message(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }

    /// Get a localized message, substituting `args` when given
    pub fn get_message(&self, key: &str, args: Option<&[(&str, &str)]>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = self
            .bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key, error_count = errors.len(), "Failed to fully format message");
        }

        value.into_owned()
    }
}

impl Default for LocalizationManager {
    fn default() -> Self {
        Self::new()
    }
}

static LOCALIZATION_MANAGER: LazyLock<LocalizationManager> = LazyLock::new(LocalizationManager::new);

/// Get the global localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    &LOCALIZATION_MANAGER
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    get_localization_manager().get_message(key, Some(args))
}
