// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! This module provides a reactive locale context using the Fluent
//! localization system. It handles language detection, lazy loading of
//! message bundles, and runtime locale switching.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Lazy loading of per-locale bundles (embedded or from a directory)
//! - Runtime language switching where the last requested locale always wins
//! - Fallback to the default locale when the preference is not supported

pub mod environment;
pub mod fluent;
pub mod loader;
pub mod locale;
pub mod messages;
pub mod provider;

pub use environment::{FixedPreference, LanguagePreference, SystemPreference};
pub use fluent::Translator;
pub use fluent_bundle::FluentArgs;
pub use loader::LoaderTable;
pub use locale::{resolve_locale, Locale};
pub use messages::Messages;
pub use provider::{IntlContext, IntlProvider, LoadStatus, LocaleSetter, ProviderOptions};

use tracing::{debug, warn};

/// Picks the locale a provider starts with.
///
/// Priority: explicit choice, then configured language, then the
/// environment preference (only queried when needed), then the default.
pub fn select_initial_locale(
    explicit: Option<Locale>,
    configured: Option<&str>,
    preference: &dyn LanguagePreference,
) -> Locale {
    // 1. Explicit choice of the embedding application
    if let Some(locale) = explicit {
        return locale;
    }

    // 2. Config file
    if let Some(language) = configured {
        match language.parse::<Locale>() {
            Ok(locale) => return locale,
            Err(err) => warn!(%err, "ignoring configured language"),
        }
    }

    // 3. Host environment
    match preference.preferred_language() {
        Some(reported) => {
            let locale = resolve_locale(&reported);
            debug!(%reported, %locale, "resolved environment language");
            locale
        }
        None => Locale::DEFAULT,
    }
}
