// SPDX-License-Identifier: MPL-2.0
//! `locale_context` provides a reactive locale context for user interfaces.
//!
//! It detects the preferred language, lazily loads a Fluent message bundle
//! for the active locale, and lets any number of consumers read translated
//! strings and switch locales at runtime.
//!
//! ```no_run
//! use locale_context::i18n::{IntlProvider, Locale, ProviderOptions};
//!
//! # async fn demo() {
//! let provider = IntlProvider::mount(ProviderOptions::new());
//! let ctx = provider.ready().await;
//! println!("{}", ctx.tr("app-title"));
//!
//! provider.set_locale(Locale::Fr);
//! let ctx = provider.ready().await;
//! println!("{}", ctx.tr("app-title"));
//! # }
//! ```

pub mod config;
pub mod error;
pub mod i18n;

pub use error::{Error, Result};
