// SPDX-License-Identifier: MPL-2.0
//! Asynchronous message-bundle loaders, one per supported locale.
//!
//! A [`LoaderTable`] is always built by enumerating [`Locale::ALL`], so every
//! locale the provider can switch to has a loader.

use crate::error::{BundleError, Error, Result};
use crate::i18n::{Locale, Messages};
use rust_embed::RustEmbed;
use std::fmt;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

#[derive(RustEmbed)]
#[folder = "assets/lang/"]
struct Asset;

/// File extension of bundle files, embedded or on disk.
pub const BUNDLE_EXTENSION: &str = "toml";

pub type LoadFuture = Pin<Box<dyn Future<Output = Result<Messages>> + Send + 'static>>;

/// Produces a fresh load of one locale's messages each time it is called.
pub type Loader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

#[derive(Clone)]
pub struct LoaderTable {
    loaders: Vec<Loader>,
}

impl LoaderTable {
    /// Builds a table by asking `make` for the loader of every locale.
    pub fn from_fn<F, Fut>(make: F) -> Self
    where
        F: Fn(Locale) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Messages>> + Send + 'static,
    {
        let make = Arc::new(make);
        let loaders = Locale::ALL
            .into_iter()
            .map(|locale| {
                let make = Arc::clone(&make);
                Arc::new(move || Box::pin((*make)(locale)) as LoadFuture) as Loader
            })
            .collect();
        Self { loaders }
    }

    /// Bundles compiled into the binary from `assets/lang/`.
    pub fn embedded() -> Self {
        Self::from_fn(|locale| async move { load_embedded(locale) })
    }

    /// Bundles read on demand from `<dir>/<code>.toml`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let dir: Arc<Path> = Arc::from(dir.into());
        Self::from_fn(move |locale| {
            let dir = Arc::clone(&dir);
            async move { load_from_dir(&dir, locale).await }
        })
    }

    /// Replaces the loader for a single locale.
    pub fn with_loader<F, Fut>(mut self, locale: Locale, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Messages>> + Send + 'static,
    {
        self.loaders[locale.index()] = Arc::new(move || Box::pin(load()) as LoadFuture);
        self
    }

    /// Starts loading `locale`'s bundle.
    pub fn load(&self, locale: Locale) -> LoadFuture {
        (self.loaders[locale.index()])()
    }
}

impl Default for LoaderTable {
    fn default() -> Self {
        Self::embedded()
    }
}

impl fmt::Debug for LoaderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderTable")
            .field("locales", &Locale::ALL)
            .finish_non_exhaustive()
    }
}

fn bundle_file_name(locale: Locale) -> String {
    format!("{}.{}", locale.code(), BUNDLE_EXTENSION)
}

/// Loads a bundle embedded at build time.
pub fn load_embedded(locale: Locale) -> Result<Messages> {
    let file = Asset::get(&bundle_file_name(locale)).ok_or(BundleError::Missing { locale })?;
    let source = String::from_utf8_lossy(file.data.as_ref());
    Messages::from_toml_str(locale, &source)
}

/// Loads a bundle from a directory on disk.
pub async fn load_from_dir(dir: &Path, locale: Locale) -> Result<Messages> {
    let path = dir.join(bundle_file_name(locale));
    let source = match tokio::fs::read_to_string(&path).await {
        Ok(source) => source,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(BundleError::Missing { locale }.into());
        }
        Err(err) => return Err(Error::Io(format!("{}: {}", path.display(), err))),
    };
    Messages::from_toml_str(locale, &source)
}
