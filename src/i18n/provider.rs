// SPDX-License-Identifier: MPL-2.0
//! The locale context provider.
//!
//! [`IntlProvider`] owns the current locale and message mapping. Mounting it
//! starts loading the initial locale's bundle; every locale change starts
//! exactly one new load. Consumers read an [`IntlContext`] snapshot, which is
//! only replaced when locale, messages or load status change.
//!
//! Loads are tagged with a generation number. A load that finishes after a
//! newer one was requested is discarded, so the last requested locale wins
//! regardless of completion order.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::i18n::environment::{LanguagePreference, SystemPreference};
use crate::i18n::fluent::Translator;
use crate::i18n::loader::LoaderTable;
use crate::i18n::{select_initial_locale, Locale, Messages};
use fluent_bundle::FluentArgs;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A bundle for the current locale is being fetched.
    Loading,
    /// The committed messages belong to the current locale.
    Ready,
    /// The latest load failed; previously committed messages are kept.
    Failed(Error),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}

/// Read-only snapshot shared by every consumer of a provider.
#[derive(Clone)]
pub struct IntlContext {
    locale: Locale,
    messages: Messages,
    translator: Option<Arc<Translator>>,
    status: LoadStatus,
    setter: LocaleSetter,
}

impl IntlContext {
    /// The requested locale. While a load is in flight this may differ from
    /// the locale the current messages were loaded for.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// True once a message mapping has been committed, even an empty one.
    pub fn is_ready(&self) -> bool {
        self.translator.is_some()
    }

    /// Locale of the committed messages, if any.
    pub fn messages_locale(&self) -> Option<Locale> {
        self.translator.as_ref().map(|t| t.locale())
    }

    pub fn translator(&self) -> Option<&Translator> {
        self.translator.as_deref()
    }

    pub fn tr(&self, key: &str) -> String {
        match &self.translator {
            Some(translator) => translator.tr(key),
            None => format!("MISSING: {}", key),
        }
    }

    pub fn tr_with_args(&self, key: &str, args: &FluentArgs<'_>) -> String {
        match &self.translator {
            Some(translator) => translator.tr_with_args(key, args),
            None => format!("MISSING: {}", key),
        }
    }

    /// Requests a locale change on the provider this context came from.
    pub fn set_locale(&self, locale: Locale) -> bool {
        self.setter.set(locale)
    }

    pub fn setter(&self) -> LocaleSetter {
        self.setter.clone()
    }
}

impl fmt::Debug for IntlContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntlContext")
            .field("locale", &self.locale)
            .field("messages", &self.messages.len())
            .field("messages_locale", &self.messages_locale())
            .field("status", &self.status)
            .finish()
    }
}

/// Handle that can switch the provider's locale. Does nothing once the
/// provider has been dropped.
#[derive(Clone, Default)]
pub struct LocaleSetter {
    inner: Weak<Inner>,
}

impl LocaleSetter {
    /// Returns `true` if a new load was started.
    pub fn set(&self, locale: Locale) -> bool {
        match self.inner.upgrade() {
            Some(inner) => inner.set_locale(locale),
            None => false,
        }
    }
}

/// Options for mounting an [`IntlProvider`].
pub struct ProviderOptions {
    default_locale: Option<Locale>,
    configured_language: Option<String>,
    preference: Arc<dyn LanguagePreference>,
    loaders: LoaderTable,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            default_locale: None,
            configured_language: None,
            preference: Arc::new(SystemPreference),
            loaders: LoaderTable::embedded(),
        }
    }
}

impl ProviderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale chosen by the embedding application. The environment is not
    /// queried when this is set.
    pub fn default_locale(mut self, locale: Option<Locale>) -> Self {
        self.default_locale = locale;
        self
    }

    /// Applies the language and bundle directory from the user settings.
    pub fn config(mut self, config: &Config) -> Self {
        self.configured_language = config.general.language.clone();
        if let Some(dir) = &config.bundles.directory {
            self.loaders = LoaderTable::from_dir(dir.clone());
        }
        self
    }

    pub fn preference(mut self, preference: impl LanguagePreference + 'static) -> Self {
        self.preference = Arc::new(preference);
        self
    }

    pub fn loaders(mut self, loaders: LoaderTable) -> Self {
        self.loaders = loaders;
        self
    }

    pub fn initial_locale(&self) -> Locale {
        select_initial_locale(
            self.default_locale,
            self.configured_language.as_deref(),
            self.preference.as_ref(),
        )
    }
}

struct Inner {
    state: watch::Sender<Arc<IntlContext>>,
    generation: AtomicU64,
    loaders: LoaderTable,
    runtime: Handle,
}

impl Inner {
    fn set_locale(self: &Arc<Self>, locale: Locale) -> bool {
        let mut started = None;
        self.state.send_if_modified(|ctx| {
            if ctx.locale == locale {
                return false;
            }
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *ctx = Arc::new(IntlContext {
                locale,
                status: LoadStatus::Loading,
                ..IntlContext::clone(ctx)
            });
            started = Some(generation);
            true
        });

        match started {
            Some(generation) => {
                info!(%locale, generation, "switching locale");
                self.start_load(locale, generation);
                true
            }
            None => {
                debug!(%locale, "locale unchanged; no reload");
                false
            }
        }
    }

    fn start_load(self: &Arc<Self>, locale: Locale, generation: u64) {
        let load = self.loaders.load(locale);
        let inner = Arc::downgrade(self);
        self.runtime.spawn(async move {
            let result = load.await;
            match inner.upgrade() {
                Some(inner) => inner.commit(locale, generation, result),
                None => debug!(%locale, "provider dropped before messages loaded"),
            }
        });
    }

    fn commit(&self, locale: Locale, generation: u64, result: Result<Messages>) {
        self.state.send_if_modified(|ctx| {
            let latest = self.generation.load(Ordering::SeqCst);
            if latest != generation {
                debug!(%locale, generation, latest, "discarding stale message load");
                return false;
            }
            match result {
                Ok(messages) => {
                    info!(%locale, count = messages.len(), "messages loaded");
                    let translator = Arc::new(Translator::new(locale, &messages));
                    *ctx = Arc::new(IntlContext {
                        locale,
                        messages,
                        translator: Some(translator),
                        status: LoadStatus::Ready,
                        setter: ctx.setter.clone(),
                    });
                }
                Err(err) => {
                    warn!(%locale, error = %err, "failed to load messages");
                    *ctx = Arc::new(IntlContext {
                        status: LoadStatus::Failed(err),
                        ..IntlContext::clone(ctx)
                    });
                }
            }
            true
        });
    }
}

/// Owns locale state and hands out [`IntlContext`] snapshots.
///
/// Cloning yields another handle to the same provider.
#[derive(Clone)]
pub struct IntlProvider {
    inner: Arc<Inner>,
}

impl IntlProvider {
    /// Resolves the initial locale and starts loading its messages.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn mount(options: ProviderOptions) -> Self {
        Self::mount_on(options, Handle::current())
    }

    /// Like [`IntlProvider::mount`], but reports a missing tokio runtime as
    /// [`Error::Runtime`] instead of panicking.
    pub fn try_mount(options: ProviderOptions) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|err| Error::Runtime(err.to_string()))?;
        Ok(Self::mount_on(options, runtime))
    }

    fn mount_on(options: ProviderOptions, runtime: Handle) -> Self {
        let locale = options.initial_locale();

        let inner = Arc::new_cyclic(|weak: &Weak<Inner>| {
            let initial = IntlContext {
                locale,
                messages: Messages::default(),
                translator: None,
                status: LoadStatus::Loading,
                setter: LocaleSetter {
                    inner: weak.clone(),
                },
            };
            Inner {
                state: watch::Sender::new(Arc::new(initial)),
                generation: AtomicU64::new(1),
                loaders: options.loaders,
                runtime,
            }
        });

        info!(%locale, "mounting locale provider");
        inner.start_load(locale, 1);
        Self { inner }
    }

    /// The current context snapshot.
    pub fn context(&self) -> Arc<IntlContext> {
        Arc::clone(&self.inner.state.borrow())
    }

    pub fn locale(&self) -> Locale {
        self.inner.state.borrow().locale
    }

    /// Switches to `locale`. Returns `false` without reloading if it is
    /// already the requested locale.
    pub fn set_locale(&self, locale: Locale) -> bool {
        self.inner.set_locale(locale)
    }

    pub fn setter(&self) -> LocaleSetter {
        LocaleSetter {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Receiver notified whenever the context snapshot is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Arc<IntlContext>> {
        self.inner.state.subscribe()
    }

    /// Calls `child` with the context once messages are available.
    /// Returns `None` until the first load has committed.
    pub fn render<T>(&self, child: impl FnOnce(&IntlContext) -> T) -> Option<T> {
        let ctx = self.context();
        ctx.is_ready().then(|| child(&ctx))
    }

    /// Waits until the load for the currently requested locale has settled.
    pub async fn ready(&self) -> Arc<IntlContext> {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|ctx| !ctx.status.is_loading()).await {
            Ok(ctx) => Arc::clone(&ctx),
            Err(_) => self.context(),
        };
        settled
    }
}

impl fmt::Debug for IntlProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntlProvider")
            .field("context", &*self.context())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}
