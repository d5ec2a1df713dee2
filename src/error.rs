// SPDX-License-Identifier: MPL-2.0
use crate::i18n::Locale;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Bundle Error: {0}")]
    Bundle(#[from] BundleError),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// No async runtime to run bundle loads on.
    #[error("Runtime Error: {0}")]
    Runtime(String),
}

/// Failures while turning a locale bundle into a message mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    /// No bundle exists for the locale (missing asset or file).
    #[error("no message bundle for locale `{locale}`")]
    Missing { locale: Locale },

    /// The bundle is not a valid TOML table.
    #[error("invalid bundle for locale `{locale}`: {message}")]
    Parse { locale: Locale, message: String },

    /// A bundle value is a table, number or array instead of a template string.
    #[error("bundle `{locale}` has a non-string value for key `{key}`")]
    NotAString { locale: Locale, key: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn bundle_error_converts_and_mentions_locale() {
        let err: Error = BundleError::Missing { locale: Locale::Fr }.into();
        assert!(matches!(err, Error::Bundle(BundleError::Missing { .. })));
        assert_eq!(
            format!("{}", err),
            "Bundle Error: no message bundle for locale `fr`"
        );
    }

    #[test]
    fn not_a_string_names_the_key() {
        let err = BundleError::NotAString {
            locale: Locale::En,
            key: "greeting".to_string(),
        };
        assert!(format!("{}", err).contains("`greeting`"));
    }
}
