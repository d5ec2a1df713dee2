// SPDX-License-Identifier: MPL-2.0
//! Supported locales and resolution of host language preferences.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A locale the application ships messages for.
///
/// The first entry of [`Locale::ALL`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    pub const DEFAULT: Locale = Locale::ALL[0];

    /// The primary language subtag, also used as the bundle file stem.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Position in [`Locale::ALL`].
    pub fn index(self) -> usize {
        match self {
            Locale::En => 0,
            Locale::Fr => 1,
        }
    }

    /// Looks up a locale by its language subtag, ignoring ASCII case.
    pub fn from_code(code: &str) -> Option<Locale> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code))
    }

    pub fn language_identifier(self) -> LanguageIdentifier {
        self.code().parse().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::from_code(s.trim()).ok_or_else(|| Error::UnsupportedLocale(s.to_string()))
    }
}

/// Returns the primary language subtag of a reported preference.
///
/// `"fr-CA"`, `"fr_CA"` and `"fr_CA.UTF-8"` all yield `"fr"`.
pub fn primary_subtag(preference: &str) -> &str {
    let trimmed = preference.trim();
    trimmed
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or(trimmed)
}

/// Maps the host's reported language preference to a supported locale.
///
/// Falls back to [`Locale::DEFAULT`] when the primary subtag is not supported.
pub fn resolve_locale(preference: &str) -> Locale {
    let resolved = match preference.trim().parse::<LanguageIdentifier>() {
        Ok(langid) => Locale::from_code(langid.language.as_str()),
        Err(_) => Locale::from_code(primary_subtag(preference)),
    };
    resolved.unwrap_or(Locale::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn region_suffix_is_ignored() {
        assert_eq!(resolve_locale("fr-CA"), Locale::Fr);
        assert_eq!(resolve_locale("en-US"), Locale::En);
    }

    #[test]
    fn unsupported_language_falls_back_to_default() {
        assert_eq!(resolve_locale("de"), Locale::En);
        assert_eq!(resolve_locale("de-AT"), Locale::En);
    }

    #[test]
    fn posix_style_locales_resolve() {
        assert_eq!(resolve_locale("fr_FR.UTF-8"), Locale::Fr);
        assert_eq!(resolve_locale("fr_BE@euro"), Locale::Fr);
    }

    #[test]
    fn garbage_and_empty_input_fall_back() {
        assert_eq!(resolve_locale(""), Locale::En);
        assert_eq!(resolve_locale("   "), Locale::En);
        assert_eq!(resolve_locale("!!"), Locale::En);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(resolve_locale("FR-ca"), Locale::Fr);
        assert_eq!("FR".parse::<Locale>(), Ok(Locale::Fr));
    }

    #[test]
    fn default_is_first_entry() {
        assert_eq!(Locale::DEFAULT, Locale::ALL[0]);
        assert_eq!(Locale::default(), Locale::DEFAULT);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (position, locale) in Locale::ALL.into_iter().enumerate() {
            assert_eq!(locale.index(), position);
        }
    }

    #[test]
    fn parsing_unknown_code_is_an_error() {
        assert_eq!(
            "de".parse::<Locale>(),
            Err(Error::UnsupportedLocale("de".to_string()))
        );
    }

    #[test]
    fn language_identifier_round_trips_code() {
        assert_eq!(Locale::Fr.language_identifier().to_string(), "fr");
    }

    proptest! {
        #[test]
        fn supported_subtag_with_any_region_resolves_to_itself(
            index in 0usize..Locale::ALL.len(),
            region in "[A-Z]{2}",
        ) {
            let locale = Locale::ALL[index];
            let preference = format!("{}-{}", locale.code(), region);
            prop_assert_eq!(resolve_locale(&preference), locale);
        }

        #[test]
        fn unsupported_subtag_resolves_to_default(
            language in "[a-z]{2,3}",
            region in proptest::option::of("[A-Z]{2}"),
        ) {
            prop_assume!(Locale::from_code(&language).is_none());
            let preference = match region {
                Some(region) => format!("{language}-{region}"),
                None => language.clone(),
            };
            prop_assert_eq!(resolve_locale(&preference), Locale::DEFAULT);
        }
    }
}
