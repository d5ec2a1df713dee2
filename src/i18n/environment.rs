// SPDX-License-Identifier: MPL-2.0
//! Sources for the host environment's reported language preference.

/// Something that can report the user's preferred language, e.g. `"fr-CA"`.
pub trait LanguagePreference: Send + Sync {
    fn preferred_language(&self) -> Option<String>;
}

/// Reads the operating system locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPreference;

impl LanguagePreference for SystemPreference {
    fn preferred_language(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// Always reports the same preference. Useful for tests and embedders that
/// already know the language (e.g. from an HTTP `Accept-Language` header).
#[derive(Debug, Clone, Default)]
pub struct FixedPreference(pub Option<String>);

impl FixedPreference {
    pub fn new(preference: impl Into<String>) -> Self {
        Self(Some(preference.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl LanguagePreference for FixedPreference {
    fn preferred_language(&self) -> Option<String> {
        self.0.clone()
    }
}

impl<F> LanguagePreference for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn preferred_language(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_preference_reports_its_value() {
        assert_eq!(
            FixedPreference::new("fr-CA").preferred_language(),
            Some("fr-CA".to_string())
        );
        assert_eq!(FixedPreference::none().preferred_language(), None);
    }

    #[test]
    fn closures_are_preferences() {
        let source = || Some("de".to_string());
        assert_eq!(source.preferred_language(), Some("de".to_string()));
    }
}
