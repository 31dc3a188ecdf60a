//! Locale-aware name comparison for alphabetical sorting.
//!
//! Country names carry diacritics ("Åland Islands", "Curaçao", "Réunion") that a
//! byte-wise comparison would push to the end of the list. [`NameCollator`]
//! wraps an ICU collator so names sort the way a reader expects in the
//! configured locale.

use crate::domain::{CountrydexError, Result};
use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;
use std::cmp::Ordering;
use std::fmt;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Total, deterministic comparator for country names.
///
/// Falls back to a case-folded comparison (with a byte-wise tiebreak) if the
/// ICU collator cannot be constructed, so sorting is always available.
pub struct NameCollator {
    locale: String,
    icu: Option<CollatorBorrowed<'static>>,
}

impl NameCollator {
    /// Builds a collator for a BCP 47 locale identifier (e.g. `"en"`, `"de-CH"`).
    ///
    /// # Errors
    ///
    /// Returns [`CountrydexError::Config`] if the identifier does not parse and
    /// [`CountrydexError::Collation`] if no collation data is available for it.
    pub fn new(locale: &str) -> Result<Self> {
        let parsed: Locale = locale
            .parse()
            .map_err(|e| CountrydexError::Config(format!("invalid locale '{locale}': {e}")))?;

        let icu = Collator::try_new(parsed.into(), CollatorOptions::default())
            .map_err(|e| CountrydexError::Collation(e.to_string()))?;

        Ok(Self {
            locale: locale.to_string(),
            icu: Some(icu),
        })
    }

    /// Builds a collator for `locale`, degrading to the case-folded fallback on error.
    #[must_use]
    pub fn new_or_fallback(locale: &str) -> Self {
        Self::new(locale).unwrap_or_else(|e| {
            tracing::warn!(locale = %locale, error = %e, "collator unavailable, using case-folded comparison");
            Self {
                locale: locale.to_string(),
                icu: None,
            }
        })
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compares two names.
    #[must_use]
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        match &self.icu {
            Some(collator) => collator.compare(left, right),
            None => left
                .to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(right)),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new_or_fallback(DEFAULT_LOCALE)
    }
}

impl fmt::Debug for NameCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameCollator")
            .field("locale", &self.locale)
            .field("icu", &self.icu.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let collator = NameCollator::default();
        let mut names = vec!["Zambia", "Åland Islands", "Albania", "Curaçao", "Cuba"];
        names.sort_by(|a, b| collator.compare(a, b));
        assert_eq!(
            names,
            vec!["Åland Islands", "Albania", "Cuba", "Curaçao", "Zambia"]
        );
    }

    #[test]
    fn comparison_ignores_case_at_primary_level() {
        let collator = NameCollator::default();
        assert_eq!(collator.compare("chile", "China"), Ordering::Less);
        assert_eq!(collator.compare("Chile", "Chile"), Ordering::Equal);
    }

    #[test]
    fn invalid_locale_is_a_config_error() {
        let err = NameCollator::new("not a locale!").unwrap_err();
        assert!(matches!(err, CountrydexError::Config(_)));
    }

    #[test]
    fn fallback_is_total_and_case_folded() {
        let collator = NameCollator {
            locale: "xx".to_string(),
            icu: None,
        };
        assert_eq!(collator.compare("chile", "China"), Ordering::Less);
        assert_eq!(collator.compare("Chad", "chad"), Ordering::Less);
    }
}
