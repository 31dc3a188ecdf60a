//! Display formatting for populations and fetch age.

use crate::domain::{CountrydexError, Result};
use icu::decimal::input::Decimal;
use icu::decimal::DecimalFormatter;
use icu::locale::Locale;
use std::fmt;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Locale-aware integer formatter used for card populations ("1,412,000,000").
pub struct PopulationFormatter {
    formatter: Option<DecimalFormatter>,
}

impl PopulationFormatter {
    /// Builds a formatter for a BCP 47 locale identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CountrydexError::Config`] for an unparsable locale and
    /// [`CountrydexError::Collation`] when no decimal data exists for it.
    pub fn new(locale: &str) -> Result<Self> {
        let parsed: Locale = locale
            .parse()
            .map_err(|e| CountrydexError::Config(format!("invalid locale '{locale}': {e}")))?;
        let formatter = DecimalFormatter::try_new(parsed.into(), Default::default())
            .map_err(|e| CountrydexError::Collation(e.to_string()))?;
        Ok(Self {
            formatter: Some(formatter),
        })
    }

    /// Builds a formatter, falling back to plain digits on error.
    #[must_use]
    pub fn new_or_fallback(locale: &str) -> Self {
        Self::new(locale).unwrap_or_else(|e| {
            tracing::warn!(locale = %locale, error = %e, "decimal formatter unavailable, using plain digits");
            Self { formatter: None }
        })
    }

    #[must_use]
    pub fn format(&self, population: u64) -> String {
        match &self.formatter {
            Some(formatter) => {
                let value = i64::try_from(population).unwrap_or(i64::MAX);
                formatter.format(&Decimal::from(value)).to_string()
            }
            None => population.to_string(),
        }
    }
}

impl Default for PopulationFormatter {
    fn default() -> Self {
        Self::new_or_fallback(crate::listing::DEFAULT_LOCALE)
    }
}

impl fmt::Debug for PopulationFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopulationFormatter")
            .field("icu", &self.formatter.is_some())
            .finish()
    }
}

/// Compact population for the detail view: `1.4B`, `19.6M`, `5.3K`, or the raw number.
///
/// ```
/// use countrydex::ui::format::compact_population;
///
/// assert_eq!(compact_population(1_412_000_000), "1.4B");
/// assert_eq!(compact_population(19_600_000), "19.6M");
/// assert_eq!(compact_population(999), "999");
/// ```
#[must_use]
pub fn compact_population(population: u64) -> String {
    const UNITS: [(u64, char); 3] = [(1_000_000_000, 'B'), (1_000_000, 'M'), (1_000, 'K')];

    UNITS
        .iter()
        .find(|(divisor, _)| population >= *divisor)
        .map_or_else(
            || population.to_string(),
            |&(divisor, suffix)| {
                let divisor = u128::from(divisor);
                // half-up to one decimal place
                let tenths = (u128::from(population) * 10 + divisor / 2) / divisor;
                format!("{}.{}{suffix}", tenths / 10, tenths % 10)
            },
        )
}

/// How long ago a timestamp was, relative to `now` (both Unix seconds).
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - 1 day or more: "Xd ago"
#[must_use]
pub fn time_ago(now: i64, then: i64) -> String {
    let diff = now - then;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        let mins = diff / SECONDS_PER_MINUTE;
        format!("{mins}m ago")
    } else if diff < SECONDS_PER_DAY {
        let hours = diff / SECONDS_PER_HOUR;
        format!("{hours}h ago")
    } else {
        let days = diff / SECONDS_PER_DAY;
        format!("{days}d ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populations_group_thousands() {
        let formatter = PopulationFormatter::default();
        assert_eq!(formatter.format(1_412_000_000), "1,412,000,000");
        assert_eq!(formatter.format(17), "17");
    }

    #[test]
    fn compact_population_uses_one_decimal() {
        assert_eq!(compact_population(5_300), "5.3K");
        assert_eq!(compact_population(1_000), "1.0K");
        assert_eq!(compact_population(0), "0");
        assert_eq!(compact_population(32_971_846), "33.0M");
    }

    #[test]
    fn compact_population_rounds_ties_up() {
        assert_eq!(compact_population(1_250), "1.3K");
        assert_eq!(compact_population(2_250_000), "2.3M");
        assert_eq!(compact_population(1_450_000_000), "1.5B");
        assert_eq!(compact_population(u64::MAX), "18446744073.7B");
    }

    #[test]
    fn time_ago_buckets() {
        assert_eq!(time_ago(1_000, 990), "just now");
        assert_eq!(time_ago(1_000, 700), "5m ago");
        assert_eq!(time_ago(10_000, 10_000 - 3 * 3600), "3h ago");
        assert_eq!(time_ago(1_000_000, 1_000_000 - 7 * 86400), "7d ago");
    }
}
