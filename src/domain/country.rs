//! Country domain model.
//!
//! `Country` is the slim, render-ready shape of one entry from the REST Countries
//! API. It is decoded once (see [`crate::catalog::api`]), shipped between the
//! worker and the plugin as JSON, and then treated as read-only for the lifetime
//! of the plugin session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder shown for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// A currency used by a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// A country's name in one of its native languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NativeName {
    pub official: String,
    #[serde(default)]
    pub common: String,
}

/// One country as displayed by the plugin.
///
/// # Fields
///
/// - `code`: ISO 3166-1 alpha-3 code, unique per country
/// - `common_name` / `official_name`: English names
/// - `region`: coarse geographic grouping ("Europe", "Asia", ...)
/// - `population`, `area`: non-negative figures used for sorting
/// - `capital`: first listed capital, if any
/// - `currencies`: currency code to currency
/// - `native_names`: language code to native name
/// - `borders`: alpha-3 codes of neighbouring countries, in API order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub common_name: String,
    #[serde(default)]
    pub official_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub flag_url: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub native_names: BTreeMap<String, NativeName>,
    #[serde(default)]
    pub borders: Vec<String>,
}

impl Country {
    /// Creates a country with a code and common name; every other field is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use countrydex::Country;
    ///
    /// let chad = Country::new("TCD", "Chad").with_region("Africa").with_population(17);
    /// assert_eq!(chad.region, "Africa");
    /// assert_eq!(chad.capital_or_placeholder(), "N/A");
    /// ```
    #[must_use]
    pub fn new(code: impl Into<String>, common_name: impl Into<String>) -> Self {
        let common_name = common_name.into();
        Self {
            code: code.into(),
            official_name: common_name.clone(),
            common_name,
            region: String::new(),
            population: 0,
            area: 0.0,
            flag_url: String::new(),
            capital: None,
            currencies: BTreeMap::new(),
            native_names: BTreeMap::new(),
            borders: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_official_name(mut self, official_name: impl Into<String>) -> Self {
        self.official_name = official_name.into();
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    #[must_use]
    pub const fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    #[must_use]
    pub const fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    #[must_use]
    pub fn with_borders<I, S>(mut self, borders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.borders = borders.into_iter().map(Into::into).collect();
        self
    }

    /// Capital city, or `N/A`.
    #[must_use]
    pub fn capital_or_placeholder(&self) -> &str {
        self.capital.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Currency names joined with `", "`, or `N/A` when the country lists none.
    #[must_use]
    pub fn currency_names(&self) -> String {
        self.join_currencies(|c| c.name.as_str())
    }

    /// Currency symbols joined with `", "`, or `N/A` when the country lists none.
    #[must_use]
    pub fn currency_symbols(&self) -> String {
        self.join_currencies(|c| c.symbol.as_str())
    }

    fn join_currencies<'a>(&'a self, field: impl Fn(&'a Currency) -> &'a str) -> String {
        if self.currencies.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        self.currencies
            .values()
            .map(field)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Official name in the first native language (ordered by language code).
    #[must_use]
    pub fn native_name(&self) -> &str {
        self.native_names
            .values()
            .next()
            .map_or(NOT_AVAILABLE, |n| n.official.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peru() -> Country {
        let mut country = Country::new("PER", "Peru").with_capital("Lima");
        country.currencies.insert(
            "PEN".to_string(),
            Currency {
                name: "Peruvian sol".to_string(),
                symbol: "S/ ".to_string(),
            },
        );
        country.native_names.insert(
            "spa".to_string(),
            NativeName {
                official: "República del Perú".to_string(),
                common: "Perú".to_string(),
            },
        );
        country.native_names.insert(
            "aym".to_string(),
            NativeName {
                official: "Piruw Suyu".to_string(),
                common: "Piruw".to_string(),
            },
        );
        country
    }

    #[test]
    fn currencies_join_names_and_symbols() {
        let mut country = peru();
        country.currencies.insert(
            "USD".to_string(),
            Currency {
                name: "United States dollar".to_string(),
                symbol: "$".to_string(),
            },
        );
        assert_eq!(country.currency_names(), "Peruvian sol, United States dollar");
        assert_eq!(country.currency_symbols(), "S/ , $");
    }

    #[test]
    fn missing_values_use_placeholder() {
        let antarctica = Country::new("ATA", "Antarctica");
        assert_eq!(antarctica.capital_or_placeholder(), NOT_AVAILABLE);
        assert_eq!(antarctica.currency_names(), NOT_AVAILABLE);
        assert_eq!(antarctica.currency_symbols(), NOT_AVAILABLE);
        assert_eq!(antarctica.native_name(), NOT_AVAILABLE);
    }

    #[test]
    fn native_name_takes_first_language_code() {
        assert_eq!(peru().native_name(), "Piruw Suyu");
    }

    #[test]
    fn slim_model_survives_ipc_serialization() {
        let country = peru().with_borders(["BOL", "BRA"]);
        let json = serde_json::to_string(&country).unwrap();
        let back: Country = serde_json::from_str(&json).unwrap();
        assert_eq!(back, country);
    }
}
