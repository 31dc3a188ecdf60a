//! REST Countries v3.1 requests and response decoding.
//!
//! The plugin talks to two endpoints:
//!
//! - `GET {base}/all?fields=...`: every country, restricted to the fields we render
//! - `GET {base}/alpha/{code}`: a single country by alpha-3 code
//!
//! Zellij delivers web responses as events, so each request carries a small
//! context map that comes back with the response and identifies which
//! [`FetchRequest`] it answers.
//!
//! # Wire Shape
//!
//! ```json
//! {
//!   "name": { "common": "Peru", "official": "Republic of Peru",
//!             "nativeName": { "spa": { "official": "República del Perú", "common": "Perú" } } },
//!   "cca3": "PER",
//!   "region": "Americas",
//!   "population": 32971846,
//!   "area": 1285216.0,
//!   "flags": { "png": "https://flagcdn.com/w320/pe.png" },
//!   "capital": ["Lima"],
//!   "currencies": { "PEN": { "name": "Peruvian sol", "symbol": "S/ " } },
//!   "borders": ["BOL", "BRA", "CHL", "COL", "ECU"]
//! }
//! ```

use crate::domain::{Country, CountrydexError, Currency, NativeName, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Fields requested from the `all` endpoint, which rejects unfiltered queries.
pub const CATALOG_FIELDS: &str = "name,cca3,region,population,area,flags,capital,currencies,borders";

const CONTEXT_REQUEST_KEY: &str = "request";
const CONTEXT_CODE_KEY: &str = "code";

/// A single GET against the REST Countries API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchRequest {
    /// The full country catalog.
    AllCountries,
    /// One country by alpha-3 code.
    CountryByCode(String),
}

impl FetchRequest {
    /// Builds the request URL against `base_url`.
    ///
    /// ```
    /// use countrydex::catalog::FetchRequest;
    ///
    /// let req = FetchRequest::CountryByCode("PER".into());
    /// assert_eq!(req.url("https://restcountries.com/v3.1/"), "https://restcountries.com/v3.1/alpha/PER");
    /// ```
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::AllCountries => format!("{base}/all?fields={CATALOG_FIELDS}"),
            Self::CountryByCode(code) => format!("{base}/alpha/{code}"),
        }
    }

    /// Context map attached to the web request.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match self {
            Self::AllCountries => {
                context.insert(CONTEXT_REQUEST_KEY.to_string(), "all".to_string());
            }
            Self::CountryByCode(code) => {
                context.insert(CONTEXT_REQUEST_KEY.to_string(), "alpha".to_string());
                context.insert(CONTEXT_CODE_KEY.to_string(), code.clone());
            }
        }
        context
    }

    /// Recovers the request from a response context map.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        match context.get(CONTEXT_REQUEST_KEY).map(String::as_str) {
            Some("all") => Some(Self::AllCountries),
            Some("alpha") => context
                .get(CONTEXT_CODE_KEY)
                .map(|code| Self::CountryByCode(code.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireCountry {
    name: WireName,
    cca3: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    population: u64,
    #[serde(default)]
    area: f64,
    #[serde(default)]
    flags: WireFlags,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    currencies: BTreeMap<String, WireCurrency>,
    #[serde(default)]
    borders: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireName {
    common: String,
    #[serde(default)]
    official: String,
    #[serde(default, rename = "nativeName")]
    native_name: BTreeMap<String, WireNativeName>,
}

#[derive(Debug, Deserialize)]
struct WireNativeName {
    #[serde(default)]
    official: String,
    #[serde(default)]
    common: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireFlags {
    #[serde(default)]
    png: String,
}

#[derive(Debug, Deserialize)]
struct WireCurrency {
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
}

impl From<WireCountry> for Country {
    fn from(wire: WireCountry) -> Self {
        Self {
            code: wire.cca3,
            common_name: wire.name.common,
            official_name: wire.name.official,
            region: wire.region,
            population: wire.population,
            area: wire.area,
            flag_url: wire.flags.png,
            capital: wire.capital.into_iter().next(),
            currencies: wire
                .currencies
                .into_iter()
                .map(|(code, c)| (code, Currency { name: c.name, symbol: c.symbol }))
                .collect(),
            native_names: wire
                .name
                .native_name
                .into_iter()
                .map(|(lang, n)| (lang, NativeName { official: n.official, common: n.common }))
                .collect(),
            borders: wire.borders,
        }
    }
}

/// Decodes the `all` endpoint body.
///
/// # Errors
///
/// Returns [`CountrydexError::Decode`] if the body is not a JSON array of countries.
pub fn decode_catalog(body: &str) -> Result<Vec<Country>> {
    let wire: Vec<WireCountry> = serde_json::from_str(body)?;
    Ok(wire.into_iter().map(Country::from).collect())
}

/// Decodes the `alpha/{code}` endpoint body.
///
/// The API answers with a one-element array; a bare object is accepted too.
///
/// # Errors
///
/// Returns [`CountrydexError::Decode`] for malformed bodies and
/// [`CountrydexError::NotFound`] for an empty array.
pub fn decode_country(code: &str, body: &str) -> Result<Country> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<WireCountry>),
        One(Box<WireCountry>),
    }

    match serde_json::from_str::<OneOrMany>(body)? {
        OneOrMany::Many(list) => list
            .into_iter()
            .next()
            .map(Country::from)
            .ok_or_else(|| CountrydexError::NotFound(code.to_string())),
        OneOrMany::One(wire) => Ok(Country::from(*wire)),
    }
}

/// Maps a non-2xx status to an error.
///
/// # Errors
///
/// Returns [`CountrydexError::Http`] unless `status` is in `200..300`.
pub fn check_status(request: &FetchRequest, base_url: &str, status: u16) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(CountrydexError::Http {
            status,
            url: request.url(base_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERU: &str = r#"{
        "name": {
            "common": "Peru",
            "official": "Republic of Peru",
            "nativeName": {
                "aym": { "official": "Piruw Suyu", "common": "Piruw" },
                "spa": { "official": "República del Perú", "common": "Perú" }
            }
        },
        "cca3": "PER",
        "region": "Americas",
        "population": 32971846,
        "area": 1285216.0,
        "flags": { "png": "https://flagcdn.com/w320/pe.png", "svg": "https://flagcdn.com/pe.svg" },
        "capital": ["Lima"],
        "currencies": { "PEN": { "name": "Peruvian sol", "symbol": "S/ " } },
        "borders": ["BOL", "BRA", "CHL", "COL", "ECU"]
    }"#;

    const ANTARCTICA: &str = r#"{
        "name": { "common": "Antarctica", "official": "Antarctica", "nativeName": {} },
        "cca3": "ATA",
        "region": "Antarctic",
        "population": 1000,
        "area": 14000000,
        "flags": { "png": "https://flagcdn.com/w320/aq.png" },
        "capital": [],
        "currencies": {}
    }"#;

    #[test]
    fn decodes_every_rendered_field() {
        let country = decode_country("PER", &format!("[{PERU}]")).unwrap();
        assert_eq!(country.code, "PER");
        assert_eq!(country.common_name, "Peru");
        assert_eq!(country.official_name, "Republic of Peru");
        assert_eq!(country.region, "Americas");
        assert_eq!(country.population, 32_971_846);
        assert_eq!(country.capital.as_deref(), Some("Lima"));
        assert_eq!(country.flag_url, "https://flagcdn.com/w320/pe.png");
        assert_eq!(country.currency_names(), "Peruvian sol");
        assert_eq!(country.native_name(), "Piruw Suyu");
        assert_eq!(country.borders, vec!["BOL", "BRA", "CHL", "COL", "ECU"]);
    }

    #[test]
    fn absent_collections_decode_empty() {
        let catalog = decode_catalog(&format!("[{ANTARCTICA}]")).unwrap();
        let ata = &catalog[0];
        assert_eq!(ata.capital, None);
        assert!(ata.borders.is_empty());
        assert!(ata.currencies.is_empty());
        assert!((ata.area - 14_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn catalog_keeps_source_order() {
        let catalog = decode_catalog(&format!("[{PERU},{ANTARCTICA}]")).unwrap();
        let codes: Vec<&str> = catalog.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["PER", "ATA"]);
    }

    #[test]
    fn bare_object_is_accepted_for_alpha() {
        let country = decode_country("ATA", ANTARCTICA).unwrap();
        assert_eq!(country.common_name, "Antarctica");
    }

    #[test]
    fn empty_alpha_response_is_not_found() {
        let err = decode_country("XYZ", "[]").unwrap_err();
        assert!(matches!(err, CountrydexError::NotFound(code) if code == "XYZ"));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_catalog("{\"status\":404,\"message\":\"Not Found\"}").unwrap_err();
        assert!(matches!(err, CountrydexError::Decode(_)));
    }

    #[test]
    fn requests_round_trip_through_context() {
        for request in [FetchRequest::AllCountries, FetchRequest::CountryByCode("PER".into())] {
            assert_eq!(FetchRequest::from_context(&request.context()), Some(request));
        }
        assert_eq!(FetchRequest::from_context(&BTreeMap::new()), None);
    }

    #[test]
    fn catalog_url_restricts_fields() {
        assert_eq!(
            FetchRequest::AllCountries.url(DEFAULT_BASE_URL),
            "https://restcountries.com/v3.1/all?fields=name,cca3,region,population,area,flags,capital,currencies,borders"
        );
    }

    #[test]
    fn status_outside_2xx_is_http_error() {
        assert!(check_status(&FetchRequest::AllCountries, DEFAULT_BASE_URL, 200).is_ok());
        let err = check_status(&FetchRequest::AllCountries, DEFAULT_BASE_URL, 502).unwrap_err();
        assert!(matches!(err, CountrydexError::Http { status: 502, .. }));
    }
}
