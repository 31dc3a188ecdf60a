//! Shared read-through cache for country data.
//!
//! Both the grid and the detail view need the full catalog (the detail view to
//! resolve border codes into names). The cache fetches it once and serves every
//! later reader from memory. Individual countries fetched through the alpha
//! endpoint are cached alongside it.
//!
//! The cache never performs I/O itself: lookups that miss return the
//! [`FetchRequest`] the caller should issue, and mark it in flight so that
//! concurrent readers do not duplicate it.

use super::api::FetchRequest;
use crate::domain::Country;
use std::collections::{HashMap, HashSet};

/// Load state of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Nothing requested yet.
    Idle,
    /// Catalog request in flight.
    Loading,
    /// Catalog available.
    Ready,
    /// Last catalog request failed.
    Failed(String),
}

/// Result of a single-country lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryLookup {
    /// The country is in memory.
    Cached,
    /// A request that will provide it is already in flight.
    Pending,
    /// Issue this request; it has been marked in flight.
    Fetch(FetchRequest),
    /// A previous request for this code failed.
    Failed(String),
}

/// Fetch-once cache for the catalog and individual countries.
#[derive(Debug, Clone, Default)]
pub struct CountryCache {
    catalog: Vec<Country>,
    catalog_index: HashMap<String, usize>,
    catalog_loaded: bool,
    details: HashMap<String, Country>,
    in_flight: HashSet<FetchRequest>,
    decoding: HashSet<FetchRequest>,
    failures: HashMap<FetchRequest, String>,
    fetched_at: Option<i64>,
}

impl CountryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the catalog request to issue, or `None` if it is loaded or in flight.
    ///
    /// A failed catalog request is not retried here; the failure stays visible
    /// until [`CountryCache::clear_failure`] is called.
    ///
    /// ```
    /// use countrydex::catalog::{CountryCache, FetchRequest};
    ///
    /// let mut cache = CountryCache::new();
    /// assert_eq!(cache.request_catalog(), Some(FetchRequest::AllCountries));
    /// assert_eq!(cache.request_catalog(), None); // already in flight
    /// ```
    pub fn request_catalog(&mut self) -> Option<FetchRequest> {
        let request = FetchRequest::AllCountries;
        if self.catalog_loaded
            || self.in_flight.contains(&request)
            || self.failures.contains_key(&request)
        {
            return None;
        }
        self.in_flight.insert(request.clone());
        tracing::debug!("catalog miss, fetch scheduled");
        Some(request)
    }

    /// Looks up one country by alpha-3 code.
    pub fn lookup(&mut self, code: &str) -> CountryLookup {
        if self.get(code).is_some() {
            return CountryLookup::Cached;
        }

        let request = FetchRequest::CountryByCode(code.to_string());
        if let Some(message) = self.failures.get(&request) {
            return CountryLookup::Failed(message.clone());
        }
        if self.in_flight.contains(&request) {
            return CountryLookup::Pending;
        }

        self.in_flight.insert(request.clone());
        tracing::debug!(code = %code, "country miss, fetch scheduled");
        CountryLookup::Fetch(request)
    }

    /// Marks an in-flight request whose body was handed to the worker.
    pub fn mark_decoding(&mut self, request: &FetchRequest) {
        if self.in_flight.contains(request) {
            self.decoding.insert(request.clone());
        }
    }

    /// Fails every request waiting on the worker.
    ///
    /// Used when a worker reply cannot be attributed to a request. Returns the
    /// number of requests failed; a later successful store clears the failure.
    pub fn fail_decoding(&mut self, message: &str) -> usize {
        let pending: Vec<FetchRequest> = self.decoding.drain().collect();
        for request in &pending {
            self.record_failure(request, message);
        }
        pending.len()
    }

    /// Stores the decoded catalog, replacing any previous one.
    pub fn store_catalog(&mut self, countries: Vec<Country>) {
        self.in_flight.remove(&FetchRequest::AllCountries);
        self.decoding.remove(&FetchRequest::AllCountries);
        self.failures.remove(&FetchRequest::AllCountries);
        self.catalog_index = countries
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code.clone(), i))
            .collect();
        self.catalog = countries;
        self.catalog_loaded = true;
        self.fetched_at = Some(chrono::Utc::now().timestamp());
        tracing::debug!(country_count = self.catalog.len(), "catalog cached");
    }

    /// Stores a country fetched by code.
    pub fn store_country(&mut self, country: Country) {
        let request = FetchRequest::CountryByCode(country.code.clone());
        self.in_flight.remove(&request);
        self.decoding.remove(&request);
        self.failures.remove(&request);
        tracing::debug!(code = %country.code, "country cached");
        self.details.insert(country.code.clone(), country);
    }

    /// Records a failed request so readers can surface it.
    pub fn record_failure(&mut self, request: &FetchRequest, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(request = ?request, error = %message, "fetch failed");
        self.in_flight.remove(request);
        self.decoding.remove(request);
        self.failures.insert(request.clone(), message);
    }

    /// Forgets a recorded failure so the next lookup may fetch again.
    pub fn clear_failure(&mut self, request: &FetchRequest) {
        self.failures.remove(request);
    }

    /// The catalog in API order; empty until loaded.
    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.catalog
    }

    /// A country by code, from the catalog or the detail cache.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Country> {
        self.catalog_index
            .get(code)
            .and_then(|&i| self.catalog.get(i))
            .or_else(|| self.details.get(code))
    }

    /// Common name for a code, if known.
    #[must_use]
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.get(code).map(|c| c.common_name.as_str())
    }

    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        if self.catalog_loaded {
            CatalogStatus::Ready
        } else if let Some(message) = self.failures.get(&FetchRequest::AllCountries) {
            CatalogStatus::Failed(message.clone())
        } else if self.in_flight.contains(&FetchRequest::AllCountries) {
            CatalogStatus::Loading
        } else {
            CatalogStatus::Idle
        }
    }

    /// Failure recorded for a country code, if any.
    #[must_use]
    pub fn country_failure(&self, code: &str) -> Option<&str> {
        self.failures
            .get(&FetchRequest::CountryByCode(code.to_string()))
            .map(String::as_str)
    }

    /// Unix timestamp of the last catalog load.
    #[must_use]
    pub const fn fetched_at(&self) -> Option<i64> {
        self.fetched_at
    }
}
