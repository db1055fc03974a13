//! bSDD API client.
//!
//! Blocking HTTP client for the buildingSMART Data Dictionary service. The
//! converter is a short-lived sequential batch job, so fetches are blocking
//! calls with no retry policy; a failed fetch is logged and surfaces as
//! "no data" at the call site.
//!
//! Memoization caches live on the client and last one run. Every dictionary
//! and class-detail URI is fetched at most once, negative results included.

use super::cache::{CacheKind, DiskCache};
use super::types::{ClassDetails, Dictionary, DictionaryClasses, DictionaryResponse};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

pub const BSDD_API_BASE: &str = "https://api.bsdd.buildingsmart.org";
const FETCH_LIMIT: usize = 1000;

/// Source of dictionary data for the forward translation.
///
/// `BsddClient` is the production implementation; tests substitute an
/// in-memory source. Methods take `&mut self` because implementations
/// memoize per run.
pub trait ClassSource {
    /// Dictionary metadata by URI, or `None` when unavailable.
    fn dictionary(&mut self, uri: &str) -> Option<Dictionary>;

    /// The merged classes listing of a dictionary, or `None` when the first
    /// page could not be fetched.
    fn classes(&mut self, dictionary_uri: &str) -> Option<DictionaryClasses>;

    /// Full class detail (properties + relations) by class URI.
    fn class_detail(&mut self, class_uri: &str) -> Option<ClassDetails>;
}

/// bSDD API client with per-run memoization and an optional disk cache.
pub struct BsddClient {
    http: reqwest::blocking::Client,
    base_url: String,
    page_size: usize,
    disk_cache: Option<DiskCache>,
    dictionaries: HashMap<String, Option<Dictionary>>,
    class_details: HashMap<String, Option<ClassDetails>>,
}

impl BsddClient {
    /// Create a client against the public bSDD service.
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: BSDD_API_BASE.to_string(),
            page_size: FETCH_LIMIT,
            disk_cache: None,
            dictionaries: HashMap::new(),
            class_details: HashMap::new(),
        })
    }

    /// Point the client at a different service base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the pagination page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Attach a disk cache consulted before and populated after each fetch.
    pub fn with_cache(mut self, cache: DiskCache) -> Self {
        self.disk_cache = Some(cache);
        self
    }

    /// Make a GET request and decode the JSON body.
    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            anyhow::bail!(
                "bSDD API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            );
        }

        response
            .json()
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    fn fetch_dictionary(&self, uri: &str) -> Result<Option<Dictionary>> {
        let query = [
            ("Uri", uri.to_string()),
            ("IncludeTestDictionaries", "true".to_string()),
        ];
        let response: DictionaryResponse = self.get("/api/Dictionary/v1", &query)?;
        Ok(response.dictionaries.into_iter().next())
    }

    fn fetch_class_detail(&self, class_uri: &str) -> Result<ClassDetails> {
        let query = [
            ("Uri", class_uri.to_string()),
            ("IncludeClassProperties", "true".to_string()),
            ("IncludeClassRelations", "true".to_string()),
        ];
        self.get("/api/Class/v1", &query)
    }

    /// Fetch every page of the classes listing and merge them into the first
    /// page's record. A failed page aborts only the pagination loop; pages
    /// already fetched are kept.
    fn fetch_classes_paginated(&self, dictionary_uri: &str) -> Option<DictionaryClasses> {
        let mut merged = Vec::new();
        let mut carrier: Option<DictionaryClasses> = None;
        let mut offset = 0usize;

        loop {
            let query = [
                ("Uri", dictionary_uri.to_string()),
                ("ClassType", "Class".to_string()),
                ("limit", self.page_size.to_string()),
                ("offset", offset.to_string()),
            ];
            let mut page: DictionaryClasses = match self.get("/api/Dictionary/v1/Classes", &query)
            {
                Ok(page) => page,
                Err(error) => {
                    warn!(dictionary_uri, offset, %error, "aborting classes pagination");
                    break;
                }
            };

            let fetched = page.classes.len();
            let total = page.classes_total_count;
            merged.append(&mut page.classes);
            if carrier.is_none() {
                carrier = Some(page);
            }

            if fetched == 0 || offset + fetched >= total {
                break;
            }
            offset += self.page_size;
        }

        let mut listing = carrier?;
        listing.classes = merged;
        Some(listing)
    }
}

impl ClassSource for BsddClient {
    fn dictionary(&mut self, uri: &str) -> Option<Dictionary> {
        if let Some(memo) = self.dictionaries.get(uri) {
            return memo.clone();
        }

        let cached = self
            .disk_cache
            .as_ref()
            .and_then(|cache| cache.load::<Dictionary>(CacheKind::Dictionary, uri));

        let result = match cached {
            Some(dictionary) => Some(dictionary),
            None => match self.fetch_dictionary(uri) {
                Ok(found) => {
                    if let (Some(cache), Some(dictionary)) = (&self.disk_cache, &found) {
                        cache.store(CacheKind::Dictionary, uri, dictionary);
                    }
                    found
                }
                Err(error) => {
                    warn!(uri, %error, "failed to fetch dictionary");
                    None
                }
            },
        };

        self.dictionaries.insert(uri.to_string(), result.clone());
        result
    }

    fn classes(&mut self, dictionary_uri: &str) -> Option<DictionaryClasses> {
        if let Some(cache) = &self.disk_cache {
            if let Some(listing) =
                cache.load::<DictionaryClasses>(CacheKind::DictionaryClasses, dictionary_uri)
            {
                return Some(listing);
            }
        }

        let listing = self.fetch_classes_paginated(dictionary_uri)?;
        if let Some(cache) = &self.disk_cache {
            cache.store(CacheKind::DictionaryClasses, dictionary_uri, &listing);
        }
        Some(listing)
    }

    fn class_detail(&mut self, class_uri: &str) -> Option<ClassDetails> {
        if let Some(memo) = self.class_details.get(class_uri) {
            return memo.clone();
        }

        let cached = self
            .disk_cache
            .as_ref()
            .and_then(|cache| cache.load::<ClassDetails>(CacheKind::Class, class_uri));

        let result = match cached {
            Some(details) => Some(details),
            None => match self.fetch_class_detail(class_uri) {
                Ok(details) => {
                    if let Some(cache) = &self.disk_cache {
                        cache.store(CacheKind::Class, class_uri, &details);
                    }
                    Some(details)
                }
                Err(error) => {
                    warn!(class_uri, %error, "failed to fetch class");
                    None
                }
            },
        };

        self.class_details.insert(class_uri.to_string(), result.clone());
        result
    }
}
