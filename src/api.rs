//! Synchronous clients for the two directories and the indicator time-series source.
//!
//! - **REST Countries (v3.1)** supplies directory A: display name, flag and region per ISO3 code.
//! - **World Bank Indicators API (v2)** supplies directory B (income level, capital city) and
//!   the per-country, per-indicator observations.
//!
//! Everything above this module talks to the [`DataSource`] trait, so tests can swap the
//! HTTP client for an in-memory fake.
//!
//! ### Notes
//! - The World Bank API sometimes serializes `per_page` as a **string**; we accept both string/number.
//! - A World Bank response is `[Meta, [Entry, ...]]`; the second element is `null` when a
//!   query matches nothing, and the first element carries a `message` on API errors.
//! - Network timeouts use a sane default (30s) and can be adjusted by editing the client builder.
//!
//! Typical usage:
//! ```no_run
//! # use econ_compare::{Client, DateSpec, DataSource};
//! let client = Client::default();
//! let rows = client.indicator_observations(
//!     "DEU",
//!     "SP.POP.TOTL",
//!     DateSpec::Range { start: 2015, end: 2020 },
//! )?;
//! # Ok::<(), econ_compare::Error>(())
//! ```
use crate::error::{Error, Result};
use crate::models::{
    ClassificationRecord, DateSpec, DirectoryRecord, Entry, Meta, RawObservation, RestCountry,
    WbCountry,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const WORLD_BANK_API: &str = "https://api.worldbank.org/v2";
pub const REST_COUNTRIES_API: &str = "https://restcountries.com/v3.1";

/// Where countries and indicator observations come from.
///
/// Implementations must be shareable across threads: the fetcher issues one
/// `indicator_observations` call per indicator concurrently.
pub trait DataSource: Sync {
    /// Directory A: `{code, name, flag, region}` per country.
    fn country_directory(&self) -> Result<Vec<DirectoryRecord>>;

    /// Directory B: `{code, income level, capital city}` per country or aggregate.
    fn classification_directory(&self) -> Result<Vec<ClassificationRecord>>;

    /// Observations (nulls included) for one country and indicator in `date`.
    fn indicator_observations(
        &self,
        country: &str,
        indicator: &str,
        date: DateSpec,
    ) -> Result<Vec<RawObservation>>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn country_directory(&self) -> Result<Vec<DirectoryRecord>> {
        (**self).country_directory()
    }

    fn classification_directory(&self) -> Result<Vec<ClassificationRecord>> {
        (**self).classification_directory()
    }

    fn indicator_observations(
        &self,
        country: &str,
        indicator: &str,
        date: DateSpec,
    ) -> Result<Vec<RawObservation>> {
        (**self).indicator_observations(country, indicator, date)
    }
}

impl<T: DataSource + Send + ?Sized> DataSource for Arc<T> {
    fn country_directory(&self) -> Result<Vec<DirectoryRecord>> {
        (**self).country_directory()
    }

    fn classification_directory(&self) -> Result<Vec<ClassificationRecord>> {
        (**self).classification_directory()
    }

    fn indicator_observations(
        &self,
        country: &str,
        indicator: &str,
        date: DateSpec,
    ) -> Result<Vec<RawObservation>> {
        (**self).indicator_observations(country, indicator, date)
    }
}

/// HTTP implementation of [`DataSource`].
#[derive(Debug, Clone)]
pub struct Client {
    pub world_bank_url: String,
    pub rest_countries_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("econ_compare/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            world_bank_url: WORLD_BANK_API.into(),
            rest_countries_url: REST_COUNTRIES_API.into(),
            http,
        }
    }
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

// Safety cap to avoid pathological jobs
const MAX_PAGES: u32 = 1000;

/// Split one World Bank response page into its metadata and rows.
///
/// ### Errors
/// - `DataShape` if the body is not `[Meta, rows|null]`, or the API reports an error message.
pub fn parse_wb_page<T: DeserializeOwned>(v: Value) -> Result<(Meta, Vec<T>)> {
    let mut arr = match v {
        Value::Array(a) => a,
        _ => return Err(Error::DataShape("not a top-level array".into())),
    };
    if arr.is_empty() {
        return Err(Error::DataShape("empty array".into()));
    }
    // If first element has "message", surface API error.
    if arr[0].get("message").is_some() {
        return Err(Error::DataShape(format!("world bank api error: {}", arr[0])));
    }
    let rows_value = if arr.len() > 1 { arr.remove(1) } else { Value::Null };
    let meta: Meta = serde_json::from_value(arr.swap_remove(0))?;
    let rows: Vec<T> = match rows_value {
        Value::Null => vec![],
        other => serde_json::from_value(other)?,
    };
    Ok((meta, rows))
}

impl Client {
    /// Point the client at different API roots (e.g. a proxy or a local mirror).
    pub fn with_endpoints(world_bank_url: impl Into<String>, rest_countries_url: impl Into<String>) -> Self {
        Self {
            world_bank_url: world_bank_url.into().trim_end_matches('/').to_string(),
            rest_countries_url: rest_countries_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// GET with a small retry for transient failures (5xx / network errors).
    fn get_json(&self, url: &str) -> Result<Value> {
        const BACKOFF_MS: [u64; 3] = [100, 300, 700];
        let mut last_err: Option<String> = None;
        for (attempt, backoff_ms) in BACKOFF_MS.into_iter().enumerate() {
            log::debug!("GET {}", url);
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.json::<Value>().map_err(|e| match Error::from(e) {
                        Error::DataShape(m) => Error::DataShape(format!("GET {}: {}", url, m)),
                        other => other,
                    });
                }
                Ok(r) if r.status().is_server_error() => {
                    last_err = Some(format!("HTTP {}", r.status()));
                }
                Ok(r) => {
                    return Err(Error::Network(format!("GET {}: HTTP {}", url, r.status())));
                }
                Err(e) => last_err = Some(e.to_string()),
            }
            // no point waiting after the final attempt
            if attempt + 1 < BACKOFF_MS.len() {
                std::thread::sleep(Duration::from_millis(backoff_ms));
            }
        }
        Err(Error::Network(format!(
            "GET {}: {}",
            url,
            last_err.unwrap_or_else(|| "no response".into())
        )))
    }

    /// Fetch every page of a World Bank list endpoint.
    fn get_wb_paged<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut page = 1u32;
        let mut out: Vec<T> = Vec::new();
        loop {
            if page > MAX_PAGES {
                return Err(Error::DataShape(format!("page limit exceeded ({})", MAX_PAGES)));
            }
            let page_url = format!("{}&page={}", url, page);
            let (meta, rows) = parse_wb_page::<T>(self.get_json(&page_url)?)?;
            out.extend(rows);
            if page >= meta.pages {
                break;
            }
            page += 1;
        }
        Ok(out)
    }
}

impl DataSource for Client {
    fn country_directory(&self) -> Result<Vec<DirectoryRecord>> {
        let url = format!("{}/all?fields=name,cca3,flag,region", self.rest_countries_url);
        let v = self.get_json(&url)?;
        if !v.is_array() {
            return Err(Error::DataShape(format!("GET {}: not a top-level array", url)));
        }
        let rows: Vec<RestCountry> = serde_json::from_value(v)?;
        Ok(rows.into_iter().map(DirectoryRecord::from).collect())
    }

    fn classification_directory(&self) -> Result<Vec<ClassificationRecord>> {
        let url = format!("{}/country?format=json&per_page=300", self.world_bank_url);
        let rows: Vec<WbCountry> = self.get_wb_paged(&url)?;
        Ok(rows.into_iter().map(ClassificationRecord::from).collect())
    }

    fn indicator_observations(
        &self,
        country: &str,
        indicator: &str,
        date: DateSpec,
    ) -> Result<Vec<RawObservation>> {
        let url = format!(
            "{}/country/{}/indicator/{}?format=json&per_page=30&date={}",
            self.world_bank_url,
            enc(country),
            enc(indicator),
            date.to_query_param()
        );
        let entries: Vec<Entry> = self.get_wb_paged(&url)?;
        Ok(entries.iter().filter_map(RawObservation::from_entry).collect())
    }
}
