//! Per-country fetch of every configured indicator.
//!
//! Each indicator is requested independently; a failure in one never aborts the
//! others. The result always holds exactly one series per configured indicator.

use crate::api::DataSource;
use crate::indicators::IndicatorRegistry;
use crate::models::{CountrySeries, DateSpec, IndicatorDefinition, IndicatorSeries};
use chrono::Datelike;
use std::collections::BTreeMap;

/// Trailing window, in years, requested for every indicator.
pub const FETCH_WINDOW_YEARS: i32 = 25;

/// Current calendar year in local time.
pub fn this_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Debug)]
pub struct Fetcher<S> {
    source: S,
    registry: IndicatorRegistry,
    window_years: i32,
    current_year: Option<i32>,
}

impl<S: DataSource> Fetcher<S> {
    pub fn new(source: S, registry: IndicatorRegistry) -> Self {
        Self {
            source,
            registry,
            window_years: FETCH_WINDOW_YEARS,
            current_year: None,
        }
    }

    /// Pin the window's end year instead of reading the clock.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(this_year)
    }

    /// Date range sent with every indicator request.
    pub fn window(&self) -> DateSpec {
        DateSpec::trailing(self.window_years, self.current_year())
    }

    /// Fetch all indicators for `country`, one request per indicator, concurrently.
    ///
    /// Never fails: a request that errors (or a worker that panics) yields an empty
    /// series marked [`crate::models::SeriesStatus::Failed`].
    pub fn fetch_all(&self, country: &str) -> CountrySeries {
        let date = self.window();
        let series: BTreeMap<String, IndicatorSeries> = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .registry
                .iter()
                .map(|def| (def, scope.spawn(move || self.fetch_one(country, def, date))))
                .collect();
            handles
                .into_iter()
                .map(|(def, handle)| {
                    let s = handle.join().unwrap_or_else(|_| {
                        log::warn!("{} {}: fetch worker panicked", country, def.code);
                        IndicatorSeries::failed(def.clone())
                    });
                    (def.code.clone(), s)
                })
                .collect()
        });

        let out = CountrySeries {
            country_code: country.to_string(),
            series,
        };
        log::info!(
            "fetched {} indicators for {} ({} failed)",
            out.series.len(),
            country,
            out.failed_indicators().len()
        );
        out
    }

    fn fetch_one(&self, country: &str, def: &IndicatorDefinition, date: DateSpec) -> IndicatorSeries {
        match self.source.indicator_observations(country, &def.code, date) {
            Ok(raw) => IndicatorSeries::from_raw(def.clone(), raw),
            Err(e) => {
                log::warn!("{} {}: {}", country, def.code, e);
                IndicatorSeries::failed(def.clone())
            }
        }
    }
}
