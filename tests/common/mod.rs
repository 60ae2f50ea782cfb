#![allow(dead_code)]

use econ_compare::models::{
    ClassificationRecord, DateSpec, DirectoryRecord, FormatKind, IndicatorDefinition,
    RawObservation,
};
use econ_compare::{DataSource, Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory stand-in for the REST Countries + World Bank endpoints.
#[derive(Default)]
pub struct FakeSource {
    pub directory: Vec<DirectoryRecord>,
    pub classification: Vec<ClassificationRecord>,
    /// (country, indicator) -> raw rows
    pub series: HashMap<(String, String), Vec<RawObservation>>,
    /// Indicator codes whose requests fail.
    pub failing: HashSet<String>,
    pub directory_down: bool,
    pub delay: Duration,
    pub calls: AtomicUsize,
    pub dates: Mutex<Vec<DateSpec>>,
}

impl FakeSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn with_series(mut self, country: &str, indicator: &str, rows: &[(i32, Option<f64>)]) -> Self {
        self.series.insert(
            (country.to_string(), indicator.to_string()),
            rows.iter()
                .map(|&(year, value)| RawObservation { year, value })
                .collect(),
        );
        self
    }

    pub fn failing(mut self, indicator: &str) -> Self {
        self.failing.insert(indicator.to_string());
        self
    }
}

impl DataSource for FakeSource {
    fn country_directory(&self) -> Result<Vec<DirectoryRecord>> {
        if self.directory_down {
            return Err(Error::Network("GET /all: HTTP 503".into()));
        }
        Ok(self.directory.clone())
    }

    fn classification_directory(&self) -> Result<Vec<ClassificationRecord>> {
        Ok(self.classification.clone())
    }

    fn indicator_observations(
        &self,
        country: &str,
        indicator: &str,
        date: DateSpec,
    ) -> Result<Vec<RawObservation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dates.lock().unwrap().push(date);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.failing.contains(indicator) {
            return Err(Error::Network(format!("{} {}: HTTP 500", country, indicator)));
        }
        Ok(self
            .series
            .get(&(country.to_string(), indicator.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn dir(code: &str, name: &str, region: &str) -> DirectoryRecord {
    DirectoryRecord {
        code: code.into(),
        name: name.into(),
        flag: String::new(),
        region: region.into(),
    }
}

pub fn class(code: &str, income: &str, capital: &str) -> ClassificationRecord {
    ClassificationRecord {
        code: code.into(),
        income_level: income.into(),
        capital_city: capital.into(),
    }
}

pub fn def(code: &str) -> IndicatorDefinition {
    IndicatorDefinition {
        code: code.into(),
        name: code.into(),
        unit: "%".into(),
        format: FormatKind::Percentage,
    }
}

/// Six sovereign countries plus one aggregate.
pub fn world() -> FakeSource {
    FakeSource {
        directory: vec![
            dir("FRA", "France", "Europe"),
            dir("DEU", "Germany", "Europe"),
            dir("JPN", "Japan", "Asia"),
            dir("BRA", "Brazil", "Americas"),
            dir("KEN", "Kenya", "Africa"),
            dir("IND", "India", "Asia"),
            dir("EUU", "European Union", "Europe"),
        ],
        classification: vec![
            class("FRA", "HIC", "Paris"),
            class("DEU", "HIC", "Berlin"),
            class("JPN", "HIC", "Tokyo"),
            class("BRA", "UMC", "Brasilia"),
            class("KEN", "LMC", "Nairobi"),
            class("IND", "LMC", "New Delhi"),
            class("EUU", "", ""),
        ],
        ..Default::default()
    }
}
