use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How to specify dates in API queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSpec {
    /// Single year like 2020
    Year(i32),
    /// Inclusive range like 2000..=2020
    Range { start: i32, end: i32 },
}

impl DateSpec {
    /// Trailing window of `years` ending at `current_year` (inclusive on both ends).
    pub fn trailing(years: i32, current_year: i32) -> Self {
        DateSpec::Range {
            start: current_year - years,
            end: current_year,
        }
    }

    pub fn to_query_param(&self) -> String {
        match *self {
            DateSpec::Year(y) => y.to_string(),
            DateSpec::Range { start, end } => format!("{}:{}", start, end),
        }
    }
}

/// Metadata section returned by the World Bank API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    /// Accept both and normalize to `u32`.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("negative or oversized value for u32"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeName {
    pub id: String,
    #[serde(default)]
    pub value: String,
}

/// Raw indicator observation from the World Bank API (position 1 array).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub indicator: CodeName,
    #[serde(default)]
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
}

/// Raw country record from the World Bank `/country` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbCountry {
    pub id: String,
    #[serde(rename = "incomeLevel", default)]
    pub income_level: Option<CodeName>,
    #[serde(rename = "capitalCity", default)]
    pub capital_city: Option<String>,
}

/// Raw country record from the REST Countries `/all` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestCountry {
    pub name: RestCountryName,
    pub cca3: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestCountryName {
    pub common: String,
}

/// Directory A: geographic/display metadata for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub region: String,
}

impl From<RestCountry> for DirectoryRecord {
    fn from(r: RestCountry) -> Self {
        Self {
            code: r.cca3,
            name: r.name.common,
            flag: r.flag,
            region: r.region,
        }
    }
}

/// Directory B: classification metadata for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub code: String,
    pub income_level: String,
    pub capital_city: String,
}

impl From<WbCountry> for ClassificationRecord {
    fn from(w: WbCountry) -> Self {
        Self {
            code: w.id,
            income_level: w.income_level.map(|l| l.id).unwrap_or_default(),
            capital_city: w.capital_city.unwrap_or_default(),
        }
    }
}

/// A sovereign country in the session catalog. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// ISO3 code, unique within the catalog.
    pub code: String,
    pub name: String,
    pub flag: String,
    pub region: String,
    pub income_level: String,
    pub capital_city: String,
}

/// How an indicator's values are rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Currency,
    Percentage,
    Decimal,
    Count,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorDefinition {
    pub code: String,
    pub name: String,
    pub unit: String,
    pub format: FormatKind,
}

/// One (year, value) observation as delivered by a source; `value` may be null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub year: i32,
    pub value: Option<f64>,
}

impl RawObservation {
    /// Convert an API entry. Entries whose `date` is not a plain year are dropped.
    pub fn from_entry(e: &Entry) -> Option<Self> {
        let year = e.date.trim().parse::<i32>().ok()?;
        Some(Self {
            year,
            value: e.value,
        })
    }
}

/// One stored observation; nulls never reach this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub value: f64,
}

/// Outcome of fetching one country+indicator series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesStatus {
    /// At least one usable observation.
    Ok,
    /// The source answered but had no usable observations.
    NoData,
    /// Transport failure, HTTP error, or an unreadable body.
    Failed,
}

/// Observations for one country+indicator, ascending by year, nulls removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub definition: IndicatorDefinition,
    pub observations: Vec<Observation>,
    pub status: SeriesStatus,
}

impl IndicatorSeries {
    /// Build a series from raw source rows: drop nulls, sort ascending by year.
    pub fn from_raw(definition: IndicatorDefinition, raw: Vec<RawObservation>) -> Self {
        let mut observations: Vec<Observation> = raw
            .into_iter()
            .filter_map(|r| r.value.map(|value| Observation { year: r.year, value }))
            .collect();
        observations.sort_by_key(|o| o.year);
        let status = if observations.is_empty() {
            SeriesStatus::NoData
        } else {
            SeriesStatus::Ok
        };
        Self {
            definition,
            observations,
            status,
        }
    }

    /// Empty series recorded for an indicator whose request failed.
    pub fn failed(definition: IndicatorDefinition) -> Self {
        Self {
            definition,
            observations: Vec::new(),
            status: SeriesStatus::Failed,
        }
    }

    /// Most recent year with a real value.
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Every configured indicator's series for one country, keyed by indicator code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySeries {
    pub country_code: String,
    pub series: BTreeMap<String, IndicatorSeries>,
}

impl CountrySeries {
    pub fn get(&self, indicator: &str) -> Option<&IndicatorSeries> {
        self.series.get(indicator)
    }

    /// Latest value of one indicator, if any usable observation exists.
    pub fn latest_value(&self, indicator: &str) -> Option<f64> {
        self.get(indicator).and_then(|s| s.latest()).map(|o| o.value)
    }

    /// Codes of the indicators whose request failed.
    pub fn failed_indicators(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|(_, s)| s.status == SeriesStatus::Failed)
            .map(|(code, _)| code.as_str())
            .collect()
    }
}
