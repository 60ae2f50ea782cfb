//! Country catalog: merge of the display directory and the classification directory.
//!
//! The merge is a left join from directory A on the country code. Records without a
//! capital city after the merge are regional aggregates (e.g. `EUU`) and are dropped.

use crate::api::DataSource;
use crate::error::Result;
use crate::models::{ClassificationRecord, Country, DirectoryRecord};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The canonical, immutable list of comparable countries, sorted by display name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    countries: Vec<Arc<Country>>,
}

/// Criteria for narrowing the catalog. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the display name.
    pub search: String,
    pub region: String,
    pub income_level: String,
}

/// Fetch both directories and build the catalog.
///
/// ### Errors
/// - `Network` if either directory is unreachable or answers with a non-success status.
/// - `DataShape` if either body cannot be parsed.
///
/// No partial catalog is ever returned.
pub fn load<S: DataSource + ?Sized>(source: &S) -> Result<Catalog> {
    let directory = source.country_directory()?;
    let classification = source.classification_directory()?;
    let catalog = merge(directory, classification);
    log::info!("catalog loaded: {} countries", catalog.len());
    Ok(catalog)
}

/// Left-join `directory` with `classification` by code, drop capital-less records, sort by name.
///
/// Codes are unique in the result: the first record for a code wins in either directory.
pub fn merge(directory: Vec<DirectoryRecord>, classification: Vec<ClassificationRecord>) -> Catalog {
    let mut by_code: HashMap<String, ClassificationRecord> = HashMap::new();
    for c in classification {
        by_code.entry(c.code.clone()).or_insert(c);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut countries: Vec<Country> = directory
        .into_iter()
        .filter(|d| seen.insert(d.code.clone()))
        .map(|d| {
            let (income_level, capital_city) = match by_code.get(&d.code) {
                Some(c) => (c.income_level.clone(), c.capital_city.clone()),
                None => (String::new(), String::new()),
            };
            Country {
                code: d.code,
                name: d.name,
                flag: d.flag,
                region: d.region,
                income_level,
                capital_city,
            }
        })
        .filter(|c| !c.capital_city.trim().is_empty())
        .collect();

    countries.sort_by(|a, b| compare_names(&a.name, &b.name));

    Catalog {
        countries: countries.into_iter().map(Arc::new).collect(),
    }
}

impl Catalog {
    pub fn get(&self, code: &str) -> Option<&Arc<Country>> {
        self.countries.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Country>> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Countries matching every non-empty criterion, in catalog order.
    pub fn filter(&self, f: &CatalogFilter) -> Vec<Arc<Country>> {
        let needle = f.search.trim().to_lowercase();
        self.countries
            .iter()
            .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
            .filter(|c| f.region.is_empty() || c.region == f.region)
            .filter(|c| f.income_level.is_empty() || c.income_level == f.income_level)
            .cloned()
            .collect()
    }
}

/// Locale-aware name ordering: case-insensitive with Latin diacritics folded,
/// ties broken by the raw string so the order stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match fold_latin(ch) {
            Some(base) => out.push_str(base),
            None => out.extend(ch.to_lowercase()),
        }
    }
    out
}

fn fold_latin(ch: char) -> Option<&'static str> {
    let base = match ch {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'Æ' | 'æ' => "ae",
        'Ç' | 'ç' => "c",
        'È' | 'É' | 'Ê' | 'Ë' | 'è' | 'é' | 'ê' | 'ë' => "e",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'ì' | 'í' | 'î' | 'ï' => "i",
        'Ñ' | 'ñ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ý' | 'ý' | 'ÿ' => "y",
        'ß' => "ss",
        _ => return None,
    };
    Some(base)
}
