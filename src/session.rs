//! Application context owning the catalog, the comparison store and the selection.
//!
//! One `Session` replaces the dashboard's process-wide state; tests build as many
//! independent sessions as they like.

use crate::api::DataSource;
use crate::catalog::{self, Catalog};
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::indicators::IndicatorRegistry;
use crate::models::{Country, Observation};
use crate::report::{ComparedCountry, ComparisonTable};
use crate::selection::Selection;
use crate::store::ComparisonStore;
use crate::window;
use std::sync::Arc;

pub struct Session<S> {
    catalog: Catalog,
    store: ComparisonStore<S>,
    selection: Selection,
}

impl<S: DataSource> Session<S> {
    /// Load the catalog and set up an empty selection and store with the built-in indicators.
    ///
    /// ### Errors
    /// Catalog load failures (`Network`, `DataShape`) are fatal for the session.
    pub fn start(source: S) -> Result<Self> {
        Self::with_fetcher(Fetcher::new(source, IndicatorRegistry::default()))
    }

    /// Like [`Session::start`], with a caller-configured fetcher (custom indicators, pinned year).
    pub fn with_fetcher(fetcher: Fetcher<S>) -> Result<Self> {
        let catalog = catalog::load(fetcher.source())?;
        Ok(Self {
            catalog,
            store: ComparisonStore::new(fetcher),
            selection: Selection::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ComparisonStore<S> {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable access, e.g. to register [`Selection::on_change`] listeners.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        self.store.fetcher().registry()
    }

    /// Add the catalog country with `code` to the selection.
    ///
    /// ### Errors
    /// - `UnknownCountry` if the code is not in the catalog.
    /// - `AlreadySelected` / `LimitExceeded` from [`Selection::add`].
    pub fn select(&mut self, code: &str) -> Result<Arc<Country>> {
        let country = self
            .catalog
            .get(code)
            .cloned()
            .ok_or_else(|| Error::UnknownCountry(code.to_string()))?;
        self.selection.add(country.clone())?;
        Ok(country)
    }

    /// Drop a country from the selection; its fetched data stays in the store.
    pub fn deselect(&mut self, code: &str) -> Option<Arc<Country>> {
        self.selection.remove(code)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Make sure every selected country is fetched, in selection order.
    ///
    /// ### Errors
    /// - `EmptySelection` if nothing is selected.
    pub fn compare(&self) -> Result<Vec<ComparedCountry>> {
        if self.selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        Ok(self
            .selection
            .countries()
            .iter()
            .map(|country| ComparedCountry {
                country: country.clone(),
                data: self.store.ensure(&country.code),
            })
            .collect())
    }

    /// Fetch the selection and lay out its latest values as a table.
    pub fn comparison_table(&self) -> Result<ComparisonTable> {
        let compared = self.compare()?;
        Ok(ComparisonTable::build(self.registry(), &compared))
    }

    /// Trailing `years` of one stored series. Never fetches; `None` if the country is not stored.
    pub fn window(&self, code: &str, indicator: &str, years: u32) -> Option<Vec<Observation>> {
        let data = self.store.get(code)?;
        let series = data.get(indicator)?;
        Some(window::visible(series, years, self.store.fetcher().current_year()))
    }
}
