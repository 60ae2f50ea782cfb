//! econ_compare
//!
//! Data-acquisition core of a country economic comparison dashboard. It loads a
//! country catalog from two public directories, fetches World Bank indicator
//! series per country, caches them for the session and keeps a bounded
//! selection of countries to compare. Pairs with the `econ-compare` CLI.
//!
//! ### Features
//! - Catalog merge of REST Countries (display data) and World Bank (classification)
//! - Fourteen indicators fetched concurrently per country, tolerant of partial failure
//! - Session store that fetches each country at most once, even under concurrent requests
//! - Selection of up to five countries with change listeners
//! - Display formatting, comparison tables and CSV/JSON export
//!
//! ### Example
//! ```no_run
//! use econ_compare::{Client, Session};
//!
//! let mut session = Session::start(Client::default())?;
//! session.select("FRA")?;
//! session.select("DEU")?;
//! println!("{}", session.comparison_table()?);
//! # Ok::<(), econ_compare::Error>(())
//! ```

pub mod api;
pub mod catalog;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod indicators;
pub mod models;
pub mod report;
pub mod selection;
pub mod session;
pub mod storage;
pub mod store;
pub mod window;

pub use api::{Client, DataSource};
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use indicators::IndicatorRegistry;
pub use models::{Country, CountrySeries, DateSpec, IndicatorSeries, Observation};
pub use selection::Selection;
pub use session::Session;
pub use store::ComparisonStore;
