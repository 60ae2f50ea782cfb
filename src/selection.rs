//! Bounded, ordered set of countries chosen for comparison.
//!
//! Insertion order is significant: it fixes colour assignment and legend order
//! in whatever renders the comparison.

use crate::error::{Error, Result};
use crate::models::Country;
use std::fmt;
use std::sync::Arc;

/// Maximum number of countries compared at once.
pub const MAX_SELECTION: usize = 5;

type Listener = Box<dyn FnMut(&[Arc<Country>]) + Send>;

#[derive(Default)]
pub struct Selection {
    countries: Vec<Arc<Country>>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("countries", &self.codes())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run after every effective change, with the new selection.
    pub fn on_change<F>(&mut self, f: F)
    where
        F: FnMut(&[Arc<Country>]) + Send + 'static,
    {
        self.listeners.push(Box::new(f));
    }

    fn notify(&mut self) {
        for l in self.listeners.iter_mut() {
            l(&self.countries);
        }
    }

    /// Append `country` at the end.
    ///
    /// ### Errors
    /// - `AlreadySelected` if a country with the same code is present.
    /// - `LimitExceeded` if [`MAX_SELECTION`] countries are already selected.
    ///
    /// The selection is unchanged on error.
    pub fn add(&mut self, country: Arc<Country>) -> Result<()> {
        if self.contains(&country.code) {
            return Err(Error::AlreadySelected(country.code.clone()));
        }
        if self.countries.len() >= MAX_SELECTION {
            return Err(Error::LimitExceeded {
                limit: MAX_SELECTION,
            });
        }
        self.countries.push(country);
        self.notify();
        Ok(())
    }

    /// Remove the country with `code`. Removing an absent code is a no-op and returns `None`.
    pub fn remove(&mut self, code: &str) -> Option<Arc<Country>> {
        let idx = self.position(code)?;
        let removed = self.countries.remove(idx);
        self.notify();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.countries.clear();
        self.notify();
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    /// Index in insertion order (used for colour and legend order).
    pub fn position(&self, code: &str) -> Option<usize> {
        self.countries
            .iter()
            .position(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn countries(&self) -> &[Arc<Country>] {
        &self.countries
    }

    pub fn codes(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
