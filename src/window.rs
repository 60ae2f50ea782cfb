//! Read-side time windows over already-fetched series.
//!
//! Windowing never fetches. Only [`crate::fetcher::FETCH_WINDOW_YEARS`] years are ever
//! requested, so a wider window silently yields no older observations.

use crate::models::{IndicatorSeries, Observation};

/// Default trailing range shown per chart.
pub const DEFAULT_WINDOW_YEARS: u32 = 10;

/// Observations with `year >= current_year - years`, ascending by year.
///
/// The start year saturates, so an oversized window keeps every stored observation.
pub fn visible(series: &IndicatorSeries, years: u32, current_year: i32) -> Vec<Observation> {
    let start = current_year.saturating_sub(i32::try_from(years).unwrap_or(i32::MAX));
    let mut out: Vec<Observation> = series
        .observations
        .iter()
        .filter(|o| o.year >= start)
        .copied()
        .collect();
    out.sort_by_key(|o| o.year);
    out
}
