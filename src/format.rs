//! Display formatting for indicator values.

use crate::indicators::{EXPORTS, IMPORTS};
use crate::models::{CountrySeries, FormatKind};
use num_format::{Locale, ToFormattedString};

/// Placeholder for a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

// Compact suffixes, largest first.
const COMPACT: [(f64, &str); 4] = [(1.0e12, "T"), (1.0e9, "B"), (1.0e6, "M"), (1.0e3, "K")];

/// Format a value for display according to its indicator's [`FormatKind`].
///
/// ### Example
/// ```
/// # use econ_compare::format::format_value;
/// # use econ_compare::models::FormatKind;
/// assert_eq!(format_value(Some(2.5e9), FormatKind::Currency), "$2.5B");
/// assert_eq!(format_value(Some(3.14159), FormatKind::Percentage), "3.14%");
/// assert_eq!(format_value(None, FormatKind::Count), "N/A");
/// ```
pub fn format_value(value: Option<f64>, kind: FormatKind) -> String {
    let v = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };
    match kind {
        FormatKind::Currency => compact_currency(v),
        FormatKind::Percentage => format!("{:.2}%", round2(v)),
        FormatKind::Decimal => format!("{:.2}", round2(v)),
        FormatKind::Count => count(v),
    }
}

/// Compact USD with at most one fraction digit: `$21.4T`, `$950M`, `-$1.2B`, `$512.5`.
fn compact_currency(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let a = v.abs();
    let (scaled, suffix) = match COMPACT.iter().position(|(step, _)| a >= *step) {
        Some(i) => {
            let r = round1(a / COMPACT[i].0);
            // 999.95K rounds to 1000K, which reads as 1M
            if r >= 1000.0 && i > 0 {
                (round1(a / COMPACT[i - 1].0), COMPACT[i - 1].1)
            } else {
                (r, COMPACT[i].1)
            }
        }
        None => {
            let r = round1(a);
            if r >= 1000.0 { (round1(a / 1.0e3), "K") } else { (r, "") }
        }
    };
    format!("{}${}{}", sign, trim_zero(scaled), suffix)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// `{:.2}` alone rounds exact ties to even (0.125 -> 0.12); round them away from zero.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn trim_zero(x: f64) -> String {
    let s = format!("{:.1}", x);
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

/// Head-count style: `2.35B`, `67.4M`, `12K`, otherwise thousands-grouped.
fn count(v: f64) -> String {
    if v >= 1.0e9 {
        format!("{:.2}B", v / 1.0e9)
    } else if v >= 1.0e6 {
        format!("{:.1}M", v / 1.0e6)
    } else if v >= 1.0e3 {
        format!("{:.0}K", v / 1.0e3)
    } else {
        grouped(v)
    }
}

/// English thousands grouping with up to three fraction digits.
fn grouped(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let int = rounded.trunc() as i64;
    let frac = (rounded.fract().abs() * 1000.0).round() as i64;
    let mut s = int.to_formatted_string(&Locale::en);
    if int == 0 && rounded < 0.0 {
        s.insert(0, '-');
    }
    if frac > 0 {
        s.push('.');
        s.push_str(format!("{:03}", frac).trim_end_matches('0'));
    }
    s
}

/// Latest exports minus latest imports; a missing side counts as zero.
///
/// `None` when neither side has data, or when the balance is exactly zero.
pub fn trade_balance(data: &CountrySeries) -> Option<f64> {
    let exports = data.latest_value(EXPORTS);
    let imports = data.latest_value(IMPORTS);
    if exports.is_none() && imports.is_none() {
        return None;
    }
    let balance = exports.unwrap_or(0.0) - imports.unwrap_or(0.0);
    if balance == 0.0 { None } else { Some(balance) }
}
