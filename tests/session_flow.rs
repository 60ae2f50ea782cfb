mod common;

use common::{FakeSource, world};
use econ_compare::indicators::{EXPORTS, IMPORTS};
use econ_compare::report::{TRADE_BALANCE_LABEL, timestamp_label};
use econ_compare::{Error, Fetcher, IndicatorRegistry, Session};
use std::sync::Arc;

fn session(src: &Arc<FakeSource>) -> Session<Arc<FakeSource>> {
    Session::with_fetcher(
        Fetcher::new(src.clone(), IndicatorRegistry::default()).with_current_year(2026),
    )
    .unwrap()
}

fn source() -> Arc<FakeSource> {
    Arc::new(
        world()
            .with_series("FRA", EXPORTS, &[(2022, Some(9.0e11)), (2023, Some(1.0e12))])
            .with_series("FRA", IMPORTS, &[(2023, Some(1.1e12))])
            .with_series(
                "FRA",
                "SP.POP.TOTL",
                &[(2010, Some(65.0e6)), (2018, Some(67.0e6)), (2023, Some(68.2e6))],
            )
            .with_series("DEU", "FP.CPI.TOTL.ZG", &[(2023, Some(5.946))])
            .failing("SI.POV.GINI"),
    )
}

#[test]
fn unknown_code_cannot_be_selected() {
    let src = source();
    let mut s = session(&src);
    assert!(matches!(s.select("EUU"), Err(Error::UnknownCountry(_))));
    assert!(s.selection().is_empty());
}

#[test]
fn compare_requires_a_selection() {
    let src = source();
    let s = session(&src);
    assert!(matches!(s.compare(), Err(Error::EmptySelection)));
}

#[test]
fn deselect_and_reselect_does_not_refetch() {
    let src = source();
    let mut s = session(&src);
    s.select("FRA").unwrap();
    s.compare().unwrap();
    let after_first = src.calls();
    assert_eq!(after_first, 14);

    assert!(s.deselect("FRA").is_some());
    s.clear();
    assert!(s.store().has("FRA"));

    s.select("FRA").unwrap();
    s.compare().unwrap();
    assert_eq!(src.calls(), after_first);
}

#[test]
fn table_has_indicator_rows_plus_trade_balance() {
    let src = source();
    let mut s = session(&src);
    s.select("FRA").unwrap();
    s.select("DEU").unwrap();
    let table = s.comparison_table().unwrap();

    assert_eq!(table.headers, vec!["Indicator", "France", "Germany"]);
    assert_eq!(table.rows.len(), 15);

    let row = |label: &str| table.rows.iter().find(|r| r.label == label).unwrap();

    let pop = row("Population");
    assert_eq!(pop.cells[0].text, "68.2M");
    assert_eq!(pop.cells[0].year, Some(2023));
    assert_eq!(pop.cells[1].text, "N/A");

    assert_eq!(row("Inflation Rate (CPI)").cells[1].text, "5.95%");
    assert_eq!(row("Gini coefficient").cells[0].text, "N/A");

    let trade = row(TRADE_BALANCE_LABEL);
    assert_eq!(trade.cells[0].text, "-$100B");
    assert_eq!(trade.cells[1].text, "N/A");

    let text = table.to_string();
    assert!(text.starts_with("Indicator"));
    assert_eq!(text.lines().count(), 16);
}

#[test]
fn window_is_read_only_and_trailing() {
    let src = source();
    let mut s = session(&src);
    s.select("FRA").unwrap();
    assert!(s.window("FRA", "SP.POP.TOTL", 10).is_none());

    s.compare().unwrap();
    let calls = src.calls();
    let recent = s.window("FRA", "SP.POP.TOTL", 10).unwrap();
    let years: Vec<i32> = recent.iter().map(|o| o.year).collect();
    assert_eq!(years, vec![2018, 2023]);
    assert_eq!(timestamp_label(&recent), "Data: 2018 - 2023");

    let wide = s.window("FRA", "SP.POP.TOTL", 40).unwrap();
    assert_eq!(wide.len(), 3);
    assert_eq!(timestamp_label(&s.window("FRA", "SI.POV.GINI", 10).unwrap()), "No data available");
    assert_eq!(src.calls(), calls);
}

#[test]
fn listeners_registered_through_session() {
    let src = source();
    let mut s = session(&src);
    let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let c = count.clone();
    s.selection_mut().on_change(move |_| {
        c.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });
    s.select("JPN").unwrap();
    s.deselect("JPN");
    assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 2);
}
