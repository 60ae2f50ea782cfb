mod common;

use common::{FakeSource, class, dir, world};
use econ_compare::catalog::{self, CatalogFilter};
use econ_compare::models::Country;
use econ_compare::Error;

#[test]
fn merges_display_and_classification_by_code() {
    let cat = catalog::merge(
        vec![dir("FRA", "France", "Europe")],
        vec![class("FRA", "HIC", "Paris")],
    );
    let got: Vec<Country> = cat.iter().map(|c| (**c).clone()).collect();
    assert_eq!(
        got,
        vec![Country {
            code: "FRA".into(),
            name: "France".into(),
            flag: String::new(),
            region: "Europe".into(),
            income_level: "HIC".into(),
            capital_city: "Paris".into(),
        }]
    );
}

#[test]
fn capital_less_aggregate_is_dropped() {
    let cat = catalog::merge(
        vec![dir("EUU", "European Union", "Europe"), dir("FRA", "France", "Europe")],
        vec![class("FRA", "HIC", "Paris")],
    );
    assert!(cat.get("EUU").is_none());
    assert_eq!(cat.len(), 1);
}

#[test]
fn unmatched_directory_entry_gets_empty_classification_and_is_dropped() {
    // No match in directory B means no capital, so the record cannot survive.
    let cat = catalog::merge(vec![dir("ATA", "Antarctica", "Antarctic")], vec![]);
    assert!(cat.is_empty());
}

#[test]
fn classification_only_entries_do_not_appear() {
    let cat = catalog::merge(
        vec![dir("FRA", "France", "Europe")],
        vec![class("FRA", "HIC", "Paris"), class("DEU", "HIC", "Berlin")],
    );
    assert!(cat.get("DEU").is_none());
}

#[test]
fn loaded_catalog_is_sorted_and_has_capitals() {
    let src = world();
    let cat = catalog::load(&src).unwrap();
    let names: Vec<&str> = cat.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Brazil", "France", "Germany", "India", "Japan", "Kenya"]);
    assert!(cat.iter().all(|c| !c.capital_city.is_empty()));
}

#[test]
fn sort_is_case_and_accent_insensitive() {
    let cat = catalog::merge(
        vec![
            dir("CUW", "Curaçao", "Americas"),
            dir("CIV", "Côte d'Ivoire", "Africa"),
            dir("CRI", "Costa Rica", "Americas"),
            dir("ALA", "Åland Islands", "Europe"),
            dir("ALB", "Albania", "Europe"),
        ],
        vec![
            class("CUW", "HIC", "Willemstad"),
            class("CIV", "LMC", "Yamoussoukro"),
            class("CRI", "UMC", "San Jose"),
            class("ALA", "", "Mariehamn"),
            class("ALB", "UMC", "Tirane"),
        ],
    );
    let codes: Vec<&str> = cat.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["ALA", "ALB", "CRI", "CIV", "CUW"]);
}

#[test]
fn unreachable_directory_fails_without_partial_catalog() {
    let src = FakeSource {
        directory_down: true,
        ..world()
    };
    let err = catalog::load(&src).unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert!(err.is_retryable());
}

#[test]
fn filter_by_search_region_and_income() {
    let cat = catalog::load(&world()).unwrap();

    let asia = cat.filter(&CatalogFilter {
        region: "Asia".into(),
        ..Default::default()
    });
    let codes: Vec<&str> = asia.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["IND", "JPN"]);

    let lmc_with_n = cat.filter(&CatalogFilter {
        search: "N".into(),
        income_level: "LMC".into(),
        ..Default::default()
    });
    let codes: Vec<&str> = lmc_with_n.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["IND", "KEN"]);

    assert_eq!(cat.filter(&CatalogFilter::default()).len(), cat.len());
}

#[test]
fn lookup_is_case_insensitive() {
    let cat = catalog::load(&world()).unwrap();
    assert_eq!(cat.get("fra").map(|c| c.name.as_str()), Some("France"));
}

#[test]
fn duplicate_codes_keep_the_first_record_from_each_directory() {
    let cat = catalog::merge(
        vec![dir("FRA", "France", "Europe"), dir("FRA", "French Republic", "Europe")],
        vec![class("FRA", "HIC", "Paris"), class("FRA", "UMC", "Lyon")],
    );
    assert_eq!(cat.len(), 1);
    let fra = cat.get("FRA").unwrap();
    assert_eq!(fra.name, "France");
    assert_eq!(fra.income_level, "HIC");
    assert_eq!(fra.capital_city, "Paris");
}
