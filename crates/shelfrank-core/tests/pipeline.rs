use polars::prelude::*;

use shelfrank_core::pipeline::build_working_set;
use shelfrank_core::ranking::{ranked_products, top_n};
use shelfrank_core::types::{CleanConfig, RankMetric};
use shelfrank_parser::{parse_sales_export, RawSalesTable};

const EXPORT: &str = "\
Product Level,Subcategory,Brand,Description,% of Stores Selling,Average Weekly Units Per Store Selling Per Item
UPC,SS POTATO CHIPS,ACME,ACME CLASSIC 8OZ,15,40
UPC,SS POTATO CHIPS,KETTLE KING,KETTLE KING SEA SALT,5,90
UPC,SS POTATO CHIPS,Frito Lay,FL ROLLUP,60,70
BRAND,SS POTATO CHIPS,ACME,ACME ALL ITEMS,88,10
UPC,SS CHEESE SNACKS VARIETY PACKS,SNAX,SNAX VARIETY 12CT,55,12
UPC,SS POTATO CHIPS,CRISP CO,CRISP CO RIDGED,80,30
UPC,SS PRETZELS,TWISTY,TWISTY MINIS,25,not reported
";

fn raw() -> RawSalesTable {
    parse_sales_export(EXPORT).expect("fixture export should parse")
}

#[test]
fn working_set_honors_all_cleaning_invariants() {
    let working_set = build_working_set(&raw(), &CleanConfig::default()).unwrap();

    // Survivors: ACME CLASSIC, CRISP CO RIDGED, TWISTY MINIS.
    assert_eq!(working_set.height(), 3);

    let product_level = working_set.column("product_level").unwrap().str().unwrap();
    let subcategory = working_set.column("subcategory").unwrap().str().unwrap();
    let brand = working_set.column("brand").unwrap().str().unwrap();
    let distribution = working_set.column("distribution_pct").unwrap().f64().unwrap();

    for idx in 0..working_set.height() {
        assert_eq!(product_level.get(idx), Some("UPC"));
        assert!(!subcategory.get(idx).unwrap().to_uppercase().contains("VARIETY PACKS"));
        assert_ne!(brand.get(idx).map(str::to_uppercase).as_deref(), Some("FRITO LAY"));
        assert!(distribution.get(idx).unwrap() >= 10.0);
    }
}

#[test]
fn sales_strength_is_derived_not_read() {
    let working_set = build_working_set(&raw(), &CleanConfig::default()).unwrap();

    let velocity = working_set.column("velocity").unwrap().f64().unwrap();
    let distribution = working_set.column("distribution_pct").unwrap().f64().unwrap();
    let strength = working_set.column("sales_strength").unwrap().f64().unwrap();

    for idx in 0..working_set.height() {
        match (velocity.get(idx), distribution.get(idx)) {
            (Some(v), Some(d)) => assert_eq!(strength.get(idx), Some(v * (d / 100.0))),
            _ => assert!(strength.get(idx).is_none()),
        }
    }

    // ACME CLASSIC: 40 * 15/100.
    assert_eq!(strength.get(0), Some(6.0));
    // TWISTY MINIS velocity never coerced, so its strength is null.
    assert!(strength.get(2).is_none());
}

#[test]
fn spec_scenario_acme_classic_ranks_by_velocity() {
    let working_set = build_working_set(&raw(), &CleanConfig::default()).unwrap();

    let top = top_n(&working_set, "SS POTATO CHIPS", RankMetric::Velocity, 10).unwrap();
    let products = ranked_products(&top, RankMetric::Velocity).unwrap();

    // KETTLE KING (5% distribution) and FL ROLLUP were cleaned away; only
    // ACME and CRISP CO remain, ordered by velocity.
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].description.as_deref(), Some("ACME CLASSIC 8OZ"));
    assert_eq!(products[0].metric_value, Some(40.0));
    assert_eq!(products[1].description.as_deref(), Some("CRISP CO RIDGED"));
}

#[test]
fn subcategory_fully_removed_by_cleaning_yields_empty_ranking() {
    let working_set = build_working_set(&raw(), &CleanConfig::default()).unwrap();

    // Present in the raw export, gone after cleaning (variety packs only).
    let top = top_n(
        &working_set,
        "SS CHEESE SNACKS VARIETY PACKS",
        RankMetric::SalesStrength,
        10,
    )
    .unwrap();

    assert_eq!(top.height(), 0);
}

#[test]
fn nan_velocity_text_ranks_last_like_missing() {
    const NAN_EXPORT: &str = "\
Product Level,Subcategory,Brand,Description,% of Stores Selling,Average Weekly Units Per Store Selling Per Item
UPC,SS PRETZELS,REAL,REAL DEAL THINS,50,40
UPC,SS PRETZELS,NANCO,NANCO KNOTS,50,NaN
";
    let raw = parse_sales_export(NAN_EXPORT).expect("fixture export should parse");
    let working_set = build_working_set(&raw, &CleanConfig::default()).unwrap();

    let velocity = working_set.column("velocity").unwrap().f64().unwrap();
    assert!(velocity.get(1).is_none());

    let top = top_n(&working_set, "SS PRETZELS", RankMetric::Velocity, 10).unwrap();
    let products = ranked_products(&top, RankMetric::Velocity).unwrap();

    assert_eq!(products[0].description.as_deref(), Some("REAL DEAL THINS"));
    assert_eq!(products[1].description.as_deref(), Some("NANCO KNOTS"));
    assert!(products[1].metric_value.is_none());
}

#[test]
fn missing_source_file_is_fatal() {
    let err = shelfrank_core::pipeline::load_raw_table(std::path::Path::new(
        "/definitely/not/here.csv",
    ))
    .expect_err("missing file must fail the load");

    assert!(matches!(
        err,
        shelfrank_core::error::PipelineError::Io(_)
    ));
}
