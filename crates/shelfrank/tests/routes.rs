use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use polars::prelude::*;
use serde_json::Value;
use shelfrank::state::DashboardState;
use shelfrank_core::types::CleanConfig;
use shelfrank_parser::RawSalesTable;
use tower::ServiceExt;

fn sample_state() -> Arc<DashboardState> {
    let rows: [[&str; 6]; 5] = [
        ["UPC", "SS POTATO CHIPS", "ACME", "ACME CLASSIC 8OZ", "15", "40"],
        ["UPC", "SS POTATO CHIPS", "CRISP CO", "CRISP CO RIDGED", "80", "30"],
        ["UPC", "SS POTATO CHIPS", "FRITO LAY", "FL ROLLUP", "60", "70"],
        ["UPC", "SS TORTILLA & CORN CHIPS", "CRUNCHCO", "CRUNCHCO DIPPERS", "42", "18"],
        ["UPC", "SS PRETZELS", "TWISTY", "TWISTY MINIS", "25", "not reported"],
    ];

    let column = |name: &str, idx: usize| -> Column {
        Series::new(
            name.into(),
            rows.iter().map(|row| row[idx]).collect::<Vec<&str>>(),
        )
        .into()
    };

    let df = DataFrame::new(vec![
        column("product_level", 0),
        column("subcategory", 1),
        column("brand", 2),
        column("description", 3),
        column("distribution_pct", 4),
        column("velocity", 5),
    ])
    .unwrap();

    let raw = RawSalesTable {
        df,
        source_headers: Vec::new(),
    };

    Arc::new(DashboardState::from_raw(&raw, CleanConfig::default()).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let router = shelfrank::router(sample_state());
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_responds_ok() {
    let router = shelfrank::router(sample_state());
    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn subcategories_lists_presets_and_sorted_distinct_values() {
    let (status, body) = get_json("/subcategories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["subcategories"],
        serde_json::json!(["SS POTATO CHIPS", "SS PRETZELS", "SS TORTILLA & CORN CHIPS"])
    );
    // Only two of the three quick-select presets exist in this data.
    assert_eq!(
        body["presets"],
        serde_json::json!(["SS POTATO CHIPS", "SS TORTILLA & CORN CHIPS"])
    );
}

#[tokio::test]
async fn rankings_returns_descending_products_and_best_performer() {
    let (status, body) =
        get_json("/rankings?subcategory=SS%20POTATO%20CHIPS&metric=velocity").await;

    assert_eq!(status, StatusCode::OK);

    // FRITO LAY was cleaned out; ACME (40) outranks CRISP CO (30).
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["description"], "ACME CLASSIC 8OZ");
    assert_eq!(products[1]["description"], "CRISP CO RIDGED");

    let best = &body["best_performer"];
    assert_eq!(best["brand"], "ACME");
    assert_eq!(best["metric_label"], "Velocity");
    assert_eq!(best["metric_value"], "40.00");
    assert_eq!(best["distribution_pct"], 15.0);
}

#[tokio::test]
async fn rankings_by_sales_strength_formats_two_decimals() {
    let (status, body) =
        get_json("/rankings?subcategory=SS%20POTATO%20CHIPS&metric=sales_strength").await;

    assert_eq!(status, StatusCode::OK);

    // CRISP CO: 30 * 80/100 = 24.0 beats ACME: 40 * 15/100 = 6.0.
    let products = body["products"].as_array().unwrap();
    assert_eq!(products[0]["description"], "CRISP CO RIDGED");
    assert_eq!(body["best_performer"]["metric_value"], "24.00");
}

#[tokio::test]
async fn rankings_respects_n() {
    let (status, body) =
        get_json("/rankings?subcategory=SS%20POTATO%20CHIPS&metric=velocity&n=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_selection_is_ok_with_no_best_performer() {
    let (status, body) = get_json("/rankings?subcategory=SS%20NACHO%20KITS&metric=velocity").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["products"].as_array().unwrap().is_empty());
    assert!(body["best_performer"].is_null());
}

#[tokio::test]
async fn unknown_metric_is_a_client_error() {
    let (status, _) = get_json("/rankings?subcategory=SS%20POTATO%20CHIPS&metric=profit").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn null_metric_rows_rank_last() {
    let (status, body) = get_json("/rankings?subcategory=SS%20PRETZELS&metric=velocity").await;

    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["metric_value"], Value::Null);

    // A best performer with a null metric has no formatted value.
    assert_eq!(body["best_performer"]["metric_value"], Value::Null);
}
