use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shelfrank_core::ranking;
use shelfrank_core::types::{RankMetric, RankedProduct, DEFAULT_TOP_N};

use crate::state::DashboardState;

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub subcategory: String,
    pub metric: RankMetric,
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SubcategoriesResponse {
    /// Quick-select presets present in the data, in preset order.
    pub presets: Vec<String>,
    /// Every subcategory of the working set, sorted ascending.
    pub subcategories: Vec<String>,
}

/// The single-record summary shown above the table: the highest-ranked row,
/// with the metric formatted to two decimals and distribution left raw.
#[derive(Debug, Serialize)]
pub struct BestPerformer {
    pub brand: Option<String>,
    pub description: Option<String>,
    pub metric_label: &'static str,
    pub metric_value: Option<String>,
    pub distribution_pct: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub subcategory: String,
    pub metric: RankMetric,
    pub products: Vec<RankedProduct>,
    pub best_performer: Option<BestPerformer>,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn subcategories(
    State(state): State<Arc<DashboardState>>,
) -> Json<SubcategoriesResponse> {
    Json(SubcategoriesResponse {
        presets: state.present_presets(),
        subcategories: state.subcategories.clone(),
    })
}

pub async fn rankings(
    State(state): State<Arc<DashboardState>>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<RankingResponse>, StatusCode> {
    let n = query.n.unwrap_or(DEFAULT_TOP_N);

    let top = ranking::top_n(&state.working_set, &query.subcategory, query.metric, n)
        .map_err(internal_error)?;
    let products = ranking::ranked_products(&top, query.metric).map_err(internal_error)?;

    let best_performer = products.first().map(|product| BestPerformer {
        brand: product.brand.clone(),
        description: product.description.clone(),
        metric_label: query.metric.label(),
        metric_value: product.metric_value.map(|value| format!("{value:.2}")),
        distribution_pct: product.distribution_pct,
    });

    Ok(Json(RankingResponse {
        subcategory: query.subcategory,
        metric: query.metric,
        products,
        best_performer,
    }))
}

fn internal_error(err: polars::error::PolarsError) -> StatusCode {
    tracing::error!("ranking query failed: {err}");
    StatusCode::INTERNAL_SERVER_ERROR
}
