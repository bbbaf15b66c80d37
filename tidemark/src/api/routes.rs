use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use tidemark_storage::PartitionLister;

use crate::api::server::AppState;
use crate::query::{engine, SubQuery, TimeSeries};
use crate::template::PrefixTemplate;
use crate::{Error, Result};

/// A query request bundles independent sub-queries.
///
/// Sub-queries arrive as raw JSON so that one malformed entry fails alone
/// instead of poisoning the whole request.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub queries: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Default)]
pub struct QueryResponse {
    pub results: HashMap<String, QueryResult>,
}

/// Per-sub-query outcome: either a populated series or an error, never both.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Series(TimeSeries),
    Failed { error: String },
}

/// POST /query - run every sub-query independently, keyed by refId.
pub async fn query_data(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let sub_queries = request.queries.into_iter().map(|raw| {
        let lister = state.lister.clone();
        async move {
            let ref_id = raw
                .get("refId")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();

            let result = match run_sub_query(raw, lister).await {
                Ok(series) => QueryResult::Series(series),
                Err(e) => {
                    tracing::error!("Query '{}' failed: {}", ref_id, e);
                    QueryResult::Failed {
                        error: e.to_string(),
                    }
                }
            };

            (ref_id, result)
        }
    });

    let results = futures::future::join_all(sub_queries).await.into_iter().collect();
    Json(QueryResponse { results })
}

async fn run_sub_query(
    raw: serde_json::Value,
    lister: Arc<dyn PartitionLister>,
) -> Result<TimeSeries> {
    let sub: SubQuery = serde_json::from_value(raw)
        .map_err(|e| Error::InvalidQuery(format!("cannot decode query: {}", e)))?;

    tracing::debug!(
        "Running query '{}' against bucket '{}' with prefix '{}'",
        sub.ref_id,
        sub.bucket,
        sub.prefix
    );

    let template = PrefixTemplate::parse(&sub.prefix);
    engine::aggregate(
        &template,
        &sub.time_range,
        sub.metric,
        &sub.bucket,
        lister.as_ref(),
    )
    .await
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// GET /health - the config-page test button; this datasource is always
/// healthy once it is running.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "data source is working",
    })
}
