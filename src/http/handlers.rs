//! Pull endpoint handlers.

use axum::extract::{Query, State};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::SyncError;
use crate::http::response::ApiResult;
use crate::http::server::AppState;
use crate::model::{ConfigGroup, GroupConfigData};

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    /// Comma-separated group keys, e.g. `PLUGIN,RULE`.
    #[serde(rename = "groupKeys")]
    pub group_keys: Option<String>,
}

/// `GET /configs/fetch?groupKeys=PLUGIN,RULE`
///
/// Fails as a whole if any key is unknown or any group is not ready. A
/// request naming no group is rejected as an unknown key.
pub async fn fetch_configs(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> Result<ApiResult<BTreeMap<ConfigGroup, GroupConfigData>>, SyncError> {
    let keys = params.group_keys.unwrap_or_default();
    let groups = keys
        .split(',')
        .filter(|k| !k.trim().is_empty())
        .map(str::parse::<ConfigGroup>)
        .collect::<Result<Vec<_>, _>>()?;
    if groups.is_empty() {
        return Err(SyncError::UnknownGroup(keys));
    }

    let mut data = BTreeMap::new();
    for group in groups {
        let payload = state.fetcher.fetch_group(group).await?;
        data.insert(group, payload);
    }

    tracing::debug!(groups = %keys, "Served config fetch");
    Ok(ApiResult::success(data))
}
