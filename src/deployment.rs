use serde::Deserialize;

use crate::error::Error;

/// Sync metadata reported by an indexer's proxy endpoint for one
/// deployment. Fetching is the caller's job; this crate only owns the
/// shape and the progress computation over it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentMetadata {
    pub chain: String,
    pub genesis_hash: String,
    pub indexer_healthy: bool,
    /// Semver of the indexer node.
    pub indexer_node_version: String,
    pub last_processed_height: u64,
    pub last_processed_timestamp: String,
    /// Semver of the query node.
    pub query_node_version: String,
    pub spec_name: String,
    pub target_height: u64,
}

#[derive(Deserialize)]
struct MetadataResponse {
    data: MetadataData,
}

#[derive(Deserialize)]
struct MetadataData {
    #[serde(rename = "_metadata")]
    metadata: DeploymentMetadata,
}

impl DeploymentMetadata {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Unwrap the `{"data": {"_metadata": …}}` envelope the proxy returns.
    pub fn from_response_json(json: &str) -> Result<Self, Error> {
        let response: MetadataResponse = serde_json::from_str(json)?;
        Ok(response.data.metadata)
    }

    /// Indexing progress in `[0, 1]`. A proxy briefly ahead of the chain
    /// head must not report more than 1; an unknown target reports 0.
    pub fn progress(&self) -> f64 {
        if self.target_height == 0 {
            return 0.0;
        }
        (self.last_processed_height as f64 / self.target_height as f64).min(1.0)
    }
}
