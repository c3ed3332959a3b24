//! Host tree fetch client

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::TreeError;
use crate::node::TreeNode;
use crate::Result;

const GROUP_LISTING_PATH: &str = "api/host/group/";

/// Response envelope of the host API: `{"data": ..., "error": ""}`
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
struct GroupListing {
    #[serde(rename = "treeData", default)]
    tree_data: Vec<TreeNode>,
}

#[derive(Debug, Clone)]
pub struct TreeClient {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl TreeClient {
    /// `api_base` should end with `/` when the API lives under a sub path.
    pub fn new(api_base: &Url, token: Option<String>, timeout: Duration) -> Result<Self> {
        let mut endpoint = api_base.join(GROUP_LISTING_PATH)?;
        endpoint.query_pairs_mut().append_pair("with_hosts", "1");

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the full group tree with hosts as leaves
    pub async fn fetch_tree(&self) -> Result<Vec<TreeNode>> {
        let mut request = self.client.get(self.endpoint.clone());
        if let Some(token) = &self.token {
            request = request.header("X-Token", token);
        }

        let envelope: ApiEnvelope<GroupListing> =
            request.send().await?.error_for_status()?.json().await?;

        if !envelope.error.is_empty() {
            return Err(TreeError::Api(envelope.error));
        }

        let mut nodes = envelope.data.ok_or(TreeError::EmptyResponse)?.tree_data;
        nodes.iter_mut().for_each(TreeNode::normalize);

        tracing::info!(endpoint = %self.endpoint, root_count = nodes.len(), "Fetched host tree");

        Ok(nodes)
    }
}
