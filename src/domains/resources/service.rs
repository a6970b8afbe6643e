//! Resource service implementation.
//!
//! The ResourceService advertises the resources declared in
//! `schema/resources.json` and serves their content on read. Market
//! resources are fetched live through the gateway on every read.

use std::sync::Arc;

use rmcp::model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info};

use super::content::{ResourceContent, score_methodology};
use super::error::ResourceError;
use crate::domains::schema::{ResourceDescriptor, SchemaSource};
use crate::fmp::{FinancialRecord, FmpClient};

/// An entry in the resource catalogue.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// Where reads of this resource are served from.
    pub content: ResourceContent,
}

impl ResourceEntry {
    fn from_descriptor(descriptor: ResourceDescriptor) -> Self {
        let content = ResourceContent::for_uri(&descriptor.uri);
        let mut raw = RawResource::new(descriptor.uri, descriptor.name);
        raw.description = descriptor.description;
        raw.mime_type = Some(descriptor.mime_type);
        Self {
            resource: raw.no_annotation(),
            content,
        }
    }

    fn uri(&self) -> &str {
        &self.resource.raw.uri
    }
}

/// Service for listing and reading resources, in declaration order.
pub struct ResourceService {
    client: Arc<FmpClient>,
    resources: Vec<ResourceEntry>,
}

impl ResourceService {
    /// Load the resource declarations from `schemas`.
    pub fn from_schema(
        schemas: &SchemaSource,
        client: Arc<FmpClient>,
    ) -> Result<Self, ResourceError> {
        Ok(Self::new(schemas.resources()?, client))
    }

    pub fn new(descriptors: Vec<ResourceDescriptor>, client: Arc<FmpClient>) -> Self {
        info!("Initializing ResourceService");

        let resources = descriptors
            .into_iter()
            .map(|descriptor| {
                info!("Registering resource: {}", descriptor.uri);
                ResourceEntry::from_descriptor(descriptor)
            })
            .collect();

        Self { client, resources }
    }

    /// List all available resources.
    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .iter()
            .find(|entry| entry.uri() == uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        debug!("Reading resource: {}", uri);
        let text = match entry.content {
            ResourceContent::MarketIndices => to_json(&self.client.market_indices().await?)?,
            ResourceContent::SectorPerformance => {
                to_json(&self.client.sector_performance().await?)?
            }
            ResourceContent::ScoreMethodology => score_methodology(),
            ResourceContent::Unavailable => return Err(ResourceError::Unreadable(uri.to_string())),
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text,
                meta: None,
            }],
        })
    }
}

fn to_json(records: &[FinancialRecord]) -> Result<String, ResourceError> {
    Ok(serde_json::to_string_pretty(records)?)
}
