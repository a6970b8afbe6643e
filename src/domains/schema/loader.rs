//! Loading of tool schemas, resource descriptors and prompt descriptors.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use rmcp::model::JsonObject;
use serde::Deserialize;
use tracing::debug;

use super::error::SchemaError;

const SERVICES_DIR: &str = "services";
const RESOURCES_FILE: &str = "resources.json";
const PROMPTS_FILE: &str = "prompts.json";

macro_rules! embedded {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../../../schema/", $path)))),*]
    };
}

/// Definitions compiled into the binary, keyed by path relative to the
/// schema root.
static EMBEDDED: &[(&str, &str)] = embedded![
    "services/get_company_profile.json",
    "services/get_income_statement.json",
    "services/get_stock_quote.json",
    "services/get_historical_prices.json",
    "services/get_market_indices.json",
    "services/get_trading_volume.json",
    "services/get_financial_ratios.json",
    "services/get_dcf_valuation.json",
    "services/get_technical_indicators.json",
    "services/get_enterprise_values.json",
    "services/get_sector_performance.json",
    "services/get_advanced_financial_health.json",
    "services/get_enhanced_dcf_analysis.json",
    "resources.json",
    "prompts.json",
];

/// A resource advertised to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "mimeType", default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "text/plain".to_string()
}

/// A prompt advertised to clients, with an optional body template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub arguments: Vec<PromptArgumentDescriptor>,
    #[serde(default)]
    pub template: Option<String>,
}

/// Argument of a prompt. Arguments are required unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptArgumentDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

#[derive(Deserialize)]
struct ResourcesFile {
    #[serde(default)]
    resources: Vec<ResourceDescriptor>,
}

#[derive(Deserialize)]
struct PromptsFile {
    #[serde(default)]
    prompts: Vec<PromptDescriptor>,
}

/// Where schema definitions are read from.
///
/// The layout is the same for both variants: `services/<tool>.json`,
/// `resources.json` and `prompts.json` under one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SchemaSource {
    /// Definitions bundled with the binary.
    #[default]
    Embedded,
    /// Definitions read from a directory at call time.
    Directory(PathBuf),
}

impl SchemaSource {
    pub fn from_dir(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }

    /// Directory override when given, embedded definitions otherwise.
    pub fn from_option(path: Option<&Path>) -> Self {
        path.map(Self::from_dir).unwrap_or_default()
    }

    /// Raw text of a definition, or `None` when it does not exist.
    fn read(&self, relative: &str) -> Result<Option<Cow<'static, str>>, SchemaError> {
        match self {
            Self::Embedded => Ok(EMBEDDED
                .iter()
                .find(|(path, _)| *path == relative)
                .map(|(_, text)| Cow::Borrowed(*text))),
            Self::Directory(root) => {
                let path = root.join(relative);
                if !path.is_file() {
                    debug!("Schema file not found: {}", path.display());
                    return Ok(None);
                }
                std::fs::read_to_string(&path)
                    .map(|text| Some(Cow::Owned(text)))
                    .map_err(|source| SchemaError::Io { path, source })
            }
        }
    }

    /// Input schema for the named tool, or `None` when no definition exists.
    pub fn service_schema(&self, name: &str) -> Result<Option<JsonObject>, SchemaError> {
        let relative = format!("{SERVICES_DIR}/{name}.json");
        match self.read(&relative)? {
            Some(text) => serde_json::from_str::<JsonObject>(&text)
                .map(Some)
                .map_err(|e| SchemaError::parse(relative, e)),
            None => Ok(None),
        }
    }

    /// Resource descriptors; empty when no definition file exists.
    pub fn resources(&self) -> Result<Vec<ResourceDescriptor>, SchemaError> {
        match self.read(RESOURCES_FILE)? {
            Some(text) => serde_json::from_str::<ResourcesFile>(&text)
                .map(|file| file.resources)
                .map_err(|e| SchemaError::parse(RESOURCES_FILE, e)),
            None => Ok(Vec::new()),
        }
    }

    /// Prompt descriptors; empty when no definition file exists.
    pub fn prompts(&self) -> Result<Vec<PromptDescriptor>, SchemaError> {
        match self.read(PROMPTS_FILE)? {
            Some(text) => serde_json::from_str::<PromptsFile>(&text)
                .map(|file| file.prompts)
                .map_err(|e| SchemaError::parse(PROMPTS_FILE, e)),
            None => Ok(Vec::new()),
        }
    }
}
