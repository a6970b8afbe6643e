//! Prompt service implementation.
//!
//! The PromptService lists the prompts declared in `schema/prompts.json` and
//! renders them with caller-supplied arguments.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::info;

use super::error::PromptError;
use super::templates::PromptTemplate;
use crate::domains::schema::{PromptDescriptor, SchemaSource};

/// Service for listing and instantiating prompts, in declaration order.
pub struct PromptService {
    prompts: Vec<PromptTemplate>,
}

impl PromptService {
    /// Load the prompt declarations from `schemas`.
    pub fn from_schema(schemas: &SchemaSource) -> Result<Self, PromptError> {
        Ok(Self::new(schemas.prompts()?))
    }

    pub fn new(descriptors: Vec<PromptDescriptor>) -> Self {
        info!("Initializing PromptService");

        let prompts = descriptors
            .into_iter()
            .map(|descriptor| {
                info!("Registering prompt: {}", descriptor.name);
                PromptTemplate::from_descriptor(descriptor)
            })
            .collect();

        Self { prompts }
    }

    /// List all available prompts.
    pub fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .iter()
            .find(|template| template.name == name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        for required in template.required_arguments() {
            if arguments.get(required).is_none_or(|v| v.trim().is_empty()) {
                return Err(PromptError::missing_argument(required));
            }
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}
