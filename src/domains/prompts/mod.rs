//! Prompts domain module.
//!
//! Prompts are reusable analysis requests that steer a client towards the
//! financial tools. They are declared in `schema/prompts.json`.
//!
//! ## Architecture
//!
//! - `service.rs` - Prompt service for listing and rendering
//! - `templates.rs` - Template rendering engine
//! - `error.rs` - Prompt-specific error types

mod error;
mod service;
pub mod templates;

pub use error::PromptError;
pub use service::PromptService;
pub use templates::PromptTemplate;
