//! MediSage: potential causes for a user's symptoms, generated by an LLM
//!
//! # Overview
//!
//! A user describes their symptoms and picks known conditions from a fixed
//! catalog. MediSage renders both into a fixed prompt, asks a generative-text
//! backend for a reply shaped as `{ "potentialCauses": string }`, and checks
//! that shape before handing the text back. The output is discussion
//! material for a healthcare professional, NOT a diagnosis.
//!
//! - [`ConditionCatalog`] / [`StaticCatalog`] list selectable conditions
//! - [`CauseExplainer`] runs one prompt, one backend call, one validation
//! - [`LLMClient`] is the backend seam; [`GeminiClient`] talks to Gemini
//! - [`form`] models the symptom form and the outcome shown to the user
//!
//! # Quick Start
//!
//! ```no_run
//! use medisage::{CauseExplainer, CauseRequest, ConditionCatalog, GeminiClient, StaticCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let conditions = StaticCatalog::new().list_conditions().await?;
//!     println!("{} conditions available", conditions.len());
//!
//!     let explainer = CauseExplainer::new(GeminiClient::from_env()?.build());
//!     let request = CauseRequest::new("persistent cough, fatigue", ["Asthma", "Anemia"]);
//!     let response = explainer.generate_causes(&request).await?;
//!
//!     println!("{}", response.potential_causes);
//!     Ok(())
//! }
//! ```
mod backend;
pub mod catalog;
mod error;
pub mod flow;
pub mod form;
#[cfg(feature = "logging")]
pub mod logging;
pub mod model;
pub mod schema;

// Re-exports for convenience
pub use catalog::{ConditionCatalog, StaticCatalog};
pub use error::{MediSageError, Result};
pub use flow::{CauseExplainer, CausePromptInput};
pub use model::{CauseRequest, CauseResponse, Condition, Instructor};
pub use schema::{Schema, SchemaBuilder, SchemaType};

#[cfg(feature = "gemini")]
pub use backend::{GeminiClient, GeminiConfig, GeminiModel};

pub use backend::{LLMClient, extract_json_from_markdown, parse_structured};
