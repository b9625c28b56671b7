pub mod client;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod utils;

pub use client::LLMClient;
#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig, Model as GeminiModel};
#[cfg(feature = "gemini")]
pub(crate) use utils::{check_response_status, handle_http_error};
pub use utils::{extract_json_from_markdown, parse_structured};
