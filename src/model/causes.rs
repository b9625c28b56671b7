use serde::{Deserialize, Serialize};

use crate::schema::{Schema, SchemaBuilder, SchemaType};

/// Input of a cause-generation call.
///
/// `selected_conditions` holds condition *names*. They are not checked
/// against any catalog, keep the caller's order, and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseRequest {
    /// A description of the symptoms the user is experiencing
    pub symptoms: String,
    /// Names of medical conditions the user has selected
    pub selected_conditions: Vec<String>,
}

impl CauseRequest {
    pub fn new<I, S>(symptoms: impl Into<String>, selected_conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into(),
            selected_conditions: selected_conditions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Validated reply of a cause-generation call.
///
/// `potential_causes` is an opaque block of generated text, returned exactly
/// as the model produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseResponse {
    pub potential_causes: String,
}

impl SchemaType for CauseResponse {
    fn schema() -> Schema {
        SchemaBuilder::object()
            .string_property(
                "potentialCauses",
                "A list of potential causes based on the symptoms and selected conditions.",
                true,
            )
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("CauseResponse".to_string())
    }
}
