use serde::{Deserialize, Serialize};

/// A selectable medical condition.
///
/// Conditions are read-only reference data: they are built once by a
/// [`ConditionCatalog`](crate::ConditionCatalog) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The name of the medical condition, unique within a catalog
    pub name: String,
    /// A description of the medical condition
    pub description: String,
}

impl Condition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
