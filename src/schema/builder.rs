use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet};

use super::Schema;

/// SchemaBuilder constructs an object schema incrementally.
///
/// Properties and required names are kept sorted so the rendered schema
/// is stable between runs.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    title: Option<String>,
    description: Option<String>,
    properties: BTreeMap<String, Value>,
    required: BTreeSet<String>,
    examples: Vec<Value>,
}

impl SchemaBuilder {
    pub fn object() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        property_schema: Value,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), property_schema);
        if required {
            self.required.insert(name);
        }
        self
    }

    /// Shorthand for a string property carrying a description
    pub fn string_property(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let property = json!({
            "type": "string",
            "description": description.into(),
        });
        self.property(name, property, required)
    }

    pub fn example(mut self, example: Value) -> Self {
        self.examples.push(example);
        self
    }

    pub fn build(self) -> Schema {
        let mut schema = json!({
            "type": "object"
        });

        if let Some(title) = self.title {
            schema["title"] = json!(title);
        }

        if let Some(description) = self.description {
            schema["description"] = json!(description);
        }

        if !self.properties.is_empty() {
            schema["properties"] = json!(self.properties);

            if !self.required.is_empty() {
                schema["required"] = json!(self.required);
            }
        }

        match self.examples.len() {
            0 => {}
            1 => schema["example"] = self.examples[0].clone(),
            _ => schema["examples"] = json!(self.examples),
        }

        Schema::new(schema)
    }
}
