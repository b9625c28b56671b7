use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::schema::SchemaType;

/// The `Instructor` trait marks a type the backend can be asked to produce.
///
/// It combines a schema description (sent to the backend as the requested
/// reply shape), deserialization of the reply, and an optional validation
/// hook run after deserialization succeeds.
///
/// # Example
///
/// ```
/// use medisage::{Instructor, MediSageError, Schema, SchemaBuilder, SchemaType};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Summary {
///     text: String,
/// }
///
/// impl SchemaType for Summary {
///     fn schema() -> Schema {
///         SchemaBuilder::object()
///             .string_property("text", "A short summary", true)
///             .build()
///     }
/// }
///
/// impl Instructor for Summary {
///     fn validate(&self) -> medisage::Result<()> {
///         if self.text.len() > 280 {
///             return Err(MediSageError::MalformedResponse(
///                 "summary is too long".to_string(),
///             ));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Instructor: SchemaType + DeserializeOwned + Serialize {
    /// Validation beyond type checking.
    ///
    /// Called by the backend after the reply deserialized. The default
    /// accepts everything.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Instructor for super::CauseResponse {}
