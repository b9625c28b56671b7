use async_trait::async_trait;

use crate::error::Result;
use crate::model::Instructor;

/// LLMClient is the seam between the cause-generation flow and a
/// generative-text backend.
///
/// An implementation sends the prompt unchanged, asks the backend for a JSON
/// reply shaped like `T::schema()`, and turns that reply into a `T`, usually
/// with [`parse_structured`](crate::parse_structured).
///
/// Implementations must not retry or cache: one call is one backend request.
/// Failures map onto
/// [`BackendUnavailable`](crate::MediSageError::BackendUnavailable) when the
/// backend could not answer and
/// [`MalformedResponse`](crate::MediSageError::MalformedResponse) when it
/// answered with the wrong shape.
///
/// # Example
///
/// A canned client, handy in tests:
///
/// ```
/// use async_trait::async_trait;
/// use medisage::{Instructor, LLMClient, parse_structured};
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl LLMClient for Canned {
///     async fn materialize<T>(&self, _prompt: &str) -> medisage::Result<T>
///     where
///         T: Instructor + Send + 'static,
///     {
///         parse_structured::<T>(self.0)
///     }
/// }
/// ```
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a structured object of type T from a prompt.
    async fn materialize<T>(&self, prompt: &str) -> Result<T>
    where
        T: Instructor + Send + 'static;
}

#[async_trait]
impl<C: LLMClient> LLMClient for std::sync::Arc<C> {
    async fn materialize<T>(&self, prompt: &str) -> Result<T>
    where
        T: Instructor + Send + 'static,
    {
        (**self).materialize::<T>(prompt).await
    }
}
