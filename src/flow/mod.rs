//! Cause generation: shape the user's input into the cause prompt, call the
//! backend once, and hand back the validated reply.

mod prompt;

pub use prompt::{CONDITION_SEPARATOR, CausePromptInput, join_conditions};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::backend::LLMClient;
use crate::error::{MediSageError, Result};
use crate::model::{CauseRequest, CauseResponse};

/// Generates potential causes for a set of symptoms.
///
/// The client is supplied at construction; the explainer keeps no other
/// state, so concurrent calls are independent. Every call issues exactly one
/// backend request: nothing is retried, cached, or deduplicated.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use medisage::{CauseExplainer, CauseRequest, GeminiClient};
///
/// let explainer = CauseExplainer::new(GeminiClient::from_env()?.build());
/// let request = CauseRequest::new("persistent cough, fatigue", ["Asthma", "Anemia"]);
/// let response = explainer.generate_causes(&request).await?;
/// println!("{}", response.potential_causes);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CauseExplainer<C> {
    client: C,
}

impl<C: LLMClient> CauseExplainer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Render the prompt for `request` and ask the backend for causes.
    ///
    /// Empty symptoms and an empty selection are valid and still reach the
    /// backend. Condition names are passed through without a catalog lookup.
    ///
    /// # Errors
    ///
    /// - `BackendUnavailable` when the backend call fails
    /// - `MalformedResponse` when the reply lacks a `potentialCauses` string
    #[instrument(
        name = "generate_causes",
        skip(self, request),
        fields(
            symptoms_len = request.symptoms.len(),
            selected = request.selected_conditions.len()
        )
    )]
    pub async fn generate_causes(&self, request: &CauseRequest) -> Result<CauseResponse> {
        let input = CausePromptInput::from_request(request);
        let prompt = input.render();
        debug!(
            selected_conditions = %input.selected_conditions,
            prompt_len = prompt.len(),
            "Rendered cause prompt"
        );

        let response = self.client.materialize::<CauseResponse>(&prompt).await?;
        info!(
            causes_len = response.potential_causes.len(),
            "Generated potential causes"
        );
        Ok(response)
    }

    /// Same as [`generate_causes`](Self::generate_causes), abandoned with
    /// `Cancelled` if `token` fires before the backend replies.
    ///
    /// A token that is already cancelled fails the call without contacting
    /// the backend.
    pub async fn generate_causes_with_cancel(
        &self,
        request: &CauseRequest,
        token: &CancellationToken,
    ) -> Result<CauseResponse> {
        if token.is_cancelled() {
            warn!("Cause generation cancelled before it started");
            return Err(MediSageError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Cause generation cancelled while waiting for the backend");
                Err(MediSageError::Cancelled)
            }
            result = self.generate_causes(request) => result,
        }
    }
}
