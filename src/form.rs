//! Symptom form: the state a presentation layer keeps between user input and
//! submission, and the outcome it shows afterwards.

use tracing::{error, info};

use crate::backend::LLMClient;
use crate::error::MediSageError;
use crate::flow::CauseExplainer;
use crate::model::CauseRequest;

/// Text shown in place of the causes when generation fails.
pub const FAILURE_PLACEHOLDER: &str = "An error occurred while generating suggestions.";

/// Symptoms typed so far plus the conditions ticked, in click order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomForm {
    symptoms: String,
    selected: Vec<String>,
}

impl SymptomForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_symptoms(&mut self, symptoms: impl Into<String>) {
        self.symptoms = symptoms.into();
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    /// Select `name` if it is not selected, otherwise deselect it.
    ///
    /// Newly selected names go to the end; deselecting keeps the order of
    /// the rest. Returns whether `name` is selected afterwards.
    pub fn toggle_condition(&mut self, name: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|n| n == name) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(name.to_string());
            true
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|n| n == name)
    }

    pub fn selected_conditions(&self) -> &[String] {
        &self.selected
    }

    pub fn to_request(&self) -> CauseRequest {
        CauseRequest {
            symptoms: self.symptoms.clone(),
            selected_conditions: self.selected.clone(),
        }
    }
}

/// Short title/description pair for a toast or status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

/// What the user sees after submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Generated { potential_causes: String },
    Failed { error: MediSageError },
}

impl Submission {
    /// Text for the results panel
    pub fn display_text(&self) -> &str {
        match self {
            Submission::Generated { potential_causes } => potential_causes,
            Submission::Failed { .. } => FAILURE_PLACEHOLDER,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Submission::Generated { .. } => Notice {
                title: "Causes Generated".to_string(),
                description: "Explainable causes have been generated, and shown below."
                    .to_string(),
                destructive: false,
            },
            Submission::Failed { error } => Notice {
                title: "Something went wrong.".to_string(),
                description: error.to_string(),
                destructive: true,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Submission::Generated { .. })
    }
}

/// Submit the form through `explainer` and turn the result into a [`Submission`].
pub async fn submit<C: LLMClient>(
    form: &SymptomForm,
    explainer: &CauseExplainer<C>,
) -> Submission {
    submit_request(&form.to_request(), explainer).await
}

/// Submit an already built request, such as one taken from command-line
/// arguments. Names are sent as given, duplicates included.
pub async fn submit_request<C: LLMClient>(
    request: &CauseRequest,
    explainer: &CauseExplainer<C>,
) -> Submission {
    match explainer.generate_causes(request).await {
        Ok(response) => {
            info!("Submission produced potential causes");
            Submission::Generated {
                potential_causes: response.potential_causes,
            }
        }
        Err(error) => {
            error!(error = %error, "Error generating causes");
            Submission::Failed { error }
        }
    }
}
