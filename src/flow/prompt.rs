use serde::Serialize;

use crate::model::CauseRequest;

/// Separator placed between selected condition names in the prompt.
pub const CONDITION_SEPARATOR: &str = ", ";

/// The two variables substituted into the cause prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CausePromptInput {
    /// Symptoms exactly as the user typed them
    pub symptoms: String,
    /// Selected condition names joined with `", "`, empty when none
    pub selected_conditions: String,
}

impl CausePromptInput {
    pub fn from_request(request: &CauseRequest) -> Self {
        Self {
            symptoms: request.symptoms.clone(),
            selected_conditions: join_conditions(&request.selected_conditions),
        }
    }

    /// Fill the cause prompt template.
    ///
    /// Values are inserted in a single pass, so text that looks like a
    /// placeholder inside a value is left as typed.
    pub fn render(&self) -> String {
        format!(
            "You are an AI assistant designed to provide potential causes for a user's symptoms, given their selected medical conditions.\n\
             \n\
             It is crucial to emphasize that this is NOT a diagnosis and the information provided should be used for discussion with a healthcare professional.\n\
             \n\
             Symptoms: {symptoms}\n\
             Selected Conditions: {selected_conditions}\n\
             \n\
             Provide a list of potential causes, explaining each in a way that is understandable to a layperson.\n",
            symptoms = self.symptoms,
            selected_conditions = self.selected_conditions,
        )
    }
}

/// Join condition names in order. Duplicates are kept; no names gives `""`.
pub fn join_conditions<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CONDITION_SEPARATOR)
}
