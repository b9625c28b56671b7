//! Condition catalog: the list of conditions a user can select.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::Condition;

/// Source of selectable medical conditions.
///
/// Implementations backed by a remote service report failures as
/// [`CatalogUnavailable`](crate::MediSageError::CatalogUnavailable) and must
/// never return a partial list.
#[async_trait]
pub trait ConditionCatalog: Send + Sync {
    /// Current list of known conditions, in a stable order.
    async fn list_conditions(&self) -> Result<Vec<Condition>>;
}

const PLACEHOLDER_CONDITIONS: [(&str, &str); 16] = [
    (
        "Diabetes",
        "A metabolic disorder characterized by high blood sugar levels.",
    ),
    (
        "PCOS",
        "A hormonal disorder common among women of reproductive age.",
    ),
    (
        "Asthma",
        "A chronic respiratory disease that inflames and narrows the airways.",
    ),
    (
        "Hypertension",
        "A condition in which the force of the blood against the artery walls is too high.",
    ),
    (
        "Hypothyroidism",
        "A condition in which the thyroid gland doesn't produce enough thyroid hormone.",
    ),
    (
        "Anxiety",
        "A mental health disorder characterized by excessive worry and unease.",
    ),
    (
        "Depression",
        "A mood disorder that causes a persistent feeling of sadness and loss of interest.",
    ),
    (
        "Tuberculosis",
        "An infectious disease caused by bacteria that mainly affects the lungs.",
    ),
    (
        "Malaria",
        "A mosquito-borne infectious disease affecting humans and other animals.",
    ),
    (
        "Typhoid Fever",
        "A bacterial infection caused by Salmonella typhi, spread through contaminated food and water.",
    ),
    (
        "Dengue Fever",
        "A mosquito-borne viral infection causing fever, rash, and muscle and joint pain.",
    ),
    (
        "Chronic Kidney Disease",
        "A condition characterized by a gradual loss of kidney function over time.",
    ),
    (
        "Coronary Artery Disease",
        "A condition in which the heart muscle doesn't receive enough blood.",
    ),
    (
        "Osteoarthritis",
        "A degenerative joint disease that causes pain and stiffness.",
    ),
    (
        "Vitamin D Deficiency",
        "A condition in which the body doesn't have enough vitamin D.",
    ),
    (
        "Anemia",
        "A condition in which the blood doesn't have enough healthy red blood cells.",
    ),
];

/// Hard-coded placeholder catalog.
///
/// Returns the same 16 conditions in the same order on every call and never
/// fails. Stands in until a real condition source exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConditionCatalog for StaticCatalog {
    #[instrument(name = "static_catalog_list", skip(self))]
    async fn list_conditions(&self) -> Result<Vec<Condition>> {
        let conditions: Vec<Condition> = PLACEHOLDER_CONDITIONS
            .iter()
            .map(|(name, description)| Condition::new(*name, *description))
            .collect();
        debug!(count = conditions.len(), "Listed placeholder conditions");
        Ok(conditions)
    }
}
