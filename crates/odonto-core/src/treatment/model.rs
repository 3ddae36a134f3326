//! Treatment domain model.

use serde::{Deserialize, Serialize};

use crate::resource::{ReconcilePolicy, Resource, Searchable};

/// A service offered by the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Duration in minutes
    pub duration: u32,
    pub price: f64,
}

/// Payload for creating or editing a treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentInput {
    pub name: String,
    pub description: String,
    pub duration: u32,
    pub price: f64,
}

impl Searchable for Treatment {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

impl Resource for Treatment {
    type Input = TreatmentInput;

    const KIND: &'static str = "treatment";
    const POLICY: ReconcilePolicy = ReconcilePolicy::Merge;

    fn id(&self) -> &str {
        &self.id
    }
}
