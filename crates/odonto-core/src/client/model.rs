//! Client domain model.
//!
//! A client is a patient of the clinic, with contact details and the
//! history fed to the summarizer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::{ReconcilePolicy, Resource, Searchable};

/// One treatment a client already went through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecord {
    pub treatment_id: String,
    pub treatment_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

/// A client record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub treatment_history: Vec<TreatmentRecord>,
}

/// Payload for creating or editing a client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl Client {
    /// Builds the free-text history handed to the summarizer.
    ///
    /// Medical history first, then one line per past treatment
    /// (`- <name> on DD/MM/YYYY: <notes>`).
    pub fn combined_history(&self) -> String {
        let mut history = self.medical_history.clone().unwrap_or_default();
        if !self.treatment_history.is_empty() {
            history.push_str("\n\nCompleted treatments:\n");
            for record in &self.treatment_history {
                history.push_str(&format!(
                    "- {} on {}: {}\n",
                    record.treatment_name,
                    record.date.format("%d/%m/%Y"),
                    record.notes
                ));
            }
        }
        history
    }
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }
}

impl Resource for Client {
    type Input = ClientInput;

    const KIND: &'static str = "client";
    const POLICY: ReconcilePolicy = ReconcilePolicy::Merge;

    fn id(&self) -> &str {
        &self.id
    }
}
