//! Professional domain model.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::resource::{ReconcilePolicy, Resource, Searchable};

/// A weekly window in which a professional takes appointments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub day_of_week: Weekday,
    #[serde(with = "crate::wire::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::wire::hhmm")]
    pub end_time: NaiveTime,
}

/// A dentist or other practitioner appointments are booked with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

/// Payload for creating or editing a professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalInput {
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

impl AvailabilitySlot {
    /// Whether `time` on `day` falls inside this window (end exclusive).
    pub fn covers(&self, day: Weekday, time: NaiveTime) -> bool {
        self.day_of_week == day && self.start_time <= time && time < self.end_time
    }
}

impl Searchable for Professional {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.specialty.as_str(),
            self.email.as_str(),
        ]
    }
}

impl Resource for Professional {
    type Input = ProfessionalInput;

    const KIND: &'static str = "professional";
    const POLICY: ReconcilePolicy = ReconcilePolicy::Merge;

    fn id(&self) -> &str {
        &self.id
    }
}
