//! Appointment domain model.
//!
//! The backend calls these "consultations". Display names of the client,
//! professional and treatment are denormalized into each record when the
//! collection is fetched.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::resource::{ReconcilePolicy, Resource, Searchable};

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AppointmentStatus {
    #[serde(alias = "scheduled")]
    Scheduled,
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "canceled", alias = "cancelled", alias = "CANCELLED")]
    #[strum(to_string = "CANCELED", serialize = "CANCELLED")]
    Canceled,
}

/// Which slice of the appointment list a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AppointmentTab {
    /// Scheduled appointments from today onward
    #[default]
    Upcoming,
    /// Everything that is in the past or no longer scheduled
    Past,
    All,
}

/// An appointment as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub professional_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_name: Option<String>,
    pub treatment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_name: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "crate::wire::hhmm")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for booking or editing an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInput {
    pub client_id: String,
    pub professional_id: String,
    pub treatment_id: String,
    pub date: NaiveDate,
    #[serde(with = "crate::wire::hhmm")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Whether this appointment belongs in `tab` as of `today`.
    pub fn in_tab(&self, tab: AppointmentTab, today: NaiveDate) -> bool {
        let upcoming = self.status == AppointmentStatus::Scheduled && self.date >= today;
        match tab {
            AppointmentTab::Upcoming => upcoming,
            AppointmentTab::Past => !upcoming,
            AppointmentTab::All => true,
        }
    }
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<&str> {
        [
            self.client_name.as_deref(),
            self.professional_name.as_deref(),
            self.treatment_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Resource for Appointment {
    type Input = AppointmentInput;

    const KIND: &'static str = "appointment";
    // Display names are filled in by the listing endpoint only, so a merge
    // would show records without them.
    const POLICY: ReconcilePolicy = ReconcilePolicy::Refetch;

    fn id(&self) -> &str {
        &self.id
    }
}
