use chrono::NaiveDate;
use odonto_core::appointment::{Appointment, AppointmentTab};
use odonto_core::resource::matches_query;

use super::ListController;

impl ListController<Appointment> {
    /// The cached appointments in `tab` as of `today` that match `query`,
    /// in collection order.
    pub async fn in_tab(&self, tab: AppointmentTab, today: NaiveDate, query: &str) -> Vec<Appointment> {
        self.items()
            .await
            .into_iter()
            .filter(|appointment| appointment.in_tab(tab, today) && matches_query(appointment, query))
            .collect()
    }

    /// The cached appointments of one client, newest first.
    pub async fn for_client(&self, client_id: &str) -> Vec<Appointment> {
        let mut appointments: Vec<Appointment> = self
            .items()
            .await
            .into_iter()
            .filter(|appointment| appointment.client_id == client_id)
            .collect();
        appointments.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
        appointments
    }
}
