//! Client detail use case.

use odonto_core::access::Capability;
use odonto_core::appointment::Appointment;
use odonto_core::client::Client;
use odonto_core::{OdontoError, Result};
use std::sync::Arc;

use crate::controller::{AppointmentController, ClientController};

/// Everything the client detail view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDetail {
    pub client: Client,
    /// The client's appointments, newest first
    pub appointments: Vec<Appointment>,
    /// Medical history followed by the completed treatments, as fed to the
    /// summarizer
    pub history: String,
}

pub struct ClientDetailService {
    clients: Arc<ClientController>,
    appointments: Arc<AppointmentController>,
}

impl ClientDetailService {
    pub fn new(clients: Arc<ClientController>, appointments: Arc<AppointmentController>) -> Self {
        Self {
            clients,
            appointments,
        }
    }

    /// Loads one client with its appointments.
    ///
    /// Uses the cached client when present and fetches the collection
    /// otherwise. The appointment list is always re-read.
    pub async fn load(&self, client_id: &str) -> Result<ClientDetail> {
        self.clients.session().require(Capability::ViewClients).await?;
        if self.clients.find(client_id).await.is_none() {
            self.clients.fetch_all().await?;
        }
        let client = self
            .clients
            .find(client_id)
            .await
            .ok_or_else(|| OdontoError::not_found("client", client_id))?;

        self.appointments.fetch_all().await?;
        let appointments = self.appointments.for_client(client_id).await;
        let history = client.combined_history();

        Ok(ClientDetail {
            client,
            appointments,
            history,
        })
    }
}
