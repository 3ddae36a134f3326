use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;
use odonto_application::AppContext;
use odonto_core::access::Capability;
use odonto_core::appointment::{AppointmentInput, AppointmentStatus, AppointmentTab};
use odonto_core::{OdontoError, Result};

use super::{open_view, optional, print_table, settled, success};

fn parse_time(value: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("expected HH:MM ({})", e))
}

#[derive(Subcommand)]
pub enum AppointmentAction {
    /// List appointments of one tab, optionally filtered by display names
    List {
        query: Option<String>,
        /// upcoming, past or all
        #[arg(long, default_value = "upcoming")]
        tab: AppointmentTab,
    },
    /// Book an appointment
    Book {
        #[arg(long)]
        client: String,
        #[arg(long)]
        professional: String,
        #[arg(long)]
        treatment: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// HH:MM
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        #[arg(long)]
        notes: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        /// SCHEDULED, COMPLETED or CANCELED
        #[arg(long)]
        status: Option<AppointmentStatus>,
        #[arg(long)]
        notes: Option<String>,
    },
    Rm { id: String },
}

pub async fn run(ctx: &AppContext, action: AppointmentAction) -> Result<()> {
    match action {
        AppointmentAction::List { query, tab } => {
            open_view(ctx, Capability::ViewAppointments).await?;
            settled(ctx.appointments.fetch_all().await?);
            let today = Local::now().date_naive();
            let appointments = ctx
                .appointments
                .in_tab(tab, today, query.as_deref().unwrap_or(""))
                .await;
            print_table(
                &["ID", "DATE", "TIME", "CLIENT", "PROFESSIONAL", "TREATMENT", "STATUS"],
                &appointments
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.clone(),
                            a.date.format("%d/%m/%Y").to_string(),
                            a.time.format("%H:%M").to_string(),
                            optional(&a.client_name),
                            optional(&a.professional_name),
                            optional(&a.treatment_name),
                            a.status.to_string(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            );
        }
        AppointmentAction::Book {
            client,
            professional,
            treatment,
            date,
            time,
            notes,
        } => {
            open_view(ctx, Capability::ManageAppointments).await?;
            let input = AppointmentInput {
                client_id: client,
                professional_id: professional,
                treatment_id: treatment,
                date,
                time,
                status: AppointmentStatus::Scheduled,
                notes,
            };
            if let Some(appointment) = settled(ctx.appointments.create(&input).await?) {
                success(format!(
                    "Appointment {} booked for {} at {}",
                    appointment.id,
                    appointment.date.format("%d/%m/%Y"),
                    appointment.time.format("%H:%M")
                ));
            }
        }
        AppointmentAction::Edit {
            id,
            date,
            time,
            status,
            notes,
        } => {
            open_view(ctx, Capability::ManageAppointments).await?;
            settled(ctx.appointments.fetch_all().await?);
            let current = ctx
                .appointments
                .find(&id)
                .await
                .ok_or_else(|| OdontoError::not_found("appointment", id.as_str()))?;

            let input = AppointmentInput {
                client_id: current.client_id,
                professional_id: current.professional_id,
                treatment_id: current.treatment_id,
                date: date.unwrap_or(current.date),
                time: time.unwrap_or(current.time),
                status: status.unwrap_or(current.status),
                notes: notes.or(current.notes),
            };
            if let Some(appointment) = settled(ctx.appointments.update(&id, &input).await?) {
                success(format!("Appointment {} is {}", appointment.id, appointment.status));
            }
        }
        AppointmentAction::Rm { id } => {
            open_view(ctx, Capability::ManageAppointments).await?;
            settled(ctx.appointments.fetch_all().await?);
            if settled(ctx.appointments.delete(&id).await?).is_some() {
                success(format!("Appointment {} deleted", id));
            }
        }
    }
    Ok(())
}
