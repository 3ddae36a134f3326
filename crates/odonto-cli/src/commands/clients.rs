use chrono::NaiveDate;
use clap::Subcommand;
use colored::Colorize;
use odonto_application::AppContext;
use odonto_core::access::Capability;
use odonto_core::client::{Client, ClientInput};
use odonto_core::{OdontoError, Result};

use super::{open_view, optional, print_table, settled, success};

#[derive(Subcommand)]
pub enum ClientAction {
    /// List clients, optionally filtered by name, email or phone
    List { query: Option<String> },
    /// Show a client with their appointments and history
    Show { id: String },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: Option<NaiveDate>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        history: Option<String>,
    },
    /// Change the given fields of a client
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        dob: Option<NaiveDate>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        history: Option<String>,
    },
    Rm { id: String },
    /// Summarize a client's medical and treatment history
    Summarize { id: String },
}

pub async fn run(ctx: &AppContext, action: ClientAction) -> Result<()> {
    match action {
        ClientAction::List { query } => {
            open_view(ctx, Capability::ViewClients).await?;
            settled(ctx.clients.fetch_all().await?);
            let clients = ctx.clients.filtered(query.as_deref().unwrap_or("")).await;
            print_table(
                &["ID", "NAME", "EMAIL", "PHONE"],
                &clients
                    .iter()
                    .map(|c| vec![c.id.clone(), c.name.clone(), c.email.clone(), c.phone.clone()])
                    .collect::<Vec<_>>(),
            );
        }
        ClientAction::Show { id } => {
            open_view(ctx, Capability::ViewClients).await?;
            let detail = ctx.client_detail.load(&id).await?;
            print_client(&detail.client);

            println!("\n{}", "Appointments".bold());
            print_table(
                &["DATE", "TIME", "TREATMENT", "PROFESSIONAL", "STATUS"],
                &detail
                    .appointments
                    .iter()
                    .map(|a| {
                        vec![
                            a.date.format("%d/%m/%Y").to_string(),
                            a.time.format("%H:%M").to_string(),
                            optional(&a.treatment_name),
                            optional(&a.professional_name),
                            a.status.to_string(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            );

            if !detail.history.trim().is_empty() {
                println!("\n{}\n{}", "History".bold(), detail.history.trim_end());
            }
        }
        ClientAction::Add {
            name,
            email,
            phone,
            dob,
            address,
            history,
        } => {
            open_view(ctx, Capability::ManageClients).await?;
            let input = ClientInput {
                name,
                email,
                phone,
                date_of_birth: dob,
                address,
                medical_history: history,
            };
            if let Some(client) = settled(ctx.clients.create(&input).await?) {
                success(format!("Client {} created ({})", client.name, client.id));
            }
        }
        ClientAction::Edit {
            id,
            name,
            email,
            phone,
            dob,
            address,
            history,
        } => {
            open_view(ctx, Capability::ManageClients).await?;
            settled(ctx.clients.fetch_all().await?);
            let current = ctx
                .clients
                .find(&id)
                .await
                .ok_or_else(|| OdontoError::not_found("client", id.as_str()))?;

            let input = ClientInput {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
                phone: phone.unwrap_or(current.phone),
                date_of_birth: dob.or(current.date_of_birth),
                address: address.or(current.address),
                medical_history: history.or(current.medical_history),
            };
            if let Some(client) = settled(ctx.clients.update(&id, &input).await?) {
                success(format!("Client {} updated", client.name));
            }
        }
        ClientAction::Rm { id } => {
            open_view(ctx, Capability::ManageClients).await?;
            settled(ctx.clients.fetch_all().await?);
            if settled(ctx.clients.delete(&id).await?).is_some() {
                success(format!("Client {} deleted", id));
            }
        }
        ClientAction::Summarize { id } => {
            open_view(ctx, Capability::SummarizeHistory).await?;
            let detail = ctx.client_detail.load(&id).await?;
            if let Some(summary) = settled(ctx.summaries.summarize(&detail.history).await?) {
                println!("{}\n{}", detail.client.name.bold(), summary);
            }
        }
    }
    Ok(())
}

fn print_client(client: &Client) {
    println!("{} ({})", client.name.bold(), client.id);
    println!("email:   {}", client.email);
    println!("phone:   {}", client.phone);
    if let Some(dob) = client.date_of_birth {
        println!("born:    {}", dob.format("%d/%m/%Y"));
    }
    if let Some(address) = &client.address {
        println!("address: {}", address);
    }
}
