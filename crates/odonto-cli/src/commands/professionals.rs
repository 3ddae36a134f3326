use clap::Subcommand;
use odonto_application::AppContext;
use odonto_core::access::Capability;
use odonto_core::professional::ProfessionalInput;
use odonto_core::{OdontoError, Result};

use super::{open_view, print_table, settled, success};

#[derive(Subcommand)]
pub enum ProfessionalAction {
    /// List professionals, optionally filtered by name, specialty or email
    List { query: Option<String> },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialty: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Rm { id: String },
}

pub async fn run(ctx: &AppContext, action: ProfessionalAction) -> Result<()> {
    match action {
        ProfessionalAction::List { query } => {
            open_view(ctx, Capability::ViewProfessionals).await?;
            settled(ctx.professionals.fetch_all().await?);
            let professionals = ctx
                .professionals
                .filtered(query.as_deref().unwrap_or(""))
                .await;
            print_table(
                &["ID", "NAME", "SPECIALTY", "EMAIL", "PHONE", "SLOTS"],
                &professionals
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.clone(),
                            p.name.clone(),
                            p.specialty.clone(),
                            p.email.clone(),
                            p.phone.clone(),
                            p.availability.len().to_string(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            );
        }
        ProfessionalAction::Add {
            name,
            specialty,
            email,
            phone,
        } => {
            open_view(ctx, Capability::ManageProfessionals).await?;
            let input = ProfessionalInput {
                name,
                specialty,
                email,
                phone,
                availability: Vec::new(),
            };
            if let Some(professional) = settled(ctx.professionals.create(&input).await?) {
                success(format!(
                    "Professional {} created ({})",
                    professional.name, professional.id
                ));
            }
        }
        ProfessionalAction::Edit {
            id,
            name,
            specialty,
            email,
            phone,
        } => {
            open_view(ctx, Capability::ManageProfessionals).await?;
            settled(ctx.professionals.fetch_all().await?);
            let current = ctx
                .professionals
                .find(&id)
                .await
                .ok_or_else(|| OdontoError::not_found("professional", id.as_str()))?;

            let input = ProfessionalInput {
                name: name.unwrap_or(current.name),
                specialty: specialty.unwrap_or(current.specialty),
                email: email.unwrap_or(current.email),
                phone: phone.unwrap_or(current.phone),
                availability: current.availability,
            };
            if let Some(professional) = settled(ctx.professionals.update(&id, &input).await?) {
                success(format!("Professional {} updated", professional.name));
            }
        }
        ProfessionalAction::Rm { id } => {
            open_view(ctx, Capability::ManageProfessionals).await?;
            settled(ctx.professionals.fetch_all().await?);
            if settled(ctx.professionals.delete(&id).await?).is_some() {
                success(format!("Professional {} deleted", id));
            }
        }
    }
    Ok(())
}
