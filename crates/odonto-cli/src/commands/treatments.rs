use clap::Subcommand;
use odonto_application::AppContext;
use odonto_core::access::Capability;
use odonto_core::treatment::TreatmentInput;
use odonto_core::{OdontoError, Result};

use super::{open_view, print_table, settled, success};

#[derive(Subcommand)]
pub enum TreatmentAction {
    /// List treatments, optionally filtered by name or description
    List { query: Option<String> },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        #[arg(long)]
        price: f64,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        price: Option<f64>,
    },
    Rm { id: String },
}

pub async fn run(ctx: &AppContext, action: TreatmentAction) -> Result<()> {
    match action {
        TreatmentAction::List { query } => {
            open_view(ctx, Capability::ViewTreatments).await?;
            settled(ctx.treatments.fetch_all().await?);
            let treatments = ctx.treatments.filtered(query.as_deref().unwrap_or("")).await;
            print_table(
                &["ID", "NAME", "MINUTES", "PRICE", "DESCRIPTION"],
                &treatments
                    .iter()
                    .map(|t| {
                        vec![
                            t.id.clone(),
                            t.name.clone(),
                            t.duration.to_string(),
                            format!("{:.2}", t.price),
                            t.description.clone(),
                        ]
                    })
                    .collect::<Vec<_>>(),
            );
        }
        TreatmentAction::Add {
            name,
            description,
            duration,
            price,
        } => {
            open_view(ctx, Capability::ManageTreatments).await?;
            let input = TreatmentInput {
                name,
                description,
                duration,
                price,
            };
            if let Some(treatment) = settled(ctx.treatments.create(&input).await?) {
                success(format!("Treatment {} created ({})", treatment.name, treatment.id));
            }
        }
        TreatmentAction::Edit {
            id,
            name,
            description,
            duration,
            price,
        } => {
            open_view(ctx, Capability::ManageTreatments).await?;
            settled(ctx.treatments.fetch_all().await?);
            let current = ctx
                .treatments
                .find(&id)
                .await
                .ok_or_else(|| OdontoError::not_found("treatment", id.as_str()))?;

            let input = TreatmentInput {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
                duration: duration.unwrap_or(current.duration),
                price: price.unwrap_or(current.price),
            };
            if let Some(treatment) = settled(ctx.treatments.update(&id, &input).await?) {
                success(format!("Treatment {} updated", treatment.name));
            }
        }
        TreatmentAction::Rm { id } => {
            open_view(ctx, Capability::ManageTreatments).await?;
            settled(ctx.treatments.fetch_all().await?);
            if settled(ctx.treatments.delete(&id).await?).is_some() {
                success(format!("Treatment {} deleted", id));
            }
        }
    }
    Ok(())
}
