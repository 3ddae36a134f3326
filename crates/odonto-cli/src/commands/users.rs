use clap::Subcommand;
use odonto_application::AppContext;
use odonto_core::access::Capability;
use odonto_core::user::{Role, UserInput};
use odonto_core::{OdontoError, Result};

use super::{open_view, password_or_prompt, print_table, settled, success};

#[derive(Subcommand)]
pub enum UserAction {
    /// List admin and professional accounts, optionally filtered by name or email
    List { query: Option<String> },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// ADMIN, PROFESSIONAL or CLIENT
        #[arg(long)]
        role: Role,
        #[arg(long)]
        password: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        /// Set a new password
        #[arg(long)]
        password: Option<String>,
    },
    Rm { id: String },
}

pub async fn run(ctx: &AppContext, action: UserAction) -> Result<()> {
    match action {
        UserAction::List { query } => {
            open_view(ctx, Capability::ManageUsers).await?;
            settled(ctx.users.fetch_all().await?);
            let users = ctx.users.visible(query.as_deref().unwrap_or("")).await;
            print_table(
                &["ID", "NAME", "EMAIL", "ROLE"],
                &users
                    .iter()
                    .map(|u| {
                        let mut name = u.name.clone();
                        if ctx.users.is_protected(&u.email) {
                            name.push_str(" (protected)");
                        }
                        vec![u.id.clone(), name, u.email.clone(), u.role.to_string()]
                    })
                    .collect::<Vec<_>>(),
            );
        }
        UserAction::Add {
            name,
            email,
            role,
            password,
        } => {
            open_view(ctx, Capability::ManageUsers).await?;
            let input = UserInput {
                name,
                email,
                role,
                password: Some(password_or_prompt(password)?),
            };
            if let Some(user) = settled(ctx.users.create(&input).await?) {
                success(format!("User {} created ({})", user.email, user.role));
            }
        }
        UserAction::Edit {
            id,
            name,
            email,
            role,
            password,
        } => {
            open_view(ctx, Capability::ManageUsers).await?;
            settled(ctx.users.fetch_all().await?);
            let current = ctx
                .users
                .controller()
                .find(&id)
                .await
                .ok_or_else(|| OdontoError::not_found("user", id.as_str()))?;

            let input = UserInput {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
                role: role.unwrap_or(current.role),
                password,
            };
            if let Some(user) = settled(ctx.users.update(&id, &input).await?) {
                success(format!("User {} updated", user.email));
            }
        }
        UserAction::Rm { id } => {
            open_view(ctx, Capability::ManageUsers).await?;
            settled(ctx.users.fetch_all().await?);
            if settled(ctx.users.delete(&id).await?).is_some() {
                success(format!("User {} deleted", id));
            }
        }
    }
    Ok(())
}
