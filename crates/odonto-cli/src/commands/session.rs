use std::str::FromStr;

use colored::Colorize;
use odonto_application::AppContext;
use odonto_core::session::SessionState;
use odonto_core::user::Role;
use odonto_core::{OdontoError, Result};

use super::{password_or_prompt, success};

pub async fn login(ctx: &AppContext, email: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let session = ctx.session.login(email, &password).await?;
    success(format!(
        "Signed in as {} ({})",
        session.display_name.bold(),
        session.role
    ));
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.teardown().await?;
    success("Signed out");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session.state().await {
        SessionState::Authenticated(session) => {
            println!("{} <{}>", session.display_name.bold(), session.email);
            println!("id:   {}", session.user_id);
            println!("role: {}", session.role);
            Ok(())
        }
        SessionState::Anonymous => Err(OdontoError::Unauthorized),
        SessionState::Loading => Err(OdontoError::invalid_state("session is still loading")),
    }
}

pub async fn signup(
    ctx: &AppContext,
    name: &str,
    email: &str,
    password: Option<String>,
    role: &str,
) -> Result<()> {
    let role = Role::from_str(role)
        .map_err(|_| OdontoError::validation(format!("Unknown role '{}'.", role)))?;
    let password = password_or_prompt(password)?;

    let session = ctx.session.register(name, email, &password, role).await?;
    success(format!(
        "Account created; signed in as {} ({})",
        session.display_name.bold(),
        session.role
    ));
    Ok(())
}
