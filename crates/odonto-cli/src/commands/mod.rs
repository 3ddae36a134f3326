//! Command handlers. Each one plays the part of a view: it gates on the
//! session, drives a controller or use case, and renders the result.

pub mod appointments;
pub mod clients;
pub mod dashboard;
pub mod professionals;
pub mod session;
pub mod treatments;
pub mod users;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use colored::Colorize;
use odonto_application::{AppContext, Settled};
use odonto_core::access::{Capability, GateDecision};
use odonto_core::{OdontoError, Result};

pub use appointments::AppointmentAction;
pub use clients::ClientAction;
pub use professionals::ProfessionalAction;
pub use treatments::TreatmentAction;
pub use users::UserAction;

/// Prints the user-facing message for a failed command.
pub fn report(outcome: Result<()>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("{}", e.user_message().red());
            if e.is_unauthorized() {
                eprintln!("{}", "Sign in with `odonto login --email <email>`.".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}

/// Applies the navigation gate for a view requiring `capability`.
///
/// A signed-in user without the capability is sent back to the
/// dashboard with an access-denied notice.
pub async fn open_view(ctx: &AppContext, capability: Capability) -> Result<()> {
    match ctx.session.gate(Some(capability)).await {
        GateDecision::Render => Ok(()),
        GateDecision::Wait => Err(OdontoError::invalid_state("session is still loading")),
        GateDecision::RedirectToLogin => Err(OdontoError::Unauthorized),
        GateDecision::RedirectToDashboard => {
            dashboard::overview(ctx).await?;
            Err(OdontoError::forbidden(format!("{:?}", capability)))
        }
    }
}

/// Unwraps a settled response, noting when it was dropped because the
/// session ended.
pub fn settled<T>(settled: Settled<T>) -> Option<T> {
    match settled {
        Settled::Applied(value) => Some(value),
        Settled::Discarded => {
            println!("{}", "Session ended before the response arrived.".dimmed());
            None
        }
    }
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green(), message.as_ref());
}

/// Prints rows as left-aligned columns under a bold header.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("{}", "No records.".dimmed());
        return;
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{:<width$}", header, width = width))
        .collect();
    println!("{}", header_line.join("  ").bold());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

/// Returns `given` or reads one line from stdin.
pub fn password_or_prompt(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }

    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}
