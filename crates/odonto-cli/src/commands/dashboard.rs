use colored::Colorize;
use odonto_application::AppContext;
use odonto_core::Result;
use odonto_core::access::{Capability, can};

use super::{open_view, settled};

/// The landing view: who is signed in, plus statistics when the role
/// may see them.
pub async fn overview(ctx: &AppContext) -> Result<()> {
    let Some(session) = ctx.session.current().await else {
        return Ok(());
    };
    println!(
        "{} {} ({})",
        "Dashboard".bold(),
        session.display_name,
        session.role
    );
    if can(session.role, Capability::ViewStatistics) {
        print_statistics(ctx).await?;
    }
    Ok(())
}

pub async fn stats(ctx: &AppContext) -> Result<()> {
    open_view(ctx, Capability::ViewStatistics).await?;
    print_statistics(ctx).await
}

async fn print_statistics(ctx: &AppContext) -> Result<()> {
    let Some(stats) = settled(ctx.dashboard.statistics().await?) else {
        return Ok(());
    };
    println!("Scheduled consultations: {}", stats.scheduled_consultations);
    println!("Clients:                 {}", stats.total_clients);
    println!("Treatments:              {}", stats.total_treatments);
    println!("Potential revenue:       {:.2}", stats.potential_revenue);
    println!("Total revenue:           {:.2}", stats.total_revenue);
    Ok(())
}
