mod cli;
mod config;
mod dashboard;
mod error;
mod forecast;
mod lifecycle;
mod risk;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};
use config::DetailOpsConfig;
use dashboard::OpsService;
use store::StoreClient;
use ui::DashboardView;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DetailOpsConfig::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if cli.verbose {
        eprintln!("using store at {}", config.api_base_url);
    }

    let client = StoreClient::new(config.api_token, config.api_base_url);
    let service = OpsService::new(client);
    let view = DashboardView::new();

    match cli.command {
        Command::Status => {
            let spinner = view.spinner("Fetching jobs...");
            let summary = service.stage_summary().await;
            spinner.finish_and_clear();
            view.print_summary(&summary?);
        }
        Command::Intake {
            job_number,
            customer_name,
            total,
            vat,
        } => {
            let job = service
                .intake_job(&job_number, &customer_name, total, vat)
                .await?;
            view.print_job(&job);
        }
        Command::Advance { job_number } => {
            let transition = service.advance_job(&job_number).await?;
            view.print_transition(&job_number, &transition);
        }
        Command::Invoice { job_number } => {
            let invoice = service.invoice_job(&job_number).await?;
            view.print_invoice(&invoice);
        }
        Command::Pay { invoice_id } => {
            let invoice = service.mark_invoice_paid(&invoice_id).await?;
            view.print_invoice(&invoice);
        }
        Command::Risk => {
            let spinner = view.spinner("Assessing risk...");
            let dash = service.risk_dashboard().await;
            spinner.finish_and_clear();
            view.print_risk(&dash?);
        }
        Command::Forecast => {
            let spinner = view.spinner("Aggregating invoices...");
            let report = service.revenue_forecast().await;
            spinner.finish_and_clear();
            view.print_forecast(&report?);
        }
    }

    Ok(())
}
