//! clap-based command line interface.
//!
//! Defines the [`Cli`] struct with subcommands [`Command`] (status, advance,
//! invoice, pay, risk, forecast) and global flags (--api-url, --verbose).

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// DetailOps — operations dashboard core for an auto-detailing workshop.
#[derive(Debug, Parser)]
#[command(name = "detailops", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the workshop store API, overriding detailops.toml.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose output.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show job counts per lifecycle stage.
    Status,

    /// Register a new job at reception.
    Intake {
        /// Human-readable job number, e.g. JOB-1042.
        job_number: String,

        /// Customer name.
        customer_name: String,

        /// Total amount before VAT.
        #[arg(long)]
        total: Decimal,

        /// VAT amount.
        #[arg(long)]
        vat: Decimal,
    },

    /// Advance a job to its next lifecycle stage.
    Advance {
        /// Human-readable job number, e.g. JOB-1042.
        job_number: String,
    },

    /// Generate the invoice for a job (QC stage or later).
    Invoice {
        job_number: String,
    },

    /// Mark an invoice as paid.
    Pay {
        invoice_id: String,
    },

    /// Show the risk score, exception list, and category breakdown.
    Risk,

    /// Show monthly revenue, growth, and projections.
    Forecast,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_advance_subcommand() {
        let cli = Cli::parse_from(["detailops", "advance", "JOB-1042"]);
        match cli.command {
            Command::Advance { job_number } => assert_eq!(job_number, "JOB-1042"),
            _ => panic!("expected Advance command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "detailops",
            "--api-url",
            "https://store.example/api",
            "--verbose",
            "risk",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("https://store.example/api"));
        assert!(matches!(cli.command, Command::Risk));
    }

    #[test]
    fn cli_parses_intake_with_amounts() {
        let cli = Cli::parse_from([
            "detailops",
            "intake",
            "JOB-7",
            "Acme Fleet",
            "--total",
            "1200.00",
            "--vat",
            "180.00",
        ]);
        match cli.command {
            Command::Intake {
                job_number,
                customer_name,
                total,
                vat,
            } => {
                assert_eq!(job_number, "JOB-7");
                assert_eq!(customer_name, "Acme Fleet");
                assert_eq!(total, Decimal::new(120000, 2));
                assert_eq!(vat, Decimal::new(18000, 2));
            }
            _ => panic!("expected Intake command"),
        }
    }

    #[test]
    fn cli_parses_pay_subcommand() {
        let cli = Cli::parse_from(["detailops", "pay", "inv-42"]);
        match cli.command {
            Command::Pay { invoice_id } => assert_eq!(invoice_id, "inv-42"),
            _ => panic!("expected Pay command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
