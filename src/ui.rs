//! Terminal rendering — spinners and colored report output.
//!
//! Uses `indicatif` for the fetch spinner and `console` for color styling.
//! [`DashboardView`] renders the pure reports produced by the core; it never
//! computes anything itself.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::dashboard::{RiskDashboard, StageSummary};
use crate::forecast::ForecastReport;
use crate::lifecycle::{InvoiceRecord, JobRecord, Transition};
use crate::risk::{RiskLevel, Severity};

pub struct DashboardView {
    green: Style,
    red: Style,
    yellow: Style,
    bold: Style,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            bold: Style::new().bold(),
        }
    }

    /// Starts a spinner shown while the store is being queried.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn print_job(&self, job: &JobRecord) {
        println!(
            "  {} {} registered in {} (net {})",
            self.green.apply_to("✓"),
            job.job_number,
            job.status,
            job.net_amount
        );
    }

    pub fn print_transition(&self, job_number: &str, transition: &Transition) {
        println!(
            "  {} {job_number}: {} → {}",
            self.green.apply_to("✓"),
            transition.from,
            transition.to
        );
        for warning in &transition.warnings {
            println!("  {} {warning}", self.yellow.apply_to("⚠"));
        }
    }

    pub fn print_invoice(&self, invoice: &InvoiceRecord) {
        println!(
            "  {} {} — {} ({})",
            self.green.apply_to("✓"),
            invoice.invoice_number,
            invoice.grand_total,
            invoice.payment_status
        );
    }

    pub fn print_risk(&self, dash: &RiskDashboard) {
        let level_style = match dash.report.level {
            RiskLevel::High => &self.red,
            RiskLevel::Medium => &self.yellow,
            RiskLevel::Low => &self.green,
        };
        println!();
        println!(
            "{} {} ({}/100)",
            self.bold.apply_to("Risk level:"),
            level_style.apply_to(dash.report.level),
            dash.report.score
        );

        for exception in &dash.report.exceptions {
            let marker = match exception.severity {
                Severity::High => self.red.apply_to("●"),
                Severity::Medium => self.yellow.apply_to("●"),
            };
            println!("  {marker} {} — {}", exception.title, exception.detail);
        }

        println!();
        for entry in &dash.breakdown {
            let bar = "█".repeat((entry.percent / 5) as usize);
            println!(
                "  {:<12} {:>3}% {} ({}/{})",
                entry.category.to_string(),
                entry.percent,
                bar,
                entry.count,
                entry.total
            );
        }
    }

    pub fn print_forecast(&self, report: &ForecastReport) {
        println!();
        println!("{}", self.bold.apply_to("Monthly revenue"));
        for bucket in &report.monthly {
            println!(
                "  {}  {:>12}  ({} invoices)",
                bucket.month, bucket.revenue, bucket.count
            );
        }

        let growth_style = if report.growth_percent.is_sign_negative() {
            &self.red
        } else {
            &self.green
        };
        println!(
            "  growth: {}",
            growth_style.apply_to(format!("{}%", report.growth_percent))
        );

        println!();
        println!("{}", self.bold.apply_to("Projections"));
        println!("  monthly:   {:>12}", report.projected_monthly);
        println!("  quarterly: {:>12}", report.projected_quarterly);
        println!("  annual:    {:>12}", report.projected_annual);

        println!();
        println!("  pipeline value:    {:>12}", report.pipeline_value);
        println!("  average job value: {:>12}", report.average_job_value);
        println!("  upcoming bookings: {}", report.upcoming_bookings);
    }

    pub fn print_summary(&self, summary: &[StageSummary]) {
        println!();
        println!("{}", self.bold.apply_to("Jobs by stage"));
        for entry in summary {
            let count_style = if entry.count > 0 { &self.bold } else { &self.yellow };
            let stage_style = if entry.stage.is_terminal() {
                &self.green
            } else {
                &self.bold
            };
            println!(
                "  {:<16} {:>3}   step {} · {}",
                stage_style.apply_to(entry.stage),
                count_style.apply_to(entry.count),
                entry.stage.workflow_step(),
                entry.stage.board_column()
            );
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}
