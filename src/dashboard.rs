//! Service layer tying the pure core to the remote store.
//!
//! Every operation follows the same shape: fetch the freshest snapshot from
//! the store, run the core computation or mutation on it, persist the result,
//! and hand back the pure output for rendering. The store is behind the
//! [`WorkshopStore`] trait, so tests run against an in-memory substitute.

use rust_decimal::Decimal;

use crate::error::DetailOpsError;
use crate::forecast::{self, ForecastReport};
use crate::lifecycle::{InvoiceRecord, JobRecord, LifecycleController, Stage, Transition};
use crate::risk::{self, CategoryBreakdown, RiskReport};
use crate::store::WorkshopStore;

/// Drives lifecycle commands and dashboard reports against the store.
pub struct OpsService<S> {
    store: S,
}

/// Risk report plus the per-category bars rendered next to it.
#[derive(Debug, Clone)]
pub struct RiskDashboard {
    pub report: RiskReport,
    pub breakdown: Vec<CategoryBreakdown>,
}

/// Job count for one lifecycle stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: Stage,
    pub count: usize,
}

impl<S: WorkshopStore> OpsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new job in `RECEPTION` and persists it.
    pub async fn intake_job(
        &self,
        job_number: &str,
        customer_name: &str,
        total_amount: Decimal,
        vat_amount: Decimal,
    ) -> Result<JobRecord, DetailOpsError> {
        let job = JobRecord::new(job_number, customer_name, total_amount, vat_amount);
        self.store.create_job(&job).await?;
        Ok(job)
    }

    /// Advances a job one stage and persists the result.
    ///
    /// The job is re-fetched immediately before the transition so gates are
    /// validated against the freshest snapshot. The store is expected to
    /// provide single-writer guarantees per job.
    pub async fn advance_job(&self, job_number: &str) -> Result<Transition, DetailOpsError> {
        let mut job = self.store.fetch_job(job_number).await?;
        let invoice = match &job.linked_invoice_id {
            Some(id) => Some(self.store.fetch_invoice(id).await?),
            None => None,
        };
        let transition = LifecycleController::advance(&mut job, invoice.as_ref())?;
        self.store.update_job(&job).await?;
        Ok(transition)
    }

    /// Generates the invoice for a job, persists it, and links it.
    ///
    /// The invoice is created before the job link is persisted: a failure in
    /// between leaves an unlinked invoice rather than a dangling reference.
    pub async fn invoice_job(&self, job_number: &str) -> Result<InvoiceRecord, DetailOpsError> {
        let mut job = self.store.fetch_job(job_number).await?;
        let invoice = LifecycleController::generate_invoice(&mut job)?;
        self.store.create_invoice(&invoice).await?;
        self.store.update_job(&job).await?;
        Ok(invoice)
    }

    pub async fn mark_invoice_paid(
        &self,
        invoice_id: &str,
    ) -> Result<InvoiceRecord, DetailOpsError> {
        let mut invoice = self.store.fetch_invoice(invoice_id).await?;
        LifecycleController::mark_paid(&mut invoice);
        self.store.update_invoice(&invoice).await?;
        Ok(invoice)
    }

    pub async fn risk_dashboard(&self) -> Result<RiskDashboard, DetailOpsError> {
        let jobs = self.store.list_jobs().await?;
        let invoices = self.store.list_invoices().await?;
        Ok(RiskDashboard {
            report: risk::assess(&jobs, &invoices),
            breakdown: risk::category_breakdown(&jobs, &invoices),
        })
    }

    pub async fn revenue_forecast(&self) -> Result<ForecastReport, DetailOpsError> {
        let jobs = self.store.list_jobs().await?;
        let invoices = self.store.list_invoices().await?;
        let bookings = self.store.list_bookings().await?;
        Ok(forecast::project(&jobs, &invoices, &bookings))
    }

    /// Job counts per canonical stage, in lifecycle order.
    pub async fn stage_summary(&self) -> Result<Vec<StageSummary>, DetailOpsError> {
        let jobs = self.store.list_jobs().await?;
        Ok(Stage::ALL
            .into_iter()
            .map(|stage| StageSummary {
                stage,
                count: jobs.iter().filter(|j| j.status == stage).count(),
            })
            .collect())
    }
}
