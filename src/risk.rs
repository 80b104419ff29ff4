//! Risk/audit scoring over snapshots of jobs and invoices.
//!
//! Pure and deterministic: the same snapshot always yields the same score,
//! level, and exception list, in the same order. The weights and the
//! high-value threshold are part of the observable behavior contract and must
//! not be tuned without a product decision.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::lifecycle::{InvoiceRecord, JobRecord, PaymentStatus, Stage};

/// Score weight for a job sitting in QC without sign-off.
pub const QC_PENDING_WEIGHT: u32 = 10;
/// Score weight for an overdue invoice.
pub const OVERDUE_WEIGHT: u32 = 15;
/// Score weight for a delivery-stage job missing the customer signature.
pub const MISSING_SIGNATURE_WEIGHT: u32 = 8;
/// Upper clamp of the risk score.
pub const MAX_SCORE: u32 = 100;
/// Net amount above which a job requires the floor-incharge approval. (5000)
pub const HIGH_VALUE_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Medium,
}

/// Overall risk level derived from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// The exception detection rules, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExceptionKind {
    QcPending,
    OverduePayment,
    MissingDeliverySignature,
    MissingHighValueApproval,
}

/// One detected exception, ready for dashboard rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionItem {
    pub kind: ExceptionKind,
    pub severity: Severity,
    pub title: String,
    pub detail: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub score: u32,
    pub level: RiskLevel,
    pub exceptions: Vec<ExceptionItem>,
}

/// Dashboard categories for the breakdown bars. Not part of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Operational,
    Financial,
    Compliance,
    Approval,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Operational => write!(f, "Operational"),
            Category::Financial => write!(f, "Financial"),
            Category::Compliance => write!(f, "Compliance"),
            Category::Approval => write!(f, "Approval"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: Category,
    pub count: usize,
    pub total: usize,
    /// `count / total` as a whole percentage, capped at 100.
    pub percent: u32,
}

/// Computes the bounded risk score and the prioritized exception list.
///
/// Detection runs in a fixed order (QC, then finance, then compliance, then
/// approval) with ties broken by input collection order, so the output is
/// stable and reproducible. Never fails; empty snapshots yield a zero score,
/// `LOW`, and no exceptions.
pub fn assess(jobs: &[JobRecord], invoices: &[InvoiceRecord]) -> RiskReport {
    let mut exceptions = Vec::new();

    for job in jobs.iter().filter(|j| qc_pending(j)) {
        exceptions.push(ExceptionItem {
            kind: ExceptionKind::QcPending,
            severity: Severity::High,
            title: format!("QC sign-off pending for {}", job.job_number),
            detail: format!(
                "{} {} ({}) is in QC without a QC sign-off",
                job.brand, job.model, job.registration
            ),
            date: job.updated_at,
        });
    }

    for invoice in invoices
        .iter()
        .filter(|i| i.payment_status == PaymentStatus::Overdue)
    {
        exceptions.push(ExceptionItem {
            kind: ExceptionKind::OverduePayment,
            severity: Severity::High,
            title: format!("Payment overdue on {}", invoice.invoice_number),
            detail: format!("grand total {} unpaid past due date", invoice.grand_total),
            date: invoice.date.and_time(NaiveTime::MIN).and_utc(),
        });
    }

    for job in jobs.iter().filter(|j| missing_signature(j)) {
        exceptions.push(ExceptionItem {
            kind: ExceptionKind::MissingDeliverySignature,
            severity: Severity::Medium,
            title: format!("Delivery signature missing for {}", job.job_number),
            detail: format!("{} awaiting customer acknowledgment", job.customer_name),
            date: job.updated_at,
        });
    }

    for job in jobs.iter().filter(|j| missing_approval(j)) {
        exceptions.push(ExceptionItem {
            kind: ExceptionKind::MissingHighValueApproval,
            severity: Severity::Medium,
            title: format!("Floor-incharge approval missing for {}", job.job_number),
            detail: format!("net amount {} exceeds the high-value threshold", job.net_amount),
            date: job.updated_at,
        });
    }

    let qc_count = jobs.iter().filter(|j| qc_pending(j)).count() as u32;
    let overdue_count = invoices
        .iter()
        .filter(|i| i.payment_status == PaymentStatus::Overdue)
        .count() as u32;
    let missing_sig_count = jobs.iter().filter(|j| missing_signature(j)).count() as u32;

    let score = (qc_count * QC_PENDING_WEIGHT
        + overdue_count * OVERDUE_WEIGHT
        + missing_sig_count * MISSING_SIGNATURE_WEIGHT)
        .min(MAX_SCORE);

    RiskReport {
        score,
        level: level_for(score),
        exceptions,
    }
}

/// Per-category incident ratios for the dashboard bars, in a fixed order.
///
/// Each ratio divides by the category's relevant population, floored at one
/// to avoid division by zero; the resulting percentage is capped at 100.
pub fn category_breakdown(jobs: &[JobRecord], invoices: &[InvoiceRecord]) -> Vec<CategoryBreakdown> {
    let delivery_jobs = jobs.iter().filter(|j| j.status == Stage::Delivery).count();
    let high_value_jobs = jobs
        .iter()
        .filter(|j| j.net_amount > HIGH_VALUE_THRESHOLD)
        .count();

    let entries = [
        (
            Category::Operational,
            jobs.iter().filter(|j| qc_pending(j)).count(),
            jobs.len(),
        ),
        (
            Category::Financial,
            invoices
                .iter()
                .filter(|i| i.payment_status == PaymentStatus::Overdue)
                .count(),
            invoices.len(),
        ),
        (
            Category::Compliance,
            jobs.iter().filter(|j| missing_signature(j)).count(),
            delivery_jobs,
        ),
        (
            Category::Approval,
            jobs.iter().filter(|j| missing_approval(j)).count(),
            high_value_jobs,
        ),
    ];

    entries
        .into_iter()
        .map(|(category, count, total)| CategoryBreakdown {
            category,
            count,
            total,
            percent: ((count * 100 / total.max(1)) as u32).min(100),
        })
        .collect()
}

fn level_for(score: u32) -> RiskLevel {
    if score > 60 {
        RiskLevel::High
    } else if score > 30 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn qc_pending(job: &JobRecord) -> bool {
    job.status == Stage::Qc && !job.qc_sign_off
}

fn missing_signature(job: &JobRecord) -> bool {
    job.status == Stage::Delivery && job.signature_data.is_none()
}

fn missing_approval(job: &JobRecord) -> bool {
    job.net_amount > HIGH_VALUE_THRESHOLD && !job.floor_incharge_sign_off
}
