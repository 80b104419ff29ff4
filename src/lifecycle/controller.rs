use std::fmt;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::job::{InvoiceRecord, JobRecord, PaymentStatus};
use super::stage::Stage;

/// A named gate flag that blocks a stage transition until satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    PreWorkSignOff,
    PostWorkSignOff,
    QcSignOff,
    SignatureData,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::PreWorkSignOff => write!(f, "preWorkSignOff"),
            Gate::PostWorkSignOff => write!(f, "postWorkSignOff"),
            Gate::QcSignOff => write!(f, "qcSignOff"),
            Gate::SignatureData => write!(f, "signatureData"),
        }
    }
}

/// Validation failures of lifecycle operations. These are local, typed
/// rejections returned to the caller — never silently ignored or
/// auto-corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    /// Terminal-state or out-of-sequence attempt.
    #[error("invalid transition from {0}")]
    InvalidTransition(Stage),

    /// A gate flag required to leave the current stage is unset.
    #[error("cannot leave {stage}: {gate} is required")]
    PreconditionNotMet { stage: Stage, gate: Gate },

    /// The job already carries a linked invoice.
    #[error("job already invoiced (invoice {0})")]
    AlreadyInvoiced(String),

    /// Net amount must be strictly positive to invoice.
    #[error("invalid amount: net amount is {0}")]
    InvalidAmount(Decimal),
}

/// A successful one-stage transition, with any non-blocking advisories.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
    /// Recommendations that did not block the transition, e.g. closing out
    /// a delivery whose invoice is still unpaid.
    pub warnings: Vec<String>,
}

/// Owns the status state machine for a single job.
///
/// All methods validate against the snapshot they are handed immediately
/// before mutating it. The caller must supply the freshest copy and serialize
/// mutations per job (at most one mutator at a time); persistence of the
/// result is the caller's concern.
pub struct LifecycleController;

impl LifecycleController {
    /// Advances the job exactly one stage, enforcing the gate for the stage
    /// being left:
    ///
    /// - `WIP` requires both pre-work and post-work sign-offs.
    /// - `QC` requires the QC sign-off.
    /// - `DELIVERY` requires the customer signature; an unpaid linked invoice
    ///   is surfaced as a warning, not a rejection.
    ///
    /// On failure the job is left untouched.
    pub fn advance(
        job: &mut JobRecord,
        linked_invoice: Option<&InvoiceRecord>,
    ) -> Result<Transition, LifecycleError> {
        let from = job.status;
        let to = from.next().ok_or(LifecycleError::InvalidTransition(from))?;

        match from {
            Stage::Wip => {
                if !job.pre_work_sign_off {
                    return Err(LifecycleError::PreconditionNotMet {
                        stage: from,
                        gate: Gate::PreWorkSignOff,
                    });
                }
                if !job.post_work_sign_off {
                    return Err(LifecycleError::PreconditionNotMet {
                        stage: from,
                        gate: Gate::PostWorkSignOff,
                    });
                }
            }
            Stage::Qc => {
                if !job.qc_sign_off {
                    return Err(LifecycleError::PreconditionNotMet {
                        stage: from,
                        gate: Gate::QcSignOff,
                    });
                }
            }
            Stage::Delivery => {
                if job.signature_data.is_none() {
                    return Err(LifecycleError::PreconditionNotMet {
                        stage: from,
                        gate: Gate::SignatureData,
                    });
                }
            }
            _ => {}
        }

        let mut warnings = Vec::new();
        if from == Stage::Delivery
            && let Some(invoice) = linked_invoice
            && invoice.payment_status != PaymentStatus::Paid
        {
            warnings.push(format!(
                "closing with invoice {} still {}",
                invoice.invoice_number, invoice.payment_status
            ));
        }

        job.stage_history.push(from);
        job.status = to;
        job.updated_at = Utc::now();

        Ok(Transition { from, to, warnings })
    }

    /// Creates the invoice for a job and links it.
    ///
    /// Callable once the job has reached `QC`; a second call without resetting
    /// the link is a no-op failure, never a duplicate invoice.
    pub fn generate_invoice(job: &mut JobRecord) -> Result<InvoiceRecord, LifecycleError> {
        if job.status < Stage::Qc {
            return Err(LifecycleError::InvalidTransition(job.status));
        }
        if let Some(id) = &job.linked_invoice_id {
            return Err(LifecycleError::AlreadyInvoiced(id.clone()));
        }
        if job.net_amount <= Decimal::ZERO {
            return Err(LifecycleError::InvalidAmount(job.net_amount));
        }

        let invoice = InvoiceRecord {
            id: Uuid::new_v4().to_string(),
            invoice_number: format!("INV-{}", job.job_number),
            date: Utc::now().date_naive(),
            grand_total: job.net_amount,
            payment_status: PaymentStatus::Pending,
        };

        job.linked_invoice_id = Some(invoice.id.clone());
        job.updated_at = Utc::now();

        Ok(invoice)
    }

    /// Marks an invoice paid. One-way; there is no reversal operation.
    pub fn mark_paid(invoice: &mut InvoiceRecord) {
        invoice.payment_status = PaymentStatus::Paid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job() -> JobRecord {
        JobRecord::new(
            "JOB-100",
            "Test Customer",
            Decimal::new(100000, 2),
            Decimal::new(15000, 2),
        )
    }

    /// Satisfies every gate so the job can walk the full lifecycle.
    fn satisfy_all_gates(job: &mut JobRecord) {
        job.pre_work_sign_off = true;
        job.post_work_sign_off = true;
        job.qc_sign_off = true;
        job.signature_data = Some("data:image/png;base64,...".into());
    }

    #[test]
    fn full_lifecycle_ends_closed_with_one_invoice() {
        let mut job = make_job();
        satisfy_all_gates(&mut job);

        // Reception → Estimation → WorkAssignment → Wip → Qc
        for _ in 0..4 {
            LifecycleController::advance(&mut job, None).unwrap();
        }
        assert_eq!(job.status, Stage::Qc);

        let invoice = LifecycleController::generate_invoice(&mut job).unwrap();
        assert_eq!(job.linked_invoice_id.as_deref(), Some(invoice.id.as_str()));

        // Qc → Invoicing → Delivery → Closed
        let mut paid = invoice.clone();
        LifecycleController::mark_paid(&mut paid);
        for _ in 0..3 {
            LifecycleController::advance(&mut job, Some(&paid)).unwrap();
        }
        assert_eq!(job.status, Stage::Closed);

        // Terminal: no further advance, and no second invoice.
        assert_eq!(
            LifecycleController::advance(&mut job, None),
            Err(LifecycleError::InvalidTransition(Stage::Closed))
        );
        assert_eq!(
            LifecycleController::generate_invoice(&mut job),
            Err(LifecycleError::AlreadyInvoiced(invoice.id))
        );
    }

    #[test]
    fn advance_moves_exactly_one_stage() {
        let mut job = make_job();
        let t = LifecycleController::advance(&mut job, None).unwrap();
        assert_eq!(t.from, Stage::Reception);
        assert_eq!(t.to, Stage::Estimation);
        assert_eq!(job.status, Stage::Estimation);
        assert!(t.warnings.is_empty());
    }

    #[test]
    fn qc_without_sign_off_is_rejected_and_job_unchanged() {
        let mut job = make_job();
        job.status = Stage::Qc;

        let err = LifecycleController::advance(&mut job, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::PreconditionNotMet {
                stage: Stage::Qc,
                gate: Gate::QcSignOff,
            }
        );
        assert_eq!(job.status, Stage::Qc);
        assert!(job.stage_history.is_empty());
    }

    #[test]
    fn wip_requires_both_work_sign_offs() {
        let mut job = make_job();
        job.status = Stage::Wip;

        let err = LifecycleController::advance(&mut job, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::PreconditionNotMet {
                stage: Stage::Wip,
                gate: Gate::PreWorkSignOff,
            }
        );

        job.pre_work_sign_off = true;
        let err = LifecycleController::advance(&mut job, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::PreconditionNotMet {
                stage: Stage::Wip,
                gate: Gate::PostWorkSignOff,
            }
        );

        job.post_work_sign_off = true;
        let t = LifecycleController::advance(&mut job, None).unwrap();
        assert_eq!(t.to, Stage::Qc);
    }

    #[test]
    fn delivery_requires_customer_signature() {
        let mut job = make_job();
        job.status = Stage::Delivery;

        let err = LifecycleController::advance(&mut job, None).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::PreconditionNotMet {
                stage: Stage::Delivery,
                gate: Gate::SignatureData,
            }
        );

        job.signature_data = Some("sig".into());
        let t = LifecycleController::advance(&mut job, None).unwrap();
        assert_eq!(t.to, Stage::Closed);
    }

    #[test]
    fn closing_with_unpaid_invoice_warns_but_succeeds() {
        let mut job = make_job();
        job.status = Stage::Delivery;
        job.signature_data = Some("sig".into());
        job.linked_invoice_id = Some("inv-1".into());

        let invoice = InvoiceRecord {
            id: "inv-1".into(),
            invoice_number: "INV-JOB-100".into(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            grand_total: Decimal::from(1150),
            payment_status: PaymentStatus::Pending,
        };

        let t = LifecycleController::advance(&mut job, Some(&invoice)).unwrap();
        assert_eq!(t.to, Stage::Closed);
        assert_eq!(t.warnings.len(), 1);
        assert!(t.warnings[0].contains("INV-JOB-100"));
        assert!(t.warnings[0].contains("PENDING"));
    }

    #[test]
    fn closing_with_paid_invoice_has_no_warning() {
        let mut job = make_job();
        job.status = Stage::Delivery;
        job.signature_data = Some("sig".into());

        let mut invoice = InvoiceRecord {
            id: "inv-2".into(),
            invoice_number: "INV-JOB-100".into(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            grand_total: Decimal::from(1150),
            payment_status: PaymentStatus::Overdue,
        };
        LifecycleController::mark_paid(&mut invoice);
        assert_eq!(invoice.payment_status, PaymentStatus::Paid);

        let t = LifecycleController::advance(&mut job, Some(&invoice)).unwrap();
        assert!(t.warnings.is_empty());
    }

    #[test]
    fn generate_invoice_before_qc_is_out_of_sequence() {
        let mut job = make_job();
        job.status = Stage::Wip;
        assert_eq!(
            LifecycleController::generate_invoice(&mut job),
            Err(LifecycleError::InvalidTransition(Stage::Wip))
        );
        assert!(job.linked_invoice_id.is_none());
    }

    #[test]
    fn generate_invoice_copies_net_amount() {
        let mut job = make_job();
        job.status = Stage::Qc;
        let invoice = LifecycleController::generate_invoice(&mut job).unwrap();
        assert_eq!(invoice.grand_total, Decimal::new(115000, 2));
        assert_eq!(invoice.payment_status, PaymentStatus::Pending);
        assert_eq!(invoice.invoice_number, "INV-JOB-100");
    }

    #[test]
    fn generate_invoice_twice_fails_without_duplicate() {
        let mut job = make_job();
        job.status = Stage::Invoicing;

        let first = LifecycleController::generate_invoice(&mut job).unwrap();
        let err = LifecycleController::generate_invoice(&mut job).unwrap_err();
        assert_eq!(err, LifecycleError::AlreadyInvoiced(first.id.clone()));
        assert_eq!(job.linked_invoice_id.as_deref(), Some(first.id.as_str()));
    }

    #[test]
    fn generate_invoice_rejects_non_positive_amount() {
        let mut job = JobRecord::new("JOB-0", "X", Decimal::ZERO, Decimal::ZERO);
        job.status = Stage::Qc;
        assert_eq!(
            LifecycleController::generate_invoice(&mut job),
            Err(LifecycleError::InvalidAmount(Decimal::ZERO))
        );
    }

    #[test]
    fn stage_history_is_recorded() {
        let mut job = make_job();
        LifecycleController::advance(&mut job, None).unwrap();
        LifecycleController::advance(&mut job, None).unwrap();
        assert_eq!(job.stage_history, vec![Stage::Reception, Stage::Estimation]);
    }

    #[test]
    fn precondition_error_names_the_missing_gate() {
        let err = LifecycleError::PreconditionNotMet {
            stage: Stage::Qc,
            gate: Gate::QcSignOff,
        };
        assert_eq!(err.to_string(), "cannot leave QC: qcSignOff is required");
    }
}
