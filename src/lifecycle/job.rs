use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage::Stage;

/// Payment state of an invoice. One-way: an invoice never leaves `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Paid => write!(f, "PAID"),
            PaymentStatus::Overdue => write!(f, "OVERDUE"),
        }
    }
}

/// One vehicle service engagement, as stored by the remote workshop API.
///
/// The canonical copy lives in the external store; the core operates on
/// snapshots of this struct and hands back the mutated result for the caller
/// to persist. Field names follow the store's camelCase wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    /// Unique human-readable number, e.g. "JOB-1042".
    pub job_number: String,
    pub status: Stage,

    // Vehicle/customer descriptive fields, opaque to the core.
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub registration: String,
    #[serde(default)]
    pub customer_name: String,

    pub total_amount: Decimal,
    pub vat_amount: Decimal,
    /// net = total + vat. Non-negative.
    pub net_amount: Decimal,

    // Gate flags. Absent on the wire means not signed off.
    #[serde(default)]
    pub pre_work_sign_off: bool,
    #[serde(default)]
    pub post_work_sign_off: bool,
    #[serde(default)]
    pub qc_sign_off: bool,
    #[serde(default)]
    pub floor_incharge_sign_off: bool,

    /// Customer acknowledgment signature, captured at delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_data: Option<String>,

    /// Set once, when an invoice is generated. A job has at most one invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_invoice_id: Option<String>,

    /// Stages already traversed, oldest first.
    #[serde(default)]
    pub stage_history: Vec<Stage>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Creates a new job at intake, in `RECEPTION`, with all gates unset.
    pub fn new(
        job_number: impl Into<String>,
        customer_name: impl Into<String>,
        total_amount: Decimal,
        vat_amount: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            job_number: job_number.into(),
            status: Stage::Reception,
            brand: String::new(),
            model: String::new(),
            registration: String::new(),
            customer_name: customer_name.into(),
            total_amount,
            vat_amount,
            net_amount: total_amount + vat_amount,
            pre_work_sign_off: false,
            post_work_sign_off: false,
            qc_sign_off: false,
            floor_incharge_sign_off: false,
            signature_data: None,
            linked_invoice_id: None,
            stage_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A financial document derived from a job, owned by the external store once
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub invoice_number: String,
    pub date: NaiveDate,
    /// Non-negative.
    pub grand_total: Decimal,
    pub payment_status: PaymentStatus,
}

/// A scheduled future arrival. Read-only input to forecasting; never mutated
/// by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub registration: String,
    pub scheduled_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_creation_defaults() {
        let job = JobRecord::new(
            "JOB-1001",
            "Acme Fleet",
            Decimal::new(120000, 2),
            Decimal::new(18000, 2),
        );
        assert_eq!(job.status, Stage::Reception);
        assert_eq!(job.net_amount, Decimal::new(138000, 2));
        assert!(!job.pre_work_sign_off);
        assert!(!job.qc_sign_off);
        assert!(job.signature_data.is_none());
        assert!(job.linked_invoice_id.is_none());
        assert!(job.stage_history.is_empty());
    }

    #[test]
    fn job_serializes_camel_case() {
        let job = JobRecord::new("JOB-7", "X", Decimal::from(100), Decimal::from(15));
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains("jobNumber"));
        assert!(json.contains("netAmount"));
        assert!(json.contains("qcSignOff"));
        assert!(!json.contains("job_number"));
        // Unset optionals are omitted, not null.
        assert!(!json.contains("linkedInvoiceId"));
    }

    #[test]
    fn job_serialization_roundtrip() {
        let mut job = JobRecord::new("JOB-9", "Y", Decimal::from(500), Decimal::from(75));
        job.qc_sign_off = true;
        job.linked_invoice_id = Some("inv-1".into());
        let json = serde_json::to_string(&job).unwrap();
        let parsed: JobRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, job.id);
        assert_eq!(parsed.status, Stage::Reception);
        assert_eq!(parsed.net_amount, Decimal::from(575));
        assert!(parsed.qc_sign_off);
        assert_eq!(parsed.linked_invoice_id.as_deref(), Some("inv-1"));
    }

    #[test]
    fn job_deserializes_from_store_format() {
        // Gate flags and history may be absent entirely on older records.
        let json = r#"{
            "id": "j-1",
            "jobNumber": "JOB-42",
            "status": "WIP",
            "totalAmount": "2500.00",
            "vatAmount": "375.00",
            "netAmount": "2875.00",
            "createdAt": "2024-03-01T09:00:00Z",
            "updatedAt": "2024-03-02T10:30:00Z"
        }"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, Stage::Wip);
        assert_eq!(job.net_amount, Decimal::new(287500, 2));
        assert!(!job.post_work_sign_off);
        assert!(job.stage_history.is_empty());
    }

    #[test]
    fn amounts_serialize_as_strings() {
        let job = JobRecord::new("JOB-3", "Z", Decimal::new(9999, 2), Decimal::new(1500, 2));
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains(r#""totalAmount":"99.99""#));
    }

    #[test]
    fn invoice_roundtrip() {
        let invoice = InvoiceRecord {
            id: "inv-1".into(),
            invoice_number: "INV-JOB-42".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            grand_total: Decimal::new(287500, 2),
            payment_status: PaymentStatus::Pending,
        };
        let json = serde_json::to_string(&invoice).unwrap();
        assert!(json.contains(r#""paymentStatus":"PENDING""#));
        let parsed: InvoiceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.payment_status, PaymentStatus::Pending);
        assert_eq!(parsed.date, invoice.date);
    }

    #[test]
    fn payment_status_display() {
        assert_eq!(PaymentStatus::Pending.to_string(), "PENDING");
        assert_eq!(PaymentStatus::Paid.to_string(), "PAID");
        assert_eq!(PaymentStatus::Overdue.to_string(), "OVERDUE");
    }
}
