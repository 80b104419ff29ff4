//! Wire envelopes for the workshop store's list endpoints.
//!
//! The store wraps collections in a keyed object rather than returning bare
//! arrays; record shapes themselves live in [`crate::lifecycle`].

use serde::{Deserialize, Serialize};

use crate::lifecycle::{BookingRecord, InvoiceRecord, JobRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicesEnvelope {
    pub invoices: Vec<InvoiceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsEnvelope {
    pub bookings: Vec<BookingRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jobs_envelope_deserializes_from_store_format() {
        let json = r#"{
            "jobs": [{
                "id": "j-1",
                "jobNumber": "JOB-1",
                "status": "RECEPTION",
                "totalAmount": "100.00",
                "vatAmount": "15.00",
                "netAmount": "115.00",
                "createdAt": "2024-01-01T08:00:00Z",
                "updatedAt": "2024-01-01T08:00:00Z"
            }]
        }"#;
        let envelope: JobsEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.jobs.len(), 1);
        assert_eq!(envelope.jobs[0].job_number, "JOB-1");
    }

    #[test]
    fn empty_envelopes_deserialize() {
        let invoices: InvoicesEnvelope = serde_json::from_str(r#"{"invoices":[]}"#).unwrap();
        assert!(invoices.invoices.is_empty());
        let bookings: BookingsEnvelope = serde_json::from_str(r#"{"bookings":[]}"#).unwrap();
        assert!(bookings.bookings.is_empty());
    }
}
