use std::time::Duration;

use reqwest::Client;

use super::error::StoreError;
use super::types::{BookingsEnvelope, InvoicesEnvelope, JobsEnvelope};
use crate::lifecycle::{BookingRecord, InvoiceRecord, JobRecord};

/// Read/write access to the remote workshop store.
///
/// The store owns the canonical records; implementations hand out snapshots
/// and persist mutated records atomically. The service layer is generic over
/// this trait so tests can substitute an in-memory store.
pub trait WorkshopStore {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError>;
    async fn fetch_job(&self, job_number: &str) -> Result<JobRecord, StoreError>;
    async fn create_job(&self, job: &JobRecord) -> Result<(), StoreError>;
    async fn update_job(&self, job: &JobRecord) -> Result<(), StoreError>;
    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError>;
    async fn fetch_invoice(&self, id: &str) -> Result<InvoiceRecord, StoreError>;
    async fn create_invoice(&self, invoice: &InvoiceRecord) -> Result<(), StoreError>;
    async fn update_invoice(&self, invoice: &InvoiceRecord) -> Result<(), StoreError>;
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>, StoreError>;
}

/// HTTP client for the workshop store REST API.
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl StoreClient {
    pub fn new(api_token: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url,
            api_token,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_token)
    }

    async fn check(response: reqwest::Response, what: &str) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(StoreError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

impl WorkshopStore for StoreClient {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError> {
        let response = self.request(reqwest::Method::GET, "/jobs").send().await?;
        let envelope = Self::check(response, "jobs")
            .await?
            .json::<JobsEnvelope>()
            .await?;
        Ok(envelope.jobs)
    }

    async fn fetch_job(&self, job_number: &str) -> Result<JobRecord, StoreError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/jobs/{job_number}"))
            .send()
            .await?;
        let job = Self::check(response, job_number)
            .await?
            .json::<JobRecord>()
            .await?;
        Ok(job)
    }

    async fn create_job(&self, job: &JobRecord) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::POST, "/jobs")
            .json(job)
            .send()
            .await?;
        Self::check(response, &job.job_number).await?;
        Ok(())
    }

    async fn update_job(&self, job: &JobRecord) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/jobs/{}", job.id))
            .json(job)
            .send()
            .await?;
        Self::check(response, &job.job_number).await?;
        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        let response = self.request(reqwest::Method::GET, "/invoices").send().await?;
        let envelope = Self::check(response, "invoices")
            .await?
            .json::<InvoicesEnvelope>()
            .await?;
        Ok(envelope.invoices)
    }

    async fn fetch_invoice(&self, id: &str) -> Result<InvoiceRecord, StoreError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/invoices/{id}"))
            .send()
            .await?;
        let invoice = Self::check(response, id)
            .await?
            .json::<InvoiceRecord>()
            .await?;
        Ok(invoice)
    }

    async fn create_invoice(&self, invoice: &InvoiceRecord) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::POST, "/invoices")
            .json(invoice)
            .send()
            .await?;
        Self::check(response, &invoice.invoice_number).await?;
        Ok(())
    }

    async fn update_invoice(&self, invoice: &InvoiceRecord) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/invoices/{}", invoice.id))
            .json(invoice)
            .send()
            .await?;
        Self::check(response, &invoice.invoice_number).await?;
        Ok(())
    }

    async fn list_bookings(&self) -> Result<Vec<BookingRecord>, StoreError> {
        let response = self.request(reqwest::Method::GET, "/bookings").send().await?;
        let envelope = Self::check(response, "bookings")
            .await?
            .json::<BookingsEnvelope>()
            .await?;
        Ok(envelope.bookings)
    }
}
