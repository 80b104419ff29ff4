pub mod client;
pub mod error;
pub mod types;

pub use client::{StoreClient, WorkshopStore};
pub use error::StoreError;
pub use types::{BookingsEnvelope, InvoicesEnvelope, JobsEnvelope};
