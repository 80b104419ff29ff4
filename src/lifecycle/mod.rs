mod controller;
mod job;
mod stage;

pub use controller::{Gate, LifecycleController, LifecycleError, Transition};
pub use job::{BookingRecord, InvoiceRecord, JobRecord, PaymentStatus};
pub use stage::Stage;
