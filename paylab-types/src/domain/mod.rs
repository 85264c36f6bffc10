//! Pure domain types.

mod log;
mod payment;

pub use log::{LogEntry, LogLevel};
pub use payment::{PaymentReceipt, PaymentType};
