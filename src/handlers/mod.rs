pub mod auth;
pub mod centers;
pub mod dashboard;
pub mod donations;
pub mod donors;
pub mod expenses;
pub mod programs;
pub mod receipts;
