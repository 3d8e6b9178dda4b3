pub mod admin;
pub mod center;
pub mod donation;
pub mod donor;
pub mod expense;
pub mod program;
pub mod receipt;
