pub mod exec;
pub mod manager;
pub mod models;
