pub mod auth;

pub use auth::AuthSession;
