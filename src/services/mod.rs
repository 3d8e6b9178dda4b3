pub mod admin_user;
pub mod center;
pub mod dashboard;
pub mod donation;
pub mod donor;
pub mod expense;
pub mod profile;
pub mod program;
pub mod receipt;

pub use admin_user::AdminUserService;
pub use center::CenterService;
pub use dashboard::DashboardService;
pub use donation::DonationService;
pub use donor::DonorService;
pub use expense::ExpenseService;
pub use profile::ProfileService;
pub use program::ProgramService;
pub use receipt::ReceiptService;
