pub mod builder;
pub mod error;
pub mod fiscal_year;
pub mod scope;

pub use builder::{Page, PagedResponse, QueryFragments, PAGE_SIZE};
pub use error::QueryError;
pub use fiscal_year::{apply_fiscal_year, FiscalYear};
pub use scope::{AccessScope, Role};
