pub mod auth_service;
pub mod customer_service;
pub mod loan_service;
pub mod report_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::*;
pub use customer_service::*;
pub use loan_service::*;
pub use report_service::*;
