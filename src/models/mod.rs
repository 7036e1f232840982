pub mod auth;
pub mod customer;
pub mod loan;

pub use auth::*;
pub use customer::*;
pub use loan::*;
