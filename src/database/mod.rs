pub mod connection;
pub mod legacy;
pub mod seed;

pub use connection::*;
pub use legacy::normalize_customer_phones;
pub use seed::seed_admin;
