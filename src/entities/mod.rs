pub mod customers;
pub mod employees;
pub mod loans;

pub use customers as customer_entity;
pub use employees as employee_entity;
pub use loans as loan_entity;
pub use loans::LoanStatus;
