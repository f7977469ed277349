//! Database access layer

pub mod employees;
pub mod employers;
pub mod transactions;
pub mod users;
