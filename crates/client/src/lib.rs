//! Typed clients for calling sibling directory services.
//!
//! The only component that crosses a process boundary. Callers hold a
//! trait object (`EmployeeApi`) and a resolver mapping logical service
//! names to live addresses, so tests can substitute fakes for either.

pub mod employee;
pub mod error;
pub mod resolver;

pub use employee::{EmployeeApi, HttpEmployeeClient, EMPLOYEE_SERVICE};
pub use error::ClientError;
pub use resolver::{ServiceResolver, StaticResolver};
