//! Store adapter: pool setup, the customer model, and the `CustomerStore`
//! trait with its PostgreSQL implementation.

pub mod manager;
pub mod models;
pub mod repository;
pub mod schema;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Customer, CustomerPayload};
pub use repository::{CustomerStore, PgCustomerStore};
