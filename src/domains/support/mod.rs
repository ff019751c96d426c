//! Support domain module.
//!
//! Customers and their support tickets, persisted in SQLite. This is the
//! gateway the tools operate on; it knows nothing about the tool protocol.
//!
//! - `models.rs` - Row types, enums and write models
//! - `store.rs` - The `SupportDb` gateway (one connection per operation)
//! - `seed.rs` - Demo data for an empty database
//! - `error.rs` - Persistence error types

mod error;
pub mod models;
pub mod seed;
pub mod store;

pub use error::{DbError, DbResult, InvalidEnumValue};
pub use models::{
    Customer, CustomerChanges, CustomerHistory, CustomerStatus, NewCustomer, NewTicket, Ticket,
    TicketPriority,
};
pub use seed::seed_demo_data;
pub use store::SupportDb;
