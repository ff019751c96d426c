pub mod create;

pub use create::{CreateTicketParams, CreateTicketTool};
