//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod customer;
pub mod ticket;

pub use customer::{
    GetCustomerHistoryParams, GetCustomerHistoryTool, GetCustomerParams, GetCustomerTool,
    ListCustomersParams, ListCustomersTool, UpdateCustomerParams, UpdateCustomerTool,
};
pub use ticket::{CreateTicketParams, CreateTicketTool};
