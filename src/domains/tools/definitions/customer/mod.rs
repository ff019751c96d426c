pub mod get;
pub mod history;
pub mod list;
pub mod update;

pub use get::{GetCustomerParams, GetCustomerTool};
pub use history::{GetCustomerHistoryParams, GetCustomerHistoryTool};
pub use list::{ListCustomersParams, ListCustomersTool};
pub use update::{UpdateCustomerParams, UpdateCustomerTool};
