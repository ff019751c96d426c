//! Customer and ticket records.
//!
//! These types are shared by the database gateway and the tool layer: they
//! map to rows of the `customers` and `tickets` tables and are serialized
//! verbatim as tool output.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::Row;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::InvalidEnumValue;

/// Status assigned to every ticket created through `create_ticket`.
pub const TICKET_STATUS_OPEN: &str = "open";

// ============================================================================
// Enumerations
// ============================================================================

/// Account status of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Disabled,
}

impl CustomerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }
}

impl FromStr for CustomerStatus {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            _ => Err(InvalidEnumValue {
                field: "status",
                allowed: "active, disabled",
            }),
        }
    }
}

/// Priority of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TicketPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for TicketPriority {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidEnumValue {
                field: "priority",
                allowed: "low, medium, high",
            }),
        }
    }
}

/// Implements string-backed serde and SQLite conversions for an enum with
/// `as_str` and `FromStr`.
macro_rules! string_enum {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

string_enum!(CustomerStatus);
string_enum!(TicketPriority);

// ============================================================================
// Records
// ============================================================================

/// A row of the `customers` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Customer {
    pub(crate) const COLUMNS: &'static str =
        "id, name, email, phone, status, created_at, updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// A row of the `tickets` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ticket {
    pub id: i64,
    pub customer_id: i64,
    pub issue: String,
    pub status: String,
    pub priority: TicketPriority,
    pub created_at: NaiveDateTime,
}

impl Ticket {
    pub(crate) const COLUMNS: &'static str = "id, customer_id, issue, status, priority, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            customer_id: row.get("customer_id")?,
            issue: row.get("issue")?,
            status: row.get("status")?,
            priority: row.get("priority")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A customer together with their tickets, newest first.
///
/// `customer` is `None` when the id is unknown, in which case `tickets` is
/// always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerHistory {
    pub customer: Option<Customer>,
    pub tickets: Vec<Ticket>,
}

// ============================================================================
// Write models
// ============================================================================

/// Values for a customer insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    /// Explicit creation time; the database clock is used when `None`.
    pub created_at: Option<NaiveDateTime>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            status: CustomerStatus::Active,
            created_at: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = status;
        self
    }

    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Values for a ticket insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub customer_id: i64,
    pub issue: String,
    pub status: String,
    pub priority: TicketPriority,
    /// Explicit creation time; the database clock is used when `None`.
    pub created_at: Option<NaiveDateTime>,
}

impl NewTicket {
    /// A ticket in the `open` state, as created by `create_ticket`.
    pub fn open(customer_id: i64, issue: impl Into<String>, priority: TicketPriority) -> Self {
        Self {
            customer_id,
            issue: issue.into(),
            status: TICKET_STATUS_OPEN.to_string(),
            priority,
            created_at: None,
        }
    }
}

/// A partial customer update.
///
/// Only `name`, `email`, `phone` and `status` can be changed. Unknown keys are
/// ignored when deserializing, so an update made only of unknown keys ends up
/// empty. `email` and `phone` distinguish "absent" (`None`) from "set to null"
/// (`Some(None)`). `name` and `status` cannot be cleared, so a null value for
/// either is rejected rather than treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
pub struct CustomerChanges {
    /// New display name.
    #[serde(default, deserialize_with = "name_not_null")]
    #[schemars(with = "String")]
    pub name: Option<String>,

    /// New email address, or null to clear it.
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<String>")]
    pub email: Option<Option<String>>,

    /// New phone number, or null to clear it.
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<String>")]
    pub phone: Option<Option<String>>,

    /// New account status.
    #[serde(default, deserialize_with = "status_not_null")]
    #[schemars(with = "CustomerStatus")]
    pub status: Option<CustomerStatus>,
}

impl CustomerChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.status.is_none()
    }

    /// Column/value pairs in a fixed column order.
    pub(crate) fn assignments(&self) -> Vec<(&'static str, Value)> {
        let text = |v: &Option<String>| v.clone().map_or(Value::Null, Value::Text);

        let mut assignments = Vec::new();
        if let Some(name) = &self.name {
            assignments.push(("name", Value::Text(name.clone())));
        }
        if let Some(email) = &self.email {
            assignments.push(("email", text(email)));
        }
        if let Some(phone) = &self.phone {
            assignments.push(("phone", text(phone)));
        }
        if let Some(status) = self.status {
            assignments.push(("status", Value::Text(status.as_str().to_string())));
        }
        assignments
    }
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn name_not_null<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    not_null(deserializer, "name")
}

fn status_not_null<'de, D>(deserializer: D) -> Result<Option<CustomerStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    not_null(deserializer, "status")
}

/// A present key must carry a value.
fn not_null<'de, D, T>(deserializer: D, field: &str) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(serde::de::Error::custom(format!("{field} cannot be null"))),
    }
}
