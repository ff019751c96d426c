//! SQLite gateway for the support database.
//!
//! Every operation opens its own connection, runs one statement (or one
//! short transaction) and closes it again. No state is shared between calls,
//! so the gateway can be used from any number of blocking tasks at once.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tracing::{debug, info};

use super::error::{DbError, DbResult};
use super::models::{Customer, CustomerChanges, CustomerStatus, NewCustomer, NewTicket, Ticket};
use crate::core::config::DatabaseConfig;

/// Handle to the customer support database.
#[derive(Debug, Clone)]
pub struct SupportDb {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SupportDb {
    const SCHEMA: &'static str = r"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            status TEXT NOT NULL DEFAULT 'active'
                CHECK (status IN ('active', 'disabled')),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        -- customer_id is declared but foreign keys are left unenforced
        CREATE TABLE IF NOT EXISTS tickets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL REFERENCES customers(id),
            issue TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'open',
            priority TEXT NOT NULL DEFAULT 'medium'
                CHECK (priority IN ('low', 'medium', 'high')),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_customers_status
        ON customers(status, created_at);

        CREATE INDEX IF NOT EXISTS idx_tickets_customer
        ON tickets(customer_id, created_at);
    ";

    /// Open (or create) the database at `path` and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> DbResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| DbError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let db = Self {
            path: path.to_path_buf(),
            busy_timeout,
        };
        db.connect()?.execute_batch(Self::SCHEMA)?;
        info!("Support database ready at {}", path.display());
        Ok(db)
    }

    /// Open the database described by the configuration.
    pub fn from_config(config: &DatabaseConfig) -> DbResult<Self> {
        Self::open(&config.path, Duration::from_millis(config.busy_timeout_ms))
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> DbResult<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| DbError::open(&self.path, e))?;
        conn.busy_timeout(self.busy_timeout)?;
        // The bundled build turns foreign keys on by default.
        conn.pragma_update(None, "foreign_keys", false)?;
        Ok(conn)
    }

    // ========================================================================
    // Customers
    // ========================================================================

    /// Point lookup by id.
    pub fn get_customer(&self, customer_id: i64) -> DbResult<Option<Customer>> {
        let conn = self.connect()?;
        let customer = conn
            .query_row(
                &format!("SELECT {} FROM customers WHERE id = ?1", Customer::COLUMNS),
                params![customer_id],
                Customer::from_row,
            )
            .optional()?;
        Ok(customer)
    }

    /// Customers with the given status, newest first, at most `limit` rows.
    pub fn list_customers(&self, status: CustomerStatus, limit: u32) -> DbResult<Vec<Customer>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM customers WHERE status = ?1 \
             ORDER BY created_at DESC, id DESC LIMIT ?2",
            Customer::COLUMNS
        ))?;
        let customers = stmt
            .query_map(params![status, limit], Customer::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Listed {} {} customers", customers.len(), status);
        Ok(customers)
    }

    /// Apply `changes` to a customer and refresh `updated_at`.
    ///
    /// Returns the updated record, or `None` when no customer has that id.
    pub fn update_customer(
        &self,
        customer_id: i64,
        changes: &CustomerChanges,
    ) -> DbResult<Option<Customer>> {
        let assignments = changes.assignments();
        let mut set_clause: Vec<String> = assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
            .collect();
        set_clause.push("updated_at = CURRENT_TIMESTAMP".to_string());

        let mut values: Vec<_> = assignments.into_iter().map(|(_, value)| value).collect();
        values.push(customer_id.into());
        let sql = format!(
            "UPDATE customers SET {} WHERE id = ?{}",
            set_clause.join(", "),
            values.len()
        );

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(&sql, params_from_iter(values.iter()))?;
        let customer = if changed == 0 {
            None
        } else {
            tx.query_row(
                &format!("SELECT {} FROM customers WHERE id = ?1", Customer::COLUMNS),
                params![customer_id],
                Customer::from_row,
            )
            .optional()?
        };
        tx.commit()?;

        debug!("Updated customer {} ({} row(s))", customer_id, changed);
        Ok(customer)
    }

    /// Insert a customer and return the stored row.
    pub fn insert_customer(&self, customer: &NewCustomer) -> DbResult<Customer> {
        let conn = self.connect()?;
        let created = conn.query_row(
            &format!(
                "INSERT INTO customers (name, email, phone, status, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, COALESCE(?5, CURRENT_TIMESTAMP), \
                 COALESCE(?5, CURRENT_TIMESTAMP)) \
                 RETURNING {}",
                Customer::COLUMNS
            ),
            params![
                customer.name,
                customer.email,
                customer.phone,
                customer.status,
                customer.created_at
            ],
            Customer::from_row,
        )?;
        Ok(created)
    }

    /// Number of rows in the customers table.
    pub fn customer_count(&self) -> DbResult<i64> {
        let conn = self.connect()?;
        let count = conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
        Ok(count)
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Insert a ticket and return the stored row with its new id.
    pub fn insert_ticket(&self, ticket: &NewTicket) -> DbResult<Ticket> {
        let conn = self.connect()?;
        let created = conn.query_row(
            &format!(
                "INSERT INTO tickets (customer_id, issue, status, priority, created_at) \
                 VALUES (?1, ?2, ?3, ?4, COALESCE(?5, CURRENT_TIMESTAMP)) \
                 RETURNING {}",
                Ticket::COLUMNS
            ),
            params![
                ticket.customer_id,
                ticket.issue,
                ticket.status,
                ticket.priority,
                ticket.created_at
            ],
            Ticket::from_row,
        )?;
        debug!("Inserted ticket {} for customer {}", created.id, created.customer_id);
        Ok(created)
    }

    /// All tickets of a customer, newest first.
    pub fn tickets_for_customer(&self, customer_id: i64) -> DbResult<Vec<Ticket>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tickets WHERE customer_id = ?1 ORDER BY created_at DESC, id DESC",
            Ticket::COLUMNS
        ))?;
        let tickets = stmt
            .query_map(params![customer_id], Ticket::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tickets)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domains::support::models::TicketPriority;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    /// Open a fresh database inside a temporary directory.
    pub(crate) fn temp_db() -> (TempDir, SupportDb) {
        let dir = TempDir::new().unwrap();
        let db = SupportDb::open(dir.path().join("support.db"), Duration::from_secs(5)).unwrap();
        (dir, db)
    }

    pub(crate) fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("support.db");
        let db = SupportDb::open(&path, Duration::from_secs(1)).unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), path.as_path());
        assert_eq!(db.customer_count().unwrap(), 0);
    }

    #[test]
    fn test_open_is_idempotent() {
        let (dir, db) = temp_db();
        db.insert_customer(&NewCustomer::new("Ana")).unwrap();

        let reopened = SupportDb::open(dir.path().join("support.db"), Duration::from_secs(1)).unwrap();
        assert_eq!(reopened.customer_count().unwrap(), 1);
    }

    #[test]
    fn test_get_customer_missing_is_none() {
        let (_dir, db) = temp_db();
        assert!(db.get_customer(42).unwrap().is_none());
    }

    #[test]
    fn test_insert_and_get_customer() {
        let (_dir, db) = temp_db();
        let created = db
            .insert_customer(
                &NewCustomer::new("Ana Silva")
                    .email("ana@example.com")
                    .created_at(at(3)),
            )
            .unwrap();

        let fetched = db.get_customer(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.status, CustomerStatus::Active);
        assert_eq!(fetched.created_at, at(3));
        assert_eq!(fetched.updated_at, at(3));
        assert_eq!(fetched.phone, None);
    }

    #[test]
    fn test_list_customers_filters_orders_and_limits() {
        let (_dir, db) = temp_db();
        db.insert_customer(&NewCustomer::new("Old").created_at(at(1))).unwrap();
        db.insert_customer(&NewCustomer::new("New").created_at(at(5))).unwrap();
        db.insert_customer(&NewCustomer::new("Mid").created_at(at(3))).unwrap();
        db.insert_customer(
            &NewCustomer::new("Gone")
                .status(CustomerStatus::Disabled)
                .created_at(at(9)),
        )
        .unwrap();

        let active = db.list_customers(CustomerStatus::Active, 20).unwrap();
        let names: Vec<_> = active.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);

        let limited = db.list_customers(CustomerStatus::Active, 2).unwrap();
        assert_eq!(limited.len(), 2);

        let disabled = db.list_customers(CustomerStatus::Disabled, 20).unwrap();
        assert_eq!(disabled.len(), 1);
        assert_eq!(disabled[0].name, "Gone");
    }

    #[test]
    fn test_update_customer_refreshes_updated_at() {
        let (_dir, db) = temp_db();
        let created = db
            .insert_customer(&NewCustomer::new("Ana").phone("555-0100").created_at(at(1)))
            .unwrap();

        let changes = CustomerChanges {
            name: Some("Ana Maria".to_string()),
            phone: Some(None),
            status: Some(CustomerStatus::Disabled),
            ..Default::default()
        };
        let updated = db.update_customer(created.id, &changes).unwrap().unwrap();

        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.phone, None);
        assert_eq!(updated.status, CustomerStatus::Disabled);
        assert_eq!(updated.created_at, at(1));
        assert!(updated.updated_at > at(1));
    }

    #[test]
    fn test_update_missing_customer_is_none() {
        let (_dir, db) = temp_db();
        let changes = CustomerChanges {
            name: Some("Nobody".to_string()),
            ..Default::default()
        };
        assert!(db.update_customer(7, &changes).unwrap().is_none());
        assert_eq!(db.customer_count().unwrap(), 0);
    }

    #[test]
    fn test_insert_ticket_assigns_ids() {
        let (_dir, db) = temp_db();
        let first = db
            .insert_ticket(&NewTicket::open(1, "Cannot log in", TicketPriority::High))
            .unwrap();
        let second = db
            .insert_ticket(&NewTicket::open(1, "Invoice missing", TicketPriority::Low))
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.status, "open");
        assert_eq!(first.priority, TicketPriority::High);
        assert_eq!(first.customer_id, 1);
    }

    #[test]
    fn test_connections_leave_foreign_keys_off() {
        let (_dir, db) = temp_db();
        let enforced: i64 = db
            .connect()
            .unwrap()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enforced, 0);
    }

    #[test]
    fn test_insert_ticket_without_customer_is_allowed() {
        let (_dir, db) = temp_db();
        let ticket = db
            .insert_ticket(&NewTicket::open(999, "Orphan", TicketPriority::Medium))
            .unwrap();
        assert_eq!(ticket.customer_id, 999);
    }

    #[test]
    fn test_tickets_for_customer_newest_first() {
        let (_dir, db) = temp_db();
        for (day, issue) in [(2, "second"), (7, "latest"), (1, "first")] {
            let mut ticket = NewTicket::open(3, issue, TicketPriority::Medium);
            ticket.created_at = Some(at(day));
            db.insert_ticket(&ticket).unwrap();
        }
        db.insert_ticket(&NewTicket::open(4, "other customer", TicketPriority::Low))
            .unwrap();

        let issues: Vec<_> = db
            .tickets_for_customer(3)
            .unwrap()
            .into_iter()
            .map(|t| t.issue)
            .collect();
        assert_eq!(issues, vec!["latest", "second", "first"]);
    }
}
