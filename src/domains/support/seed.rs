//! Demo data for a fresh support database.

use chrono::{Duration, NaiveDateTime, Utc};
use tracing::info;

use super::error::DbResult;
use super::models::{CustomerStatus, NewCustomer, NewTicket, TicketPriority};
use super::store::SupportDb;

struct DemoCustomer {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    status: CustomerStatus,
    tickets: &'static [(&'static str, &'static str, TicketPriority)],
}

const DEMO_CUSTOMERS: &[DemoCustomer] = &[
    DemoCustomer {
        name: "John Doe",
        email: "john.doe@example.com",
        phone: "+1-555-0101",
        status: CustomerStatus::Active,
        tickets: &[
            ("Cannot reset password", "open", TicketPriority::High),
            ("Billing address not saved", "resolved", TicketPriority::Low),
        ],
    },
    DemoCustomer {
        name: "Jane Smith",
        email: "jane.smith@example.com",
        phone: "+1-555-0102",
        status: CustomerStatus::Active,
        tickets: &[("Charged twice for subscription", "in_progress", TicketPriority::High)],
    },
    DemoCustomer {
        name: "Carlos Rivera",
        email: "carlos.rivera@example.com",
        phone: "+1-555-0103",
        status: CustomerStatus::Disabled,
        tickets: &[("Account locked after failed logins", "resolved", TicketPriority::Medium)],
    },
    DemoCustomer {
        name: "Priya Patel",
        email: "priya.patel@example.com",
        phone: "+1-555-0104",
        status: CustomerStatus::Active,
        tickets: &[
            ("Feature request: dark mode", "open", TicketPriority::Low),
            ("Export to CSV times out", "open", TicketPriority::Medium),
        ],
    },
    DemoCustomer {
        name: "Wei Chen",
        email: "wei.chen@example.com",
        phone: "+1-555-0105",
        status: CustomerStatus::Active,
        tickets: &[],
    },
];

/// Insert the demo customers and tickets if the database has no customers.
///
/// Returns the number of customers inserted (zero when data already exists).
pub fn seed_demo_data(db: &SupportDb) -> DbResult<usize> {
    if db.customer_count()? > 0 {
        info!("Database already has customers, skipping demo data");
        return Ok(0);
    }

    let base = Utc::now().naive_utc() - Duration::days(30);
    let mut ticket_count = 0;

    for (i, demo) in DEMO_CUSTOMERS.iter().enumerate() {
        let joined = offset(base, i as i64 * 24);
        let customer = db.insert_customer(
            &NewCustomer::new(demo.name)
                .email(demo.email)
                .phone(demo.phone)
                .status(demo.status)
                .created_at(joined),
        )?;

        for (j, (issue, status, priority)) in demo.tickets.iter().enumerate() {
            db.insert_ticket(&NewTicket {
                customer_id: customer.id,
                issue: issue.to_string(),
                status: status.to_string(),
                priority: *priority,
                created_at: Some(offset(joined, 2 + j as i64 * 5)),
            })?;
            ticket_count += 1;
        }
    }

    info!(
        "Seeded {} demo customers and {} tickets",
        DEMO_CUSTOMERS.len(),
        ticket_count
    );
    Ok(DEMO_CUSTOMERS.len())
}

fn offset(from: NaiveDateTime, hours: i64) -> NaiveDateTime {
    from + Duration::hours(hours)
}
