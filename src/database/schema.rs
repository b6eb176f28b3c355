//! DDL for the customers table.

/// `CREATE TABLE IF NOT EXISTS` keeps this safe to run on every start and from
/// several processes at once.
pub const CUSTOMERS_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id SERIAL PRIMARY KEY,
    name TEXT,
    email TEXT,
    status TEXT
)
"#;

/// Advisory lock key taken while running `CUSTOMERS_INIT`.
pub const SCHEMA_LOCK_KEY: i64 = 0x6375_7374; // "cust"
