use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{Customer, CustomerPayload};
use crate::database::schema::{CUSTOMERS_INIT, SCHEMA_LOCK_KEY};

/// Persistence operations over the `customers` table.
///
/// Implementations hold nothing but a connection handle and must be safe to
/// share across concurrent requests.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Create the table if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> Result<(), DatabaseError>;

    /// Insert a row and return it with the backend-assigned id. Fields left
    /// unset in the payload are stored as empty strings.
    async fn insert(&self, payload: CustomerPayload) -> Result<Customer, DatabaseError>;

    /// `DatabaseError::NotFound` when no row has this id.
    async fn get_by_id(&self, id: i32) -> Result<Customer, DatabaseError>;

    /// All rows in ascending id order; empty when the table is empty.
    async fn get_all(&self) -> Result<Vec<Customer>, DatabaseError>;

    /// Overwrite name, email and status of an existing row; unset fields are
    /// written as empty strings. `DatabaseError::NotFound` when no row has this id.
    async fn update(&self, id: i32, payload: CustomerPayload) -> Result<Customer, DatabaseError>;

    /// Remove the row. Deleting a missing id is not an error.
    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;

    /// Cheap round-trip used by the health endpoint.
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

// NULL columns can exist in rows written by other clients; read them as ''.
const SELECT_COLUMNS: &str =
    "id, COALESCE(name, '') AS name, COALESCE(email, '') AS email, COALESCE(status, '') AS status";

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        // Concurrent CREATE TABLE IF NOT EXISTS can still collide in pg_type,
        // so callers queue on an advisory lock held for the transaction.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        sqlx::query(CUSTOMERS_INIT).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert(&self, payload: CustomerPayload) -> Result<Customer, DatabaseError> {
        let draft = Customer::from_payload(0, payload);
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO customers (name, email, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.status)
        .fetch_one(&self.pool)
        .await?;

        debug!(id, "inserted customer");
        Ok(Customer { id, ..draft })
    }

    async fn get_by_id(&self, id: i32) -> Result<Customer, DatabaseError> {
        let sql = format!("SELECT {} FROM customers WHERE id = $1", SELECT_COLUMNS);
        sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("customer {} not found", id)))
    }

    async fn get_all(&self) -> Result<Vec<Customer>, DatabaseError> {
        let sql = format!("SELECT {} FROM customers ORDER BY id", SELECT_COLUMNS);
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    async fn update(&self, id: i32, payload: CustomerPayload) -> Result<Customer, DatabaseError> {
        let sql = format!(
            "UPDATE customers SET name = $2, email = $3, status = $4 WHERE id = $1 RETURNING {}",
            SELECT_COLUMNS
        );
        let draft = Customer::from_payload(id, payload);
        sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("customer {} not found", id)))
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows_affected = result.rows_affected(), "deleted customer");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
