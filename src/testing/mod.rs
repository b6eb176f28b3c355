//! In-process `CustomerStore` doubles for router and handler tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::{Customer, CustomerPayload, CustomerStore, DatabaseError};

/// Map-backed store with `SERIAL`-like ids: start at 1, never reused.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryTable>,
}

#[derive(Default)]
struct MemoryTable {
    last_id: i32,
    rows: BTreeMap<i32, Customer>,
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn insert(&self, payload: CustomerPayload) -> Result<Customer, DatabaseError> {
        let mut table = self.inner.write().await;
        table.last_id += 1;
        let customer = Customer::from_payload(table.last_id, payload);
        table.rows.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_by_id(&self, id: i32) -> Result<Customer, DatabaseError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("customer {} not found", id)))
    }

    async fn get_all(&self) -> Result<Vec<Customer>, DatabaseError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, id: i32, payload: CustomerPayload) -> Result<Customer, DatabaseError> {
        let mut table = self.inner.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("customer {} not found", id)))?;
        *row = Customer::from_payload(id, payload);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Every operation fails as if the pool were exhausted.
pub struct FailingStore;

#[async_trait]
impl CustomerStore for FailingStore {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn insert(&self, _payload: CustomerPayload) -> Result<Customer, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get_by_id(&self, _id: i32) -> Result<Customer, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get_all(&self) -> Result<Vec<Customer>, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _id: i32, _payload: CustomerPayload) -> Result<Customer, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id: i32) -> Result<(), DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> CustomerPayload {
        CustomerPayload {
            name: Some(name.to_string()),
            email: Some(format!("{}@x.com", name.to_lowercase())),
            status: Some("active".to_string()),
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::default();
        let first = store.insert(payload("Ann")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.insert(payload("Bob")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn update_requires_existing_row() {
        let store = MemoryStore::default();
        assert!(matches!(
            store.update(5, payload("Ann")).await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
