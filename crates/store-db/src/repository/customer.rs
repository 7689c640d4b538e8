//! # Customer Repository
//!
//! Database operations for customers: list, insert, email update.
//! Customers are never deleted by this system.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers: Vec<Customer> = sqlx::query_as(
            r#"
            SELECT id, name, email, address
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer: Option<Customer> = sqlx::query_as(
            r#"
            SELECT id, name, email, address
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer and returns the storage-assigned id.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the email already exists.
    pub async fn insert(&self, name: &str, email: &str, address: &str) -> DbResult<i64> {
        debug!(name = %name, email = %email, "Inserting customer");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO customers (name, email, address)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Updates a customer's email address.
    ///
    /// ## Errors
    /// `DbError::NotFound` when no customer has the given id,
    /// `DbError::UniqueViolation` when the email is already taken.
    pub async fn update_email(&self, id: i64, email: &str) -> DbResult<()> {
        debug!(id = %id, "Updating customer email");

        let result = sqlx::query(
            r#"
            UPDATE customers SET email = ?2 WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}
