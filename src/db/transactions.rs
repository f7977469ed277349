//! Append-only transaction history. Rows are never updated or deleted
//! except via employee cascade delete.

use sqlx::SqlitePool;

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_FAILURE: &str = "Failure";

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: i64,
    /// Unresolved (audit-only) rows carry no employee reference
    pub employee_id: Option<i64>,
    pub amount: f64,
    pub wallet_address: String,
    /// Submission time, epoch milliseconds
    pub created_at: i64,
    pub status: String,
    pub tx_id: Option<String>,
}

/// Transaction joined with the owning employee's display name, for the
/// full history view.
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct TransactionRow {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub amount: f64,
    pub wallet_address: String,
    pub created_at: i64,
    pub status: String,
    pub tx_id: Option<String>,
}

pub async fn insert(
    pool: &SqlitePool,
    employee_id: Option<i64>,
    amount: f64,
    wallet_address: &str,
    status: &str,
    tx_id: Option<&str>,
    created_at: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO transactions (employee_id, amount, wallet_address, created_at, status, tx_id)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(employee_id)
    .bind(amount)
    .bind(wallet_address)
    .bind(created_at)
    .bind(status)
    .bind(tx_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Most recent transaction for one employee, newest submission first.
pub async fn latest_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Option<Transaction>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM transactions
         WHERE employee_id = ?
         ORDER BY created_at DESC, id DESC
         LIMIT 1",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM transactions
         WHERE employee_id = ?
         ORDER BY created_at DESC, id DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

/// Full history, newest first. The ordering is a user-facing contract.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<TransactionRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT t.id, t.employee_id, u.username AS employee_name,
                t.amount, t.wallet_address, t.created_at, t.status, t.tx_id
         FROM transactions t
         LEFT JOIN employees e ON t.employee_id = e.id
         LEFT JOIN users u ON e.user_id = u.id
         ORDER BY t.created_at DESC, t.id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(pool)
        .await
}
