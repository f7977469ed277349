use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub user_id: i64,
    pub employer_id: i64,
    pub payroll_amount: f64,
    pub wallet_address: Option<String>,
    /// Sensitive; only the dedicated wallet-seed endpoint exposes it
    pub wallet_seed: Option<String>,
}

/// Employee joined with display name and the most recent payment, for the
/// admin overview. `latest_status` falls back to the `"N/A"` sentinel when
/// the employee has no transactions yet.
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct EmployeeStatusRow {
    pub employee_id: i64,
    pub name: String,
    pub payroll_amount: f64,
    pub wallet_address: Option<String>,
    pub latest_status: String,
    pub latest_date: Option<i64>,
}

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    employer_id: i64,
    payroll_amount: f64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO employees (user_id, employer_id, payroll_amount) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(employer_id)
    .bind(payroll_amount)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_wallet(
    pool: &SqlitePool,
    wallet_address: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE wallet_address = ?")
        .bind(wallet_address)
        .fetch_optional(pool)
        .await
}

/// Persist a freshly generated wallet onto an employee row. The unique
/// constraint on wallet_address is the only collision guard.
pub async fn set_wallet(
    pool: &SqlitePool,
    id: i64,
    wallet_address: &str,
    wallet_seed: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE employees SET wallet_address = ?, wallet_seed = ? WHERE id = ?")
        .bind(wallet_address)
        .bind(wallet_seed)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Admin overview: every employee with their single most recent transaction
/// (highest id wins, per the append-only history contract).
pub async fn list_with_latest_status(
    pool: &SqlitePool,
) -> Result<Vec<EmployeeStatusRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT e.id AS employee_id,
                u.username AS name,
                e.payroll_amount,
                e.wallet_address,
                COALESCE(t.status, 'N/A') AS latest_status,
                t.created_at AS latest_date
         FROM employees e
         JOIN users u ON e.user_id = u.id
         LEFT JOIN transactions t ON t.id = (
             SELECT MAX(id) FROM transactions WHERE employee_id = e.id
         )
         ORDER BY e.id",
    )
    .fetch_all(pool)
    .await
}
