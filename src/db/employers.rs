use sqlx::SqlitePool;

pub const DEFAULT_EMPLOYER: &str = "Default Employer";

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct Employer {
    pub id: i64,
    pub name: String,
}

pub async fn create(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO employers (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Employer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Employer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employers ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Seed the default employer once; later runs are no-ops.
pub async fn ensure_default(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO employers (name) VALUES (?)")
        .bind(DEFAULT_EMPLOYER)
        .execute(pool)
        .await?;
    Ok(())
}
