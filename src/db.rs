use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::AppResult;

/// The tracker is a single interactive user per process, so one connection
/// is all the store ever needs.
const MAX_CONNECTIONS: u32 = 1;

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url `{database_url}`"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("open database")?;

    match database_path(database_url) {
        Some(path) => {
            let shown = std::fs::canonicalize(&path).unwrap_or(path);
            info!(path = %shown.display(), "database connected");
        }
        None => info!("in-memory database connected"),
    }
    Ok(pool)
}

pub async fn migrate(db: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(db).await?;
    info!("database tables checked");
    Ok(())
}

/// File backing a `sqlite:` url, or `None` for in-memory databases.
fn database_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_strips_scheme_and_query() {
        assert_eq!(
            database_path("sqlite://calorie_tracker.db?mode=rwc"),
            Some(PathBuf::from("calorie_tracker.db"))
        );
        assert_eq!(
            database_path("sqlite:data/tracker.db"),
            Some(PathBuf::from("data/tracker.db"))
        );
    }

    #[test]
    fn database_path_is_none_for_memory() {
        assert_eq!(database_path("sqlite::memory:"), None);
        assert_eq!(database_path("sqlite://:memory:"), None);
    }

    #[tokio::test]
    async fn creates_missing_file_and_applies_migrations() {
        let dir = std::env::temp_dir().join(format!("calorie-tracker-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("fresh.db");
        let _ = std::fs::remove_file(&file);

        let pool = connect(&format!("sqlite://{}", file.display())).await.unwrap();
        migrate(&pool).await.unwrap();
        // running twice must be a no-op
        migrate(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'entries') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec![("entries".to_string(),), ("users".to_string(),)]);
        assert!(file.exists());

        pool.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn adopts_file_created_without_migration_history() {
        let dir = std::env::temp_dir().join(format!("calorie-tracker-legacy-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("legacy.db");
        let _ = std::fs::remove_file(&file);
        let url = format!("sqlite://{}", file.display());

        let pool = connect(&url).await.unwrap();
        sqlx::query(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT UNIQUE NOT NULL, password_hash TEXT NOT NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE entries (id INTEGER PRIMARY KEY AUTOINCREMENT, user_id INTEGER, meal TEXT NOT NULL, calories INTEGER NOT NULL, FOREIGN KEY (user_id) REFERENCES users(id))",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ('old', 'x')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO entries (user_id, meal, calories) VALUES (1, 'Apple', 95)")
            .execute(&pool)
            .await
            .unwrap();

        migrate(&pool).await.unwrap();

        let (meal, logged_at): (String, Option<String>) =
            sqlx::query_as("SELECT meal, logged_at FROM entries")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(meal, "Apple");
        assert!(logged_at.is_none());

        pool.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
