// Table bootstrap. Statements are idempotent and run on every startup.

use tracing::debug;

use crate::pool::{DatabaseError, DatabasePool};

const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS service_metrics (
        id BIGSERIAL PRIMARY KEY,
        service_name VARCHAR(100) NOT NULL,
        metric_type VARCHAR(50) NOT NULL,
        value DOUBLE PRECISION NOT NULL,
        unit VARCHAR(20) NOT NULL,
        extra_data JSONB,
        timestamp TIMESTAMPTZ NOT NULL
    );
    "#,
    r#"CREATE INDEX IF NOT EXISTS service_metrics_service_name ON service_metrics(service_name);"#,
    r#"CREATE INDEX IF NOT EXISTS service_metrics_timestamp ON service_metrics(timestamp DESC);"#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL UNIQUE,
        description TEXT,
        url TEXT,
        status VARCHAR(20) NOT NULL DEFAULT 'active',
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    );
    "#,
];

const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS service_metrics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        service_name TEXT NOT NULL,
        metric_type TEXT NOT NULL,
        value REAL NOT NULL,
        unit TEXT NOT NULL,
        extra_data TEXT,
        timestamp TEXT NOT NULL
    );
    "#,
    r#"CREATE INDEX IF NOT EXISTS service_metrics_service_name ON service_metrics(service_name);"#,
    r#"CREATE INDEX IF NOT EXISTS service_metrics_timestamp ON service_metrics(timestamp DESC);"#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        url TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
];

pub async fn initialize(pool: &DatabasePool) -> Result<(), DatabaseError> {
    match pool {
        DatabasePool::Postgres(pg) => {
            for stmt in POSTGRES_SCHEMA {
                sqlx::query(stmt)
                    .execute(pg)
                    .await
                    .map_err(DatabaseError::Schema)?;
            }
        }
        DatabasePool::Sqlite(lite) => {
            for stmt in SQLITE_SCHEMA {
                sqlx::query(stmt)
                    .execute(lite)
                    .await
                    .map_err(DatabaseError::Schema)?;
            }
        }
    }

    debug!("Schema ready on {}", pool.backend_name());
    Ok(())
}
