use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use sqlx::{PgPool, postgres::PgPoolOptions};

pub type DbPool = PgPool;
pub type OrmConn = DatabaseConnection;

/// Create the sqlx pool used for hand-written queries.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<OrmConn> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Table DDL in foreign-key dependency order.
pub const SCHEMA: [(&str, &str); 6] = [
    (
        "admins",
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            admin_id SERIAL PRIMARY KEY,
            username VARCHAR(100) UNIQUE NOT NULL,
            password_hash VARCHAR(255) NOT NULL
        )
        "#,
    ),
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            category_id SERIAL PRIMARY KEY,
            category_name VARCHAR(100) UNIQUE NOT NULL
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            phone_number VARCHAR(15) UNIQUE NOT NULL
        )
        "#,
    ),
    (
        "menuitems",
        r#"
        CREATE TABLE IF NOT EXISTS menuitems (
            item_id SERIAL PRIMARY KEY,
            item_name VARCHAR(100) NOT NULL,
            price NUMERIC(10,2) NOT NULL CHECK (price >= 0),
            description TEXT,
            image_url TEXT,
            category_id INT REFERENCES categories(category_id) ON DELETE SET NULL
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            order_id SERIAL PRIMARY KEY,
            user_id INT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            total_amount NUMERIC(10,2) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "orderitems",
        r#"
        CREATE TABLE IF NOT EXISTS orderitems (
            order_item_id SERIAL PRIMARY KEY,
            order_id INT NOT NULL REFERENCES orders(order_id) ON DELETE RESTRICT,
            item_id INT NOT NULL REFERENCES menuitems(item_id) ON DELETE RESTRICT,
            quantity INT NOT NULL CHECK (quantity >= 1),
            price NUMERIC(10,2) NOT NULL
        )
        "#,
    ),
];

/// Outcome of [`ensure_schema`].
#[derive(Debug, Default)]
pub struct SchemaReport {
    pub ensured: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

impl SchemaReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Best-effort bootstrap: creates any missing table and never alters an
/// existing one. A failing table is logged and skipped so the rest are
/// still attempted.
pub async fn ensure_schema(conn: &OrmConn) -> SchemaReport {
    let backend = conn.get_database_backend();
    let mut report = SchemaReport::default();

    for (table, ddl) in SCHEMA {
        match conn
            .execute(Statement::from_string(backend, ddl.trim().to_string()))
            .await
        {
            Ok(_) => {
                tracing::debug!(table, "table ensured");
                report.ensured.push(table);
            }
            Err(err) => {
                tracing::error!(table, error = %err, "failed to create table");
                report.failed.push((table, err.to_string()));
            }
        }
    }

    if report.is_complete() {
        tracing::info!(tables = report.ensured.len(), "schema ready");
    } else {
        tracing::warn!(failed = report.failed.len(), "schema bootstrap incomplete");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }
    }

    #[tokio::test]
    async fn creates_tables_in_dependency_order() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![ok(), ok(), ok(), ok(), ok(), ok()])
            .into_connection();

        let report = ensure_schema(&conn).await;
        assert!(report.is_complete());
        assert_eq!(
            report.ensured,
            vec!["admins", "categories", "users", "menuitems", "orders", "orderitems"]
        );

        let log = conn.into_transaction_log();
        assert_eq!(log.len(), 6);
        let rendered = format!("{log:?}");
        let menu = rendered.find("CREATE TABLE IF NOT EXISTS menuitems").unwrap();
        let categories = rendered.find("CREATE TABLE IF NOT EXISTS categories").unwrap();
        let order_items = rendered.find("CREATE TABLE IF NOT EXISTS orderitems").unwrap();
        assert!(categories < menu);
        assert!(menu < order_items);
    }

    #[tokio::test]
    async fn failing_table_does_not_stop_the_rest() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![ok(), ok()])
            .append_exec_errors(vec![DbErr::Custom("permission denied".into())])
            .append_exec_results(vec![ok(), ok(), ok()])
            .into_connection();

        let report = ensure_schema(&conn).await;
        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "users");
        assert_eq!(report.ensured.len(), 5);
        assert_eq!(conn.into_transaction_log().len(), 6);
    }

    #[test]
    fn every_statement_is_idempotent() {
        for (table, ddl) in SCHEMA {
            assert!(
                ddl.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")),
                "{table} must be guarded by IF NOT EXISTS"
            );
        }
    }
}
