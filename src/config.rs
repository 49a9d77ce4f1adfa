use std::env;

use anyhow::{Context, bail};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub session_secret: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = database_url_from_env()?;
        let session_secret = env::var("SESSION_SECRET").context("SESSION_SECRET is not set")?;
        if session_secret.trim().is_empty() {
            bail!("SESSION_SECRET must not be empty");
        }
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            port,
            database_url,
            session_secret,
            host,
        })
    }
}

/// `DATABASE_URL` when set, otherwise assembled from the `PG*` variables.
pub fn database_url_from_env() -> anyhow::Result<String> {
    match env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Ok(url),
        _ => database_url_from_parts(),
    }
}

/// Builds a connection string from the libpq-style `PG*` variables.
fn database_url_from_parts() -> anyhow::Result<String> {
    let host = env::var("PGHOST").context("PGHOST is not set")?;
    let database = env::var("PGDATABASE").context("PGDATABASE is not set")?;
    let user = env::var("PGUSER").context("PGUSER is not set")?;
    let password = env::var("PGPASSWORD").context("PGPASSWORD is not set")?;
    let port = env::var("PGPORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5432);
    let sslmode = env::var("PGSSLMODE").unwrap_or_else(|_| "prefer".to_string());

    Ok(build_database_url(
        &host, port, &database, &user, &password, &sslmode,
    ))
}

fn build_database_url(
    host: &str,
    port: u16,
    database: &str,
    user: &str,
    password: &str,
    sslmode: &str,
) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        urlencoding::encode(user),
        urlencoding::encode(password),
        host,
        port,
        database,
        sslmode
    )
}
