use restaurant_orders::{
    config::database_url_from_env,
    db::{create_orm_conn, ensure_schema},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,restaurant_orders=debug".into()),
        )
        .init();

    let database_url = database_url_from_env()?;
    let orm = create_orm_conn(&database_url).await?;
    let report = ensure_schema(&orm).await;

    for table in &report.ensured {
        println!("ensured {table}");
    }
    if !report.is_complete() {
        for (table, error) in &report.failed {
            eprintln!("failed {table}: {error}");
        }
        anyhow::bail!("{} table(s) could not be created", report.failed.len());
    }
    println!("Schema ready");
    Ok(())
}
