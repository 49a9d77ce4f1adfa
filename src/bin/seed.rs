use restaurant_orders::{
    config::database_url_from_env,
    db::{create_orm_conn, create_pool, ensure_schema},
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = database_url_from_env()?;

    let orm = create_orm_conn(&database_url).await?;
    // Ensure the tables exist before inserting into them.
    let report = ensure_schema(&orm).await;
    if !report.is_complete() {
        anyhow::bail!("schema bootstrap failed: {:?}", report.failed);
    }
    let pool = create_pool(&database_url).await?;

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD")
        .map_err(|_| anyhow::anyhow!("ADMIN_PASSWORD must be set to provision the admin"))?;
    let admin_id = ensure_admin(&pool, &username, &password).await?;
    seed_menu(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(pool: &sqlx::PgPool, username: &str, password: &str) -> anyhow::Result<i32> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (admin_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO admins (username, password_hash)
        VALUES ($1, $2)
        ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING admin_id
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured admin {username}");
    Ok(admin_id)
}

async fn seed_menu(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let menu = vec![
        ("BBQ", "Chicken Tikka", "Charcoal grilled leg piece", Decimal::new(45000, 2)),
        ("BBQ", "Seekh Kabab", "Minced beef skewers, four pieces", Decimal::new(60000, 2)),
        ("Karahi", "Chicken Karahi", "Half kilo, tomato and green chilli", Decimal::new(25000, 2)),
        ("Rice", "Chicken Biryani", "Single serving with raita", Decimal::new(35000, 2)),
        ("Drinks", "Mint Margarita", "Fresh mint and lemon", Decimal::new(20000, 2)),
    ];

    for (category, name, description, price) in menu {
        let (category_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO categories (category_name)
            VALUES ($1)
            ON CONFLICT (category_name) DO UPDATE SET category_name = EXCLUDED.category_name
            RETURNING category_id
            "#,
        )
        .bind(category)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO menuitems (item_name, price, description, category_id)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM menuitems WHERE item_name = $1)
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(category_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded menu");
    Ok(())
}
