use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use sea_orm::ActiveValue::NotSet;
use sqlx::{FromRow, types::Json};

use crate::{
    dto::admin::NewMenuItem,
    entity::{
        categories::{ActiveModel as CategoryActive, Entity as Categories},
        menu_items::{ActiveModel as ItemActive, Entity as MenuItems},
        order_items::{Column as OrderItemCol, Entity as OrderItems},
    },
    error::{AppError, AppResult},
    models::{Category, MenuItem, OrderLine, OrderSummary},
    session::AdminSession,
    state::AppState,
};

pub async fn create_item(
    state: &AppState,
    admin: &AdminSession,
    item: NewMenuItem,
) -> AppResult<MenuItem> {
    let created = ItemActive {
        item_id: NotSet,
        item_name: Set(item.item_name),
        price: Set(item.price),
        description: Set(item.description),
        image_url: Set(item.image_url),
        category_id: Set(item.category_id),
    }
    .insert(state.orm.as_ref())
    .await
    .map_err(|err| match AppError::from(err) {
        AppError::Conflict(_) => AppError::Validation("Selected category does not exist".into()),
        other => other,
    })?;

    tracing::info!(admin_id = admin.admin_id, item_id = created.item_id, "menu item created");
    Ok(MenuItem::from(created))
}

/// Deletes a menu item that no order line references.
pub async fn delete_item(state: &AppState, admin: &AdminSession, item_id: i32) -> AppResult<()> {
    let referenced = OrderItems::find()
        .filter(OrderItemCol::ItemId.eq(item_id))
        .one(state.orm.as_ref())
        .await?
        .is_some();
    if referenced {
        return Err(AppError::ItemInUse);
    }

    // An order placed since the check above trips the RESTRICT foreign key.
    let result = MenuItems::delete_by_id(item_id)
        .exec(state.orm.as_ref())
        .await
        .map_err(|err| match AppError::from(err) {
            AppError::Conflict(_) => AppError::ItemInUse,
            other => other,
        })?;
    if result.rows_affected == 0 {
        return Err(AppError::ItemNotFound);
    }

    tracing::info!(admin_id = admin.admin_id, item_id, "menu item deleted");
    Ok(())
}

pub async fn create_category(
    state: &AppState,
    admin: &AdminSession,
    category_name: String,
) -> AppResult<Category> {
    let created = CategoryActive {
        category_id: NotSet,
        category_name: Set(category_name.clone()),
    }
    .insert(state.orm.as_ref())
    .await
    .map_err(|err| match AppError::from(err) {
        AppError::Conflict(_) => {
            AppError::Validation(format!("Category {category_name} already exists"))
        }
        other => other,
    })?;

    tracing::info!(
        admin_id = admin.admin_id,
        category_id = created.category_id,
        "category created"
    );
    Ok(Category::from(created))
}

/// Deletes a category. Items in it stay on the menu, uncategorised.
pub async fn delete_category(
    state: &AppState,
    admin: &AdminSession,
    category_id: i32,
) -> AppResult<()> {
    let result = Categories::delete_by_id(category_id)
        .exec(state.orm.as_ref())
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(admin_id = admin.admin_id, category_id, "category deleted");
    Ok(())
}

#[derive(FromRow)]
struct OrderSummaryRow {
    order_id: i32,
    created_at: DateTime<Utc>,
    total_amount: Decimal,
    name: String,
    phone_number: String,
    items: Json<Vec<OrderLine>>,
}

/// Every order, newest first, with its customer and lines.
pub async fn list_orders(state: &AppState) -> AppResult<Vec<OrderSummary>> {
    let rows = sqlx::query_as::<_, OrderSummaryRow>(
        r#"
        SELECT o.order_id, o.created_at, o.total_amount,
               u.name, u.phone_number,
               COALESCE(
                   json_agg(
                       json_build_object(
                           'item_name', m.item_name,
                           'quantity', oi.quantity,
                           'price', oi.price::text
                       ) ORDER BY oi.order_item_id
                   ) FILTER (WHERE oi.order_item_id IS NOT NULL),
                   '[]'::json
               ) AS items
        FROM orders o
        JOIN users u ON u.user_id = o.user_id
        LEFT JOIN orderitems oi ON oi.order_id = o.order_id
        LEFT JOIN menuitems m ON m.item_id = oi.item_id
        GROUP BY o.order_id, u.name, u.phone_number
        ORDER BY o.created_at DESC, o.order_id DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let orders = rows
        .into_iter()
        .map(|row| OrderSummary {
            order_id: row.order_id,
            created_at: row.created_at,
            total_amount: row.total_amount,
            name: row.name,
            phone_number: row.phone_number,
            items: row.items.0,
        })
        .collect();
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::{categories, order_items},
        state::testing::{mock_state, transaction_log},
    };
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn admin() -> AdminSession {
        AdminSession {
            admin_id: 1,
            username: "admin".into(),
            created_at: Utc::now(),
        }
    }

    fn deleted(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    #[tokio::test]
    async fn referenced_item_is_not_deleted() {
        let line = order_items::Model {
            order_item_id: 3,
            order_id: 9,
            item_id: 1,
            quantity: 2,
            price: Decimal::new(25000, 2),
        };
        let state = mock_state(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![line]]),
        );

        let err = delete_item(&state, &admin(), 1).await.unwrap_err();
        assert!(matches!(err, AppError::ItemInUse));

        let log = format!("{:?}", transaction_log(state)).to_lowercase();
        assert!(!log.contains("delete from"));
    }

    #[tokio::test]
    async fn unreferenced_item_is_deleted() {
        let state = mock_state(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<order_items::Model>::new()])
                .append_exec_results([deleted(1)]),
        );

        delete_item(&state, &admin(), 1).await.unwrap();

        let log = format!("{:?}", transaction_log(state)).to_lowercase();
        assert!(log.contains("delete from"));
    }

    #[tokio::test]
    async fn deleting_missing_item_reports_not_found() {
        let state = mock_state(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<order_items::Model>::new()])
                .append_exec_results([deleted(0)]),
        );

        let err = delete_item(&state, &admin(), 99).await.unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound));
    }

    #[tokio::test]
    async fn category_delete_is_a_single_statement() {
        let state = mock_state(
            MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([deleted(1)]),
        );

        delete_category(&state, &admin(), 2).await.unwrap();
        assert_eq!(transaction_log(state).len(), 1);
    }

    #[tokio::test]
    async fn creates_category() {
        let state = mock_state(MockDatabase::new(DatabaseBackend::Postgres).append_query_results(
            [vec![categories::Model {
                category_id: 4,
                category_name: "Desserts".into(),
            }]],
        ));

        let category = create_category(&state, &admin(), "Desserts".into())
            .await
            .unwrap();
        assert_eq!(category.category_id, 4);
        assert_eq!(category.category_name, "Desserts");
    }
}
