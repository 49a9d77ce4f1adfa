use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::orders::{SubmitOrder, SubmittedOrder},
    entity::{
        menu_items::Entity as MenuItems,
        order_items::ActiveModel as OrderItemActive,
        orders::ActiveModel as OrderActive,
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    state::AppState,
    validation::is_valid_phone_number,
};

/// Places a single-line order.
///
/// The customer is looked up by phone number and created on first order.
/// The item's current price is copied onto the order line, so later menu
/// price changes never alter a placed order. User creation, the order and
/// its line commit together or not at all.
pub async fn submit_order(state: &AppState, order: SubmitOrder) -> AppResult<SubmittedOrder> {
    if !is_valid_phone_number(&order.phone_number) {
        return Err(AppError::Validation("Invalid Pakistani phone number".into()));
    }

    let txn = state.orm.begin().await?;
    match place_order(&txn, &order).await {
        Ok(placed) => {
            txn.commit().await?;
            tracing::info!(
                order_id = placed.order_id,
                item_id = order.item_id,
                quantity = order.quantity,
                "order placed"
            );
            Ok(placed)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "order rollback failed");
            }
            Err(err)
        }
    }
}

async fn place_order(txn: &DatabaseTransaction, order: &SubmitOrder) -> AppResult<SubmittedOrder> {
    let user_id = find_or_create_user(txn, &order.name, &order.phone_number).await?;

    let price = MenuItems::find_by_id(order.item_id)
        .one(txn)
        .await?
        .map(|item| item.price)
        .ok_or(AppError::ItemNotFound)?;

    let total_amount = line_total(price, order.quantity);

    let placed = OrderActive {
        order_id: NotSet,
        user_id: Set(user_id),
        total_amount: Set(total_amount),
        created_at: NotSet,
    }
    .insert(txn)
    .await?;

    OrderItemActive {
        order_item_id: NotSet,
        order_id: Set(placed.order_id),
        item_id: Set(order.item_id),
        quantity: Set(order.quantity),
        price: Set(price),
    }
    .insert(txn)
    .await?;

    Ok(SubmittedOrder {
        order_id: placed.order_id,
    })
}

/// Reuses the customer registered under `phone_number`, or registers them.
///
/// A concurrent first order for the same number makes the insert hit the
/// unique constraint, which surfaces as [`AppError::Conflict`].
async fn find_or_create_user(
    txn: &DatabaseTransaction,
    name: &str,
    phone_number: &str,
) -> AppResult<i32> {
    let existing = Users::find()
        .filter(UserCol::PhoneNumber.eq(phone_number))
        .one(txn)
        .await?;
    if let Some(user) = existing {
        return Ok(user.user_id);
    }

    let user = UserActive {
        user_id: NotSet,
        name: Set(name.to_string()),
        phone_number: Set(phone_number.to_string()),
    }
    .insert(txn)
    .await?;
    tracing::debug!(user_id = user.user_id, "registered new customer");
    Ok(user.user_id)
}

pub fn line_total(price: Decimal, quantity: i32) -> Decimal {
    price * Decimal::from(quantity)
}
