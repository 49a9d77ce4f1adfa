use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{categories, menu_items};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub category_id: i32,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub item_id: i32,
    pub item_name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
}

/// One line of an order as shown on the admin orders page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub item_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderSummary {
    pub order_id: i32,
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub name: String,
    pub phone_number: String,
    pub items: Vec<OrderLine>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            category_id: model.category_id,
            category_name: model.category_name,
        }
    }
}

impl From<menu_items::Model> for MenuItem {
    fn from(model: menu_items::Model) -> Self {
        Self {
            item_id: model.item_id,
            item_name: model.item_name,
            price: model.price,
            description: model.description,
            image_url: model.image_url,
            category_id: model.category_id,
        }
    }
}
