use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{parse_id, required_text};
use crate::{
    error::{AppError, AppResult},
    models::MenuItem,
};

pub const MAX_QUANTITY: i32 = 9999;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct OrderItemForm {
    pub item_id: String,
}

impl OrderItemForm {
    pub fn item_id(&self) -> AppResult<i32> {
        parse_id("item_id", &self.item_id)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SubmitOrderForm {
    pub name: String,
    pub phone_number: String,
    pub item_id: String,
    pub quantity: String,
}

/// A checkout request for a single menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOrder {
    pub name: String,
    pub phone_number: String,
    pub item_id: i32,
    pub quantity: i32,
}

impl TryFrom<SubmitOrderForm> for SubmitOrder {
    type Error = AppError;

    fn try_from(form: SubmitOrderForm) -> AppResult<Self> {
        let quantity = match form.quantity.trim().parse::<i32>() {
            Ok(q) if (1..=MAX_QUANTITY).contains(&q) => q,
            _ => {
                return Err(AppError::Validation(format!(
                    "quantity must be between 1 and {MAX_QUANTITY}"
                )));
            }
        };
        Ok(Self {
            name: required_text("name", &form.name, 100)?,
            // Checked against the national format by the workflow, untouched here.
            phone_number: form.phone_number,
            item_id: parse_id("item_id", &form.item_id)?,
            quantity,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SubmittedOrder {
    pub order_id: i32,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct OrderPage {
    pub item: Option<MenuItem>,
    pub item_id: Option<i32>,
}
