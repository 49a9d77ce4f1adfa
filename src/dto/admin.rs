use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{optional_text, parse_id, required_text};
use crate::{
    error::{AppError, AppResult},
    models::{Category, MenuItem, OrderSummary},
};

/// 99999999.99, the largest value a `NUMERIC(10,2)` column holds.
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddItemForm {
    pub item_name: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub item_name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
}

impl TryFrom<AddItemForm> for NewMenuItem {
    type Error = AppError;

    fn try_from(form: AddItemForm) -> AppResult<Self> {
        let category_id = match form.category_id.trim() {
            "" => None,
            raw => Some(parse_id("category_id", raw)?),
        };
        Ok(Self {
            item_name: required_text("item_name", &form.item_name, 100)?,
            price: parse_price(&form.price)?,
            description: optional_text(&form.description),
            image_url: optional_text(&form.image_url),
            category_id,
        })
    }
}

pub fn parse_price(raw: &str) -> AppResult<Decimal> {
    let price = Decimal::from_str(raw.trim())
        .map_err(|_| AppError::Validation("price must be a number".into()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::Validation("price must not be negative".into()));
    }
    if price.scale() > 2 && price != price.round_dp(2) {
        return Err(AppError::Validation(
            "price must have at most two decimal places".into(),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::Validation("price is too large".into()));
    }
    Ok(price.round_dp(2))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct DeleteItemForm {
    pub item_id: String,
}

impl DeleteItemForm {
    pub fn item_id(&self) -> AppResult<i32> {
        parse_id("item_id", &self.item_id)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddCategoryForm {
    pub category_name: String,
}

impl AddCategoryForm {
    pub fn category_name(&self) -> AppResult<String> {
        required_text("category_name", &self.category_name, 100)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct DeleteCategoryForm {
    pub category_id: String,
}

impl DeleteCategoryForm {
    pub fn category_id(&self) -> AppResult<i32> {
        parse_id("category_id", &self.category_id)
    }
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct AddItemPage {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct CategoriesPage {
    pub categories: Vec<Category>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct OrdersPage {
    pub orders: Vec<OrderSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str, category_id: &str) -> AddItemForm {
        AddItemForm {
            item_name: "Chicken Karahi".into(),
            price: price.into(),
            description: "".into(),
            image_url: " https://img.example/karahi.jpg ".into(),
            category_id: category_id.into(),
        }
    }

    #[test]
    fn parses_item_with_optional_fields() {
        let item = NewMenuItem::try_from(form("250.00", "")).unwrap();
        assert_eq!(item.price, Decimal::new(25000, 2));
        assert_eq!(item.description, None);
        assert_eq!(item.image_url.as_deref(), Some("https://img.example/karahi.jpg"));
        assert_eq!(item.category_id, None);

        let item = NewMenuItem::try_from(form("99.5", "4")).unwrap();
        assert_eq!(item.category_id, Some(4));
    }

    #[test]
    fn rejects_bad_prices() {
        for raw in ["-1", "abc", "", "1.999", "100000000"] {
            assert!(parse_price(raw).is_err(), "price {raw:?}");
        }
        assert_eq!(parse_price("0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_price("12.50").unwrap(), Decimal::new(1250, 2));
    }

    #[test]
    fn rejects_non_numeric_category() {
        assert!(matches!(
            NewMenuItem::try_from(form("10", "drinks")),
            Err(AppError::Validation(_))
        ));
    }
}
