use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Category, MenuItem};

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct HomePage {
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct MenuPage {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct SuccessPage {
    pub message: String,
}
