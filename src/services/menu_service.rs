use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        menu_items::{Column as ItemCol, Entity as MenuItems},
    },
    error::{AppError, AppResult},
    models::{Category, MenuItem},
    state::AppState,
};

pub async fn list_menu_items(state: &AppState) -> AppResult<Vec<MenuItem>> {
    let items = MenuItems::find()
        .order_by_asc(ItemCol::ItemId)
        .all(state.orm.as_ref())
        .await?
        .into_iter()
        .map(MenuItem::from)
        .collect();
    Ok(items)
}

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let categories = Categories::find()
        .order_by_asc(CategoryCol::CategoryName)
        .all(state.orm.as_ref())
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(categories)
}

pub async fn get_menu_item(state: &AppState, item_id: i32) -> AppResult<MenuItem> {
    MenuItems::find_by_id(item_id)
        .one(state.orm.as_ref())
        .await?
        .map(MenuItem::from)
        .ok_or(AppError::ItemNotFound)
}
