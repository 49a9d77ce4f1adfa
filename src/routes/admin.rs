use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::{
    dto::admin::{
        AddCategoryForm, AddItemForm, AddItemPage, CategoriesPage, DeleteCategoryForm,
        DeleteItemForm, NewMenuItem, OrdersPage,
    },
    error::AppError,
    middleware::auth::CurrentAdmin,
    response::{ApiResponse, Meta, Page, page, page_error},
    routes::form_fields,
    services::{admin_service, menu_service},
    state::AppState,
};

/// Admin pages. Mounted under `/admin` behind the session guard.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addItem", get(add_item_page).post(add_item))
        .route("/deleteItem", post(delete_item))
        .route("/categories", get(categories_page))
        .route("/addCategory", post(add_category))
        .route("/deleteCategory", post(delete_category))
        .route("/orders", get(orders_page))
}

#[utoipa::path(
    get,
    path = "/admin/addItem",
    responses(
        (status = 200, description = "Menu items and categories", body = ApiResponse<AddItemPage>),
        (status = 303, description = "No admin session, redirect to /admin/login")
    ),
    tag = "Admin"
)]
pub async fn add_item_page(State(state): State<AppState>, _admin: CurrentAdmin) -> Page<AddItemPage> {
    let loaded = async {
        let categories = menu_service::list_categories(&state).await?;
        let items = menu_service::list_menu_items(&state).await?;
        Ok::<_, AppError>(AddItemPage { categories, items })
    };
    match loaded.await {
        Ok(data) => page("Add item", data),
        Err(err) => page_error("Error loading add item page", err),
    }
}

#[utoipa::path(
    post,
    path = "/admin/addItem",
    request_body(content = AddItemForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Item created, redirect to /admin/addItem"),
        (status = 200, description = "Page re-rendered with an error", body = ApiResponse<AddItemPage>)
    ),
    tag = "Admin"
)]
pub async fn add_item(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    form: Result<Form<AddItemForm>, FormRejection>,
) -> Response {
    let created = match form_fields(form).and_then(NewMenuItem::try_from) {
        Ok(item) => admin_service::create_item(&state, &admin, item).await,
        Err(err) => Err(err),
    };
    match created {
        Ok(_) => Redirect::to("/admin/addItem").into_response(),
        Err(err) => page_error::<AddItemPage>("Error adding menu item", err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/admin/deleteItem",
    request_body(content = DeleteItemForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Item deleted, redirect to /menu"),
        (status = 200, description = "Item in use or missing", body = ApiResponse<AddItemPage>)
    ),
    tag = "Admin"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    form: Result<Form<DeleteItemForm>, FormRejection>,
) -> Response {
    let deleted = match form_fields(form).and_then(|form| form.item_id()) {
        Ok(item_id) => admin_service::delete_item(&state, &admin, item_id).await,
        Err(err) => Err(err),
    };
    match deleted {
        Ok(()) => Redirect::to("/menu").into_response(),
        Err(err) => page_error::<AddItemPage>("Error deleting item", err).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/admin/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<CategoriesPage>),
        (status = 303, description = "No admin session, redirect to /admin/login")
    ),
    tag = "Admin"
)]
pub async fn categories_page(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Page<CategoriesPage> {
    match menu_service::list_categories(&state).await {
        Ok(categories) => page("Categories", CategoriesPage { categories }),
        Err(err) => page_error("Error loading categories", err),
    }
}

#[utoipa::path(
    post,
    path = "/admin/addCategory",
    request_body(content = AddCategoryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Category created, redirect to /admin/categories"),
        (status = 200, description = "Page re-rendered with an error", body = ApiResponse<CategoriesPage>)
    ),
    tag = "Admin"
)]
pub async fn add_category(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    form: Result<Form<AddCategoryForm>, FormRejection>,
) -> Response {
    let created = match form_fields(form).and_then(|form| form.category_name()) {
        Ok(name) => admin_service::create_category(&state, &admin, name).await,
        Err(err) => Err(err),
    };
    match created {
        Ok(_) => Redirect::to("/admin/categories").into_response(),
        Err(err) => page_error::<CategoriesPage>("Error adding category", err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/admin/deleteCategory",
    request_body(content = DeleteCategoryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Category deleted, redirect to /admin/categories"),
        (status = 200, description = "Page re-rendered with an error", body = ApiResponse<CategoriesPage>)
    ),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    form: Result<Form<DeleteCategoryForm>, FormRejection>,
) -> Response {
    let deleted = match form_fields(form).and_then(|form| form.category_id()) {
        Ok(category_id) => admin_service::delete_category(&state, &admin, category_id).await,
        Err(err) => Err(err),
    };
    match deleted {
        Ok(()) => Redirect::to("/admin/categories").into_response(),
        Err(err) => page_error::<CategoriesPage>("Error deleting category", err).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/admin/orders",
    responses(
        (status = 200, description = "All orders with their lines, newest first", body = ApiResponse<OrdersPage>),
        (status = 303, description = "No admin session, redirect to /admin/login")
    ),
    tag = "Admin"
)]
pub async fn orders_page(State(state): State<AppState>, _admin: CurrentAdmin) -> Page<OrdersPage> {
    match admin_service::list_orders(&state).await {
        Ok(orders) => {
            let meta = Meta::listing(orders.len());
            Json(ApiResponse::success("Orders", OrdersPage { orders }, Some(meta)))
        }
        Err(err) => page_error("Error loading orders", err),
    }
}
