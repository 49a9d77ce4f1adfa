use axum::{Router, extract::State, routing::get};

use crate::{
    dto::menu::{HomePage, MenuPage, SuccessPage},
    error::AppError,
    response::{ApiResponse, Page, page, page_error},
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/menu", get(menu))
        .route("/success", get(success))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page with every menu item", body = ApiResponse<HomePage>)
    ),
    tag = "Menu"
)]
pub async fn home(State(state): State<AppState>) -> Page<HomePage> {
    match menu_service::list_menu_items(&state).await {
        Ok(menu) => page("Home", HomePage { menu }),
        Err(err) => page_error("Error loading home page", err),
    }
}

#[utoipa::path(
    get,
    path = "/menu",
    responses(
        (status = 200, description = "Categories and menu items", body = ApiResponse<MenuPage>)
    ),
    tag = "Menu"
)]
pub async fn menu(State(state): State<AppState>) -> Page<MenuPage> {
    let loaded = async {
        let categories = menu_service::list_categories(&state).await?;
        let items = menu_service::list_menu_items(&state).await?;
        Ok::<_, AppError>(MenuPage { categories, items })
    };
    match loaded.await {
        Ok(data) => page("Menu", data),
        Err(err) => page_error("Error loading menu", err),
    }
}

#[utoipa::path(
    get,
    path = "/success",
    responses(
        (status = 200, description = "Order confirmation", body = ApiResponse<SuccessPage>)
    ),
    tag = "Orders"
)]
pub async fn success() -> Page<SuccessPage> {
    page(
        "Order placed",
        SuccessPage {
            message: "Thank you! Your order has been placed.".into(),
        },
    )
}
