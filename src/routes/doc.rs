use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{
            AddCategoryForm, AddItemForm, AddItemPage, CategoriesPage, DeleteCategoryForm,
            DeleteItemForm, OrdersPage,
        },
        auth::{LoginForm, LoginPage},
        menu::{HomePage, MenuPage, SuccessPage},
        orders::{OrderItemForm, OrderPage, SubmitOrderForm},
    },
    models::{Category, MenuItem, OrderLine, OrderSummary},
    response::{ApiResponse, Meta},
    routes::{admin, auth, health, menu, orders},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        menu::home,
        menu::menu,
        menu::success,
        orders::order_form,
        orders::submit_order,
        auth::login_page,
        auth::login,
        auth::logout,
        admin::add_item_page,
        admin::add_item,
        admin::delete_item,
        admin::categories_page,
        admin::add_category,
        admin::delete_category,
        admin::orders_page
    ),
    components(
        schemas(
            Category,
            MenuItem,
            OrderLine,
            OrderSummary,
            OrderItemForm,
            SubmitOrderForm,
            LoginForm,
            AddItemForm,
            DeleteItemForm,
            AddCategoryForm,
            DeleteCategoryForm,
            HomePage,
            MenuPage,
            SuccessPage,
            OrderPage,
            LoginPage,
            AddItemPage,
            CategoriesPage,
            OrdersPage,
            Meta,
            ApiResponse<MenuPage>,
            ApiResponse<OrderPage>,
            ApiResponse<OrdersPage>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "Public menu pages"),
        (name = "Orders", description = "Customer ordering"),
        (name = "Auth", description = "Admin login and logout"),
        (name = "Admin", description = "Session-guarded admin pages"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
