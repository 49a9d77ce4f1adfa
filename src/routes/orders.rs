use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
    routing::post,
};

use crate::{
    dto::orders::{OrderItemForm, OrderPage, SubmitOrder, SubmitOrderForm},
    error::AppResult,
    response::{ApiResponse, Page, page, page_error_with},
    routes::form_fields,
    services::{menu_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order", post(order_form))
        .route("/order/submit", post(submit_order))
}

#[utoipa::path(
    post,
    path = "/order",
    request_body(content = OrderItemForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Order form for one menu item", body = ApiResponse<OrderPage>)
    ),
    tag = "Orders"
)]
pub async fn order_form(
    State(state): State<AppState>,
    form: Result<Form<OrderItemForm>, FormRejection>,
) -> Page<OrderPage> {
    let item_id = form_fields(form).and_then(|form| form.item_id());
    let requested = item_id.as_ref().ok().copied();
    let loaded: AppResult<OrderPage> = async {
        let item = menu_service::get_menu_item(&state, item_id?).await?;
        Ok(OrderPage {
            item_id: Some(item.item_id),
            item: Some(item),
        })
    }
    .await;

    match loaded {
        Ok(data) => page("Place order", data),
        Err(err) => page_error_with(
            "Error loading order page",
            err,
            OrderPage {
                item: None,
                item_id: requested,
            },
        ),
    }
}

#[utoipa::path(
    post,
    path = "/order/submit",
    request_body(content = SubmitOrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Order placed, redirect to /success"),
        (status = 200, description = "Order form re-rendered with an error", body = ApiResponse<OrderPage>)
    ),
    tag = "Orders"
)]
pub async fn submit_order(
    State(state): State<AppState>,
    form: Result<Form<SubmitOrderForm>, FormRejection>,
) -> Response {
    let form = form_fields(form);
    let item_id = form
        .as_ref()
        .ok()
        .and_then(|form| form.item_id.trim().parse::<i32>().ok());

    let placed = match form.and_then(SubmitOrder::try_from) {
        Ok(order) => order_service::submit_order(&state, order).await,
        Err(err) => Err(err),
    };

    match placed {
        Ok(_) => Redirect::to("/success").into_response(),
        Err(err) => page_error_with(
            "Error submitting order",
            err,
            OrderPage { item: None, item_id },
        )
        .into_response(),
    }
}
