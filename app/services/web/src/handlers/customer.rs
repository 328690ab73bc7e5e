use crate::{
    handlers::{OrderForm, OrderRow, PageQuery},
    notice::{Banner, Notice},
};
use app_dto::order::{AdminOrderFormInput, AdminOrderInput};
use app_error::AppError;
use app_laundry::orders::{admin_delete_order, admin_update_order, find_order, list_all_orders};
use app_state::AppState;
use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::*;

const CUSTOMER_ROUTE: &str = "/customer";

#[derive(Template)]
#[template(path = "customer.html")]
struct CustomerPage {
    banner: Banner,
    orders: Vec<OrderRow>,
    form: Option<OrderForm>,
}

/// Every order with its customer, newest first.
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let store = state.store.as_ref();
    let mut notice = query.notice();
    let orders = match list_all_orders(store).await {
        Ok(orders) => orders,
        Err(e) => {
            error!("Cannot load orders: {}", e);
            notice = Some(Notice::OrdersLoadFailed);
            Vec::new()
        }
    };
    let form = match query.edit_id() {
        Some(id) => match find_order(store, id).await {
            Ok(order) => Some(OrderForm::edit(
                format!("{}/orders/{}", CUSTOMER_ROUTE, order.id),
                &order,
            )),
            Err(e) => {
                debug!("Ignoring edit of order {}: {}", id, e.message);
                None
            }
        },
        None => None,
    };

    let page = CustomerPage {
        banner: Banner::from(notice),
        orders: orders.iter().map(OrderRow::from).collect(),
        form,
    };
    Ok(Html(page.render()?))
}

fn back(notice: Notice) -> Response {
    notice.redirect(CUSTOMER_ROUTE).into_response()
}

pub async fn post_customer_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(args): Form<AdminOrderFormInput>,
) -> Response {
    let result = async {
        let input = AdminOrderInput::try_from(args)?;
        admin_update_order(state.store.as_ref(), id, &input).await
    }
    .await;
    match result {
        Ok(_) => back(Notice::AdminOrderUpdated),
        Err(e) => {
            warn!("Order {} not updated: {}", id, e.message);
            back(Notice::AdminOrderUpdateFailed)
        }
    }
}

pub async fn post_customer_order_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    match admin_delete_order(state.store.as_ref(), id).await {
        Ok(()) => back(Notice::AdminOrderDeleted),
        Err(e) => {
            warn!("Order {} not deleted: {}", id, e.message);
            back(Notice::AdminOrderDeleteFailed)
        }
    }
}
