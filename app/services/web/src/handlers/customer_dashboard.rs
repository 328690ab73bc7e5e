use crate::{
    handlers::{OrderForm, OrderRow, PageQuery},
    notice::{Banner, Notice},
};
use app_dto::{
    auth::identity::Identity,
    order::{FIELDS_REQUIRED, OrderFormInput, OrderInput},
    stats::CustomerStats,
};
use app_error::AppError;
use app_gemini::GREETING;
use app_laundry::{
    account::ensure_customer,
    guard::{ADMIN_DASHBOARD_ROUTE, CUSTOMER_DASHBOARD_ROUTE},
    orders::{create_order, delete_own_order, find_own_order, list_own_orders, update_own_order},
    stats::customer_stats,
};
use app_schema::customer::Customer;
use app_state::AppState;
use askama::Template;
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::*;

const ORDERS_ROUTE: &str = "/customer-dashboard/orders";

#[derive(Template)]
#[template(path = "customer_dashboard.html")]
struct CustomerDashboardPage {
    name: String,
    banner: Banner,
    admin_link: String,
    stats: CustomerStats,
    orders: Vec<OrderRow>,
    form: OrderForm,
    greeting: &'static str,
}

fn order_action(id: i64) -> String {
    format!("{}/{}", ORDERS_ROUTE, id)
}

fn admin_link(identity: &Identity) -> String {
    if identity.role.is_admin() {
        ADMIN_DASHBOARD_ROUTE.to_owned()
    } else {
        format!(
            "{}?notice={}",
            CUSTOMER_DASHBOARD_ROUTE,
            Notice::AdminOnly.code()
        )
    }
}

pub async fn get_customer_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let store = state.store.as_ref();
    let mut notice = query.notice();
    let mut orders = Vec::new();
    let mut form = OrderForm::blank(ORDERS_ROUTE);
    let mut name = identity.name.clone().unwrap_or_default();

    match ensure_customer(store, &identity).await {
        Err(e) => {
            error!("Cannot initialize customer {}: {}", identity.user_id, e);
            notice = Some(Notice::AccountInitFailed);
        }
        Ok(customer) => {
            name = customer.name.clone();
            match list_own_orders(store, &customer).await {
                Ok(list) => orders = list,
                Err(e) => {
                    error!("Cannot load orders of customer {}: {}", customer.id, e);
                    notice = Some(Notice::DashboardLoadFailed);
                }
            }
            if let Some(id) = query.edit_id() {
                match find_own_order(store, &customer, id).await {
                    Ok(order) => form = OrderForm::edit(order_action(order.id), &order),
                    Err(e) => debug!("Ignoring edit of order {}: {}", id, e.message),
                }
            }
        }
    }

    let page = CustomerDashboardPage {
        name,
        banner: Banner::from(notice),
        admin_link: admin_link(&identity),
        stats: customer_stats(&orders),
        orders: orders.iter().map(OrderRow::from).collect(),
        form,
        greeting: GREETING,
    };
    Ok(Html(page.render()?))
}

async fn current_customer(state: &AppState, identity: &Identity) -> Result<Customer, AppError> {
    ensure_customer(state.store.as_ref(), identity).await
}

fn save_failed(e: &AppError) -> Notice {
    if e.message == FIELDS_REQUIRED {
        Notice::FieldsRequired
    } else {
        Notice::OrderSaveFailed
    }
}

fn back(notice: Notice) -> Response {
    notice.redirect(CUSTOMER_DASHBOARD_ROUTE).into_response()
}

pub async fn post_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Form(args): Form<OrderFormInput>,
) -> Response {
    let result = async {
        let customer = current_customer(&state, &identity).await?;
        let input = OrderInput::try_from(args)?;
        create_order(state.store.as_ref(), &customer, &input).await
    }
    .await;
    match result {
        Ok(_) => back(Notice::OrderCreated),
        Err(e) => {
            warn!("Order from {} not saved: {}", identity.email, e.message);
            back(save_failed(&e))
        }
    }
}

pub async fn post_order_update(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Form(args): Form<OrderFormInput>,
) -> Response {
    let result = async {
        let customer = current_customer(&state, &identity).await?;
        let input = OrderInput::try_from(args)?;
        update_own_order(state.store.as_ref(), &customer, id, &input).await
    }
    .await;
    match result {
        Ok(_) => back(Notice::OrderUpdated),
        Err(e) => {
            warn!("Order {} of {} not updated: {}", id, identity.email, e.message);
            back(save_failed(&e))
        }
    }
}

pub async fn post_order_delete(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Response {
    let result = async {
        let customer = current_customer(&state, &identity).await?;
        delete_own_order(state.store.as_ref(), &customer, id).await
    }
    .await;
    match result {
        Ok(()) => back(Notice::OrderDeleted),
        Err(e) => {
            warn!("Order {} of {} not deleted: {}", id, identity.email, e.message);
            back(Notice::OrderDeleteFailed)
        }
    }
}
