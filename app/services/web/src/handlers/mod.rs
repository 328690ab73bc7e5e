pub mod admin_dashboard;
pub mod api;
pub mod customer;
pub mod customer_dashboard;
pub mod index;
pub mod login;
pub mod signup;

use crate::notice::Notice;
use app_schema::order::{Order, OrderStatus, OrderWithCustomer, ServiceType};
use serde::Deserialize;

/// `?notice=<code>&edit=<id>`, both optional and tolerant of junk.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub edit: Option<String>,
}

impl PageQuery {
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_code)
    }

    pub fn edit_id(&self) -> Option<i64> {
        self.edit.as_deref().and_then(|id| id.trim().parse().ok())
    }
}

pub fn peso(amount: i64) -> String {
    format!("\u{20b1}{}", amount)
}

pub struct SelectOption {
    pub value: &'static str,
    pub label: String,
    pub rate: i64,
    pub selected: bool,
}

fn service_options(selected: Option<ServiceType>) -> Vec<SelectOption> {
    ServiceType::ALL
        .into_iter()
        .map(|service| SelectOption {
            value: service.as_str(),
            label: format!("{} ({}/{})", service, peso(service.rate()), service.unit()),
            rate: service.rate(),
            selected: selected == Some(service),
        })
        .collect()
}

fn status_options(selected: OrderStatus) -> Vec<SelectOption> {
    OrderStatus::ALL
        .into_iter()
        .map(|status| SelectOption {
            value: status.as_str(),
            label: status.to_string(),
            rate: 0,
            selected: status == selected,
        })
        .collect()
}

/// One table row, preformatted for display.
pub struct OrderRow {
    pub id: i64,
    pub service: &'static str,
    pub quantity: i32,
    pub unit: &'static str,
    pub total: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub status: &'static str,
    pub completed: bool,
    pub customer_name: String,
    pub customer_email: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            service: order.service_type.as_str(),
            quantity: order.quantity,
            unit: order.service_type.unit(),
            total: peso(order.total),
            pickup_date: order.pickup_date.format("%Y-%m-%d").to_string(),
            pickup_time: order.pickup_time.format("%H:%M").to_string(),
            status: order.status.as_str(),
            completed: order.status == OrderStatus::Completed,
            customer_name: String::new(),
            customer_email: String::new(),
        }
    }
}

impl From<&OrderWithCustomer> for OrderRow {
    fn from(row: &OrderWithCustomer) -> Self {
        Self {
            customer_name: row.customer_name.clone(),
            customer_email: row.customer_email.clone(),
            ..OrderRow::from(&row.order)
        }
    }
}

/// The create/edit order form. `action` is where it posts.
pub struct OrderForm {
    pub action: String,
    pub editing: bool,
    pub order_id: i64,
    pub services: Vec<SelectOption>,
    pub service: &'static str,
    pub quantity: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub statuses: Vec<SelectOption>,
    pub total: String,
}

impl OrderForm {
    pub fn blank(action: &str) -> Self {
        Self {
            action: action.to_owned(),
            editing: false,
            order_id: 0,
            services: service_options(None),
            service: "",
            quantity: String::new(),
            pickup_date: String::new(),
            pickup_time: String::new(),
            statuses: status_options(OrderStatus::Pending),
            total: peso(0),
        }
    }

    pub fn edit(action: String, order: &Order) -> Self {
        Self {
            action,
            editing: true,
            order_id: order.id,
            services: service_options(Some(order.service_type)),
            service: order.service_type.as_str(),
            quantity: order.quantity.to_string(),
            pickup_date: order.pickup_date.format("%Y-%m-%d").to_string(),
            pickup_time: order.pickup_time.format("%H:%M").to_string(),
            statuses: status_options(order.status),
            total: peso(order.total),
        }
    }
}
