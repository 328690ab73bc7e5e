use crate::ParseEnumError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// The three services the shop sells, each with a fixed per-unit rate in pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Charged per kilogram.
    #[serde(rename = "Wash & Fold")]
    WashAndFold,
    /// Charged per piece.
    #[serde(rename = "Ironing & Pressing")]
    IroningAndPressing,
    /// Charged per piece.
    #[serde(rename = "Dry Cleaning")]
    DryCleaning,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [
        ServiceType::WashAndFold,
        ServiceType::IroningAndPressing,
        ServiceType::DryCleaning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::WashAndFold => "Wash & Fold",
            ServiceType::IroningAndPressing => "Ironing & Pressing",
            ServiceType::DryCleaning => "Dry Cleaning",
        }
    }

    pub fn rate(&self) -> i64 {
        match self {
            ServiceType::WashAndFold => 50,
            ServiceType::IroningAndPressing => 30,
            ServiceType::DryCleaning => 150,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ServiceType::WashAndFold => "kg",
            ServiceType::IroningAndPressing | ServiceType::DryCleaning => "piece",
        }
    }

    /// `quantity * rate`.
    pub fn total(&self, quantity: i32) -> i64 {
        i64::from(quantity) * self.rate()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("service type", s))
    }
}

impl TryFrom<String> for ServiceType {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 2] = [OrderStatus::Pending, OrderStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Completed" => Ok(OrderStatus::Completed),
            other => Err(ParseEnumError::new("order status", other)),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    #[sqlx(try_from = "String")]
    pub service_type: ServiceType,
    pub quantity: i32,
    pub total: i64,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An order joined with the owning customer's contact details (admin view).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderWithCustomer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub customer_name: String,
    pub customer_email: String,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub service_type: ServiceType,
    pub quantity: i32,
    pub total: i64,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub status: OrderStatus,
}

/// Replacement values for every mutable column of an order.
#[derive(Debug, Clone)]
pub struct OrderChanges {
    pub service_type: ServiceType,
    pub quantity: i32,
    pub total: i64,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub status: OrderStatus,
}

impl From<&Order> for OrderChanges {
    fn from(order: &Order) -> Self {
        Self {
            service_type: order.service_type,
            quantity: order.quantity,
            total: order.total,
            pickup_date: order.pickup_date,
            pickup_time: order.pickup_time,
            status: order.status,
        }
    }
}

impl Order {
    #[inline]
    pub fn select_base() -> &'static str {
        include_str!("../../../SQL/orders/select_base.sql")
    }

    #[inline]
    pub fn select_with_customer() -> &'static str {
        include_str!("../../../SQL/orders/select_with_customer.sql")
    }

    #[inline]
    pub fn insert_query() -> &'static str {
        include_str!("../../../SQL/orders/insert.sql")
    }

    #[inline]
    pub fn update_query() -> &'static str {
        include_str!("../../../SQL/orders/update.sql")
    }

    #[inline]
    pub fn delete_query() -> &'static str {
        include_str!("../../../SQL/orders/delete.sql")
    }
}
