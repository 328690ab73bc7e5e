use app_error::AppError;
use app_schema::order::{OrderStatus, ServiceType};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const FIELDS_REQUIRED: &str = "All fields are required!";

/// Order fields submitted by a customer. Missing fields are reported together
/// by validation rather than by the deserializer. Any client-side total is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderInput {
    #[serde(default)]
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub pickup_time: Option<NaiveTime>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Admin edits touch only quantity and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderInput {
    pub quantity: i32,
    pub status: OrderStatus,
}

/// The same order fields as posted by an HTML form: every value is text and
/// may be empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFormInput {
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub pickup_date: String,
    #[serde(default)]
    pub pickup_time: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminOrderFormInput {
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub status: String,
}

fn optional<T, F>(raw: &str, field: &str, parse: F) -> Result<Option<T>, AppError>
where
    F: FnOnce(&str) -> Option<T>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse(raw)
        .map(Some)
        .ok_or_else(|| AppError::bad_request(format!("Invalid {}: {}", field, raw)))
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn parse_status(raw: &str) -> Result<Option<OrderStatus>, AppError> {
    optional(raw, "status", |s| s.parse::<OrderStatus>().ok())
}

impl TryFrom<OrderFormInput> for OrderInput {
    type Error = AppError;

    fn try_from(form: OrderFormInput) -> Result<Self, Self::Error> {
        Ok(Self {
            service_type: optional(&form.service_type, "service", |s| {
                s.parse::<ServiceType>().ok()
            })?,
            quantity: optional(&form.quantity, "quantity", |s| s.parse::<i32>().ok())?,
            pickup_date: optional(&form.pickup_date, "pickup date", |s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
            })?,
            pickup_time: optional(&form.pickup_time, "pickup time", parse_time)?,
            status: parse_status(&form.status)?,
        })
    }
}

impl TryFrom<AdminOrderFormInput> for AdminOrderInput {
    type Error = AppError;

    fn try_from(form: AdminOrderFormInput) -> Result<Self, Self::Error> {
        let quantity = optional(&form.quantity, "quantity", |s| s.parse::<i32>().ok())?;
        let status = parse_status(&form.status)?;
        match (quantity, status) {
            (Some(quantity), Some(status)) => Ok(Self { quantity, status }),
            _ => Err(AppError::bad_request(FIELDS_REQUIRED)),
        }
    }
}
