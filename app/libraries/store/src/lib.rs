//! Table access for `profiles`, `customers` and `orders`.

pub mod memory;
pub mod pg;

use app_error::AppError;
use app_schema::{
    customer::{Customer, NewCustomer},
    order::{NewOrder, Order, OrderChanges, OrderWithCustomer},
    profile::{NewProfile, Profile, Role},
};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[async_trait]
pub trait LaundryStore: Send + Sync {
    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Inserts the profile unless one with the same id exists; returns the stored row.
    async fn insert_profile(&self, profile: &NewProfile) -> Result<Profile, AppError>;

    async fn count_profiles(&self, role: Role) -> Result<i64, AppError>;

    async fn find_customer_by_profile(&self, profile_id: Uuid)
    -> Result<Option<Customer>, AppError>;

    /// Inserts the customer unless the profile already has one; returns the stored row.
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<Customer, AppError>;

    /// Orders of one customer, newest first.
    async fn list_orders(&self, customer_id: i64) -> Result<Vec<Order>, AppError>;

    /// Every order with its customer's contact details, newest first.
    async fn list_orders_with_customer(&self) -> Result<Vec<OrderWithCustomer>, AppError>;

    async fn find_order(&self, id: i64) -> Result<Option<Order>, AppError>;

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, AppError>;

    async fn update_order(&self, id: i64, changes: &OrderChanges)
    -> Result<Option<Order>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_order(&self, id: i64) -> Result<bool, AppError>;
}
