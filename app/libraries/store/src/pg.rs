use crate::LaundryStore;
use app_error::AppError;
use app_schema::{
    customer::{Customer, NewCustomer},
    order::{NewOrder, Order, OrderChanges, OrderWithCustomer},
    profile::{NewProfile, Profile, Role},
};
use async_trait::async_trait;
use sqlx::{Pool, postgres::Postgres};
use tracing::*;
use uuid::Uuid;

pub struct PgStore {
    pg: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pg: Pool<Postgres>) -> Self {
        Self { pg }
    }

    /// Creates the tables when they do not exist yet.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::raw_sql(include_str!("../../../SQL/schema.sql"))
            .execute(&self.pg)
            .await?;
        info!("Database schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl LaundryStore for PgStore {
    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let res = sqlx::query_as::<_, Profile>(&format!("{} WHERE id = $1", Profile::select_base()))
            .bind(id)
            .fetch_optional(&self.pg)
            .await?;
        Ok(res)
    }

    async fn insert_profile(&self, profile: &NewProfile) -> Result<Profile, AppError> {
        let inserted = sqlx::query_as::<_, Profile>(Profile::insert_query())
            .bind(profile.id)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(profile.role.as_str())
            .fetch_optional(&self.pg)
            .await?;
        match inserted {
            Some(row) => {
                debug!("INSERT profile: {}", row.id);
                Ok(row)
            }
            None => self
                .find_profile(profile.id)
                .await?
                .ok_or_else(|| AppError::internal("Profile vanished after insert conflict")),
        }
    }

    async fn count_profiles(&self, role: Role) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(Profile::count_by_role_query())
            .bind(role.as_str())
            .fetch_one(&self.pg)
            .await?;
        Ok(count)
    }

    async fn find_customer_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<Customer>, AppError> {
        let res = sqlx::query_as::<_, Customer>(&format!(
            "{} WHERE profile_id = $1",
            Customer::select_base()
        ))
        .bind(profile_id)
        .fetch_optional(&self.pg)
        .await?;
        Ok(res)
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<Customer, AppError> {
        let inserted = sqlx::query_as::<_, Customer>(Customer::insert_query())
            .bind(customer.profile_id)
            .bind(&customer.name)
            .bind(&customer.email)
            .fetch_optional(&self.pg)
            .await?;
        match inserted {
            Some(row) => {
                debug!("INSERT customer: {} for profile {}", row.id, row.profile_id);
                Ok(row)
            }
            None => self
                .find_customer_by_profile(customer.profile_id)
                .await?
                .ok_or_else(|| AppError::internal("Customer vanished after insert conflict")),
        }
    }

    async fn list_orders(&self, customer_id: i64) -> Result<Vec<Order>, AppError> {
        let res = sqlx::query_as::<_, Order>(&format!(
            "{} WHERE customer_id = $1 ORDER BY created_at DESC, id DESC",
            Order::select_base()
        ))
        .bind(customer_id)
        .fetch_all(&self.pg)
        .await?;
        Ok(res)
    }

    async fn list_orders_with_customer(&self) -> Result<Vec<OrderWithCustomer>, AppError> {
        let res = sqlx::query_as::<_, OrderWithCustomer>(Order::select_with_customer())
            .fetch_all(&self.pg)
            .await?;
        Ok(res)
    }

    async fn find_order(&self, id: i64) -> Result<Option<Order>, AppError> {
        let res = sqlx::query_as::<_, Order>(&format!("{} WHERE id = $1", Order::select_base()))
            .bind(id)
            .fetch_optional(&self.pg)
            .await?;
        Ok(res)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, AppError> {
        let row = sqlx::query_as::<_, Order>(Order::insert_query())
            .bind(order.customer_id)
            .bind(order.service_type.as_str())
            .bind(order.quantity)
            .bind(order.total)
            .bind(order.pickup_date)
            .bind(order.pickup_time)
            .bind(order.status.as_str())
            .fetch_one(&self.pg)
            .await?;
        debug!("INSERT order: {:?}", &row);
        Ok(row)
    }

    async fn update_order(
        &self,
        id: i64,
        changes: &OrderChanges,
    ) -> Result<Option<Order>, AppError> {
        let row = sqlx::query_as::<_, Order>(Order::update_query())
            .bind(id)
            .bind(changes.service_type.as_str())
            .bind(changes.quantity)
            .bind(changes.total)
            .bind(changes.pickup_date)
            .bind(changes.pickup_time)
            .bind(changes.status.as_str())
            .fetch_optional(&self.pg)
            .await?;
        debug!("UPDATE order {}: {:?}", id, &row);
        Ok(row)
    }

    async fn delete_order(&self, id: i64) -> Result<bool, AppError> {
        let res = sqlx::query(Order::delete_query())
            .bind(id)
            .execute(&self.pg)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
