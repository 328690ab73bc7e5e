use crate::LaundryStore;
use app_error::AppError;
use app_schema::{
    customer::{Customer, NewCustomer},
    order::{NewOrder, Order, OrderChanges, OrderWithCustomer},
    profile::{NewProfile, Profile, Role},
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    customers: BTreeMap<i64, Customer>,
    orders: BTreeMap<i64, Order>,
    last_customer_id: i64,
    last_order_id: i64,
}

/// Process-local tables with the same semantics as the Postgres store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes a profile's role; returns `false` when the profile is unknown.
    pub fn set_role(&self, profile_id: Uuid, role: Role) -> bool {
        match self.tables.write().profiles.get_mut(&profile_id) {
            Some(profile) => {
                profile.role = role;
                true
            }
            None => false,
        }
    }
}

fn newest_first(a: &Order, b: &Order) -> std::cmp::Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

#[async_trait]
impl LaundryStore for MemoryStore {
    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self.tables.read().profiles.get(&id).cloned())
    }

    async fn insert_profile(&self, profile: &NewProfile) -> Result<Profile, AppError> {
        let mut tables = self.tables.write();
        let row = tables
            .profiles
            .entry(profile.id)
            .or_insert_with(|| Profile {
                id: profile.id,
                name: profile.name.clone(),
                email: profile.email.clone(),
                role: profile.role,
                created_at: Utc::now(),
            });
        Ok(row.clone())
    }

    async fn count_profiles(&self, role: Role) -> Result<i64, AppError> {
        let count = self
            .tables
            .read()
            .profiles
            .values()
            .filter(|p| p.role == role)
            .count();
        Ok(count as i64)
    }

    async fn find_customer_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<Customer>, AppError> {
        Ok(self
            .tables
            .read()
            .customers
            .values()
            .find(|c| c.profile_id == profile_id)
            .cloned())
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<Customer, AppError> {
        let mut tables = self.tables.write();
        if !tables.profiles.contains_key(&customer.profile_id) {
            return Err(AppError::bad_request("Profile does not exist"));
        }
        if let Some(existing) = tables
            .customers
            .values()
            .find(|c| c.profile_id == customer.profile_id)
        {
            return Ok(existing.clone());
        }
        tables.last_customer_id += 1;
        let row = Customer {
            id: tables.last_customer_id,
            profile_id: customer.profile_id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            created_at: Utc::now(),
        };
        tables.customers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_orders(&self, customer_id: i64) -> Result<Vec<Order>, AppError> {
        let mut orders: Vec<Order> = self
            .tables
            .read()
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(newest_first);
        Ok(orders)
    }

    async fn list_orders_with_customer(&self) -> Result<Vec<OrderWithCustomer>, AppError> {
        let tables = self.tables.read();
        let mut orders: Vec<Order> = tables.orders.values().cloned().collect();
        orders.sort_by(newest_first);
        let res = orders
            .into_iter()
            .filter_map(|order| {
                let customer = tables.customers.get(&order.customer_id)?;
                let (customer_name, customer_email) = match tables.profiles.get(&customer.profile_id)
                {
                    Some(profile) => (profile.name.clone(), profile.email.clone()),
                    None => (customer.name.clone(), customer.email.clone()),
                };
                Some(OrderWithCustomer {
                    order,
                    customer_name,
                    customer_email,
                })
            })
            .collect();
        Ok(res)
    }

    async fn find_order(&self, id: i64) -> Result<Option<Order>, AppError> {
        Ok(self.tables.read().orders.get(&id).cloned())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, AppError> {
        let mut tables = self.tables.write();
        if !tables.customers.contains_key(&order.customer_id) {
            return Err(AppError::bad_request("Customer does not exist"));
        }
        tables.last_order_id += 1;
        let row = Order {
            id: tables.last_order_id,
            customer_id: order.customer_id,
            service_type: order.service_type,
            quantity: order.quantity,
            total: order.total,
            pickup_date: order.pickup_date,
            pickup_time: order.pickup_time,
            status: order.status,
            created_at: Utc::now(),
        };
        tables.orders.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_order(
        &self,
        id: i64,
        changes: &OrderChanges,
    ) -> Result<Option<Order>, AppError> {
        let mut tables = self.tables.write();
        Ok(tables.orders.get_mut(&id).map(|order| {
            order.service_type = changes.service_type;
            order.quantity = changes.quantity;
            order.total = changes.total;
            order.pickup_date = changes.pickup_date;
            order.pickup_time = changes.pickup_time;
            order.status = changes.status;
            order.clone()
        }))
    }

    async fn delete_order(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().orders.remove(&id).is_some())
    }
}
