use app_dto::stats::{AdminStats, CustomerStats};
use app_error::AppError;
use app_schema::{
    order::{Order, OrderStatus},
    profile::Role,
};
use app_store::LaundryStore;

fn count_status<'a>(orders: impl Iterator<Item = &'a Order>, status: OrderStatus) -> usize {
    orders.filter(|o| o.status == status).count()
}

pub fn customer_stats(orders: &[Order]) -> CustomerStats {
    CustomerStats {
        total_orders: orders.len(),
        completed: count_status(orders.iter(), OrderStatus::Completed),
        pending: count_status(orders.iter(), OrderStatus::Pending),
    }
}

pub fn admin_stats(orders: &[Order], total_customers: i64) -> AdminStats {
    AdminStats {
        total_orders: orders.len(),
        total_customers,
        total_revenue: orders.iter().map(|o| o.total).sum(),
        completed: count_status(orders.iter(), OrderStatus::Completed),
        pending: count_status(orders.iter(), OrderStatus::Pending),
    }
}

/// Aggregates over every order; customers are profiles with the customer role.
pub async fn load_admin_stats(store: &dyn LaundryStore) -> Result<AdminStats, AppError> {
    let orders: Vec<Order> = store
        .list_orders_with_customer()
        .await?
        .into_iter()
        .map(|row| row.order)
        .collect();
    let total_customers = store.count_profiles(Role::Customer).await?;
    Ok(admin_stats(&orders, total_customers))
}

#[cfg(test)]
mod test {
    use super::*;
    use app_schema::order::ServiceType;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn order(id: i64, service: ServiceType, quantity: i32, status: OrderStatus) -> Order {
        Order {
            id,
            customer_id: 1,
            service_type: service,
            quantity,
            total: service.total(quantity),
            pickup_date: NaiveDate::from_ymd_opt(2026, 10, 22).unwrap(),
            pickup_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_history_is_all_zero() {
        assert_eq!(customer_stats(&[]), CustomerStats::default());
        assert_eq!(admin_stats(&[], 0), AdminStats::default());
    }

    #[test]
    fn counts_statuses_and_sums_revenue() {
        let orders = vec![
            order(1, ServiceType::WashAndFold, 2, OrderStatus::Pending),
            order(2, ServiceType::DryCleaning, 1, OrderStatus::Completed),
            order(3, ServiceType::IroningAndPressing, 5, OrderStatus::Completed),
        ];
        let stats = customer_stats(&orders);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 1);

        let stats = admin_stats(&orders, 7);
        assert_eq!(stats.total_customers, 7);
        assert_eq!(stats.total_revenue, 100 + 150 + 150);
    }
}
