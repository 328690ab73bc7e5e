use app_dto::order::{AdminOrderInput, FIELDS_REQUIRED, OrderInput};
use app_error::AppError;
use app_schema::{
    customer::Customer,
    order::{NewOrder, Order, OrderChanges, OrderStatus, OrderWithCustomer},
};
use app_store::LaundryStore;
use tracing::*;

pub const ORDER_NOT_FOUND: &str = "Order not found";
pub const QUANTITY_TOO_SMALL: &str = "Quantity must be at least 1";

/// Checks required fields and prices the order. `fallback_status` is used when
/// the input carries none.
pub fn price_order(
    input: &OrderInput,
    fallback_status: OrderStatus,
) -> Result<OrderChanges, AppError> {
    let (service_type, quantity, pickup_date, pickup_time) = match (
        input.service_type,
        input.quantity,
        input.pickup_date,
        input.pickup_time,
    ) {
        (Some(service), Some(quantity), Some(date), Some(time)) if quantity != 0 => {
            (service, quantity, date, time)
        }
        _ => return Err(AppError::bad_request(FIELDS_REQUIRED)),
    };
    let quantity = checked_quantity(quantity)?;
    Ok(OrderChanges {
        service_type,
        quantity,
        total: service_type.total(quantity),
        pickup_date,
        pickup_time,
        status: input.status.unwrap_or(fallback_status),
    })
}

fn checked_quantity(quantity: i32) -> Result<i32, AppError> {
    if quantity < 1 {
        return Err(AppError::bad_request(QUANTITY_TOO_SMALL));
    }
    Ok(quantity)
}

pub async fn list_own_orders(
    store: &dyn LaundryStore,
    customer: &Customer,
) -> Result<Vec<Order>, AppError> {
    store.list_orders(customer.id).await
}

/// The customer's order, or 404 when it does not exist or belongs to someone else.
pub async fn find_own_order(
    store: &dyn LaundryStore,
    customer: &Customer,
    id: i64,
) -> Result<Order, AppError> {
    match store.find_order(id).await? {
        Some(order) if order.customer_id == customer.id => Ok(order),
        Some(_) => {
            warn!(
                "Customer {} asked for order {} owned by someone else",
                customer.id, id
            );
            Err(AppError::not_found(ORDER_NOT_FOUND))
        }
        None => Err(AppError::not_found(ORDER_NOT_FOUND)),
    }
}

pub async fn create_order(
    store: &dyn LaundryStore,
    customer: &Customer,
    input: &OrderInput,
) -> Result<Order, AppError> {
    let priced = price_order(input, OrderStatus::Pending)?;
    let order = store
        .insert_order(&NewOrder {
            customer_id: customer.id,
            service_type: priced.service_type,
            quantity: priced.quantity,
            total: priced.total,
            pickup_date: priced.pickup_date,
            pickup_time: priced.pickup_time,
            status: priced.status,
        })
        .await?;
    info!(
        "Customer {} placed order {} ({} x {} = {})",
        customer.id, order.id, order.quantity, order.service_type, order.total
    );
    Ok(order)
}

pub async fn update_own_order(
    store: &dyn LaundryStore,
    customer: &Customer,
    id: i64,
    input: &OrderInput,
) -> Result<Order, AppError> {
    let existing = find_own_order(store, customer, id).await?;
    let priced = price_order(input, existing.status)?;
    let order = store
        .update_order(id, &priced)
        .await?
        .ok_or_else(|| AppError::not_found(ORDER_NOT_FOUND))?;
    info!("Customer {} updated order {}", customer.id, id);
    Ok(order)
}

pub async fn delete_own_order(
    store: &dyn LaundryStore,
    customer: &Customer,
    id: i64,
) -> Result<(), AppError> {
    find_own_order(store, customer, id).await?;
    if !store.delete_order(id).await? {
        return Err(AppError::not_found(ORDER_NOT_FOUND));
    }
    info!("Customer {} deleted order {}", customer.id, id);
    Ok(())
}

pub async fn list_all_orders(store: &dyn LaundryStore) -> Result<Vec<OrderWithCustomer>, AppError> {
    store.list_orders_with_customer().await
}

pub async fn find_order(store: &dyn LaundryStore, id: i64) -> Result<Order, AppError> {
    store
        .find_order(id)
        .await?
        .ok_or_else(|| AppError::not_found(ORDER_NOT_FOUND))
}

/// Admin edit: new quantity and status, total re-priced from the stored service.
pub async fn admin_update_order(
    store: &dyn LaundryStore,
    id: i64,
    input: &AdminOrderInput,
) -> Result<Order, AppError> {
    let existing = find_order(store, id).await?;
    let quantity = checked_quantity(input.quantity)?;
    let changes = OrderChanges {
        quantity,
        total: existing.service_type.total(quantity),
        status: input.status,
        ..OrderChanges::from(&existing)
    };
    let order = store
        .update_order(id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found(ORDER_NOT_FOUND))?;
    info!("Admin updated order {} to {} ({})", id, order.status, order.total);
    Ok(order)
}

pub async fn admin_delete_order(store: &dyn LaundryStore, id: i64) -> Result<(), AppError> {
    if !store.delete_order(id).await? {
        return Err(AppError::not_found(ORDER_NOT_FOUND));
    }
    info!("Admin deleted order {}", id);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{account::ensure_customer, stats::customer_stats};
    use app_dto::auth::identity::Identity;
    use app_schema::{order::ServiceType, profile::Role};
    use app_store::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn input(service: ServiceType, quantity: i32) -> OrderInput {
        OrderInput {
            service_type: Some(service),
            quantity: Some(quantity),
            pickup_date: NaiveDate::from_ymd_opt(2026, 10, 21),
            pickup_time: NaiveTime::from_hms_opt(10, 0, 0),
            status: None,
        }
    }

    async fn customer(store: &MemoryStore, email: &str) -> Customer {
        let identity = Identity {
            user_id: Uuid::new_v4(),
            email: email.to_owned(),
            name: Some(email.to_owned()),
            role: Role::Customer,
            access_token: String::new(),
        };
        ensure_customer(store, &identity).await.unwrap()
    }

    #[test]
    fn pricing_requires_every_field() {
        let mut missing = input(ServiceType::WashAndFold, 2);
        missing.pickup_time = None;
        assert_eq!(
            price_order(&missing, OrderStatus::Pending).unwrap_err().message,
            FIELDS_REQUIRED
        );
        let zero = input(ServiceType::WashAndFold, 0);
        assert_eq!(
            price_order(&zero, OrderStatus::Pending).unwrap_err().message,
            FIELDS_REQUIRED
        );
        let negative = input(ServiceType::WashAndFold, -2);
        assert_eq!(
            price_order(&negative, OrderStatus::Pending).unwrap_err().message,
            QUANTITY_TOO_SMALL
        );
    }

    #[test]
    fn pricing_uses_the_service_rate() {
        for (service, rate) in [
            (ServiceType::WashAndFold, 50),
            (ServiceType::IroningAndPressing, 30),
            (ServiceType::DryCleaning, 150),
        ] {
            let priced = price_order(&input(service, 4), OrderStatus::Pending).unwrap();
            assert_eq!(priced.total, 4 * rate);
            assert_eq!(priced.status, OrderStatus::Pending);
        }
    }

    #[tokio::test]
    async fn lifecycle_keeps_list_and_stats_in_step() {
        let store = MemoryStore::new();
        let ana = customer(&store, "ana@example.com").await;

        let order = create_order(&store, &ana, &input(ServiceType::WashAndFold, 3))
            .await
            .unwrap();
        assert_eq!(order.total, 150);
        assert_eq!(order.status, OrderStatus::Pending);

        let mut edit = input(ServiceType::DryCleaning, 2);
        edit.status = Some(OrderStatus::Completed);
        let updated = update_own_order(&store, &ana, order.id, &edit).await.unwrap();
        assert_eq!(updated.total, 300);
        assert_eq!(updated.service_type, ServiceType::DryCleaning);

        let listed = list_own_orders(&store, &ana).await.unwrap();
        assert_eq!(listed, vec![updated.clone()]);
        let stats = customer_stats(&listed);
        assert_eq!((stats.total_orders, stats.completed, stats.pending), (1, 1, 0));

        delete_own_order(&store, &ana, order.id).await.unwrap();
        let listed = list_own_orders(&store, &ana).await.unwrap();
        assert!(listed.is_empty());
        assert_eq!(customer_stats(&listed).total_orders, 0);
    }

    #[tokio::test]
    async fn edit_without_status_keeps_current_status() {
        let store = MemoryStore::new();
        let ana = customer(&store, "ana@example.com").await;
        let order = create_order(&store, &ana, &input(ServiceType::WashAndFold, 1))
            .await
            .unwrap();
        admin_update_order(
            &store,
            order.id,
            &AdminOrderInput {
                quantity: 1,
                status: OrderStatus::Completed,
            },
        )
        .await
        .unwrap();
        let updated = update_own_order(&store, &ana, order.id, &input(ServiceType::WashAndFold, 5))
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
        assert_eq!(updated.total, 250);
    }

    #[tokio::test]
    async fn customers_cannot_touch_each_others_orders() {
        let store = MemoryStore::new();
        let ana = customer(&store, "ana@example.com").await;
        let bo = customer(&store, "bo@example.com").await;
        let order = create_order(&store, &ana, &input(ServiceType::IroningAndPressing, 2))
            .await
            .unwrap();

        let err = update_own_order(&store, &bo, order.id, &input(ServiceType::DryCleaning, 9))
            .await
            .unwrap_err();
        assert_eq!(err.message, ORDER_NOT_FOUND);
        let err = delete_own_order(&store, &bo, order.id).await.unwrap_err();
        assert_eq!(err.message, ORDER_NOT_FOUND);
        assert_eq!(find_order(&store, order.id).await.unwrap().total, 60);
    }

    #[tokio::test]
    async fn admin_edit_reprices_from_stored_service() {
        let store = MemoryStore::new();
        let ana = customer(&store, "ana@example.com").await;
        let order = create_order(&store, &ana, &input(ServiceType::DryCleaning, 1))
            .await
            .unwrap();

        let updated = admin_update_order(
            &store,
            order.id,
            &AdminOrderInput {
                quantity: 3,
                status: OrderStatus::Completed,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.total, 450);
        assert_eq!(updated.pickup_date, order.pickup_date);

        let all = list_all_orders(&store).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].customer_email, "ana@example.com");

        admin_delete_order(&store, order.id).await.unwrap();
        let err = admin_delete_order(&store, order.id).await.unwrap_err();
        assert_eq!(err.message, ORDER_NOT_FOUND);
    }
}
