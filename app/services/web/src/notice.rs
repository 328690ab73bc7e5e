use axum::response::Redirect;

/// One-shot message shown after an action, carried as `?notice=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SignedUp,
    OrderCreated,
    OrderUpdated,
    OrderDeleted,
    OrderSaveFailed,
    OrderDeleteFailed,
    FieldsRequired,
    AccountInitFailed,
    DashboardLoadFailed,
    AdminOnly,
    AdminOrderUpdated,
    AdminOrderUpdateFailed,
    AdminOrderDeleted,
    AdminOrderDeleteFailed,
    OrdersLoadFailed,
    StatsLoadFailed,
}

impl Notice {
    const ALL: [Notice; 16] = [
        Notice::SignedUp,
        Notice::OrderCreated,
        Notice::OrderUpdated,
        Notice::OrderDeleted,
        Notice::OrderSaveFailed,
        Notice::OrderDeleteFailed,
        Notice::FieldsRequired,
        Notice::AccountInitFailed,
        Notice::DashboardLoadFailed,
        Notice::AdminOnly,
        Notice::AdminOrderUpdated,
        Notice::AdminOrderUpdateFailed,
        Notice::AdminOrderDeleted,
        Notice::AdminOrderDeleteFailed,
        Notice::OrdersLoadFailed,
        Notice::StatsLoadFailed,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Notice::SignedUp => "signed_up",
            Notice::OrderCreated => "order_created",
            Notice::OrderUpdated => "order_updated",
            Notice::OrderDeleted => "order_deleted",
            Notice::OrderSaveFailed => "order_save_failed",
            Notice::OrderDeleteFailed => "order_delete_failed",
            Notice::FieldsRequired => "fields_required",
            Notice::AccountInitFailed => "account_init_failed",
            Notice::DashboardLoadFailed => "dashboard_load_failed",
            Notice::AdminOnly => "admin_only",
            Notice::AdminOrderUpdated => "admin_order_updated",
            Notice::AdminOrderUpdateFailed => "admin_order_update_failed",
            Notice::AdminOrderDeleted => "admin_order_deleted",
            Notice::AdminOrderDeleteFailed => "admin_order_delete_failed",
            Notice::OrdersLoadFailed => "orders_load_failed",
            Notice::StatsLoadFailed => "stats_load_failed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::SignedUp => "Account created! Please sign in.",
            Notice::OrderCreated => "Order created successfully!",
            Notice::OrderUpdated => "Order updated successfully!",
            Notice::OrderDeleted => "Order deleted successfully!",
            Notice::OrderSaveFailed => "Failed to save order!",
            Notice::OrderDeleteFailed => "Failed to delete order!",
            Notice::FieldsRequired => "All fields are required!",
            Notice::AccountInitFailed => "Failed to initialize your account!",
            Notice::DashboardLoadFailed => "Failed to load dashboard data",
            Notice::AdminOnly => "You can't access the Admin Dashboard!",
            Notice::AdminOrderUpdated => "Order updated!",
            Notice::AdminOrderUpdateFailed => "Failed to update order.",
            Notice::AdminOrderDeleted => "Order deleted!",
            Notice::AdminOrderDeleteFailed => "Failed to delete order.",
            Notice::OrdersLoadFailed => "Failed to load orders.",
            Notice::StatsLoadFailed => "Failed to load statistics",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Notice::OrderSaveFailed
                | Notice::OrderDeleteFailed
                | Notice::FieldsRequired
                | Notice::AccountInitFailed
                | Notice::DashboardLoadFailed
                | Notice::AdminOnly
                | Notice::AdminOrderUpdateFailed
                | Notice::AdminOrderDeleteFailed
                | Notice::OrdersLoadFailed
                | Notice::StatsLoadFailed
        )
    }

    /// Unknown codes are ignored.
    pub fn from_code(code: &str) -> Option<Notice> {
        Notice::ALL.into_iter().find(|n| n.code() == code)
    }

    pub fn redirect(self, route: &str) -> Redirect {
        Redirect::to(&format!("{}?notice={}", route, self.code()))
    }
}

/// What a page template needs to show a notice banner.
#[derive(Debug, Clone, Default)]
pub struct Banner {
    pub text: String,
    pub is_error: bool,
}

impl From<Option<Notice>> for Banner {
    fn from(notice: Option<Notice>) -> Self {
        match notice {
            Some(n) => Self {
                text: n.message().to_owned(),
                is_error: n.is_error(),
            },
            None => Self::default(),
        }
    }
}
